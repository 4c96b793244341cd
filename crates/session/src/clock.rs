use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic issue counter for validation requests.
///
/// Every issued check captures [`SequenceClock::next`]; a completed check may
/// only apply its result while the captured value still equals
/// [`SequenceClock::current`] (last-issued-wins). Bumping the clock without
/// issuing a check invalidates everything outstanding, e.g. when a different
/// document is loaded.
#[derive(Debug, Default)]
pub(crate) struct SequenceClock {
	next: AtomicU64,
}

impl SequenceClock {
	/// Issues the next sequence number.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}

	/// Most recently issued sequence number.
	pub fn current(&self) -> u64 {
		self.next.load(Ordering::Acquire)
	}

	/// Invalidates every outstanding check without issuing a new one.
	pub fn invalidate(&self) {
		self.next();
	}
}
