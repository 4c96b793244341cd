//! Session orchestration: entry points, debounced validation, host calls.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::buffer::EditBuffer;
use crate::clock::SequenceClock;
use crate::error::{Result, SessionError};
use crate::gate::{self, GateDecision};
use crate::host::{NoteHost, SaveRequest};
use crate::validation::{ValidationOutcome, ValidationState, normalize_outcome};

/// Tunables for the editing session.
#[derive(Debug, Clone)]
pub struct SessionCfg {
	/// Quiescence window between the last buffer edit and the debounced
	/// validation call (trailing edge).
	pub debounce: Duration,
	/// Status written by a successful promotion.
	pub promote_target_status: String,
}

impl Default for SessionCfg {
	fn default() -> Self {
		Self {
			debounce: Duration::from_millis(400),
			promote_target_status: "canonical".to_string(),
		}
	}
}

/// Disposition of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
	/// The buffer was persisted under the returned identity.
	Saved { path: String },
	/// The save gate was closed; nothing was sent.
	NotReady,
	/// Forced pre-save validation came back invalid; nothing was sent.
	Rejected,
}

/// Disposition of a promote request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteOutcome {
	/// The document was promoted; the shell should reload from the returned
	/// identity.
	Promoted { path: String },
	/// The promote gate was closed; nothing was sent.
	NotReady,
}

struct SessionState {
	buffer: EditBuffer,
	validation: ValidationState,
	confirmation: String,
	daily_busy: bool,
	debounce: Option<JoinHandle<()>>,
}

struct SessionInner {
	host: Arc<dyn NoteHost>,
	cfg: SessionCfg,
	clock: SequenceClock,
	state: Mutex<SessionState>,
}

/// Orchestrates the edit buffer, background validation, and host calls for
/// one editing surface.
///
/// Cheap to clone; all clones share one session. The state mutex is never
/// held across an await: host calls run against a snapshot taken under the
/// lock, and their completions re-acquire it and pass the sequence check
/// before writing anything back. Entry points must be called from within a
/// tokio runtime (edits spawn the debounce timer task).
#[derive(Clone)]
pub struct SessionController {
	inner: Arc<SessionInner>,
}

impl SessionController {
	pub fn new(host: Arc<dyn NoteHost>) -> Self {
		Self::with_cfg(host, SessionCfg::default())
	}

	pub fn with_cfg(host: Arc<dyn NoteHost>, cfg: SessionCfg) -> Self {
		Self {
			inner: Arc::new(SessionInner {
				host,
				cfg,
				clock: SequenceClock::default(),
				state: Mutex::new(SessionState {
					buffer: EditBuffer::default(),
					validation: ValidationState::default(),
					confirmation: String::new(),
					daily_busy: false,
					debounce: None,
				}),
			}),
		}
	}

	// --- read-only snapshots for the rendering shell ---

	pub fn buffer(&self) -> EditBuffer {
		self.inner.state.lock().buffer.clone()
	}

	pub fn validation(&self) -> ValidationState {
		self.inner.state.lock().validation.clone()
	}

	/// Current save/promote gate decision.
	pub fn gates(&self) -> GateDecision {
		let st = self.inner.state.lock();
		gate::evaluate_gates(&st.buffer, &st.validation, &st.confirmation)
	}

	pub fn is_daily_busy(&self) -> bool {
		self.inner.state.lock().daily_busy
	}

	// --- synchronous entry points ---

	/// Applies a frontmatter field edit and schedules debounced validation.
	pub fn on_field_edit(&self, key: &str, raw: &str) {
		let mutated = self.inner.state.lock().buffer.set_field(key, raw);
		if mutated {
			self.schedule_validation();
		}
	}

	/// Replaces the body text and schedules debounced validation.
	pub fn on_body_edit(&self, text: &str) {
		let mutated = self.inner.state.lock().buffer.set_body(text);
		if mutated {
			self.schedule_validation();
		}
	}

	/// Stores the confirmation input consumed by the promote gate.
	pub fn set_promote_confirmation(&self, text: &str) {
		self.inner.state.lock().confirmation = text.to_string();
	}

	/// Clears the editor to the "no document" state, e.g. when the list
	/// empties, invalidating anything outstanding. The optional notice is
	/// shown by the shell in place of the document title.
	pub fn clear_editor(&self, notice: Option<&str>) {
		self.inner.clock.invalidate();
		self.clear_debounce();
		let mut st = self.inner.state.lock();
		match notice {
			Some(notice) => st.buffer.clear_with_notice(notice),
			None => st.buffer.clear(),
		}
		st.validation.reset();
		st.confirmation.clear();
	}

	// --- async operations ---

	/// Loads a document, replacing the buffer wholesale.
	///
	/// Outstanding validation for the previous document is invalidated
	/// before the new document's own forced (non-debounced) pass is issued,
	/// so no stale result can ever apply across a load. On failure the
	/// buffer is cleared with a notice; partial buffers are never shown.
	pub async fn load_document(&self, path: &str) -> Result<()> {
		self.inner.clock.invalidate();
		self.clear_debounce();

		match self.inner.host.fetch(path).await {
			Ok(doc) => {
				{
					let mut st = self.inner.state.lock();
					st.buffer.load(doc);
					st.validation.reset();
					st.confirmation.clear();
				}
				// Surface validity immediately rather than waiting for the
				// first keystroke.
				self.validate_now(true).await;
				Ok(())
			}
			Err(error) => {
				tracing::warn!(path = %path, error = %error, "document load failed");
				self.clear_editor(Some("Failed to load"));
				Err(SessionError::Load(error))
			}
		}
	}

	/// Persists the buffer if the save gate is open and a forced validation
	/// pass confirms the draft is valid.
	///
	/// On success the buffer adopts the persisted identity and is marked
	/// clean. On failure it stays dirty and validation state is untouched.
	pub async fn save(&self) -> Result<SaveOutcome> {
		{
			let st = self.inner.state.lock();
			let decision = gate::evaluate_gates(&st.buffer, &st.validation, &st.confirmation);
			if !decision.save_enabled {
				tracing::debug!(hint = decision.save_hint, "save request ignored");
				return Ok(SaveOutcome::NotReady);
			}
		}

		if !self.validate_now(true).await {
			return Ok(SaveOutcome::Rejected);
		}

		let request = {
			let mut st = self.inner.state.lock();
			let Some(path) = st.buffer.path().map(str::to_string) else {
				return Ok(SaveOutcome::NotReady);
			};
			st.buffer.set_saving(true);
			SaveRequest {
				path,
				snapshot: st.buffer.snapshot(),
			}
		};

		let request_key = request.snapshot.fingerprint();
		let result = self.inner.host.save(&request).await;

		let mut st = self.inner.state.lock();
		// A different document may have been loaded while the save was in
		// flight; its buffer must not inherit this completion.
		let same_doc = st.buffer.path() == Some(request.path.as_str());
		if same_doc {
			st.buffer.set_saving(false);
		}
		match result {
			Ok(saved) => {
				if same_doc {
					st.buffer.set_path(saved.path.clone());
					// Dirty tracks the persisted snapshot: an edit made while
					// the save was in flight still needs saving.
					if st.buffer.snapshot().fingerprint() == request_key {
						st.buffer.mark_clean();
					} else {
						tracing::debug!(path = %saved.path, "buffer edited during save; staying dirty");
					}
				} else {
					tracing::debug!(path = %saved.path, "save completed for an unloaded document");
				}
				Ok(SaveOutcome::Saved { path: saved.path })
			}
			Err(error) => {
				tracing::warn!(path = %request.path, error = %error, "save failed");
				Err(SessionError::Save(error))
			}
		}
	}

	/// Promotes the loaded document if the promote gate is open.
	///
	/// Does not depend on or alter validation state; the buffer is left
	/// unchanged (the shell reloads from the returned identity).
	pub async fn promote(&self) -> Result<PromoteOutcome> {
		let path = {
			let st = self.inner.state.lock();
			let decision = gate::evaluate_gates(&st.buffer, &st.validation, &st.confirmation);
			if !decision.promote_enabled {
				tracing::debug!(hint = decision.promote_hint, "promote request ignored");
				return Ok(PromoteOutcome::NotReady);
			}
			match st.buffer.path() {
				Some(path) => path.to_string(),
				None => return Ok(PromoteOutcome::NotReady),
			}
		};

		match self
			.inner
			.host
			.promote(&path, &self.inner.cfg.promote_target_status)
			.await
		{
			Ok(item) => Ok(PromoteOutcome::Promoted { path: item.path }),
			Err(error) => {
				tracing::warn!(path = %path, error = %error, "promote failed");
				Err(SessionError::Promote(error))
			}
		}
	}

	/// Creates a note from quick-capture input and loads it.
	///
	/// Empty titles are a no-op. Returns the new identity on success.
	pub async fn capture(&self, title: &str, body: &str) -> Result<Option<String>> {
		let title = title.trim();
		if title.is_empty() {
			return Ok(None);
		}

		match self.inner.host.capture(title, body.trim()).await {
			Ok(item) => {
				self.load_document(&item.path).await?;
				Ok(Some(item.path))
			}
			Err(error) => {
				tracing::warn!(error = %error, "capture failed");
				self.clear_editor(Some("Capture failed"));
				Err(SessionError::Capture(error))
			}
		}
	}

	/// Opens the daily note (`None` = today) and loads it.
	///
	/// Guarded by the daily-busy flag: a no-op while another daily
	/// operation is in flight.
	pub async fn open_daily(&self, date: Option<&str>) -> Result<Option<String>> {
		if !self.begin_daily() {
			return Ok(None);
		}
		let outcome = match self.inner.host.open_daily(date).await {
			Ok(item) => self.load_document(&item.path).await.map(|()| Some(item.path)),
			Err(error) => {
				tracing::warn!(error = %error, "daily open failed");
				Err(SessionError::Daily(error))
			}
		};
		self.end_daily();
		outcome
	}

	/// Appends a line to the daily note and loads it.
	///
	/// Empty text is a no-op; shares the daily-busy guard with
	/// [`Self::open_daily`].
	pub async fn append_daily(&self, text: &str, date: Option<&str>) -> Result<Option<String>> {
		let text = text.trim();
		if text.is_empty() {
			return Ok(None);
		}
		if !self.begin_daily() {
			return Ok(None);
		}
		let outcome = match self.inner.host.append_daily(text, date).await {
			Ok(item) => self.load_document(&item.path).await.map(|()| Some(item.path)),
			Err(error) => {
				tracing::warn!(error = %error, "daily append failed");
				Err(SessionError::Daily(error))
			}
		};
		self.end_daily();
		outcome
	}

	// --- validation pipeline ---

	/// Runs one validation pass against the current snapshot.
	///
	/// `force` bypasses the fingerprint skip; the debounce is bypassed by
	/// construction (this is the post-debounce path). Returns the
	/// authoritative `valid` flag once this pass settles, which may belong
	/// to a newer check when this one was superseded mid-flight.
	pub async fn validate_now(&self, force: bool) -> bool {
		let (snapshot, key) = {
			let mut st = self.inner.state.lock();
			if !st.buffer.is_loaded() {
				return false;
			}
			let snapshot = st.buffer.snapshot();
			let key = snapshot.fingerprint();
			if !force && st.validation.last_validated_key.as_deref() == Some(key.as_str()) {
				tracing::debug!("validation skipped: snapshot unchanged");
				return st.validation.valid;
			}
			st.validation.begin();
			(snapshot, key)
		};

		let seq = self.inner.clock.next();
		let result = self.inner.host.validate(&snapshot).await;

		let mut st = self.inner.state.lock();
		let current = self.inner.clock.current();
		if seq != current {
			tracing::debug!(seq, current, "validation result superseded; discarded");
			return st.validation.valid;
		}
		match result {
			Ok(payload) => {
				st.validation.finish(normalize_outcome(&payload));
				st.validation.last_validated_key = Some(key);
			}
			Err(error) => {
				tracing::warn!(error = %error, "validation call failed");
				st.validation.finish(ValidationOutcome::call_failure(&error));
			}
		}
		st.validation.valid
	}

	/// (Re)starts the trailing-edge debounce timer.
	///
	/// The previous timer is aborted outright, not merely replaced, so a
	/// stale timer can never fire against a newer buffer.
	fn schedule_validation(&self) {
		let mut st = self.inner.state.lock();
		if !st.buffer.is_loaded() {
			return;
		}
		if let Some(timer) = st.debounce.take() {
			timer.abort();
		}
		let session = self.clone();
		let window = self.inner.cfg.debounce;
		st.debounce = Some(tokio::spawn(async move {
			tokio::time::sleep(window).await;
			session.validate_now(false).await;
		}));
	}

	fn clear_debounce(&self) {
		if let Some(timer) = self.inner.state.lock().debounce.take() {
			timer.abort();
		}
	}

	fn begin_daily(&self) -> bool {
		let mut st = self.inner.state.lock();
		if st.daily_busy {
			tracing::debug!("daily operation ignored: another is in flight");
			return false;
		}
		st.daily_busy = true;
		true
	}

	fn end_daily(&self) {
		self.inner.state.lock().daily_busy = false;
	}
}
