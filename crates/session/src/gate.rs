//! Pure gate evaluation for the save and promote actions.

use crate::buffer::EditBuffer;
use crate::validation::{ValidationState, ValidationStatus};

/// Status a document must hold to be eligible for promotion.
pub const PROMOTABLE_STATUS: &str = "inbox";
/// Exact confirmation phrase enabling the promote action. No trimming:
/// promotion is deliberately unergonomic.
pub const PROMOTE_CONFIRMATION: &str = "PROMOTE";

/// Derived permissions for the save and promote actions.
///
/// Recomputed on demand after every state transition; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
	pub save_enabled: bool,
	pub save_hint: &'static str,
	pub promote_enabled: bool,
	pub promote_hint: &'static str,
}

/// Evaluates both gates from current session state.
pub fn evaluate_gates(
	buffer: &EditBuffer,
	validation: &ValidationState,
	confirmation: &str,
) -> GateDecision {
	let (save_enabled, save_hint) = save_gate(buffer, validation);
	let (promote_enabled, promote_hint) = promote_gate(buffer, confirmation);
	GateDecision {
		save_enabled,
		save_hint,
		promote_enabled,
		promote_hint,
	}
}

/// Hint reflects the first failing condition, in priority order.
fn save_gate(buffer: &EditBuffer, validation: &ValidationState) -> (bool, &'static str) {
	if !buffer.is_loaded() {
		return (false, "No item loaded");
	}
	if buffer.is_saving() {
		return (false, "Saving...");
	}
	if validation.status == ValidationStatus::Pending {
		return (false, "Validating...");
	}
	if !buffer.is_dirty() {
		return (false, "No changes");
	}
	if !validation.valid {
		return (false, "Fix validation errors");
	}
	if validation.warnings.is_empty() {
		(true, "Ready to save")
	} else {
		(true, "Ready to save (warnings)")
	}
}

fn promote_gate(buffer: &EditBuffer, confirmation: &str) -> (bool, &'static str) {
	if !buffer.is_loaded() {
		return (false, "Load an inbox item to promote.");
	}
	if buffer.status_field() != PROMOTABLE_STATUS {
		return (false, "Only inbox items can be promoted.");
	}
	if confirmation != PROMOTE_CONFIRMATION {
		return (false, "Type PROMOTE to enable.");
	}
	(true, "Ready to promote.")
}
