//! Validation state and host-outcome normalization.

use serde_json::{Map, Value};

/// Lifecycle of the background validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationStatus {
	/// No check has run for the loaded document (or nothing is loaded).
	#[default]
	Idle,
	/// A check is in flight; stale errors are already cleared.
	Pending,
	/// The most recently issued check has resolved.
	Done,
}

/// Result of the most recent authoritative validation check.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationState {
	pub status: ValidationStatus,
	pub valid: bool,
	pub errors: Vec<String>,
	pub warnings: Vec<String>,
	/// Fingerprint of the last snapshot actually validated; unchanged
	/// content skips the next check.
	pub(crate) last_validated_key: Option<String>,
}

impl Default for ValidationState {
	fn default() -> Self {
		Self {
			status: ValidationStatus::Idle,
			valid: true,
			errors: Vec::new(),
			warnings: Vec::new(),
			last_validated_key: None,
		}
	}
}

impl ValidationState {
	/// Returns to `Idle`, as when the buffer is cleared or replaced.
	pub(crate) fn reset(&mut self) {
		*self = Self::default();
	}

	/// Enters `Pending` for a newly issued check.
	///
	/// Errors and warnings clear immediately so the surface never shows
	/// stale diagnostics while a fresh check is running.
	pub(crate) fn begin(&mut self) {
		self.status = ValidationStatus::Pending;
		self.errors.clear();
		self.warnings.clear();
	}

	/// Applies the outcome of the authoritative check.
	pub(crate) fn finish(&mut self, outcome: ValidationOutcome) {
		self.status = ValidationStatus::Done;
		self.valid = outcome.valid;
		self.errors = outcome.errors;
		self.warnings = outcome.warnings;
	}
}

/// Normalized shape of a host validation response.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
	pub valid: bool,
	pub errors: Vec<String>,
	pub warnings: Vec<String>,
}

impl ValidationOutcome {
	/// Outcome representing a failed validation call.
	pub fn call_failure(error: impl std::fmt::Display) -> Self {
		Self {
			valid: false,
			errors: vec![error.to_string()],
			warnings: Vec::new(),
		}
	}
}

/// Unifies the response shapes hosts answer with.
///
/// An explicit boolean `valid` is authoritative when present; otherwise
/// validity is inferred as "no errors". The error list comes from the first
/// array among `errors`, `issues`, `messages`, falling back to a scalar
/// `error`; warnings from a `warnings` array falling back to a scalar
/// `warning`. A missing or malformed payload becomes invalid with a single
/// synthetic error. A non-empty error list always forces `valid = false`,
/// whatever the boolean claimed.
pub fn normalize_outcome(payload: &Value) -> ValidationOutcome {
	let Some(object) = payload.as_object() else {
		return ValidationOutcome {
			valid: false,
			errors: vec!["Validation failed.".to_string()],
			warnings: Vec::new(),
		};
	};

	let errors = list_under(object, &["errors", "issues", "messages"])
		.or_else(|| scalar_text(object.get("error")).map(|error| vec![error]))
		.unwrap_or_default();
	let warnings = list_under(object, &["warnings"])
		.or_else(|| scalar_text(object.get("warning")).map(|warning| vec![warning]))
		.unwrap_or_default();

	let mut valid = match object.get("valid") {
		Some(Value::Bool(flag)) => *flag,
		_ => errors.is_empty(),
	};
	if !errors.is_empty() {
		valid = false;
	}

	ValidationOutcome { valid, errors, warnings }
}

/// First key holding an array wins, even when the array is empty.
fn list_under(object: &Map<String, Value>, candidates: &[&str]) -> Option<Vec<String>> {
	candidates
		.iter()
		.find_map(|key| object.get(*key).and_then(Value::as_array))
		.map(|entries| entries.iter().map(entry_text).collect())
}

fn entry_text(entry: &Value) -> String {
	match entry {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// Scalar fallback with JS-truthiness filtering: `null`, `false`, `""` and
/// `0` all mean "no message".
fn scalar_text(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Null | Value::Bool(false) => None,
		Value::String(text) if text.is_empty() => None,
		Value::Number(number) if number.as_f64() == Some(0.0) => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}
