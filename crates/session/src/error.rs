//! Session-level error taxonomy.

use thiserror::Error;

/// Failures surfaced to the shell for user display.
///
/// Validation call failures are deliberately absent: they fold into
/// [`crate::ValidationState`] as an invalid result carrying the stringified
/// error. Every variant leaves the controller in a well-formed state; it
/// stays usable (able to load another document) after any of them.
#[derive(Debug, Error)]
pub enum SessionError {
	/// The document could not be fetched; the buffer was cleared.
	#[error("failed to load item: {0}")]
	Load(anyhow::Error),

	/// The save call failed; the buffer stays dirty, validation untouched.
	#[error("failed to save item: {0}")]
	Save(anyhow::Error),

	/// The promote call failed; the buffer is unchanged.
	#[error("failed to promote item: {0}")]
	Promote(anyhow::Error),

	/// Quick capture failed; the editor was cleared with a notice.
	#[error("failed to capture note: {0}")]
	Capture(anyhow::Error),

	/// A daily-note operation failed.
	#[error("daily note operation failed: {0}")]
	Daily(anyhow::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
