//! Host capability seam.
//!
//! The controller only assumes each call eventually resolves, in any order
//! and after any delay; ordering safety is enforced on the session side.

use async_trait::async_trait;
use vellum_primitives::{DraftSnapshot, NoteDocument};

/// Persisted identity returned by mutating host calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
	pub path: String,
}

/// Payload for persisting the edit buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
	pub path: String,
	pub snapshot: DraftSnapshot,
}

/// Remote capabilities the session controller drives.
///
/// Implementations own transport and storage. Errors are opaque to the
/// controller and surface either through [`crate::SessionError`] or, for
/// `validate`, as an invalid validation result.
#[async_trait]
pub trait NoteHost: Send + Sync {
	/// Fetches a document for editing.
	async fn fetch(&self, path: &str) -> anyhow::Result<NoteDocument>;

	/// Checks a draft snapshot. The response shape is loose and gets
	/// normalized by [`crate::validation::normalize_outcome`].
	async fn validate(&self, snapshot: &DraftSnapshot) -> anyhow::Result<serde_json::Value>;

	/// Persists the buffer. Idempotent from the caller's perspective: a
	/// retried save of an already-saved buffer is harmless.
	async fn save(&self, request: &SaveRequest) -> anyhow::Result<SavedItem>;

	/// Terminal status transition; not retriable.
	async fn promote(&self, path: &str, target_status: &str) -> anyhow::Result<SavedItem>;

	/// Creates a new note from quick-capture input.
	async fn capture(&self, title: &str, body: &str) -> anyhow::Result<SavedItem>;

	/// Opens (creating if needed) the daily note; `None` means today.
	async fn open_daily(&self, date: Option<&str>) -> anyhow::Result<SavedItem>;

	/// Appends a line to the daily note; `None` means today.
	async fn append_daily(&self, text: &str, date: Option<&str>) -> anyhow::Result<SavedItem>;
}
