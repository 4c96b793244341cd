//! Edit buffer for the currently loaded document.

use vellum_primitives::fields::keys;
use vellum_primitives::{DraftSnapshot, FieldValue, Frontmatter, NoteDocument, apply_field_edit};

/// In-memory edit state for the currently loaded document.
///
/// Replaced wholesale on load (discarding unsaved edits) and cleared when
/// nothing is selected or a load fails. Field edits normalize input per the
/// frontmatter contract and mark the buffer dirty; edits without a loaded
/// document are ignored.
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
	path: Option<String>,
	frontmatter: Frontmatter,
	body: String,
	dirty: bool,
	saving: bool,
	notice: Option<String>,
}

impl EditBuffer {
	/// Replaces the buffer with a freshly loaded document.
	pub fn load(&mut self, doc: NoteDocument) {
		*self = Self {
			path: Some(doc.path),
			frontmatter: doc.frontmatter,
			body: doc.body,
			dirty: false,
			saving: false,
			notice: None,
		};
	}

	/// Empties the buffer; no document is loaded afterwards.
	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// Empties the buffer, leaving a user-facing notice (e.g. after a failed
	/// load).
	pub fn clear_with_notice(&mut self, notice: impl Into<String>) {
		*self = Self::default();
		self.notice = Some(notice.into());
	}

	/// Applies one field edit.
	///
	/// Returns whether the buffer was mutated: `false` without a loaded
	/// document or for a non-editable key, and the dirty flag is untouched.
	pub fn set_field(&mut self, key: &str, raw: &str) -> bool {
		if self.path.is_none() {
			return false;
		}
		if !apply_field_edit(&mut self.frontmatter, key, raw) {
			return false;
		}
		self.dirty = true;
		true
	}

	/// Replaces the body text and marks the buffer dirty.
	///
	/// Returns whether the buffer was mutated (`false` without a document).
	pub fn set_body(&mut self, text: &str) -> bool {
		if self.path.is_none() {
			return false;
		}
		self.body = text.to_string();
		self.dirty = true;
		true
	}

	pub fn path(&self) -> Option<&str> {
		self.path.as_deref()
	}

	pub fn frontmatter(&self) -> &Frontmatter {
		&self.frontmatter
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn is_loaded(&self) -> bool {
		self.path.is_some()
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn is_saving(&self) -> bool {
		self.saving
	}

	/// Notice left by the last clear, for the shell to display.
	pub fn notice(&self) -> Option<&str> {
		self.notice.as_deref()
	}

	/// Status frontmatter field, empty when unset or non-textual.
	pub fn status_field(&self) -> &str {
		match self.frontmatter.get(keys::STATUS) {
			Some(FieldValue::Text(status)) => status,
			_ => "",
		}
	}

	/// Content snapshot submitted for validation and save.
	pub fn snapshot(&self) -> DraftSnapshot {
		DraftSnapshot {
			frontmatter: self.frontmatter.clone(),
			body: self.body.clone(),
		}
	}

	pub(crate) fn set_saving(&mut self, saving: bool) {
		self.saving = saving;
	}

	pub(crate) fn mark_clean(&mut self) {
		self.dirty = false;
	}

	pub(crate) fn set_path(&mut self, path: String) {
		self.path = Some(path);
	}
}
