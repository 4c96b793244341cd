//! Note documents as exchanged with the host: an opaque path identity plus
//! an ordered frontmatter mapping and a free-text body.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scalar-or-list value stored under a frontmatter key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// Free-form text, including the empty string for always-present keys.
	Text(String),
	/// Numeric value (e.g. confidence).
	Number(f64),
	/// Ordered list of strings (e.g. tags).
	List(Vec<String>),
}

impl FieldValue {
	/// Text content, when this value is textual.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(s) => Some(s),
			_ => None,
		}
	}
}

/// Ordered frontmatter mapping.
///
/// Insertion order is preserved so a snapshot fingerprint only changes when
/// content actually changes.
pub type Frontmatter = IndexMap<String, FieldValue>;

/// A note document as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
	/// Opaque identity; vault-relative path in the reference host.
	pub path: String,
	#[serde(default)]
	pub frontmatter: Frontmatter,
	#[serde(default)]
	pub body: String,
}

/// The `{frontmatter, body}` content snapshot submitted for validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftSnapshot {
	pub frontmatter: Frontmatter,
	pub body: String,
}

impl DraftSnapshot {
	/// Canonical fingerprint of this snapshot.
	///
	/// Equal fingerprints mean the content has not changed since it was last
	/// checked, which lets the session skip a redundant validation call.
	/// Non-finite numbers have no JSON form; those snapshots key off the
	/// `Debug` rendering instead, which still tracks content.
	pub fn fingerprint(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
	}
}
