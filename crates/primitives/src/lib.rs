//! Core document types for the note editing session.

/// Document identity, frontmatter values, and draft snapshots.
pub mod document;
/// Per-field normalization of raw editor input.
pub mod fields;

pub use document::{DraftSnapshot, FieldValue, Frontmatter, NoteDocument};
pub use fields::{apply_field_edit, parse_tags};
