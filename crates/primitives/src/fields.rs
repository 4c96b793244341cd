//! Normalization of raw editor input into frontmatter values.
//!
//! The rules here are the observable contract of the edit buffer: optional
//! text keys are trimmed or removed, tags are split and cleaned, the
//! always-present selector keys are stored verbatim, and a confidence that
//! fails to parse degrades to string storage so validation can report it
//! instead of the input being silently discarded.

use crate::document::{FieldValue, Frontmatter};

/// Frontmatter keys accepted from the editor form.
///
/// Keys not listed here (schema_version, id, created, updated) are
/// display-only; edits against them are ignored.
pub mod keys {
	pub const TITLE: &str = "title";
	pub const SUMMARY: &str = "summary";
	pub const TAGS: &str = "tags";
	pub const TYPE: &str = "type";
	pub const STATUS: &str = "status";
	pub const PRIVACY: &str = "privacy";
	pub const CONFIDENCE: &str = "confidence";
}

/// Applies one raw editor input to the frontmatter mapping.
///
/// Returns `false` when the key is not editable; the mapping is untouched
/// and the caller must not mark the buffer dirty.
pub fn apply_field_edit(frontmatter: &mut Frontmatter, key: &str, raw: &str) -> bool {
	match key {
		keys::TITLE | keys::SUMMARY => set_optional_text(frontmatter, key, raw),
		keys::TAGS => set_optional_list(frontmatter, key, parse_tags(raw)),
		keys::TYPE | keys::STATUS | keys::PRIVACY => {
			frontmatter.insert(key.to_string(), FieldValue::Text(raw.to_string()));
		}
		keys::CONFIDENCE => set_confidence(frontmatter, raw),
		_ => return false,
	}
	true
}

/// Splits comma-separated tag input, trimming segments and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|tag| !tag.is_empty())
		.map(str::to_string)
		.collect()
}

fn set_optional_text(frontmatter: &mut Frontmatter, key: &str, raw: &str) {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		frontmatter.shift_remove(key);
	} else {
		frontmatter.insert(key.to_string(), FieldValue::Text(trimmed.to_string()));
	}
}

fn set_optional_list(frontmatter: &mut Frontmatter, key: &str, values: Vec<String>) {
	if values.is_empty() {
		frontmatter.shift_remove(key);
	} else {
		frontmatter.insert(key.to_string(), FieldValue::List(values));
	}
}

fn set_confidence(frontmatter: &mut Frontmatter, raw: &str) {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		frontmatter.shift_remove(keys::CONFIDENCE);
		return;
	}
	let value = match trimmed.parse::<f64>() {
		Ok(parsed) if parsed.is_finite() => FieldValue::Number(parsed),
		_ => FieldValue::Text(trimmed.to_string()),
	};
	frontmatter.insert(keys::CONFIDENCE.to_string(), value);
}

#[cfg(test)]
mod tests {
	use super::*;

	fn edited(key: &str, raw: &str) -> Frontmatter {
		let mut frontmatter = Frontmatter::new();
		assert!(apply_field_edit(&mut frontmatter, key, raw));
		frontmatter
	}

	#[test]
	fn title_is_trimmed_or_removed() {
		let frontmatter = edited(keys::TITLE, "  Weekly plan  ");
		assert_eq!(
			frontmatter.get(keys::TITLE),
			Some(&FieldValue::Text("Weekly plan".to_string()))
		);

		let mut frontmatter = frontmatter;
		assert!(apply_field_edit(&mut frontmatter, keys::TITLE, "   "));
		assert!(!frontmatter.contains_key(keys::TITLE));
	}

	#[test]
	fn tags_split_trim_and_drop_empties() {
		let frontmatter = edited(keys::TAGS, " a, , b ,");
		assert_eq!(
			frontmatter.get(keys::TAGS),
			Some(&FieldValue::List(vec!["a".to_string(), "b".to_string()]))
		);
	}

	#[test]
	fn empty_tags_remove_the_key() {
		let mut frontmatter = edited(keys::TAGS, "a,b");
		assert!(apply_field_edit(&mut frontmatter, keys::TAGS, ""));
		assert!(!frontmatter.contains_key(keys::TAGS));
	}

	#[test]
	fn selector_keys_store_verbatim_including_empty() {
		let frontmatter = edited(keys::STATUS, "");
		assert_eq!(frontmatter.get(keys::STATUS), Some(&FieldValue::Text(String::new())));

		let frontmatter = edited(keys::PRIVACY, "  private ");
		assert_eq!(
			frontmatter.get(keys::PRIVACY),
			Some(&FieldValue::Text("  private ".to_string()))
		);
	}

	#[test]
	fn confidence_parses_to_number() {
		let frontmatter = edited(keys::CONFIDENCE, "0.8");
		assert_eq!(frontmatter.get(keys::CONFIDENCE), Some(&FieldValue::Number(0.8)));
	}

	#[test]
	fn malformed_confidence_degrades_to_text() {
		let frontmatter = edited(keys::CONFIDENCE, "high");
		assert_eq!(
			frontmatter.get(keys::CONFIDENCE),
			Some(&FieldValue::Text("high".to_string()))
		);
	}

	#[test]
	fn non_finite_confidence_stays_text() {
		let frontmatter = edited(keys::CONFIDENCE, "inf");
		assert_eq!(
			frontmatter.get(keys::CONFIDENCE),
			Some(&FieldValue::Text("inf".to_string()))
		);
	}

	#[test]
	fn empty_confidence_removes_the_key() {
		let mut frontmatter = edited(keys::CONFIDENCE, "0.5");
		assert!(apply_field_edit(&mut frontmatter, keys::CONFIDENCE, "  "));
		assert!(!frontmatter.contains_key(keys::CONFIDENCE));
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let mut frontmatter = Frontmatter::new();
		assert!(!apply_field_edit(&mut frontmatter, "schema_version", "2"));
		assert!(!apply_field_edit(&mut frontmatter, "id", "01J"));
		assert!(frontmatter.is_empty());
	}
}
