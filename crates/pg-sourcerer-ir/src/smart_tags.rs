//! `@tagName [value]` annotations parsed out of `COMMENT ON ...` text.
//!
//! Grammar: one tag per line, `@([A-Za-z][A-Za-z0-9_-]*)(?:\s+(.*))?`. A
//! line that doesn't match is silently ignored (`spec.md` §4.2: "Malformed
//! smart-tag comments are silently ignored") — it contributes no tag and
//! raises no error, though it is still noted at `trace` level for anyone
//! tracing a parse. Repeated tags of the same key accumulate in encounter
//! order.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static TAG_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*@([A-Za-z][A-Za-z0-9_-]*)(?:\s+(.*?))?\s*$").expect("smart-tag regex is a fixed literal"));

/// An ordered, possibly-repeated map of smart-tag name to its values. A
/// tag with no inline value is recorded as the empty string, which callers
/// conventionally treat as a boolean flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmartTags(IndexMap<String, Vec<String>>);

impl SmartTags {
	pub fn parse(comment: Option<&str>) -> Self {
		let mut tags: IndexMap<String, Vec<String>> = IndexMap::new();
		let Some(comment) = comment else {
			return Self(tags);
		};
		for line in comment.lines() {
			if let Some(captures) = TAG_LINE.captures(line) {
				let name = captures.get(1).expect("capture group 1 is required by the pattern").as_str().to_string();
				let value = captures.get(2).map(|m| m.as_str().to_string()).unwrap_or_default();
				tags.entry(name).or_default().push(value);
			} else {
				trace!(line, "comment line did not match the smart-tag grammar, ignoring");
			}
		}
		Self(tags)
	}

	/// The first value recorded for `name`, if present.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).and_then(|values| values.first()).map(String::as_str)
	}

	/// All values recorded for `name`, in encounter order.
	pub fn get_all(&self, name: &str) -> &[String] {
		self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_single_tag_with_value() {
		let tags = SmartTags::parse(Some("@column label Friendly Name"));
		assert_eq!(tags.get("column"), Some("label Friendly Name"));
	}

	#[test]
	fn parses_flag_tag_with_no_value() {
		let tags = SmartTags::parse(Some("@hidden"));
		assert_eq!(tags.get("hidden"), Some(""));
		assert!(tags.contains("hidden"));
	}

	#[test]
	fn accumulates_repeated_tags_in_order() {
		let tags = SmartTags::parse(Some("@alias foo\n@alias bar\n@alias baz"));
		assert_eq!(tags.get_all("alias"), &["foo".to_string(), "bar".to_string(), "baz".to_string()]);
	}

	#[test]
	fn ignores_malformed_lines() {
		let tags = SmartTags::parse(Some("this is not a tag\n@valid ok\n   "));
		assert_eq!(tags.get("valid"), Some("ok"));
		assert_eq!(tags.get_all("valid").len(), 1);
	}

	#[test]
	fn none_comment_yields_empty_tags() {
		assert!(SmartTags::parse(None).is_empty());
	}

	#[test]
	fn multiple_tags_on_separate_lines() {
		let tags = SmartTags::parse(Some("@primary\n@label Users"));
		assert!(tags.contains("primary"));
		assert_eq!(tags.get("label"), Some("Users"));
	}
}
