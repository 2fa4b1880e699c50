use pg_sourcerer_catalog::{AttributeRow, Grants};

use crate::smart_tags::SmartTags;

/// A single field within a [`crate::shape::Shape`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
	/// Inflected name (camelCase).
	pub name: String,
	/// Original SQL column name.
	pub column_name: String,
	pub nullable: bool,
	/// Whether the field may be omitted for this shape.
	pub optional: bool,
	pub has_default: bool,
	pub is_generated: bool,
	pub is_identity: bool,
	pub is_array: bool,
	pub element_type_name: Option<String>,
	pub grants: Grants,
	/// The underlying catalog attribute record this field was built from.
	pub attribute: AttributeRow,
	pub smart_tags: SmartTags,
}
