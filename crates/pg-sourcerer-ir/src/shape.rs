pub use pg_sourcerer_inflect::ShapeKind;

use crate::field::Field;

/// A named projection of a table/view into one of the four shape roles.
/// Carries its own `(entity, kind)` tuple explicitly rather than relying on
/// a global registry to recover it — see DESIGN.md's resolution of the
/// Open Question in `spec.md` §9.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
	pub entity_name: String,
	pub kind: ShapeKind,
	/// Derived display name, e.g. `UserInsert`.
	pub name: String,
	pub fields: Vec<Field>,
}

impl Shape {
	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.name == name)
	}
}
