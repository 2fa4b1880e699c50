//! Per-run registry memoizing shape-name derivations, so a shape-suffixed
//! identifier (`UserInsert`) can be resolved back to its base entity name
//! (`User`) during emission-buffer file assignment without re-deriving it.

use dashmap::DashMap;

/// The four shape roles a table/view entity may project into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
	Row,
	Insert,
	Update,
	Patch,
}

impl ShapeKind {
	fn suffix(self) -> &'static str {
		match self {
			ShapeKind::Row => "",
			ShapeKind::Insert => "Insert",
			ShapeKind::Update => "Update",
			ShapeKind::Patch => "Patch",
		}
	}
}

/// Maps derived shape names (`UserInsert`) back to their base entity name
/// (`User`). Populated as shape names are derived; never mutated otherwise.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
	derived: DashMap<String, String>,
}

impl ShapeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Derive (and memoize) the PascalCase shape name for `entity_name` +
	/// `kind`. Calling this twice with the same inputs returns the same
	/// string and does not re-insert.
	pub fn derive(&self, entity_name: &str, kind: ShapeKind) -> String {
		let derived = format!("{entity_name}{}", kind.suffix());
		self.derived.entry(derived.clone()).or_insert_with(|| entity_name.to_string());
		derived
	}

	/// Resolve a previously derived shape name back to its base entity name.
	pub fn resolve_base_entity(&self, shape_name: &str) -> Option<String> {
		self.derived.get(shape_name).map(|v| v.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn derive_is_idempotent() {
		let registry = ShapeRegistry::new();
		let a = registry.derive("User", ShapeKind::Insert);
		let b = registry.derive("User", ShapeKind::Insert);
		assert_eq!(a, b);
		assert_eq!(a, "UserInsert");
	}

	#[test]
	fn resolves_base_entity() {
		let registry = ShapeRegistry::new();
		registry.derive("User", ShapeKind::Insert);
		assert_eq!(registry.resolve_base_entity("UserInsert").as_deref(), Some("User"));
		assert_eq!(registry.resolve_base_entity("Nonexistent"), None);
	}

	#[test]
	fn row_shape_has_no_suffix() {
		let registry = ShapeRegistry::new();
		assert_eq!(registry.derive("User", ShapeKind::Row), "User");
	}
}
