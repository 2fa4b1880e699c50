use std::collections::HashMap;

use pg_sourcerer_catalog::Oid;

/// A plain read/insert registry plugins may consult and populate during
/// their own `provide` to share a pg type OID → target-language type
/// name mapping. The engine never interprets its contents (`spec.md`
/// §4.9 expansion: "the engine does not interpret its contents").
#[derive(Debug, Clone, Default)]
pub struct TypeHintRegistry {
	hints: HashMap<Oid, String>,
}

impl TypeHintRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, type_oid: Oid) -> Option<&str> {
		self.hints.get(&type_oid).map(String::as_str)
	}

	pub fn insert(&mut self, type_oid: Oid, hint: impl Into<String>) {
		self.hints.insert(type_oid, hint.into());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_then_get_roundtrips() {
		let mut registry = TypeHintRegistry::new();
		registry.insert(Oid(25), "string");
		assert_eq!(registry.get(Oid(25)), Some("string"));
		assert_eq!(registry.get(Oid(99)), None);
	}
}
