//! Deterministic name transforms used throughout pg-sourcerer: snake_case
//! SQL identifiers in, camelCase/PascalCase/plural/singular forms out.
//!
//! Every transform here is a pure function of its input. Calling the same
//! transform with the same input twice in a run always returns the same
//! string — this determinism is what lets `pg-sourcerer-engine::generate`
//! promise byte-identical output across repeated runs on the same inputs.

mod casing;
mod plural;
mod registry;

pub use casing::{to_camel_case, to_pascal_case, to_snake_case};
pub use plural::{pluralize, singularize};
pub use registry::{ShapeKind, ShapeRegistry};

/// A configurable set of name transforms. The default configuration covers
/// English plurals and standard camelCase/PascalCase conventions; a caller
/// may swap any function for a locale- or project-specific variant.
#[derive(Clone, Copy)]
pub struct InflectionConfig {
	pub to_camel: fn(&str) -> String,
	pub to_pascal: fn(&str) -> String,
	pub to_plural: fn(&str) -> String,
	pub to_singular: fn(&str) -> String,
}

impl Default for InflectionConfig {
	fn default() -> Self {
		Self {
			to_camel: to_camel_case,
			to_pascal: to_pascal_case,
			to_plural: pluralize,
			to_singular: singularize,
		}
	}
}

/// The Inflection component: wraps an [`InflectionConfig`] plus the
/// per-run [`ShapeRegistry`] used to recover a shape's base entity name
/// from its derived display name.
pub struct Inflector {
	config: InflectionConfig,
	shapes: ShapeRegistry,
}

impl Inflector {
	pub fn new(config: InflectionConfig) -> Self {
		Self { config, shapes: ShapeRegistry::new() }
	}

	pub fn camel(&self, s: &str) -> String {
		(self.config.to_camel)(s)
	}

	pub fn pascal(&self, s: &str) -> String {
		(self.config.to_pascal)(s)
	}

	pub fn plural(&self, s: &str) -> String {
		(self.config.to_plural)(s)
	}

	pub fn singular(&self, s: &str) -> String {
		(self.config.to_singular)(s)
	}

	/// Derive and memoize the display name for `entity_name` projected
	/// into `kind`. See [`ShapeRegistry::derive`].
	pub fn shape_name(&self, entity_name: &str, kind: ShapeKind) -> String {
		self.shapes.derive(entity_name, kind)
	}

	/// Resolve a previously derived shape display name back to its base
	/// entity name. See [`ShapeRegistry::resolve_base_entity`].
	pub fn resolve_base_entity(&self, shape_name: &str) -> Option<String> {
		self.shapes.resolve_base_entity(shape_name)
	}
}

impl Default for Inflector {
	fn default() -> Self {
		Self::new(InflectionConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_pascal_then_plural_field_camel() {
		let inflector = Inflector::default();
		assert_eq!(inflector.pascal("user_account"), "UserAccount");
		assert_eq!(inflector.camel("user_account"), "userAccount");
		assert_eq!(inflector.plural("user"), "users");
	}

	#[test]
	fn shape_name_round_trips_through_the_registry() {
		let inflector = Inflector::default();
		let derived = inflector.shape_name("User", ShapeKind::Insert);
		assert_eq!(derived, "UserInsert");
		assert_eq!(inflector.resolve_base_entity(&derived).as_deref(), Some("User"));
	}
}
