//! The Semantic IR: a resolved, inflected, permissions-aware view of a
//! PostgreSQL catalog snapshot (`spec.md` §4.2 / §3). Plugins never see a
//! raw catalog row; they only ever see entities and shapes built here.

mod builder;
mod entity;
mod field;
mod relation;
mod shape;
mod smart_tags;

use indexmap::IndexMap;

pub use builder::IrBuilder;
pub use entity::{CompositeEntity, CompositeField, DomainEntity, Entity, EntityKind, EnumEntity, PrimaryKey, RelationalEntity};
pub use field::Field;
pub use relation::{Cardinality, RelationEdge};
pub use shape::{Shape, ShapeKind};
pub use smart_tags::SmartTags;

/// A frozen, ordered collection of [`Entity`] values. Ordering is the
/// catalog-oid order `IrBuilder` walked the snapshot in, which is what
/// gives a given catalog snapshot + schema set a single deterministic IR
/// (`spec.md` Invariant 1).
#[derive(Debug, Clone, Default)]
pub struct SemanticIr {
	entities: IndexMap<String, Entity>,
}

impl SemanticIr {
	pub(crate) fn new(entities: IndexMap<String, Entity>) -> Self {
		Self { entities }
	}

	/// Look up an entity by its inflected display name, e.g. `"User"`.
	pub fn entity(&self, name: &str) -> Option<&Entity> {
		self.entities.get(name)
	}

	pub fn entities(&self) -> impl Iterator<Item = &Entity> {
		self.entities.values()
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_ir_has_no_entities() {
		let ir = SemanticIr::default();
		assert!(ir.is_empty());
		assert_eq!(ir.entities().count(), 0);
		assert!(ir.entity("User").is_none());
	}
}
