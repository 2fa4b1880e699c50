use pg_sourcerer_catalog::{IndexRow, Oid};

use crate::relation::RelationEdge;
use crate::shape::Shape;
use crate::smart_tags::SmartTags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
	pub columns: Vec<String>,
	/// True when no real primary-key constraint exists and this was
	/// synthesized (e.g. from a unique index) rather than read directly
	/// off the catalog.
	pub is_virtual: bool,
}

/// Fields shared by `table` and `view` entities.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalEntity {
	pub primary_key: Option<PrimaryKey>,
	pub indexes: Vec<IndexRow>,
	/// Ordered by constraint name (`spec.md` §4.2 tie-break rule).
	pub relations: Vec<RelationEdge>,
	pub shapes: Vec<Shape>,
}

impl RelationalEntity {
	pub fn shape(&self, kind: pg_sourcerer_inflect::ShapeKind) -> Option<&Shape> {
		self.shapes.iter().find(|s| s.kind == kind)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEntity {
	pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEntity {
	pub base_type_oid: Oid,
	pub checks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeField {
	pub name: String,
	pub type_oid: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeEntity {
	pub fields: Vec<CompositeField>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
	Table(RelationalEntity),
	View(RelationalEntity),
	Enum(EnumEntity),
	Domain(DomainEntity),
	Composite(CompositeEntity),
}

/// A resolved catalog entity: table, view, enum, domain, or composite type.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
	/// Inflected PascalCase display name.
	pub name: String,
	/// Original SQL identifier.
	pub pg_name: String,
	/// `pg_class.oid` for tables/views, `pg_type.oid` for enums, domains,
	/// and composites — the catalog record this entity was built from.
	pub oid: Oid,
	pub schema_name: String,
	pub smart_tags: SmartTags,
	pub can_select: bool,
	pub can_insert: bool,
	pub can_update: bool,
	pub can_delete: bool,
	pub kind: EntityKind,
}

impl Entity {
	pub fn as_relational(&self) -> Option<&RelationalEntity> {
		match &self.kind {
			EntityKind::Table(rel) | EntityKind::View(rel) => Some(rel),
			_ => None,
		}
	}

	pub fn is_table(&self) -> bool {
		matches!(self.kind, EntityKind::Table(_))
	}

	pub fn is_view(&self) -> bool {
		matches!(self.kind, EntityKind::View(_))
	}
}
