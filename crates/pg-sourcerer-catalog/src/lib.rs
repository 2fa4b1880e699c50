//! Data shapes for the PostgreSQL catalog snapshot the engine's IR builder
//! consumes (`spec.md` §6.1). This crate owns only the *shape* — how a
//! snapshot is acquired over the wire is an external collaborator's
//! concern and out of scope here.

use serde::{Deserialize, Serialize};

/// A PostgreSQL object id. Stable across introspections of the same
/// database state; used as the IR builder's deterministic ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Oid(pub u32);

/// `pg_class.relkind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelKind {
	/// `r` — ordinary table
	OrdinaryTable,
	/// `v` — view
	View,
	/// `m` — materialized view
	MaterializedView,
	/// `p` — partitioned table
	PartitionedTable,
	/// `f` — foreign table
	ForeignTable,
}

/// `pg_type.typtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
	Base,
	Composite,
	Domain,
	Enum,
	Pseudo,
	Range,
	Multirange,
}

/// `pg_attribute.attidentity`: empty, `a` (always), or `d` (by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityKind {
	NotIdentity,
	Always,
	ByDefault,
}

/// `pg_attribute.attgenerated`: empty or `s` (stored generated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedKind {
	NotGenerated,
	Stored,
}

/// The privileges an effective role holds, at table or column scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grants {
	pub select: bool,
	pub insert: bool,
	pub update: bool,
	pub delete: bool,
}

impl Grants {
	pub const fn all() -> Self {
		Self { select: true, insert: true, update: true, delete: true }
	}

	pub const fn none() -> Self {
		Self { select: false, insert: false, update: false, delete: false }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
	pub attname: String,
	pub attnum: i16,
	pub attnotnull: bool,
	pub atthasdef: bool,
	pub attidentity: IdentityKind,
	pub attgenerated: GeneratedKind,
	pub type_oid: Oid,
	pub grants: Grants,
	pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
	pub name: String,
	pub columns: Vec<String>,
	pub is_unique: bool,
	pub is_partial: bool,
	pub method: String,
	pub is_expression: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRow {
	pub name: String,
	pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRow {
	pub oid: Oid,
	pub relname: String,
	pub relkind: RelKind,
	pub schema_name: String,
	pub columns: Vec<AttributeRow>,
	pub indexes: Vec<IndexRow>,
	pub constraints: Vec<ConstraintRow>,
	pub grants: Grants,
	pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeField {
	pub name: String,
	pub type_oid: Oid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRow {
	pub oid: Oid,
	pub typname: String,
	pub schema_name: String,
	pub typcategory: char,
	pub typtype: TypeKind,
	pub base_type_oid: Option<Oid>,
	/// `pg_type.typelem` equivalent: set iff this type is an array type,
	/// pointing at the element type's oid.
	pub element_type_oid: Option<Oid>,
	pub enum_values: Option<Vec<String>>,
	pub composite_fields: Option<Vec<CompositeField>>,
	pub constraints: Option<Vec<ConstraintRow>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferentialAction {
	NoAction,
	Restrict,
	Cascade,
	SetNull,
	SetDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRow {
	pub name: String,
	pub source_class_oid: Oid,
	pub target_class_oid: Oid,
	/// `(local_column, foreign_column)` pairs, in constraint-definition order.
	pub column_pairs: Vec<(String, String)>,
	pub comment: Option<String>,
	pub on_update: ReferentialAction,
	pub on_delete: ReferentialAction,
}

/// The full catalog snapshot the IR builder consumes. Produced by an
/// external introspection collaborator; the engine treats it as opaque
/// data, coupled only to this shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
	pub classes: Vec<ClassRow>,
	pub types: Vec<TypeRow>,
	pub foreign_keys: Vec<ForeignKeyRow>,
}
