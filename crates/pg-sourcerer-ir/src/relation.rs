use crate::smart_tags::SmartTags;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	OneToOne,
	ManyToOne,
}

/// A `belongsTo` edge derived from a foreign-key constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationEdge {
	/// The foreign-key constraint name, used to order edges deterministically.
	pub constraint_name: String,
	pub target_entity: String,
	/// Local (source-table) column names, in constraint-definition order.
	pub local_columns: Vec<String>,
	/// Foreign (target-table) column names, aligned positionally with `local_columns`.
	pub foreign_columns: Vec<String>,
	pub cardinality: Cardinality,
	pub smart_tags: SmartTags,
}
