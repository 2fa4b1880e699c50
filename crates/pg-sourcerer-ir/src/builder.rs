use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use pg_sourcerer_catalog::{AttributeRow, CatalogSnapshot, ClassRow, Grants, IdentityKind, Oid, RelKind, TypeKind, TypeRow};
use pg_sourcerer_inflect::{Inflector, ShapeKind};
use tracing::{debug, info_span, trace};

use crate::entity::{CompositeEntity, CompositeField, DomainEntity, Entity, EntityKind, EnumEntity, PrimaryKey, RelationalEntity};
use crate::field::Field;
use crate::relation::{Cardinality, RelationEdge};
use crate::shape::Shape;
use crate::smart_tags::SmartTags;
use crate::SemanticIr;

/// Builds a frozen [`SemanticIr`] from a [`CatalogSnapshot`]. See
/// `spec.md` §4.2 for the full algorithm this implements.
pub struct IrBuilder<'a> {
	catalog: &'a CatalogSnapshot,
	inflector: &'a Inflector,
	schemas: HashSet<String>,
	logged_unknown_types: RefCell<HashSet<Oid>>,
}

impl<'a> IrBuilder<'a> {
	pub fn new(catalog: &'a CatalogSnapshot, inflector: &'a Inflector, schemas: &[String]) -> Self {
		Self { catalog, inflector, schemas: schemas.iter().cloned().collect(), logged_unknown_types: RefCell::new(HashSet::new()) }
	}

	pub fn build(&self) -> SemanticIr {
		let _span = info_span!("ir_build").entered();

		let types_by_oid: HashMap<Oid, &TypeRow> = self.catalog.types.iter().map(|t| (t.oid, t)).collect();
		let classes_by_oid: HashMap<Oid, &ClassRow> = self.catalog.classes.iter().map(|c| (c.oid, c)).collect();

		let mut entities: IndexMap<String, Entity> = IndexMap::new();

		// Classes and types are catalogued independently in Postgres, but
		// `spec.md` orders the IR by a single global catalog-OID sequence —
		// tag each row by source table, merge into one vector, and sort
		// once so a view's OID is compared against an enum's OID directly
		// rather than bucketing "all relations" before "all types".
		enum CatalogRow<'r> {
			Class(&'r ClassRow),
			Type(&'r TypeRow),
		}

		let mut rows: Vec<CatalogRow> = Vec::new();
		rows.extend(self.catalog.classes.iter().filter(|c| self.schemas.contains(&c.schema_name)).map(CatalogRow::Class));
		rows.extend(self.catalog.types.iter().filter(|t| self.schemas.contains(&t.schema_name)).map(CatalogRow::Type));
		rows.sort_by_key(|row| match row {
			CatalogRow::Class(c) => c.oid,
			CatalogRow::Type(t) => t.oid,
		});

		for row in &rows {
			match row {
				CatalogRow::Class(class) => {
					let entity = self.build_relational_entity(class, &types_by_oid, &classes_by_oid);
					entities.insert(entity.name.clone(), entity);
				}
				CatalogRow::Type(ty) => {
					if let Some(entity) = self.build_type_entity(ty) {
						entities.insert(entity.name.clone(), entity);
					}
				}
			}
		}

		SemanticIr::new(entities)
	}

	fn build_relational_entity(&self, class: &ClassRow, types_by_oid: &HashMap<Oid, &TypeRow>, classes_by_oid: &HashMap<Oid, &ClassRow>) -> Entity {
		let name = self.inflector.pascal(&self.inflector.singular(&class.relname));
		let is_view = matches!(class.relkind, RelKind::View | RelKind::MaterializedView);

		let can_select = class.grants.select;
		let can_insert = !is_view && class.grants.insert;
		let can_update = !is_view && class.grants.update;
		let can_delete = !is_view && class.grants.delete;

		let row_fields = self.build_row_fields(class, types_by_oid);
		let mut shapes = vec![self.make_shape(&name, ShapeKind::Row, row_fields.clone())];

		if !is_view {
			let insert_fields = self.build_insert_fields(&row_fields, can_insert);
			let update_fields = self.build_update_update_fields(&row_fields, can_update);
			shapes.push(self.make_shape(&name, ShapeKind::Insert, insert_fields));
			shapes.push(self.make_shape(&name, ShapeKind::Update, update_fields.clone()));
			shapes.push(self.make_shape(&name, ShapeKind::Patch, update_fields));
		}

		let primary_key = primary_key_for(class);
		let relations = self.build_relations(class, classes_by_oid);

		let relational = RelationalEntity { primary_key, indexes: class.indexes.clone(), relations, shapes };

		Entity {
			name,
			pg_name: class.relname.clone(),
			oid: class.oid,
			schema_name: class.schema_name.clone(),
			smart_tags: SmartTags::parse(class.comment.as_deref()),
			can_select,
			can_insert,
			can_update,
			can_delete,
			kind: if is_view { EntityKind::View(relational) } else { EntityKind::Table(relational) },
		}
	}

	fn make_shape(&self, entity_name: &str, kind: ShapeKind, fields: Vec<Field>) -> Shape {
		Shape { entity_name: entity_name.to_string(), kind, name: self.inflector.shape_name(entity_name, kind), fields }
	}

	fn build_row_fields(&self, class: &ClassRow, types_by_oid: &HashMap<Oid, &TypeRow>) -> Vec<Field> {
		let mut columns: Vec<&AttributeRow> = class.columns.iter().collect();
		columns.sort_by_key(|a| a.attnum);
		columns
			.into_iter()
			.filter(|attr| field_grants(class.grants, attr.grants).select)
			.map(|attr| self.build_field(attr, types_by_oid, false))
			.collect()
	}

	fn build_field(&self, attr: &AttributeRow, types_by_oid: &HashMap<Oid, &TypeRow>, force_optional: bool) -> Field {
		let grants = field_grants(Grants::all(), attr.grants);
		let ty = types_by_oid.get(&attr.type_oid).copied();
		let (is_array, element_type_name) = match ty {
			Some(t) => match t.element_type_oid.and_then(|oid| types_by_oid.get(&oid)) {
				Some(elem) => (true, Some(elem.typname.clone())),
				None => (false, None),
			},
			None => {
				if self.logged_unknown_types.borrow_mut().insert(attr.type_oid) {
					debug!(type_oid = attr.type_oid.0, "unknown pg type category, treating as opaque");
				}
				(false, None)
			}
		};
		// Row-shape optionality tracks nullability only: a SELECT always
		// returns a NOT NULL column's value regardless of whether it has a
		// default (the default only ever matters for what may be omitted
		// on INSERT, handled separately in `build_insert_fields`).
		let optional = if force_optional { true } else { !attr.attnotnull };
		Field {
			name: self.inflector.camel(&attr.attname),
			column_name: attr.attname.clone(),
			nullable: !attr.attnotnull,
			optional,
			has_default: attr.atthasdef,
			is_generated: matches!(attr.attgenerated, pg_sourcerer_catalog::GeneratedKind::Stored),
			is_identity: !matches!(attr.attidentity, IdentityKind::NotIdentity),
			is_array,
			element_type_name,
			grants,
			attribute: attr.clone(),
			smart_tags: SmartTags::parse(attr.comment.as_deref()),
		}
	}

	fn build_insert_fields(&self, row_fields: &[Field], entity_can_insert: bool) -> Vec<Field> {
		if !entity_can_insert {
			return Vec::new();
		}
		row_fields
			.iter()
			.filter(|f| f.grants.insert && !matches!(f.attribute.attidentity, IdentityKind::Always) && !f.is_generated)
			.map(|f| {
				let mut field = f.clone();
				field.optional = !(!field.nullable && !field.has_default);
				field
			})
			.collect()
	}

	fn build_update_update_fields(&self, row_fields: &[Field], entity_can_update: bool) -> Vec<Field> {
		if !entity_can_update {
			return Vec::new();
		}
		row_fields
			.iter()
			.filter(|f| f.grants.update && !matches!(f.attribute.attidentity, IdentityKind::Always) && !f.is_generated)
			.map(|f| {
				let mut field = f.clone();
				field.optional = true;
				field
			})
			.collect()
	}

	fn build_relations(&self, class: &ClassRow, classes_by_oid: &HashMap<Oid, &ClassRow>) -> Vec<RelationEdge> {
		let mut fks: Vec<_> = self.catalog.foreign_keys.iter().filter(|fk| fk.source_class_oid == class.oid).collect();
		fks.sort_by(|a, b| a.name.cmp(&b.name));

		fks.into_iter()
			.filter_map(|fk| {
				let target = classes_by_oid.get(&fk.target_class_oid)?;
				let local_columns: Vec<String> = fk.column_pairs.iter().map(|(l, _)| l.clone()).collect();
				let foreign_columns: Vec<String> = fk.column_pairs.iter().map(|(_, f)| f.clone()).collect();
				let local_set: HashSet<&str> = local_columns.iter().map(String::as_str).collect();
				let is_unique = class.indexes.iter().any(|idx| idx.is_unique && idx.columns.iter().map(String::as_str).collect::<HashSet<_>>() == local_set);
				let cardinality = if is_unique { Cardinality::OneToOne } else { Cardinality::ManyToOne };
				Some(RelationEdge {
					constraint_name: fk.name.clone(),
					target_entity: self.inflector.pascal(&self.inflector.singular(&target.relname)),
					local_columns,
					foreign_columns,
					cardinality,
					smart_tags: SmartTags::parse(fk.comment.as_deref()),
				})
			})
			.collect()
	}

	fn build_type_entity(&self, ty: &TypeRow) -> Option<Entity> {
		let kind = match ty.typtype {
			TypeKind::Enum => EntityKind::Enum(EnumEntity { labels: ty.enum_values.clone().unwrap_or_default() }),
			TypeKind::Domain => {
				let base = ty.base_type_oid.unwrap_or_else(|| {
					trace!(typname = %ty.typname, "domain without a base type, defaulting to oid 0");
					Oid(0)
				});
				EntityKind::Domain(DomainEntity {
					base_type_oid: base,
					checks: ty.constraints.clone().unwrap_or_default().into_iter().map(|c| c.definition).collect(),
				})
			}
			TypeKind::Composite => EntityKind::Composite(CompositeEntity {
				fields: ty.composite_fields.clone().unwrap_or_default().into_iter().map(|f| CompositeField { name: f.name, type_oid: f.type_oid }).collect(),
			}),
			TypeKind::Base | TypeKind::Pseudo | TypeKind::Range | TypeKind::Multirange => return None,
		};
		Some(Entity {
			name: self.inflector.pascal(&ty.typname),
			pg_name: ty.typname.clone(),
			oid: ty.oid,
			schema_name: ty.schema_name.clone(),
			smart_tags: SmartTags::default(),
			can_select: true,
			can_insert: false,
			can_update: false,
			can_delete: false,
			kind,
		})
	}
}

fn field_grants(entity: Grants, column: Grants) -> Grants {
	Grants {
		select: entity.select && column.select,
		insert: entity.insert && column.insert,
		update: entity.update && column.update,
		delete: entity.delete && column.delete,
	}
}

fn primary_key_for(class: &ClassRow) -> Option<PrimaryKey> {
	if let Some(idx) = class.indexes.iter().find(|idx| idx.is_unique && !idx.is_partial && !idx.is_expression && idx.name.ends_with("_pkey")) {
		return Some(PrimaryKey { columns: idx.columns.clone(), is_virtual: false });
	}
	class.indexes.iter().find(|idx| idx.is_unique && !idx.is_partial).map(|idx| PrimaryKey { columns: idx.columns.clone(), is_virtual: true })
}
