//! Shared fixtures for the root crate's scenario tests (`spec.md` §8
//! "Concrete end-to-end scenarios"). Not a test binary itself — included
//! via `mod common;` from each `tests/scenario_*.rs` file, the same
//! shared-fixture convention the teacher workspace uses for its
//! `tests/integration` crate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pg_sourcerer::catalog::{AttributeRow, CatalogSnapshot, ClassRow, GeneratedKind, Grants, IdentityKind, IndexRow, Oid, RelKind};
use pg_sourcerer::emit::{ImportRef, Item, Program};
use pg_sourcerer::engine::{ExecutionContext, Plugin, PluginResult, RequestSpec};
use pg_sourcerer::ir::ShapeKind;
use pg_sourcerer::symbols::{Symbol, SymbolRef};
use serde_json::Value;

/// `users(id uuid NOT NULL DEFAULT gen_random_uuid(), name text)` — the
/// fixture catalog used by Scenarios A, B, E, and F.
pub fn users_catalog() -> CatalogSnapshot {
	CatalogSnapshot {
		classes: vec![ClassRow {
			oid: Oid(100),
			relname: "users".into(),
			relkind: RelKind::OrdinaryTable,
			schema_name: "public".into(),
			columns: vec![
				AttributeRow {
					attname: "id".into(),
					attnum: 1,
					attnotnull: true,
					atthasdef: true,
					attidentity: IdentityKind::NotIdentity,
					attgenerated: GeneratedKind::NotGenerated,
					type_oid: Oid(2950),
					grants: Grants::all(),
					comment: None,
				},
				AttributeRow {
					attname: "name".into(),
					attnum: 2,
					attnotnull: false,
					atthasdef: false,
					attidentity: IdentityKind::NotIdentity,
					attgenerated: GeneratedKind::NotGenerated,
					type_oid: Oid(25),
					grants: Grants::all(),
					comment: None,
				},
			],
			indexes: vec![IndexRow { name: "users_pkey".into(), columns: vec!["id".into()], is_unique: true, is_partial: false, method: "btree".into(), is_expression: false }],
			constraints: vec![],
			grants: Grants::all(),
			comment: None,
		}],
		types: vec![],
		foreign_keys: vec![],
	}
}

/// The simplest printer that could work: concatenate every item's body
/// with newlines, prefixing a doc comment when present. Good enough to
/// exercise import placement without pulling in a real formatter.
pub fn printer(program: &Program) -> String {
	program
		.iter()
		.map(|item| match item {
			Item::Raw(text) => text.clone(),
			Item::Block { doc: Some(doc), body } => format!("{doc}\n{body}"),
			Item::Block { doc: None, body } => body.clone(),
		})
		.collect::<Vec<_>>()
		.join("\n")
}

/// Emits one `<Entity>.ts` type declaration per table/view's row shape.
pub struct TypesPlugin;

impl Plugin for TypesPlugin {
	fn name(&self) -> &str {
		"types-plugin"
	}

	fn kind(&self) -> &str {
		"types"
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		for entity in ctx.ir().entities() {
			let Some(relational) = entity.as_relational() else { continue };
			let Some(row) = relational.shape(ShapeKind::Row) else { continue };
			let fields = row
				.fields
				.iter()
				.map(|f| {
					let marker = if f.optional { "?" } else { "" };
					let ty = if f.nullable { "string | null" } else { "string" };
					format!("  {}{marker}: {ty};", f.name)
				})
				.collect::<Vec<_>>()
				.join("\n");
			let path = format!("{}.ts", entity.name);
			ctx.file(&path).emit(format!("export type {} = {{\n{fields}\n}};", entity.name));
			ctx.register_symbol(Symbol { name: entity.name.clone(), file: path, capability: "types".to_string(), entity: entity.name.clone(), shape: None, is_type: true, is_default: false });
		}
		Ok(Arc::new(()) as PluginResult)
	}
}

/// Emits `schemas/zod/<Entity>.ts` with a symbolic import back to the
/// `types` plugin's emission (Scenario B).
pub struct ZodPlugin;

impl Plugin for ZodPlugin {
	fn name(&self) -> &str {
		"zod-plugin"
	}

	fn kind(&self) -> &str {
		"schemas:zod"
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn requires(&self, _params: &Value) -> Vec<RequestSpec> {
		vec![RequestSpec::new("types", Value::Null)]
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		for entity in ctx.ir().entities() {
			if !entity.is_table() {
				continue;
			}
			ctx.file(format!("schemas/zod/{}.ts", entity.name)).emit_ast(
				vec![Item::Raw(format!("export const {}Schema = z.object({{}});", entity.name))],
				None,
				vec![ImportRef::Symbol(SymbolRef::new("types", entity.name.clone(), None))],
			);
		}
		Ok(Arc::new(()) as PluginResult)
	}
}

/// Emits a symbolic import to a capability no plugin provides
/// (Scenario F).
pub struct DanglingRefPlugin;

impl Plugin for DanglingRefPlugin {
	fn name(&self) -> &str {
		"dangling-ref-plugin"
	}

	fn kind(&self) -> &str {
		"http-routes"
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		ctx.file("routes/Missing.ts").emit_ast(vec![Item::Raw("export const route = {};".to_string())], None, vec![ImportRef::Symbol(SymbolRef::new("nonexistent", "Missing", None))]);
		Ok(Arc::new(()) as PluginResult)
	}
}

/// Two independent plugins that both write `index.ts` unconditionally
/// (Scenario E).
pub struct ConflictingPlugin {
	pub plugin_name: &'static str,
	pub kind_name: &'static str,
}

impl Plugin for ConflictingPlugin {
	fn name(&self) -> &str {
		self.plugin_name
	}

	fn kind(&self) -> &str {
		self.kind_name
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		ctx.file("index.ts").emit(format!("// written by {}", self.plugin_name));
		Ok(Arc::new(()) as PluginResult)
	}
}

pub fn as_plugin<P: Plugin + 'static>(plugin: P) -> Arc<dyn Plugin> {
	Arc::new(plugin)
}

/// A singleton capability counting how many times `provide` actually ran,
/// for Scenario C/D's "shared node runs exactly once" assertions.
pub struct CountingSingletonPlugin {
	pub calls: Arc<AtomicUsize>,
}

impl Plugin for CountingSingletonPlugin {
	fn name(&self) -> &str {
		"counting-singleton"
	}

	fn kind(&self) -> &str {
		"connection"
	}

	fn singleton(&self) -> bool {
		true
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], _ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(()) as PluginResult)
	}
}

/// A bare node in a hand-built capability graph: requires whatever
/// `RequestSpec`s it's constructed with and records its own name into a
/// shared call log when `provide` runs, for asserting both "ran once" and
/// "ran in the right order" (Scenario D).
pub struct RelayPlugin {
	pub plugin_name: &'static str,
	pub kind_name: &'static str,
	pub requires: Vec<RequestSpec>,
	pub log: Arc<std::sync::Mutex<Vec<String>>>,
}

impl Plugin for RelayPlugin {
	fn name(&self) -> &str {
		self.plugin_name
	}

	fn kind(&self) -> &str {
		self.kind_name
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn requires(&self, _params: &Value) -> Vec<RequestSpec> {
		self.requires.clone()
	}

	fn provide(&self, _params: &Value, _deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], _ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		self.log.lock().unwrap().push(self.plugin_name.to_string());
		Ok(Arc::new(()) as PluginResult)
	}
}

/// Depends on the shared `connection` singleton but otherwise emits
/// nothing of its own.
pub struct ConnectionConsumerPlugin {
	pub plugin_name: &'static str,
	pub kind_name: &'static str,
}

impl Plugin for ConnectionConsumerPlugin {
	fn name(&self) -> &str {
		self.plugin_name
	}

	fn kind(&self) -> &str {
		self.kind_name
	}

	fn can_provide(&self, _params: &Value) -> bool {
		true
	}

	fn requires(&self, _params: &Value) -> Vec<RequestSpec> {
		vec![RequestSpec::new("connection", Value::Null)]
	}

	fn provide(&self, _params: &Value, deps: &[PluginResult], _optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult> {
		let _connection: Arc<()> = ctx.request("connection", &Value::Null);
		let _ = deps;
		Ok(Arc::new(()) as PluginResult)
	}
}
