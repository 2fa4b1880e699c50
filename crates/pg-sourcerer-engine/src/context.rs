use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use pg_sourcerer_catalog::Oid;
use pg_sourcerer_emit::{EmissionBuffer, ImportRef, Program};
use pg_sourcerer_inflect::Inflector;
use pg_sourcerer_ir::SemanticIr;
use pg_sourcerer_resolver::{canonical_json, NodeKey, PlanNode};
use pg_sourcerer_symbols::{Symbol, SymbolRegistry};
use serde_json::Value;

use crate::plugin::PluginResult;
use crate::type_hints::TypeHintRegistry;

/// A thin convenience wrapper over [`EmissionBuffer`] operations, scoped
/// to one path and tagged with the calling plugin's name (`spec.md` §9:
/// "a thin convenience wrapper over `EmissionBuffer.emit` operations;
/// implement as plain functions that return records").
pub struct FileBuilder<'a> {
	path: String,
	plugin: String,
	emission: &'a RefCell<EmissionBuffer>,
}

impl<'a> FileBuilder<'a> {
	pub fn emit(&self, content: impl Into<String>) {
		self.emission.borrow_mut().emit(&self.path, content.into(), &self.plugin);
	}

	pub fn emit_ast(&self, program: Program, header: Option<String>, imports: Vec<ImportRef>) {
		self.emission.borrow_mut().emit_ast(&self.path, program, &self.plugin, header, imports);
	}

	pub fn append(&self, content: impl AsRef<str>) {
		self.emission.borrow_mut().append_emit(&self.path, content.as_ref(), &self.plugin);
	}
}

/// Everything a plugin's `provide` gets handed (`spec.md` §4.6 step 3):
/// read-only IR and inflection, the shared symbol registry and emission
/// buffer, the shared type-hint registry, and `request` — a synchronous
/// lookup into the memoization table restricted to this node's own
/// declared dependencies.
pub struct ExecutionContext<'a> {
	ir: &'a SemanticIr,
	inflector: &'a Inflector,
	symbols: &'a RefCell<SymbolRegistry>,
	emission: &'a RefCell<EmissionBuffer>,
	type_hints: &'a RefCell<TypeHintRegistry>,
	node: &'a PlanNode,
	results: &'a HashMap<NodeKey, PluginResult>,
}

impl<'a> ExecutionContext<'a> {
	pub(crate) fn new(
		ir: &'a SemanticIr,
		inflector: &'a Inflector,
		symbols: &'a RefCell<SymbolRegistry>,
		emission: &'a RefCell<EmissionBuffer>,
		type_hints: &'a RefCell<TypeHintRegistry>,
		node: &'a PlanNode,
		results: &'a HashMap<NodeKey, PluginResult>,
	) -> Self {
		Self { ir, inflector, symbols, emission, type_hints, node, results }
	}

	pub fn ir(&self) -> &SemanticIr {
		self.ir
	}

	pub fn inflector(&self) -> &Inflector {
		self.inflector
	}

	pub fn plugin_name(&self) -> &str {
		&self.node.key.plugin_name
	}

	pub fn file(&self, path: impl Into<String>) -> FileBuilder<'a> {
		FileBuilder { path: path.into(), plugin: self.node.key.plugin_name.clone(), emission: self.emission }
	}

	pub fn register_symbol(&self, symbol: Symbol) {
		self.symbols.borrow_mut().register(symbol, &self.node.key.plugin_name);
	}

	pub fn type_hint(&self, type_oid: Oid) -> Option<String> {
		self.type_hints.borrow().get(type_oid).map(str::to_string)
	}

	pub fn set_type_hint(&self, type_oid: Oid, hint: impl Into<String>) {
		self.type_hints.borrow_mut().insert(type_oid, hint);
	}

	/// Alternate synchronous lookup into the memoization table for a
	/// dependency already declared via `requires`/`optional_requires`
	/// (`spec.md` §4.6 step 3). Calling this for a request this node
	/// never declared is a plugin-author contract violation, not a
	/// recoverable runtime condition — it panics, the same way the
	/// source's "access to `.result` before resolution" is a programming
	/// error (`spec.md` §3 Request/Deferred Resource).
	pub fn request<T: 'static + Send + Sync>(&self, kind: &str, params: &Value) -> Arc<T> {
		let canon = canonical_json(params);
		let key = self
			.node
			.requires
			.iter()
			.zip(self.node.deps.iter())
			.find(|(spec, _)| spec.kind == kind && canonical_json(&spec.params) == canon)
			.map(|(_, key)| key.clone())
			.or_else(|| {
				self.node
					.optional_requires
					.iter()
					.zip(self.node.optional_deps.iter())
					.find(|(spec, _)| spec.kind == kind && canonical_json(&spec.params) == canon)
					.and_then(|(_, key)| key.clone())
			})
			.unwrap_or_else(|| panic!("plugin `{}` requested `{kind}` without declaring it in requires()/optional_requires()", self.node.key.plugin_name));

		let value: &Arc<dyn Any + Send + Sync> = self
			.results
			.get(&key)
			.unwrap_or_else(|| panic!("dependency `{kind}` for plugin `{}` has not resolved yet (topological order violated)", self.node.key.plugin_name));

		value.clone().downcast::<T>().unwrap_or_else(|_| panic!("dependency `{kind}` for plugin `{}` resolved to an unexpected type", self.node.key.plugin_name))
	}
}
