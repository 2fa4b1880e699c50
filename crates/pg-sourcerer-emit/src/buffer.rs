use indexmap::{IndexMap, IndexSet};
use pg_sourcerer_symbols::{ImportKind, SymbolRegistry};
use tracing::trace;

use crate::ast::{Item, Program};
use crate::import_ref::ImportRef;

/// A path written to by more than one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConflict {
	pub path: String,
	pub plugins: Vec<String>,
}

/// A symbolic import that never resolved to a registered symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRef {
	pub capability: String,
	pub entity: String,
	pub shape: Option<String>,
	pub plugin: String,
	pub file: String,
}

struct AstEmission {
	program: Program,
	plugin: String,
	header: Option<String>,
	imports: Vec<ImportRef>,
}

#[derive(Default)]
struct MergedImport {
	default: Option<String>,
	names: IndexSet<String>,
	types: IndexSet<String>,
}

/// Staged generation output. Plugins write into this through the
/// orchestrator-provided context; nothing is written to disk until the
/// caller takes the final `path -> content` map off `emissions` after
/// `validate` succeeds (`spec.md` §4.4).
#[derive(Default)]
pub struct EmissionBuffer {
	emissions: IndexMap<String, String>,
	content_owner: IndexMap<String, String>,
	ast_emissions: IndexMap<String, AstEmission>,
	plugins_by_path: IndexMap<String, IndexSet<String>>,
	unresolved_refs: Vec<UnresolvedRef>,
}

impl EmissionBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	fn record_plugin(&mut self, path: &str, plugin: &str) {
		self.plugins_by_path.entry(path.to_string()).or_default().insert(plugin.to_string());
	}

	pub fn emit(&mut self, path: &str, content: String, plugin: &str) {
		self.emissions.insert(path.to_string(), content);
		self.content_owner.insert(path.to_string(), plugin.to_string());
		self.record_plugin(path, plugin);
	}

	pub fn emit_ast(&mut self, path: &str, program: Program, plugin: &str, header: Option<String>, imports: Vec<ImportRef>) {
		self.ast_emissions.insert(path.to_string(), AstEmission { program, plugin: plugin.to_string(), header, imports });
		self.content_owner.insert(path.to_string(), plugin.to_string());
		self.record_plugin(path, plugin);
	}

	/// Appends `content` to `path`'s existing entry iff that entry's
	/// current owner is `plugin`. Otherwise the append is silently
	/// discarded, but `plugin` is still recorded against `path` — which
	/// will surface as an `EmitConflict` during `validate`.
	pub fn append_emit(&mut self, path: &str, content: &str, plugin: &str) {
		let owned_by_caller = self.content_owner.get(path).map(String::as_str) == Some(plugin);
		if owned_by_caller {
			if let Some(existing) = self.emissions.get_mut(path) {
				existing.push_str(content);
			}
		} else {
			trace!(path, plugin, "discarding append: path not owned by this plugin");
		}
		self.record_plugin(path, plugin);
	}

	/// Resolves symbolic imports, merges imports by source, prepends the
	/// resulting declarations, prints with `printer`, and moves every
	/// pending AST emission into `emissions`. Idempotent: a second call on
	/// an already-drained buffer is a no-op (invariant 8).
	pub fn serialize_ast(&mut self, printer: impl Fn(&Program) -> String, symbols: &SymbolRegistry) {
		let pending: Vec<(String, AstEmission)> = self.ast_emissions.drain(..).collect();
		for (path, entry) in pending {
			let mut merged: IndexMap<String, MergedImport> = IndexMap::new();
			for import in &entry.imports {
				match import {
					ImportRef::Package { from, names, types, default } | ImportRef::Relative { from, names, types, default } => {
						let slot = merged.entry(from.clone()).or_default();
						if slot.default.is_none() {
							slot.default = default.clone();
						}
						slot.names.extend(names.iter().cloned());
						slot.types.extend(types.iter().cloned());
					}
					ImportRef::Symbol(symbol_ref) => match symbols.resolve(symbol_ref) {
						Some(symbol) => {
							let import = symbols.import_for(symbol, &path);
							let slot = merged.entry(import.from.clone()).or_default();
							match import.kind {
								ImportKind::Default => slot.default.get_or_insert(import.name),
								ImportKind::Named => {
									slot.names.insert(import.name);
									continue;
								}
								ImportKind::Type => {
									slot.types.insert(import.name);
									continue;
								}
							};
						}
						None => self.unresolved_refs.push(UnresolvedRef {
							capability: symbol_ref.capability.clone(),
							entity: symbol_ref.entity.clone(),
							shape: symbol_ref.shape.clone(),
							plugin: entry.plugin.clone(),
							file: path.clone(),
						}),
					},
				}
			}

			let mut import_items: Vec<Item> = Vec::new();
			for (from, group) in &merged {
				if group.default.is_some() || !group.names.is_empty() {
					import_items.push(Item::Raw(render_value_import(from, group.default.as_deref(), &group.names)));
				}
				if !group.types.is_empty() {
					import_items.push(Item::Raw(render_type_import(from, &group.types)));
				}
			}

			import_items.extend(entry.program);
			let printed = printer(&import_items);
			let final_content = match entry.header {
				Some(header) => format!("{header}\n{printed}"),
				None => printed,
			};
			self.emissions.insert(path, final_content);
		}
	}

	/// Every path whose contributing-plugin set has more than one member.
	pub fn validate(&self) -> Vec<EmitConflict> {
		self.plugins_by_path
			.iter()
			.filter(|(_, plugins)| plugins.len() > 1)
			.map(|(path, plugins)| EmitConflict { path: path.clone(), plugins: plugins.iter().cloned().collect() })
			.collect()
	}

	pub fn unresolved_refs(&self) -> &[UnresolvedRef] {
		&self.unresolved_refs
	}

	/// Drains the final `path -> content` map. Call only after `validate`
	/// returns no conflicts and `unresolved_refs` is empty.
	pub fn into_emissions(self) -> IndexMap<String, String> {
		self.emissions
	}

	pub fn emissions(&self) -> &IndexMap<String, String> {
		&self.emissions
	}
}

fn render_value_import(from: &str, default: Option<&str>, names: &IndexSet<String>) -> String {
	let named = names.iter().cloned().collect::<Vec<_>>().join(", ");
	match (default, named.is_empty()) {
		(Some(default), true) => format!("import {default} from '{from}';"),
		(Some(default), false) => format!("import {default}, {{ {named} }} from '{from}';"),
		(None, _) => format!("import {{ {named} }} from '{from}';"),
	}
}

fn render_type_import(from: &str, types: &IndexSet<String>) -> String {
	let named = types.iter().cloned().collect::<Vec<_>>().join(", ");
	format!("import type {{ {named} }} from '{from}';")
}
