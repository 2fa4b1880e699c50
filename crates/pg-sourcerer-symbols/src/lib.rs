//! Tracks every top-level binding a plugin emits and resolves the
//! cross-file imports that reference them (`spec.md` §4.3).

use indexmap::IndexMap;

/// A reference to a registered symbol: the composite key a plugin uses to
/// look one up, e.g. "give me the `types` capability's emission for `User`".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolRef {
	pub capability: String,
	pub entity: String,
	pub shape: Option<String>,
}

impl SymbolRef {
	pub fn new(capability: impl Into<String>, entity: impl Into<String>, shape: Option<String>) -> Self {
		Self { capability: capability.into(), entity: entity.into(), shape }
	}

	fn key(&self) -> String {
		format!("{}:{}:{}", self.capability, self.entity, self.shape.as_deref().unwrap_or(""))
	}
}

/// A single emitted top-level binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
	pub name: String,
	/// Path relative to the output root.
	pub file: String,
	pub capability: String,
	pub entity: String,
	pub shape: Option<String>,
	pub is_type: bool,
	pub is_default: bool,
}

impl Symbol {
	fn symbol_ref(&self) -> SymbolRef {
		SymbolRef { capability: self.capability.clone(), entity: self.entity.clone(), shape: self.shape.clone() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegisteredSymbol {
	plugin: String,
	symbol: Symbol,
}

/// `(file, symbol name)` emitted by more than one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCollision {
	pub file: String,
	pub symbol: String,
	pub plugins: Vec<String>,
}

/// The kind of import statement a resolved reference becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
	Default,
	Named,
	Type,
}

/// A concrete import, ready to be merged and printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
	pub from: String,
	pub kind: ImportKind,
	pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
	by_key: IndexMap<String, Vec<RegisteredSymbol>>,
}

impl SymbolRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `symbol` under `plugin`'s name. A second registration from
	/// the same plugin against the same key replaces its prior entry
	/// in-place (idempotent re-registration); a registration from a
	/// different plugin is retained alongside it for `validate` to catch.
	pub fn register(&mut self, symbol: Symbol, plugin: &str) {
		let entries = self.by_key.entry(symbol.symbol_ref().key()).or_default();
		if let Some(existing) = entries.iter_mut().find(|e| e.plugin == plugin) {
			existing.symbol = symbol;
		} else {
			entries.push(RegisteredSymbol { plugin: plugin.to_string(), symbol });
		}
	}

	/// The first symbol registered for `symbol_ref`, if any.
	pub fn resolve(&self, symbol_ref: &SymbolRef) -> Option<&Symbol> {
		self.by_key.get(&symbol_ref.key()).and_then(|entries| entries.first()).map(|e| &e.symbol)
	}

	/// Computes the import statement a file at `from_file` should use to
	/// reference `symbol`. See module docs / `spec.md` §4.3's relative-path
	/// contract.
	pub fn import_for(&self, symbol: &Symbol, from_file: &str) -> ImportStatement {
		let path = relative_path(from_file, &symbol.file);
		let kind = if symbol.is_default {
			ImportKind::Default
		} else if symbol.is_type {
			ImportKind::Type
		} else {
			ImportKind::Named
		};
		ImportStatement { from: path, kind, name: symbol.name.clone() }
	}

	/// `(file, name)` pairs emitted by more than one plugin.
	pub fn validate(&self) -> Vec<SymbolCollision> {
		let mut by_file_name: IndexMap<(String, String), Vec<String>> = IndexMap::new();
		for entries in self.by_key.values() {
			for entry in entries {
				by_file_name.entry((entry.symbol.file.clone(), entry.symbol.name.clone())).or_default().push(entry.plugin.clone());
			}
		}
		by_file_name
			.into_iter()
			.filter(|(_, plugins)| plugins.len() > 1)
			.map(|((file, symbol), plugins)| SymbolCollision { file, symbol, plugins })
			.collect()
	}
}

/// Computes a relative module path from `from_file` to `to_file`, both
/// slash-separated and relative to the same emission root, rewriting a
/// trailing `.ts` extension to `.js` (the generated code targets ESM
/// resolution with explicit extensions).
fn relative_path(from_file: &str, to_file: &str) -> String {
	let from_dir: Vec<&str> = from_file.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("").split('/').filter(|s| !s.is_empty()).collect();
	let to_segments: Vec<&str> = to_file.split('/').filter(|s| !s.is_empty()).collect();

	let mut common = 0;
	while common < from_dir.len() && common < to_segments.len() - 1 && from_dir[common] == to_segments[common] {
		common += 1;
	}

	let mut parts: Vec<String> = Vec::new();
	for _ in common..from_dir.len() {
		parts.push("..".to_string());
	}
	for segment in &to_segments[common..] {
		parts.push(segment.to_string());
	}

	let joined = if parts.is_empty() { to_segments.last().copied().unwrap_or_default().to_string() } else { parts.join("/") };
	let joined = if joined.starts_with("..") { joined } else { format!("./{joined}") };
	rewrite_extension(&joined)
}

fn rewrite_extension(path: &str) -> String {
	match path.strip_suffix(".ts") {
		Some(stem) => format!("{stem}.js"),
		None => path.to_string(),
	}
}
