use serde_json::Value;
use thiserror::Error;

/// One symbolic reference that never resolved to a registered symbol
/// (`spec.md` §6.4 `UndefinedReference`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedReferenceEntry {
	pub capability: String,
	pub entity: String,
	pub shape: Option<String>,
	pub plugin: String,
	pub file: String,
}

/// The engine's error taxonomy (`spec.md` §6.4): exactly the variants
/// named there, plus `CatalogUnavailable` as a transparent pass-through
/// for whatever the external introspection collaborator raised before
/// `generate` was ever called.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("catalog unavailable")]
	CatalogUnavailable(#[source] anyhow::Error),

	#[error("no provider for capability `{kind}` (requested by {requested_by})")]
	NoProvider { kind: String, params: Value, requested_by: String },

	#[error("ambiguous provider for capability `{kind}`: candidates {candidates:?}")]
	AmbiguousProvider { kind: String, params: Value, candidates: Vec<String> },

	#[error("dependency cycle: {edges:?}")]
	DependencyCycle { edges: Vec<(String, String)> },

	#[error("plugin `{plugin}` failed during provide")]
	PluginExecutionFailed { plugin: String, #[source] cause: anyhow::Error },

	#[error("emit conflict at `{path}`: written by {plugins:?}")]
	EmitConflict { path: String, plugins: Vec<String> },

	#[error("symbol collision: `{symbol}` in `{file}` emitted by {plugins:?}")]
	SymbolCollision { file: String, symbol: String, plugins: Vec<String> },

	#[error("{} unresolved symbolic reference(s)", .references.len())]
	UndefinedReference { references: Vec<UndefinedReferenceEntry> },
}

impl From<pg_sourcerer_resolver::ResolverError> for EngineError {
	fn from(err: pg_sourcerer_resolver::ResolverError) -> Self {
		use pg_sourcerer_resolver::ResolverError;
		match err {
			ResolverError::NoProvider { kind, params, requested_by } => EngineError::NoProvider { kind, params, requested_by },
			ResolverError::AmbiguousProvider { kind, params, candidates } => EngineError::AmbiguousProvider { kind, params, candidates },
			ResolverError::DependencyCycle { edges } => EngineError::DependencyCycle { edges },
		}
	}
}
