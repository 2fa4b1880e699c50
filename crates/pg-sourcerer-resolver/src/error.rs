use serde_json::Value;
use thiserror::Error;

/// Failure modes of plan resolution (`spec.md` §4.5 "Failure modes",
/// §6.4). `pg-sourcerer-engine`'s `EngineError` wraps each of these
/// unchanged.
#[derive(Debug, Error)]
pub enum ResolverError {
	#[error("no provider for capability `{kind}` (requested by {requested_by})")]
	NoProvider { kind: String, params: Value, requested_by: String },

	#[error("ambiguous provider for capability `{kind}`: candidates {candidates:?}")]
	AmbiguousProvider { kind: String, params: Value, candidates: Vec<String> },

	#[error("dependency cycle: {edges:?}")]
	DependencyCycle { edges: Vec<(String, String)> },
}
