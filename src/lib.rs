//! pg-sourcerer: a catalog-to-code generator engine. Ingests a PostgreSQL
//! catalog snapshot and a set of plugins, and emits a `path -> content`
//! map of generated source files (`spec.md` §1, §4.9).
//!
//! This crate is the orchestrator: it wires the Semantic IR builder, the
//! capability resolver, the execution engine, the emission buffer, and
//! validation into the single [`generate`] entry point. Each concern
//! lives in its own crate (`pg-sourcerer-ir`, `-resolver`, `-engine`,
//! `-emit`, `-symbols`, `-inflect`, `-catalog`); this crate only wires
//! them together (`spec.md` §9: "Layer-based construction... Replace
//! with a single explicit wiring step at the top of `generate()`").

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use pg_sourcerer_catalog::CatalogSnapshot;
use pg_sourcerer_emit::{EmissionBuffer, Program};
use pg_sourcerer_engine::{as_capability_providers, validate, EngineError, ExecutionEngine, Plugin, TypeHintRegistry};
use pg_sourcerer_inflect::{InflectionConfig, Inflector};
use pg_sourcerer_ir::IrBuilder;
use pg_sourcerer_resolver::{resolve_plan, PendingRequest, PrecedenceRule};
use pg_sourcerer_symbols::SymbolRegistry;
use serde_json::Value;
use tracing::info_span;

pub use pg_sourcerer_catalog as catalog;
pub use pg_sourcerer_emit as emit;
pub use pg_sourcerer_engine as engine;
pub use pg_sourcerer_inflect as inflect;
pub use pg_sourcerer_ir as ir;
pub use pg_sourcerer_resolver as resolver;
pub use pg_sourcerer_symbols as symbols;

/// The full parameter record `generate()` takes (`spec.md` §4.9
/// expansion). `role` documents which effective role the catalog
/// snapshot's grants were already resolved against (`spec.md` §4.2 step
/// 6) — the engine itself does not re-derive grants from a role name, it
/// only carries the label through for observability. `precedence`, if
/// set, breaks an otherwise-ambiguous capability match instead of failing
/// the whole pass (`spec.md` §4.5 step 2: "unless an explicit precedence
/// rule is supplied by config").
pub struct GenerateConfig {
	pub catalog: CatalogSnapshot,
	pub plugins: Vec<Arc<dyn Plugin>>,
	pub schemas: Vec<String>,
	pub output_root: PathBuf,
	pub inflection: InflectionConfig,
	pub type_hints: TypeHintRegistry,
	pub role: String,
	pub precedence: Option<PrecedenceRule>,
}

/// Runs one generation pass: build IR → instantiate registries → resolve
/// plan → execute → serialize → validate → return (`spec.md` §4.9
/// Lifecycle). `printer` renders a plugin's emitted [`Program`] into
/// final source text; the engine does not prescribe an AST shape beyond
/// that (`spec.md` §9).
pub fn generate(config: GenerateConfig, printer: impl Fn(&Program) -> String) -> Result<HashMap<String, String>, EngineError> {
	let _span = info_span!("generate", role = %config.role, output_root = %config.output_root.display()).entered();

	let inflector = Inflector::new(config.inflection);
	let ir = IrBuilder::new(&config.catalog, &inflector, &config.schemas).build();

	let symbols = RefCell::new(SymbolRegistry::new());
	let emission = RefCell::new(EmissionBuffer::new());
	let type_hints = RefCell::new(config.type_hints);

	let providers = as_capability_providers(&config.plugins);
	let seeds: Vec<PendingRequest> = config.plugins.iter().map(|p| PendingRequest::root(p.kind().to_string(), Value::Null, "<orchestrator>")).collect();

	let plan = resolve_plan(&providers, seeds, config.precedence.as_ref())?;

	let engine = ExecutionEngine::new(&config.plugins, &ir, &inflector, &symbols, &emission, &type_hints);
	engine.run(&plan)?;

	emission.borrow_mut().serialize_ast(&printer, &symbols.borrow());
	validate(&emission.borrow(), &symbols.borrow())?;

	Ok(emission.into_inner().into_emissions().into_iter().collect())
}
