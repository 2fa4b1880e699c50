//! The execution engine, plugin contract, and error taxonomy (`spec.md`
//! §4.6, §4.8, §6.2, §6.4). Sits directly on top of
//! `pg-sourcerer-resolver`'s plan; the orchestrator (root `pg_sourcerer`
//! crate) wires IR building, resolution, execution, serialization, and
//! validation into the single `generate()` entry point.

mod context;
mod error;
mod execution;
mod plugin;
mod type_hints;
mod validation;

pub use context::{ExecutionContext, FileBuilder};
pub use error::{EngineError, UndefinedReferenceEntry};
pub use execution::ExecutionEngine;
pub use plugin::{as_capability_providers, Plugin, PluginResult};
pub use pg_sourcerer_resolver::{PrecedenceRule, RequestSpec};
pub use type_hints::TypeHintRegistry;
pub use validation::validate;
