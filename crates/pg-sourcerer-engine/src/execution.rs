use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use pg_sourcerer_emit::EmissionBuffer;
use pg_sourcerer_inflect::Inflector;
use pg_sourcerer_ir::SemanticIr;
use pg_sourcerer_resolver::{ExecutionPlan, NodeKey};
use pg_sourcerer_symbols::SymbolRegistry;
use tracing::info_span;

use crate::context::ExecutionContext;
use crate::error::EngineError;
use crate::plugin::{Plugin, PluginResult};
use crate::type_hints::TypeHintRegistry;

/// Walks a resolved [`ExecutionPlan`] in topological order, invoking each
/// node's plugin exactly once and memoizing its result (`spec.md` §4.6).
/// Single-threaded and cooperative: there is no suspension point between
/// one node finishing and the next one starting (`spec.md` §5).
pub struct ExecutionEngine<'a> {
	plugins: &'a [Arc<dyn Plugin>],
	ir: &'a SemanticIr,
	inflector: &'a Inflector,
	symbols: &'a RefCell<SymbolRegistry>,
	emission: &'a RefCell<EmissionBuffer>,
	type_hints: &'a RefCell<TypeHintRegistry>,
}

impl<'a> ExecutionEngine<'a> {
	pub fn new(
		plugins: &'a [Arc<dyn Plugin>],
		ir: &'a SemanticIr,
		inflector: &'a Inflector,
		symbols: &'a RefCell<SymbolRegistry>,
		emission: &'a RefCell<EmissionBuffer>,
		type_hints: &'a RefCell<TypeHintRegistry>,
	) -> Self {
		Self { plugins, ir, inflector, symbols, emission, type_hints }
	}

	/// Runs every node in `plan.nodes` order. Because the plan is already
	/// topologically sorted, a node's dependencies are guaranteed to have
	/// a memoized result in `results` by the time the node itself runs —
	/// no recursive "ensure ancestors ran first" check is needed here
	/// (`spec.md` §4.6 step 1: "engine-enforced; nodes are visited in
	/// topological order so this is a constant-time check").
	pub fn run(&self, plan: &ExecutionPlan) -> Result<HashMap<NodeKey, PluginResult>, EngineError> {
		let mut results: HashMap<NodeKey, PluginResult> = HashMap::with_capacity(plan.len());

		for node in &plan.nodes {
			let plugin = &self.plugins[node.plugin_index];
			let _span = info_span!("plugin_provide", plugin = %plugin.name(), capability = %plugin.kind()).entered();

			let deps: Vec<PluginResult> = node
				.deps
				.iter()
				.map(|key| results.get(key).cloned().expect("dependency resolved earlier in topological order"))
				.collect();
			let optional_deps: Vec<Option<PluginResult>> = node.optional_deps.iter().map(|key| key.as_ref().and_then(|k| results.get(k).cloned())).collect();

			let ctx = ExecutionContext::new(self.ir, self.inflector, self.symbols, self.emission, self.type_hints, node, &results);

			let value = plugin
				.provide(&node.params, &deps, &optional_deps, &ctx)
				.map_err(|cause| EngineError::PluginExecutionFailed { plugin: plugin.name().to_string(), cause })?;

			results.insert(node.key.clone(), value);
		}

		Ok(results)
	}
}
