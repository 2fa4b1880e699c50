use std::any::Any;
use std::sync::Arc;

use pg_sourcerer_resolver::{CapabilityProvider, RequestSpec};
use serde_json::Value;

use crate::context::ExecutionContext;

/// A plugin's `provide` return value, type-erased so the engine can hold
/// results from arbitrarily different plugins in one memoization table.
/// Downcast through [`ExecutionContext::request`] or the `deps` slice
/// `provide` receives.
pub type PluginResult = Arc<dyn Any + Send + Sync>;

/// The plugin contract (`spec.md` §6.2). Extends [`CapabilityProvider`]
/// (the resolver's narrower view) with the one thing the resolver must
/// never touch: doing the actual work.
pub trait Plugin: Send + Sync {
	fn name(&self) -> &str;
	fn kind(&self) -> &str;
	fn singleton(&self) -> bool {
		false
	}
	fn singleton_params(&self) -> Value {
		Value::Null
	}
	fn can_provide(&self, params: &Value) -> bool;
	fn requires(&self, params: &Value) -> Vec<RequestSpec> {
		Vec::new()
	}
	fn optional_requires(&self, params: &Value) -> Vec<RequestSpec> {
		Vec::new()
	}

	/// Does the work. `deps` holds one resolved result per `requires`
	/// entry, in declaration order; `optional_deps` holds one `Option` per
	/// `optional_requires` entry. May emit files and register symbols
	/// through `ctx`. Any error is wrapped by the engine as
	/// `PluginExecutionFailed` with this plugin's name attached.
	fn provide(&self, params: &Value, deps: &[PluginResult], optional_deps: &[Option<PluginResult>], ctx: &ExecutionContext<'_>) -> anyhow::Result<PluginResult>;
}

/// Bridges a `dyn Plugin` into the narrower `dyn CapabilityProvider` the
/// resolver operates over, without requiring trait-object upcasting: the
/// resolver crate must not know `Plugin::provide` exists at all
/// (`spec.md` §9: the resolver only matches and orders, it does not
/// execute).
pub(crate) struct CapabilityAdapter(pub Arc<dyn Plugin>);

impl CapabilityProvider for CapabilityAdapter {
	fn name(&self) -> &str {
		self.0.name()
	}
	fn kind(&self) -> &str {
		self.0.kind()
	}
	fn singleton(&self) -> bool {
		self.0.singleton()
	}
	fn singleton_params(&self) -> Value {
		self.0.singleton_params()
	}
	fn can_provide(&self, params: &Value) -> bool {
		self.0.can_provide(params)
	}
	fn requires(&self, params: &Value) -> Vec<RequestSpec> {
		self.0.requires(params)
	}
	fn optional_requires(&self, params: &Value) -> Vec<RequestSpec> {
		self.0.optional_requires(params)
	}
}

/// Wraps every plugin in `plugins` as a `dyn CapabilityProvider`, in the
/// same order, so a [`pg_sourcerer_resolver::PlanNode::plugin_index`]
/// built against the result indexes back into `plugins` unchanged.
pub fn as_capability_providers(plugins: &[Arc<dyn Plugin>]) -> Vec<Arc<dyn CapabilityProvider>> {
	plugins.iter().map(|p| Arc::new(CapabilityAdapter(p.clone())) as Arc<dyn CapabilityProvider>).collect()
}
