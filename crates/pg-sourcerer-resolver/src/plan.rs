use serde_json::Value;

use crate::request::RequestSpec;

/// Memoization key: `(plugin.name, canonicalJson(params))` (`spec.md`
/// §4.5 "Memoization key"). Two requests sharing a key resolve to the
/// same plan node and therefore the same `provide` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
	pub plugin_name: String,
	pub canonical_params: String,
}

/// One provider invocation in the execution plan.
#[derive(Debug, Clone)]
pub struct PlanNode {
	pub key: NodeKey,
	/// Index into the plugin list the plan was built against.
	pub plugin_index: usize,
	pub params: Value,
	/// `requires(params)` sub-requests, parallel to `deps`.
	pub requires: Vec<RequestSpec>,
	/// Resolved dependency keys, in `requires(params)` declaration order.
	pub deps: Vec<NodeKey>,
	/// `optional_requires(params)` sub-requests, parallel to `optional_deps`.
	pub optional_requires: Vec<RequestSpec>,
	/// Resolved optional-dependency keys; `None` where no provider matched.
	pub optional_deps: Vec<Option<NodeKey>>,
}

/// A topologically ordered execution plan: dependencies always precede
/// their dependents (`spec.md` §4.5 step 5).
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlan {
	pub nodes: Vec<PlanNode>,
}

impl ExecutionPlan {
	pub fn node(&self, key: &NodeKey) -> Option<&PlanNode> {
		self.nodes.iter().find(|n| &n.key == key)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}
