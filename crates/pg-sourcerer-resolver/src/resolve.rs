//! Declare-phase fixed point, DAG construction, and topological ordering
//! (`spec.md` §4.5 steps 1–5).

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ResolverError;
use crate::plan::{ExecutionPlan, NodeKey, PlanNode};
use crate::request::{canonical_json, kind_matches, CapabilityProvider, RequestSpec};

/// A config-supplied tie-break for an otherwise-ambiguous match (`spec.md`
/// §4.5 step 2: "more than one is 'ambiguous' (error) unless an explicit
/// precedence rule is supplied by config"). Given the requested `kind` and
/// the names of every plugin whose `kind`/`can_provide` both matched,
/// returns the name of the one that should win, or `None` to leave the
/// request ambiguous (falls through to `AmbiguousProvider`).
pub type PrecedenceRule = Arc<dyn Fn(&str, &[String]) -> Option<String> + Send + Sync>;

/// A root request seeded before resolution starts: either a synthetic
/// singleton request, or one the caller (the orchestrator) issues
/// directly for a top-level plugin (`spec.md` §4.5 step 1).
#[derive(Debug, Clone)]
pub struct PendingRequest {
	pub kind: String,
	pub params: Value,
	pub requested_by: String,
}

impl PendingRequest {
	pub fn root(kind: impl Into<String>, params: Value, requested_by: impl Into<String>) -> Self {
		Self { kind: kind.into(), params, requested_by: requested_by.into() }
	}
}

/// Builds the execution plan for `plugins` given a seed request list.
/// `plugins` is indexed by position; the resulting `PlanNode::plugin_index`
/// refers back into this same slice, so the caller must invoke plugins
/// against the identical ordering it passed in here. `precedence`, if
/// supplied, is consulted to break an otherwise-ambiguous match before it
/// is raised as an error (`spec.md` §4.5 step 2).
pub fn resolve_plan(plugins: &[Arc<dyn CapabilityProvider>], seeds: Vec<PendingRequest>, precedence: Option<&PrecedenceRule>) -> Result<ExecutionPlan, ResolverError> {
	let mut ctx = ResolveCtx { plugins, precedence, nodes: IndexMap::new(), visiting: HashSet::new(), order: Vec::new() };

	let mut roots = seeds;
	for plugin in plugins.iter().filter(|p| p.singleton()) {
		roots.push(PendingRequest::root(plugin.kind().to_string(), plugin.singleton_params(), "<singleton>"));
	}

	for root in &roots {
		ctx.resolve_required(&root.kind, &root.params, &root.requested_by)?;
	}

	Ok(ExecutionPlan { nodes: ctx.order })
}

struct ResolveCtx<'a> {
	plugins: &'a [Arc<dyn CapabilityProvider>],
	precedence: Option<&'a PrecedenceRule>,
	nodes: IndexMap<NodeKey, ()>,
	visiting: HashSet<NodeKey>,
	order: Vec<PlanNode>,
}

impl<'a> ResolveCtx<'a> {
	fn match_provider(&self, kind: &str, params: &Value, requested_by: &str) -> Result<(usize, &'a Arc<dyn CapabilityProvider>), ResolverError> {
		let candidates: Vec<(usize, &Arc<dyn CapabilityProvider>)> = self.plugins.iter().enumerate().filter(|(_, p)| kind_matches(kind, p.kind()) && p.can_provide(params)).collect();
		match candidates.as_slice() {
			[] => Err(ResolverError::NoProvider { kind: kind.to_string(), params: params.clone(), requested_by: requested_by.to_string() }),
			[(index, plugin)] => Ok((*index, *plugin)),
			many => {
				let candidate_names: Vec<String> = many.iter().map(|(_, p)| p.name().to_string()).collect();
				if let Some(rule) = self.precedence {
					if let Some(preferred) = rule(kind, &candidate_names) {
						if let Some((index, plugin)) = many.iter().find(|(_, p)| p.name() == preferred) {
							return Ok((*index, *plugin));
						}
					}
				}
				Err(ResolverError::AmbiguousProvider { kind: kind.to_string(), params: params.clone(), candidates: candidate_names })
			}
		}
	}

	/// Resolves a `requires`-declared sub-request: no-provider is fatal.
	fn resolve_required(&mut self, kind: &str, params: &Value, requested_by: &str) -> Result<NodeKey, ResolverError> {
		let (plugin_index, plugin) = self.match_provider(kind, params, requested_by)?;
		self.resolve_node(plugin_index, plugin.as_ref(), params, requested_by)
	}

	/// Resolves an `optional_requires`-declared sub-request: no-provider
	/// yields `None` rather than an error.
	fn resolve_optional(&mut self, kind: &str, params: &Value, requested_by: &str) -> Result<Option<NodeKey>, ResolverError> {
		match self.match_provider(kind, params, requested_by) {
			Ok((plugin_index, plugin)) => self.resolve_node(plugin_index, plugin.as_ref(), params, requested_by).map(Some),
			Err(ResolverError::NoProvider { .. }) => Ok(None),
			Err(other) => Err(other),
		}
	}

	/// Depth-first resolution of one matched node: recursively resolves
	/// its own sub-requests first, so pushing to `order` on the way back
	/// out yields a valid post-order topological walk. `visiting` tracks
	/// in-progress nodes to detect cycles.
	fn resolve_node(&mut self, plugin_index: usize, plugin: &dyn CapabilityProvider, params: &Value, requested_by: &str) -> Result<NodeKey, ResolverError> {
		// A singleton plugin shares one node regardless of what params a
		// particular requester passed (`spec.md` §4.5 step 4: "Singleton
		// nodes are shared: all requests to the same singleton resolve to
		// the same node") — only `singleton_params()` is ever used to key
		// or invoke it, mirroring the synthetic root seed in `resolve_plan`.
		let singleton_params = plugin.singleton_params();
		let params = if plugin.singleton() { &singleton_params } else { params };
		let node_key = NodeKey { plugin_name: plugin.name().to_string(), canonical_params: canonical_json(params) };

		if self.nodes.contains_key(&node_key) {
			return Ok(node_key);
		}
		if !self.visiting.insert(node_key.clone()) {
			return Err(ResolverError::DependencyCycle { edges: vec![(requested_by.to_string(), node_key.plugin_name.clone())] });
		}

		let requires = plugin.requires(params);
		let mut deps = Vec::with_capacity(requires.len());
		for sub in &requires {
			match self.resolve_required(&sub.kind, &sub.params, plugin.name()) {
				Ok(dep_key) => deps.push(dep_key),
				Err(ResolverError::DependencyCycle { mut edges }) => {
					edges.push((plugin.name().to_string(), node_key.plugin_name.clone()));
					self.visiting.remove(&node_key);
					return Err(ResolverError::DependencyCycle { edges });
				}
				Err(other) => {
					self.visiting.remove(&node_key);
					return Err(other);
				}
			}
		}

		let optional_requires = plugin.optional_requires(params);
		let mut optional_deps = Vec::with_capacity(optional_requires.len());
		for sub in &optional_requires {
			match self.resolve_optional(&sub.kind, &sub.params, plugin.name()) {
				Ok(resolved) => optional_deps.push(resolved),
				Err(other) => {
					self.visiting.remove(&node_key);
					return Err(other);
				}
			}
		}

		self.visiting.remove(&node_key);
		self.nodes.insert(node_key.clone(), ());
		self.order.push(PlanNode { key: node_key.clone(), plugin_index, params: params.clone(), requires, deps, optional_requires, optional_deps });
		Ok(node_key)
	}
}
