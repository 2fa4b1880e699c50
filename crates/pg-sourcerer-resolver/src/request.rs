//! Requests, the capability-provider interface, and the canonical-JSON
//! memoization key (`spec.md` §4.5).

use serde_json::Value;

/// A sub-dependency a matched plugin declares it needs, given the params
/// it was invoked with (`spec.md` §4.5 step 3 / §4.6 step 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
	pub kind: String,
	pub params: Value,
}

impl RequestSpec {
	pub fn new(kind: impl Into<String>, params: Value) -> Self {
		Self { kind: kind.into(), params }
	}
}

/// What the resolver needs from a plugin to route requests and build the
/// dependency graph. The full plugin contract (`spec.md` §6.2), including
/// `provide`, lives one layer up in `pg-sourcerer-engine` — the resolver
/// has no business invoking plugin work, only matching and ordering it.
pub trait CapabilityProvider {
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
	/// Best-effort sub-requests: a missing provider here is not fatal
	/// (`spec.md` §9 Open Questions / §4.5 expansion — kept separate from
	/// `requires`, which is all-or-nothing).
	fn optional_requires(&self, params: &Value) -> Vec<RequestSpec> {
		Vec::new()
	}
}

/// A request's capability kind is matched against a provider's `kind` by
/// exact equality or colon-delimited prefix (`spec.md` §3 Capability Key:
/// "a requester asking for `schemas` accepts any provider whose capability
/// string equals or begins with `schemas`").
pub fn kind_matches(requested: &str, provided: &str) -> bool {
	provided == requested || provided.starts_with(&format!("{requested}:"))
}

/// Sorts object keys lexicographically and omits null-valued entries
/// (`spec.md` §4.5: "Canonical JSON sorts object keys lexicographically
/// and omits undefined values" — `serde_json::Value` has no `undefined`,
/// so a present-but-null field is treated the same way here).
pub fn canonical_json(value: &Value) -> String {
	serde_json::to_string(&canonicalize(value)).expect("canonicalized values always serialize")
}

fn canonicalize(value: &Value) -> Value {
	match value {
		Value::Object(map) => {
			let mut entries: Vec<(String, Value)> = map.iter().filter(|(_, v)| !v.is_null()).map(|(k, v)| (k.clone(), canonicalize(v))).collect();
			entries.sort_by(|a, b| a.0.cmp(&b.0));
			Value::Object(entries.into_iter().collect())
		}
		Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
		other => other.clone(),
	}
}
