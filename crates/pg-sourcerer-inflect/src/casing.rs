//! Deterministic casing transforms over snake_case SQL identifiers.
//!
//! `to_pascal_case`/`to_camel_case` delegate to `heck`, which the engine's
//! own identifiers never need beyond `_`/`-` boundaries, but is the shared
//! casing crate across the codegen-adjacent examples this crate is modeled
//! on (`prisma-prisma-engines`, `drizzle-rs`, `golem`).

use heck::{ToLowerCamelCase, ToPascalCase};

/// `user_accounts` -> `UserAccounts`
pub fn to_pascal_case(s: &str) -> String {
	s.to_pascal_case()
}

/// `user_accounts` -> `userAccounts`
pub fn to_camel_case(s: &str) -> String {
	s.to_lower_camel_case()
}

/// Best-effort inverse of [`to_pascal_case`] / [`to_camel_case`]: splits on
/// internal uppercase letters and lowercases the result, joining with `_`.
/// Used to resolve a shape-suffixed PascalCase identifier back to a
/// snake_case base when a plugin only has the derived name in hand.
pub fn to_snake_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len() + 4);
	for (i, ch) in s.chars().enumerate() {
		if ch.is_uppercase() {
			if i != 0 {
				out.push('_');
			}
			out.extend(ch.to_lowercase());
		} else {
			out.push(ch);
		}
	}
	out
}
