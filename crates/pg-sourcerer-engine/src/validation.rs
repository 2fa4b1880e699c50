use pg_sourcerer_emit::EmissionBuffer;
use pg_sourcerer_symbols::SymbolRegistry;

use crate::error::{EngineError, UndefinedReferenceEntry};

/// The three-step, all-or-nothing validation pass run after
/// `EmissionBuffer::serialize_ast` and before `generate` returns
/// (`spec.md` §4.8): unresolved references first, then emission
/// conflicts, then symbol collisions. Each step fails with the first (or
/// all, for unresolved refs) problem it finds; the engine never writes
/// partial output when it is going to fail.
pub fn validate(emission: &EmissionBuffer, symbols: &SymbolRegistry) -> Result<(), EngineError> {
	let unresolved = emission.unresolved_refs();
	if !unresolved.is_empty() {
		return Err(EngineError::UndefinedReference {
			references: unresolved
				.iter()
				.map(|r| UndefinedReferenceEntry { capability: r.capability.clone(), entity: r.entity.clone(), shape: r.shape.clone(), plugin: r.plugin.clone(), file: r.file.clone() })
				.collect(),
		});
	}

	if let Some(conflict) = emission.validate().into_iter().next() {
		return Err(EngineError::EmitConflict { path: conflict.path, plugins: conflict.plugins });
	}

	if let Some(collision) = symbols.validate().into_iter().next() {
		return Err(EngineError::SymbolCollision { file: collision.file, symbol: collision.symbol, plugins: collision.plugins });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use pg_sourcerer_emit::{Item, ImportRef};
	use pg_sourcerer_symbols::SymbolRef;

	use super::*;

	fn printer(program: &pg_sourcerer_emit::Program) -> String {
		program.iter().map(|item| match item { Item::Raw(s) => s.clone(), Item::Block { body, .. } => body.clone() }).collect::<Vec<_>>().join("\n")
	}

	#[test]
	fn validate_passes_on_a_clean_buffer() {
		let mut emission = EmissionBuffer::new();
		emission.emit("User.ts", "export type User = {};".to_string(), "types-plugin");
		let symbols = SymbolRegistry::new();
		assert!(validate(&emission, &symbols).is_ok());
	}

	#[test]
	fn validate_reports_unresolved_references_first() {
		let mut emission = EmissionBuffer::new();
		emission.emit_ast("zod/User.ts", vec![Item::Raw("body".to_string())], "zod-plugin", None, vec![ImportRef::Symbol(SymbolRef::new("nonexistent", "Missing", None))]);
		let symbols = SymbolRegistry::new();
		emission.serialize_ast(printer, &symbols);
		let err = validate(&emission, &symbols).unwrap_err();
		assert!(matches!(err, EngineError::UndefinedReference { references } if references.len() == 1));
	}

	#[test]
	fn validate_reports_emit_conflicts() {
		let mut emission = EmissionBuffer::new();
		emission.emit("index.ts", "a".to_string(), "p1");
		emission.emit("index.ts", "b".to_string(), "p2");
		let symbols = SymbolRegistry::new();
		let err = validate(&emission, &symbols).unwrap_err();
		assert!(matches!(err, EngineError::EmitConflict { path, .. } if path == "index.ts"));
	}

	#[test]
	fn validate_reports_symbol_collisions() {
		use pg_sourcerer_symbols::Symbol;
		let emission = EmissionBuffer::new();
		let mut symbols = SymbolRegistry::new();
		let make_symbol = || Symbol { name: "User".to_string(), file: "User.ts".to_string(), capability: "types".to_string(), entity: "User".to_string(), shape: None, is_type: true, is_default: false };
		symbols.register(make_symbol(), "types-plugin");
		symbols.register(make_symbol(), "zod-plugin");
		let err = validate(&emission, &symbols).unwrap_err();
		assert!(matches!(err, EngineError::SymbolCollision { .. }));
	}
}
