use pg_sourcerer_symbols::SymbolRef;

/// A staged import request attached to an AST emission. `Package` and
/// `Relative` are taken verbatim; `Symbol` is resolved through the symbol
/// registry during `serialize_ast`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportRef {
	Package { from: String, names: Vec<String>, types: Vec<String>, default: Option<String> },
	Relative { from: String, names: Vec<String>, types: Vec<String>, default: Option<String> },
	Symbol(SymbolRef),
}
