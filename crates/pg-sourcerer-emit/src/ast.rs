//! The printer-agnostic AST model. The engine never inspects plugin
//! output beyond its `Item` shape — rendering target-language text is a
//! plugin concern, and turning a `Program` into a finished file is the
//! caller-supplied printer's concern (`spec.md` §4.7/§9: "the engine does
//! not prescribe the AST shape beyond what's needed to prepend import
//! declarations and emit the body").

/// One piece of a generated file: either opaque already-rendered text, or
/// a named block with an optional doc comment, kept separate so a printer
/// can format the two differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
	Raw(String),
	Block { doc: Option<String>, body: String },
}

pub type Program = Vec<Item>;
