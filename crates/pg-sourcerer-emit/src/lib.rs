//! The Emission Buffer: where plugins stage generated file content, plus
//! the minimal printer-agnostic AST model and import resolution that
//! `serialize_ast` runs over it (`spec.md` §4.4 / §4.7).

mod ast;
mod buffer;
mod import_ref;

pub use ast::{Item, Program};
pub use buffer::{EmissionBuffer, EmitConflict, UnresolvedRef};
pub use import_ref::ImportRef;
