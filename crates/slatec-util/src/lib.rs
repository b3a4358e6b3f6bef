//! slatec-util - Shared infrastructure for the Slate compiler front-end.
//!
//! This crate hosts the pieces every phase needs:
//!
//! - [`index_vec`]: typed vectors indexed by dedicated id types, used for
//!   the symbol table and the parse-tree arena.
//! - [`symtab`]: the symbol table threaded by `&mut` through scanning,
//!   parsing and semantic analysis.
//! - [`diagnostics`]: the three per-phase error record types and the
//!   renderers that produce the error report files.

pub mod diagnostics;
pub mod index_vec;
pub mod symtab;

pub use diagnostics::{
    render_lexical_errors, render_semantic_errors, render_syntax_errors, LexicalError,
    LexicalErrorKind, SemanticError, SemanticErrorKind, SyntaxError, SyntaxErrorKind,
};
pub use index_vec::{Idx, IndexVec};
pub use symtab::{DeclType, Role, SymbolEntry, SymbolId, SymbolTable};
