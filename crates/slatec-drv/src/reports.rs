//! Report writers.
//!
//! Serialization of finished data only: everything here takes the final
//! symbol table, token lines, tree and error lists by reference and never
//! mutates core state.

use std::fs;
use std::io;
use std::path::Path;

use slatec_lex::TokenKind;
use slatec_par::ParseTree;
use slatec_util::diagnostics::{
    render_lexical_errors, render_semantic_errors, render_syntax_errors, LexicalError,
    SemanticError, SyntaxError,
};
use slatec_util::SymbolTable;

/// `tokens.txt`: one row per non-empty source line.
pub fn write_tokens<'a>(
    path: &Path,
    lines: impl Iterator<Item = (u32, &'a [(TokenKind, String)])>,
) -> io::Result<()> {
    let mut out = String::new();
    for (line, tokens) in lines {
        if tokens.is_empty() {
            continue;
        }
        let rendered: Vec<String> = tokens
            .iter()
            .map(|(kind, lexeme)| format!("({kind}, {lexeme})"))
            .collect();
        out.push_str(&format!("{line}.\t{}\n", rendered.join(" ")));
    }
    fs::write(path, out)
}

/// `symbol_table.txt`: every entry in insertion order, 1-based.
pub fn write_symbol_table(path: &Path, symtab: &SymbolTable) -> io::Result<()> {
    let mut out = String::new();
    for (i, (_, entry)) in symtab.iter().enumerate() {
        out.push_str(&format!("{}.\t{}\n", i + 1, entry.lexeme));
    }
    fs::write(path, out)
}

/// `parse_tree.txt`: indented pre-order rendering of the cleaned tree.
pub fn write_parse_tree(path: &Path, tree: &ParseTree, symtab: &SymbolTable) -> io::Result<()> {
    fs::write(path, tree.render(symtab))
}

pub fn write_lexical_errors(path: &Path, errors: &[LexicalError]) -> io::Result<()> {
    fs::write(path, render_lexical_errors(errors))
}

pub fn write_syntax_errors(path: &Path, errors: &[SyntaxError]) -> io::Result<()> {
    fs::write(path, render_syntax_errors(errors))
}

pub fn write_semantic_errors(path: &Path, errors: &[SemanticError]) -> io::Result<()> {
    fs::write(path, render_semantic_errors(errors))
}

/// The user-visible compilation banner.
pub fn banner(
    success: bool,
    lexical: &[LexicalError],
    syntax: &[SyntaxError],
    semantic: &[SemanticError],
) -> String {
    if success {
        return "Compilation successful\n".to_owned();
    }
    format!(
        "Compilation failed due to the following errors:\n\n{}{}{}",
        render_lexical_errors(lexical),
        render_syntax_errors(syntax),
        render_semantic_errors(semantic),
    )
}
