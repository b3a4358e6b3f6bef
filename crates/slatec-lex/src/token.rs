//! Token type and the fixed keyword tables.

use std::fmt;

use slatec_util::symtab::{SymbolId, SymbolTable};

/// A scanned token.
///
/// Identifiers carry their symbol-table index; everything else carries its
/// lexeme. Keyword and punctuation lexemes come from the fixed tables below,
/// so they are `'static`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Ident(SymbolId),
    Number(String),
    Keyword(&'static str),
    Punct(&'static str),
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Keyword,
    Punct,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident => write!(f, "IDENT"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::Keyword => write!(f, "KEYWORD"),
            TokenKind::Punct => write!(f, "PUNCT"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Ident(_) => TokenKind::Ident,
            Token::Number(_) => TokenKind::Number,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Punct(_) => TokenKind::Punct,
            Token::Eof => TokenKind::Eof,
        }
    }

    /// The `(KIND, lexeme)` rendering used by the token and parse-tree
    /// reports. Identifier payloads are resolved through the symbol table.
    pub fn describe(&self, symtab: &SymbolTable) -> String {
        match self {
            Token::Ident(id) => format!("(IDENT, {})", symtab.lexeme(*id)),
            Token::Number(lexeme) => format!("(NUMBER, {lexeme})"),
            Token::Keyword(lexeme) => format!("(KEYWORD, {lexeme})"),
            Token::Punct(lexeme) => format!("(PUNCT, {lexeme})"),
            Token::Eof => "(EOF, $)".to_owned(),
        }
    }
}

/// Control keywords. `true`/`false` are literals but reserved all the same.
pub const KEYWORDS: &[&str] = &[
    "begin", "end", "dim", "integer", "real", "boolean", "if", "then", "else", "for", "to", "do",
    "while", "read", "write", "true", "false",
];

/// Operator spellings: keywords by shape, punctuation by role. The scanner
/// reclassifies them via the grammar's terminal alphabet.
pub const OPERATOR_SPELLINGS: &[&str] = &[
    "plus", "min", "or", "mult", "div", "and", "EQ", "NE", "LT", "LE", "GT", "GE", "as",
];

/// Canonical `'static` spelling for a single punctuation character.
pub fn punct_spelling(c: char) -> Option<&'static str> {
    Some(match c {
        ',' => ",",
        ';' => ";",
        ':' => ":",
        '(' => "(",
        ')' => ")",
        '^' => "^",
        '@' => "@",
        '&' => "&",
        '|' => "|",
        '!' => "!",
        '~' => "~",
        '*' => "*",
        '=' => "=",
        '+' => "+",
        '-' => "-",
        '.' => ".",
        _ => return None,
    })
}
