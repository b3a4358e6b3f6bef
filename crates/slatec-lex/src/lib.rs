//! slatec-lex - Lexical analyzer for the Slate language.
//!
//! The scanner is table-driven: a deterministic finite automaton whose
//! transition table is indexed by `(state, character class)`. Every row of
//! the table has the same width — one column per class of the canonical
//! alphabet in [`chars`] — and the walk commits tokens by longest match,
//! rewinding to the most recent accepting state when it gets stuck.
//!
//! ```text
//! bytes ──▶ SourceWindow ──▶ DFA walk ──▶ reclassify ──▶ Token
//!              (chunked)      (tables)     (keywords,
//!                                           operators,
//!                                           number forms)
//! ```
//!
//! Two details couple the scanner to the rest of the front-end:
//!
//! - Identifiers are interned into the shared
//!   [`SymbolTable`](slatec_util::SymbolTable) as they are matched; the
//!   token carries the table index, not the text.
//! - Lexical errors are collected, never thrown: the scanner records the
//!   rejected lexeme, skips it, and keeps going, so one bad character does
//!   not hide every error after it.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use slatec_lex::{Scanner, Token};
//! use slatec_util::SymbolTable;
//!
//! let mut symtab = SymbolTable::new();
//! let mut scanner = Scanner::new(Cursor::new("begin end".to_owned()));
//! assert_eq!(scanner.get_next_token(&mut symtab).unwrap(), Token::Keyword("begin"));
//! assert_eq!(scanner.get_next_token(&mut symtab).unwrap(), Token::Keyword("end"));
//! assert_eq!(scanner.get_next_token(&mut symtab).unwrap(), Token::Eof);
//! ```

pub mod chars;
pub mod dfa;
mod edge_cases;
pub mod scanner;
pub mod token;
pub mod window;

pub use scanner::{number_is_real, ScanError, Scanner, ScannerConfig};
pub use token::{Token, TokenKind};
