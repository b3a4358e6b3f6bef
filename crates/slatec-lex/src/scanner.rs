//! The table-driven scanner.
//!
//! [`Scanner::get_next_token`] walks the DFA over the sliding window,
//! recording a candidate at every accepting state and committing the most
//! recent candidate when the walk stops (longest match). Identifiers and
//! numbers therefore never steal the delimiter that ends them: the window
//! is only consumed up to the accepted length.
//!
//! Errors never abort scanning. A dedicated error state, or a stuck start
//! state, records a lexical error, skips the offending input (panic mode)
//! and resumes at the initial state.

use std::io::{self, Read};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use slatec_util::diagnostics::{LexicalError, LexicalErrorKind};
use slatec_util::symtab::SymbolTable;

use crate::chars::classify;
use crate::dfa::{self, AcceptKind};
use crate::token::{punct_spelling, Token, TokenKind, KEYWORDS, OPERATOR_SPELLINGS};
use crate::window::{SourceWindow, DEFAULT_CHUNK_SIZE};

/// Non-recoverable scanner failure. Lexical errors in the source are not
/// errors here; only the underlying reader can fail.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read source: {0}")]
    Io(#[from] io::Error),
}

/// Scanner tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct ScannerConfig {
    /// Bytes per read of the source window.
    pub chunk_size: usize,
    /// How many source lines of tokens to retain for the token report;
    /// `None` keeps everything. When the limit is hit the oldest line is
    /// evicted first.
    pub retention: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            retention: None,
        }
    }
}

/// Longest prefix of an unclosed comment shown in the error report.
const UNCLOSED_PREVIEW: usize = 15;

enum Stop {
    /// No transition for the current character.
    NoTransition { width: usize },
    /// The walk entered a dedicated error state.
    ErrorState { kind: LexicalErrorKind, width: usize },
    EndOfInput,
}

pub struct Scanner<R> {
    window: SourceWindow<R>,
    line_number: u32,
    lexical_errors: Vec<LexicalError>,
    /// Tokens grouped by source line, in line order, for the token report.
    buckets: IndexMap<u32, Vec<(TokenKind, String)>>,
    retention: Option<usize>,
    keywords: FxHashSet<&'static str>,
    operators: FxHashSet<&'static str>,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ScannerConfig::default())
    }

    pub fn with_config(reader: R, config: ScannerConfig) -> Self {
        Self {
            window: SourceWindow::new(reader, config.chunk_size),
            line_number: 1,
            lexical_errors: Vec::new(),
            buckets: IndexMap::new(),
            retention: config.retention,
            keywords: KEYWORDS.iter().copied().collect(),
            operators: OPERATOR_SPELLINGS.iter().copied().collect(),
        }
    }

    /// Current 1-based source line.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    pub fn lexical_errors(&self) -> &[LexicalError] {
        &self.lexical_errors
    }

    /// Retained tokens grouped by line, oldest line first.
    pub fn token_lines(&self) -> impl Iterator<Item = (u32, &[(TokenKind, String)])> {
        self.buckets
            .iter()
            .map(|(&line, tokens)| (line, tokens.as_slice()))
    }

    /// Produce the next token, interning identifiers into `symtab`.
    /// Returns [`Token::Eof`] forever once the input is drained.
    pub fn get_next_token(&mut self, symtab: &mut SymbolTable) -> Result<Token, ScanError> {
        loop {
            self.evict_old_lines();

            let mut state = dfa::START;
            let mut offset = 0usize;
            let mut last_accept: Option<(u8, usize)> = None;

            let stop = loop {
                let Some((c, width)) = self.window.char_at(offset)? else {
                    break Stop::EndOfInput;
                };
                let next = dfa::transition(state, classify(c));
                if next == dfa::NONE {
                    break Stop::NoTransition { width };
                }
                if let Some(kind) = dfa::error_kind(next) {
                    break Stop::ErrorState { kind, width };
                }
                state = next;
                offset += width;
                if dfa::accepts(state).is_some() {
                    last_accept = Some((state, offset));
                }
            };

            match stop {
                Stop::ErrorState { kind, width } => {
                    // A bare `}` is itself the rejected lexeme; for malformed
                    // numbers the offending character stays in the window and
                    // is scanned again on its own.
                    let len = if kind == LexicalErrorKind::UnmatchedCommentClose {
                        offset + width
                    } else {
                        offset
                    };
                    let lexeme = self.window.consume(len);
                    self.record_error(kind, lexeme, symtab);
                }
                Stop::NoTransition { width } => {
                    if let Some((accept_state, len)) = last_accept {
                        if let Some(token) = self.commit(accept_state, len, symtab)? {
                            return Ok(token);
                        }
                    } else {
                        // No candidate at all: drop one character.
                        let lexeme = self.window.consume(width);
                        self.record_error(LexicalErrorKind::InvalidInput, lexeme, symtab);
                    }
                }
                Stop::EndOfInput => {
                    if dfa::is_unclosed_comment(state) {
                        let lexeme = self.window.consume(offset);
                        let newlines = lexeme.matches('\n').count();
                        let preview = unclosed_preview(&lexeme);
                        self.record_error(LexicalErrorKind::UnclosedComment, preview, symtab);
                        self.line_number += newlines as u32;
                        return Ok(Token::Eof);
                    }
                    if let Some((accept_state, len)) = last_accept {
                        if let Some(token) = self.commit(accept_state, len, symtab)? {
                            return Ok(token);
                        }
                        continue;
                    }
                    if offset > 0 {
                        // Stranded mid-token at end of input.
                        let lexeme = self.window.consume(offset);
                        self.record_error(LexicalErrorKind::InvalidInput, lexeme, symtab);
                        continue;
                    }
                    return Ok(Token::Eof);
                }
            }
        }
    }

    /// Turn an accepted lexeme into a token, or `None` for swallowed input
    /// (whitespace, comments, panic-mode rejects).
    fn commit(
        &mut self,
        state: u8,
        len: usize,
        symtab: &mut SymbolTable,
    ) -> Result<Option<Token>, ScanError> {
        let lexeme = self.window.consume(len);
        let kind = match dfa::accepts(state) {
            Some(kind) => kind,
            None => return Ok(None),
        };
        match kind {
            AcceptKind::Whitespace | AcceptKind::Comment => {
                let newlines = lexeme.matches('\n').count();
                self.line_number += newlines as u32;
                Ok(None)
            }
            AcceptKind::Punct => self.commit_punct(&lexeme, symtab),
            AcceptKind::IdentOrKeyword => Ok(Some(self.commit_word(lexeme, symtab))),
            AcceptKind::Number => match classify_number(&lexeme) {
                NumberClass::Int | NumberClass::Real => {
                    self.record_token(TokenKind::Number, lexeme.clone());
                    Ok(Some(Token::Number(lexeme)))
                }
                NumberClass::Illegal => {
                    self.record_error(LexicalErrorKind::IllegalNumber, lexeme, symtab);
                    Ok(None)
                }
            },
        }
    }

    fn commit_punct(
        &mut self,
        lexeme: &str,
        symtab: &mut SymbolTable,
    ) -> Result<Option<Token>, ScanError> {
        let c = match lexeme.chars().next() {
            Some(c) => c,
            None => return Ok(None),
        };
        let spelling = match c {
            '&' => {
                if self.peek_is('&')? {
                    self.window.consume(1);
                    "&&"
                } else {
                    "&"
                }
            }
            '|' => {
                if self.peek_is('|')? {
                    self.window.consume(1);
                    "||"
                } else {
                    self.record_error(
                        LexicalErrorKind::InvalidInput,
                        lexeme.to_owned(),
                        symtab,
                    );
                    return Ok(None);
                }
            }
            other => match punct_spelling(other) {
                Some(spelling) => spelling,
                None => {
                    self.record_error(
                        LexicalErrorKind::InvalidInput,
                        lexeme.to_owned(),
                        symtab,
                    );
                    return Ok(None);
                }
            },
        };
        self.record_token(TokenKind::Punct, spelling.to_owned());
        Ok(Some(Token::Punct(spelling)))
    }

    fn commit_word(&mut self, lexeme: String, symtab: &mut SymbolTable) -> Token {
        if let Some(&kw) = self.keywords.get(lexeme.as_str()) {
            self.record_token(TokenKind::Keyword, kw.to_owned());
            return Token::Keyword(kw);
        }
        if let Some(&op) = self.operators.get(lexeme.as_str()) {
            self.record_token(TokenKind::Punct, op.to_owned());
            return Token::Punct(op);
        }
        self.record_token(TokenKind::Ident, lexeme.clone());
        let id = symtab.install(&lexeme);
        Token::Ident(id)
    }

    fn peek_is(&mut self, expected: char) -> Result<bool, ScanError> {
        Ok(matches!(self.window.char_at(0)?, Some((c, _)) if c == expected))
    }

    fn record_token(&mut self, kind: TokenKind, display: String) {
        self.buckets
            .entry(self.line_number)
            .or_default()
            .push((kind, display));
    }

    fn record_error(&mut self, reason: LexicalErrorKind, lexeme: String, symtab: &mut SymbolTable) {
        symtab.set_error_flag();
        self.lexical_errors.push(LexicalError {
            line: self.line_number,
            lexeme,
            reason,
        });
    }

    fn evict_old_lines(&mut self) {
        if let Some(max) = self.retention {
            while self.buckets.len() > max {
                self.buckets.shift_remove_index(0);
            }
        }
    }
}

fn unclosed_preview(lexeme: &str) -> String {
    let mut preview: String = lexeme.chars().take(UNCLOSED_PREVIEW).collect();
    if lexeme.chars().count() > UNCLOSED_PREVIEW {
        preview.push_str(" ...");
    }
    preview
}

enum NumberClass {
    Int,
    Real,
    Illegal,
}

/// Sort a number-family lexeme into the literal forms the language accepts.
fn classify_number(lexeme: &str) -> NumberClass {
    if !lexeme.is_empty() && lexeme.bytes().all(|b| b.is_ascii_digit()) {
        return NumberClass::Int;
    }
    if is_real_literal(lexeme) {
        return NumberClass::Real;
    }
    #[cfg(feature = "radix-literals")]
    if is_radix_literal(lexeme) {
        return NumberClass::Int;
    }
    NumberClass::Illegal
}

/// True when a number lexeme denotes a real (has a fraction or exponent).
/// Radix-suffix literals are integers even when their body contains `E`.
pub fn number_is_real(lexeme: &str) -> bool {
    matches!(classify_number(lexeme), NumberClass::Real)
}

/// `digits [ '.' digits ] [ ('E'|'e') ['+'|'-'] digits ]` with at least a
/// fraction or an exponent present.
fn is_real_literal(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return false;
    }
    let mut real = false;
    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
        real = true;
    }
    if i < b.len() && (b[i] == b'E' || b[i] == b'e') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
        real = true;
    }
    real && i == b.len()
}

/// Digits-and-hex-letters body plus one trailing radix letter: `B` binary,
/// `O` octal, `D` decimal, `H` hexadecimal (either case).
#[cfg(feature = "radix-literals")]
fn is_radix_literal(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 2 {
        return false;
    }
    let (body, suffix) = b.split_at(b.len() - 1);
    if !body[0].is_ascii_digit() {
        return false;
    }
    let digit_ok: fn(u8) -> bool = match suffix[0] {
        b'B' | b'b' => |c| c == b'0' || c == b'1',
        b'O' | b'o' => |c| (b'0'..=b'7').contains(&c),
        b'D' | b'd' => |c| c.is_ascii_digit(),
        b'H' | b'h' => |c| c.is_ascii_hexdigit(),
        _ => return false,
    };
    body.iter().all(|&c| digit_ok(c))
}
