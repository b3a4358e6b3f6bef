//! The predictive parser.
//!
//! An explicit stack of grammar symbols drives the parse: terminals are
//! matched against the lookahead, non-terminals are expanded through the
//! parsing table, and action symbols are dispatched to the semantic and
//! code-generation sinks the moment they surface. Errors are repaired in
//! place — a missing terminal is reported and popped, a `Synch` cell pops
//! the non-terminal as a missing construct, an `Empty` cell skips the
//! offending token — so one parse always runs to the end of input.

use std::io::Read;

use slatec_lex::{ScanError, Scanner, Token};
use slatec_util::diagnostics::{SyntaxError, SyntaxErrorKind};
use slatec_util::SymbolTable;

use crate::actions::{CodeGenAction, CodeSink, SemanticAction, SemanticSink};
use crate::grammar::{Entry, GrammarSymbol, ParseTable, PRODUCTIONS};
use crate::symbols::{NonTerminal, Terminal};
use crate::tree::{NodeLabel, ParseTree};

#[derive(Clone, Copy, Debug)]
enum StackEntry {
    Terminal(Terminal, crate::tree::NodeId),
    NonTerminal(NonTerminal, crate::tree::NodeId),
    Action(SemanticAction),
    CodeGen(CodeGenAction),
    /// The `$` at the bottom of the stack.
    EndMarker,
}

pub struct Parser<R> {
    scanner: Scanner<R>,
    stack: Vec<StackEntry>,
    tree: ParseTree,
    syntax_errors: Vec<SyntaxError>,
    cleanup_needed: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(scanner: Scanner<R>) -> Self {
        Self {
            scanner,
            stack: Vec::new(),
            tree: ParseTree::new(),
            syntax_errors: Vec::new(),
            cleanup_needed: false,
        }
    }

    pub fn syntax_errors(&self) -> &[SyntaxError] {
        &self.syntax_errors
    }

    pub fn tree(&self) -> &ParseTree {
        &self.tree
    }

    pub fn scanner(&self) -> &Scanner<R> {
        &self.scanner
    }

    /// True when the parse ran to acceptance: nothing but `$` remains.
    pub fn stack_at_end(&self) -> bool {
        matches!(self.stack.as_slice(), [StackEntry::EndMarker])
    }

    /// Run the parse to completion, pulling tokens from the scanner and
    /// feeding actions to the sinks. Only reader failures propagate;
    /// source-level errors are collected and recovered from.
    pub fn parse(
        &mut self,
        symtab: &mut SymbolTable,
        analyser: &mut dyn SemanticSink,
        sink: &mut dyn CodeSink,
    ) -> Result<(), ScanError> {
        let table = ParseTable::global();
        self.stack.clear();
        self.stack.push(StackEntry::EndMarker);
        self.stack
            .push(StackEntry::NonTerminal(NonTerminal::Program, self.tree.root()));

        let mut token = self.scanner.get_next_token(symtab)?;
        sink.emit(
            CodeGenAction::InitProgram,
            &token,
            self.scanner.line_number(),
        );

        loop {
            let line = self.scanner.line_number();
            let Some(&top) = self.stack.last() else {
                break;
            };

            match top {
                StackEntry::Action(action) => {
                    self.stack.pop();
                    analyser.apply(action, &token, line, symtab);
                }
                StackEntry::CodeGen(action) => {
                    self.stack.pop();
                    sink.emit(action, &token, line);
                }
                StackEntry::EndMarker => {
                    if Terminal::of_token(&token) != Some(Terminal::EndMarker) {
                        // Input continues past a complete program.
                        symtab.set_error_flag();
                    }
                    break;
                }
                StackEntry::Terminal(expected, node) => {
                    if Terminal::of_token(&token) == Some(expected) {
                        self.tree.set_token(node, token.clone());
                        self.stack.pop();
                        token = self.scanner.get_next_token(symtab)?;
                    } else {
                        symtab.set_error_flag();
                        self.record(
                            line,
                            SyntaxErrorKind::Missing(expected.spelling().to_owned()),
                        );
                        self.stack.pop();
                        self.cleanup_needed = true;
                    }
                }
                StackEntry::NonTerminal(nt, node) => {
                    let lookahead = Terminal::of_token(&token);
                    let entry = match lookahead {
                        Some(t) => table.lookup(nt, t),
                        // Tokens outside the terminal alphabet have no
                        // column; treat them as illegal input.
                        None => Entry::Empty,
                    };
                    match entry {
                        Entry::Synch => {
                            symtab.set_error_flag();
                            self.cleanup_needed = true;
                            if lookahead == Some(Terminal::EndMarker) {
                                self.record(line, SyntaxErrorKind::UnexpectedEof);
                                break;
                            }
                            self.record(
                                line,
                                SyntaxErrorKind::Missing(nt.missing_construct().to_owned()),
                            );
                            self.tree.remove(node);
                            self.stack.pop();
                        }
                        Entry::Empty => {
                            symtab.set_error_flag();
                            if lookahead == Some(Terminal::EndMarker) {
                                // Nothing left to skip.
                                self.record(line, SyntaxErrorKind::UnexpectedEof);
                                self.cleanup_needed = true;
                                break;
                            }
                            self.record(line, SyntaxErrorKind::Illegal(illegal_name(&token)));
                            token = self.scanner.get_next_token(symtab)?;
                        }
                        Entry::Produce(p) => {
                            self.stack.pop();
                            let production = &PRODUCTIONS[p];
                            let mut pushes = Vec::with_capacity(production.rhs.len());
                            for sym in production.rhs {
                                match *sym {
                                    GrammarSymbol::T(t) => {
                                        let child =
                                            self.tree.add_child(node, NodeLabel::Terminal(t));
                                        pushes.push(StackEntry::Terminal(t, child));
                                    }
                                    GrammarSymbol::N(m) => {
                                        let child =
                                            self.tree.add_child(node, NodeLabel::NonTerminal(m));
                                        pushes.push(StackEntry::NonTerminal(m, child));
                                    }
                                    GrammarSymbol::Sa(a) => pushes.push(StackEntry::Action(a)),
                                    GrammarSymbol::Cg(c) => pushes.push(StackEntry::CodeGen(c)),
                                    // Epsilon becomes a leaf but is never
                                    // pushed.
                                    GrammarSymbol::Eps => {
                                        self.tree.add_child(node, NodeLabel::Epsilon);
                                    }
                                }
                            }
                            while let Some(entry) = pushes.pop() {
                                self.stack.push(entry);
                            }
                        }
                    }
                }
            }
        }

        analyser.eof_check(self.scanner.line_number(), symtab);
        if self.cleanup_needed {
            self.tree.cleanup();
        }
        sink.emit(
            CodeGenAction::FinishProgram,
            &Token::Eof,
            self.scanner.line_number(),
        );
        Ok(())
    }

    fn record(&mut self, line: u32, kind: SyntaxErrorKind) {
        self.syntax_errors.push(SyntaxError { line, kind });
    }
}

/// How a token is spelled in `Illegal "…"` messages.
fn illegal_name(token: &Token) -> String {
    match token {
        Token::Ident(_) => "ID".to_owned(),
        Token::Number(_) => "NUM".to_owned(),
        Token::Keyword(lexeme) | Token::Punct(lexeme) => (*lexeme).to_owned(),
        Token::Eof => "$".to_owned(),
    }
}
