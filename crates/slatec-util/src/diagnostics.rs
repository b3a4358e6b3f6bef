//! Error records for the three analysis phases.
//!
//! Each phase collects its own ordered error list; nothing here aborts a
//! run. The renderers produce the exact text of the error report files,
//! including the fixed no-error sentinel lines.

use std::fmt::Write as _;

use thiserror::Error;

use crate::symtab::DeclType;

/// Why the scanner rejected a lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LexicalErrorKind {
    #[error("illegal number")]
    IllegalNumber,
    #[error("invalid input")]
    InvalidInput,
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("unmatched }}")]
    UnmatchedCommentClose,
}

/// A rejected lexeme with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexicalError {
    pub line: u32,
    pub lexeme: String,
    pub reason: LexicalErrorKind,
}

/// Shape of a syntax error produced by the predictive parser.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// An expected terminal or construct was not found.
    #[error("Missing \"{0}\"")]
    Missing(String),
    /// The lookahead has no entry for the current non-terminal.
    #[error("Illegal \"{0}\"")]
    Illegal(String),
    #[error("Unexpected end of file")]
    UnexpectedEof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: u32,
    pub kind: SyntaxErrorKind,
}

/// Shape of a semantic error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SemanticErrorKind {
    #[error("Identifier {0} not declared")]
    NotDeclared(String),
    #[error("Identifier {0} already declared")]
    AlreadyDeclared(String),
    #[error("Type mismatch in assignment: expected {expected}, got {found}")]
    AssignmentMismatch { expected: DeclType, found: DeclType },
    #[error("Type mismatch in operation {op}: {lhs} and {rhs}")]
    OperandMismatch {
        op: String,
        lhs: DeclType,
        rhs: DeclType,
    },
    #[error("Operation {op} not defined for {found}")]
    InvalidOperand { op: String, found: DeclType },
    #[error("Unary operation {op} not defined for {found}")]
    UnaryMismatch { op: String, found: DeclType },
    #[error("Condition must be boolean, got {0}")]
    ConditionNotBoolean(DeclType),
    #[error("Loop bound must be numeric, got {0}")]
    BoundNotNumeric(DeclType),
    #[error("Unexpected end of program, unclosed block")]
    UnclosedBlock,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SemanticError {
    pub line: u32,
    pub kind: SemanticErrorKind,
}

/// Text of `lexical_errors.txt`.
pub fn render_lexical_errors(errors: &[LexicalError]) -> String {
    if errors.is_empty() {
        return "There is no lexical errors.\n".to_owned();
    }
    let mut out = String::new();
    for e in errors {
        let _ = writeln!(
            out,
            "#{} : Lexical Error! '{}' rejected, reason: {}.",
            e.line, e.lexeme, e.reason
        );
    }
    out
}

/// Text of `syntax_errors.txt`.
pub fn render_syntax_errors(errors: &[SyntaxError]) -> String {
    if errors.is_empty() {
        return "There is no syntax error.\n".to_owned();
    }
    let mut out = String::new();
    for e in errors {
        let _ = writeln!(out, "#{} : Syntax Error! {}", e.line, e.kind);
    }
    out
}

/// Text of `semantic_errors.txt`.
pub fn render_semantic_errors(errors: &[SemanticError]) -> String {
    if errors.is_empty() {
        return "There is no semantic errors.\n".to_owned();
    }
    let mut out = String::new();
    for e in errors {
        let _ = writeln!(out, "#{} : Semantic Error! {}", e.line, e.kind);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_sentinel() {
        assert_eq!(render_lexical_errors(&[]), "There is no lexical errors.\n");
    }

    #[test]
    fn test_lexical_format() {
        let errors = vec![LexicalError {
            line: 3,
            lexeme: "12abc".to_owned(),
            reason: LexicalErrorKind::IllegalNumber,
        }];
        assert_eq!(
            render_lexical_errors(&errors),
            "#3 : Lexical Error! '12abc' rejected, reason: illegal number.\n"
        );
    }

    #[test]
    fn test_unmatched_close_message() {
        assert_eq!(
            LexicalErrorKind::UnmatchedCommentClose.to_string(),
            "unmatched }"
        );
    }

    #[test]
    fn test_syntax_sentinel_and_format() {
        assert_eq!(render_syntax_errors(&[]), "There is no syntax error.\n");
        let errors = vec![
            SyntaxError {
                line: 1,
                kind: SyntaxErrorKind::Missing("end".to_owned()),
            },
            SyntaxError {
                line: 2,
                kind: SyntaxErrorKind::UnexpectedEof,
            },
        ];
        assert_eq!(
            render_syntax_errors(&errors),
            "#1 : Syntax Error! Missing \"end\"\n#2 : Syntax Error! Unexpected end of file\n"
        );
    }

    #[test]
    fn test_semantic_sentinel_and_format() {
        assert_eq!(render_semantic_errors(&[]), "There is no semantic errors.\n");
        let errors = vec![SemanticError {
            line: 4,
            kind: SemanticErrorKind::NotDeclared("y".to_owned()),
        }];
        assert_eq!(
            render_semantic_errors(&errors),
            "#4 : Semantic Error! Identifier y not declared\n"
        );
    }

    #[test]
    fn test_assignment_mismatch_message() {
        let kind = SemanticErrorKind::AssignmentMismatch {
            expected: DeclType::Bool,
            found: DeclType::Int,
        };
        assert_eq!(
            kind.to_string(),
            "Type mismatch in assignment: expected boolean, got integer"
        );
    }
}
