//! The scanner's finite automaton as static data.
//!
//! States are plain `u8` indices into one transition table whose rows all
//! have [`NUM_CLASSES`] columns. Accepting states are classified by
//! [`accepts`]; the dedicated error states carry their message through
//! [`error_kind`]. States that can only be confirmed by reading one
//! character past the token (identifiers, numbers) need no special marker
//! here: the scanner records the accepted length at each accepting state
//! and rewinds to it when the walk stops.

use slatec_util::diagnostics::LexicalErrorKind;

use crate::chars::{CharClass, NUM_CLASSES};

/// Sentinel for "no transition".
pub const NONE: u8 = 0xFF;

pub const START: u8 = 0;
/// Whitespace run (spaces and newlines).
pub const WS: u8 = 1;
/// Integer digits.
pub const INT: u8 = 2;
/// Just after the decimal dot; a digit must follow.
pub const FRAC_START: u8 = 3;
/// Fraction digits.
pub const FRAC: u8 = 4;
/// Just after the exponent marker.
pub const EXP_START: u8 = 5;
/// Just after the exponent sign; a digit must follow.
pub const EXP_SIGN: u8 = 6;
/// Exponent digits.
pub const EXP: u8 = 7;
/// Number blob containing letters (radix bodies and malformed numbers);
/// sorted out after the match.
pub const TAIL: u8 = 8;
/// Identifier or keyword.
pub const IDENT: u8 = 9;
/// Single punctuation character.
pub const PUNCT: u8 = 10;
/// Inside a block comment.
pub const COMMENT: u8 = 11;
/// Block comment just closed.
pub const COMMENT_END: u8 = 12;
/// Error: malformed number.
pub const ERR_NUMBER: u8 = 13;
/// Error: `}` outside any comment.
pub const ERR_CLOSE: u8 = 14;

pub const STATE_COUNT: usize = 15;

/// What a committed accepting state produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AcceptKind {
    /// Swallowed; only counts line breaks.
    Whitespace,
    /// Number family; the lexeme is classified (integer / real / radix /
    /// illegal) after the match.
    Number,
    IdentOrKeyword,
    Punct,
    /// Swallowed; only counts line breaks.
    Comment,
}

/// The transition table, indexed by `(state, character class)`.
///
/// Columns: Ws Nl Digit Letter Exp + - . Punct { } Other
#[rustfmt::skip]
static TRANSITIONS: [[u8; NUM_CLASSES]; STATE_COUNT] = [
    //            Ws    Nl    Dig   Let   Exp   +     -     .     Pct   {     }     Oth
    /* START   */ [WS,   WS,   INT,  IDENT,IDENT,PUNCT,PUNCT,PUNCT,PUNCT,COMMENT,ERR_CLOSE,NONE],
    /* WS      */ [WS,   WS,   NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE, NONE],
    /* INT     */ [NONE, NONE, INT,  TAIL, EXP_START, NONE, NONE, FRAC_START, NONE, NONE, NONE, NONE],
    /* FRAC_ST */ [ERR_NUMBER, ERR_NUMBER, FRAC, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER,
                   ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER],
    /* FRAC    */ [NONE, NONE, FRAC, TAIL, EXP_START, NONE, NONE, NONE, NONE, NONE, NONE, NONE],
    /* EXP_ST  */ [ERR_NUMBER, ERR_NUMBER, EXP, TAIL, TAIL, EXP_SIGN, EXP_SIGN,
                   ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER],
    /* EXP_SGN */ [ERR_NUMBER, ERR_NUMBER, EXP, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER,
                   ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER, ERR_NUMBER],
    /* EXP     */ [NONE, NONE, EXP,  TAIL, TAIL, NONE, NONE, NONE, NONE, NONE, NONE, NONE],
    /* TAIL    */ [NONE, NONE, TAIL, TAIL, TAIL, NONE, NONE, NONE, NONE, NONE, NONE, NONE],
    /* IDENT   */ [NONE, NONE, IDENT,IDENT,IDENT,NONE, NONE, NONE, NONE, NONE, NONE, NONE],
    /* PUNCT   */ [NONE; NUM_CLASSES],
    /* COMMENT */ [COMMENT, COMMENT, COMMENT, COMMENT, COMMENT, COMMENT, COMMENT, COMMENT,
                   COMMENT, COMMENT, COMMENT_END, COMMENT],
    /* CMT_END */ [NONE; NUM_CLASSES],
    /* ERR_NUM */ [NONE; NUM_CLASSES],
    /* ERR_CLS */ [NONE; NUM_CLASSES],
];

/// Next state for `(state, class)`, or [`NONE`].
#[inline]
pub fn transition(state: u8, class: CharClass) -> u8 {
    TRANSITIONS[state as usize][class as usize]
}

/// Token family produced when committing in `state`.
pub fn accepts(state: u8) -> Option<AcceptKind> {
    match state {
        WS => Some(AcceptKind::Whitespace),
        INT | FRAC | EXP | TAIL => Some(AcceptKind::Number),
        IDENT => Some(AcceptKind::IdentOrKeyword),
        PUNCT => Some(AcceptKind::Punct),
        COMMENT_END => Some(AcceptKind::Comment),
        _ => None,
    }
}

/// The fixed message carried by an error state.
pub fn error_kind(state: u8) -> Option<LexicalErrorKind> {
    match state {
        ERR_NUMBER => Some(LexicalErrorKind::IllegalNumber),
        ERR_CLOSE => Some(LexicalErrorKind::UnmatchedCommentClose),
        _ => None,
    }
}

/// States in which end of input means an unclosed comment.
pub fn is_unclosed_comment(state: u8) -> bool {
    state == COMMENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chars::classify;

    fn walk(input: &str) -> u8 {
        let mut state = START;
        for c in input.chars() {
            let next = transition(state, classify(c));
            assert_ne!(next, NONE, "stuck at {state} on {c:?}");
            assert!(error_kind(next).is_none(), "error state on {c:?}");
            state = next;
        }
        state
    }

    #[test]
    fn test_integer_path() {
        assert_eq!(walk("123"), INT);
        assert_eq!(accepts(INT), Some(AcceptKind::Number));
    }

    #[test]
    fn test_real_paths() {
        assert_eq!(walk("12.5"), FRAC);
        assert_eq!(walk("12E3"), EXP);
        assert_eq!(walk("1.5e-3"), EXP);
        assert_eq!(walk("1.5E+10"), EXP);
    }

    #[test]
    fn test_number_tail_paths() {
        assert_eq!(walk("12abc"), TAIL);
        assert_eq!(walk("101B"), TAIL);
        assert_eq!(walk("2AH"), TAIL);
        // A second letter after the exponent turns the blob into a tail.
        assert_eq!(walk("1EFH"), TAIL);
    }

    #[test]
    fn test_malformed_number_hits_error_state() {
        assert_eq!(transition(walk("1."), classify(' ')), ERR_NUMBER);
        assert_eq!(transition(walk("1E"), classify(';')), ERR_NUMBER);
        assert_eq!(transition(walk("1E+"), classify(' ')), ERR_NUMBER);
        assert_eq!(
            error_kind(ERR_NUMBER),
            Some(LexicalErrorKind::IllegalNumber)
        );
    }

    #[test]
    fn test_identifier_path() {
        assert_eq!(walk("end"), IDENT);
        assert_eq!(walk("EQ"), IDENT);
        assert_eq!(walk("x2"), IDENT);
    }

    #[test]
    fn test_comment_path() {
        assert_eq!(walk("{ anything at all\n#$% }"), COMMENT_END);
        assert!(is_unclosed_comment(walk("{ never closed")));
    }

    #[test]
    fn test_unmatched_close() {
        assert_eq!(transition(START, classify('}')), ERR_CLOSE);
        assert_eq!(
            error_kind(ERR_CLOSE),
            Some(LexicalErrorKind::UnmatchedCommentClose)
        );
    }

    #[test]
    fn test_no_transition_on_foreign_char_at_start() {
        assert_eq!(transition(START, classify('#')), NONE);
    }
}
