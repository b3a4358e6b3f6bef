//! Operator classification over the type lattice.
//!
//! The lattice is the four declared types; there are no implicit
//! conversions, so every binary operator simply requires equal operand
//! types and the checks below only decide which equal types are allowed
//! and what comes out.

use slatec_util::symtab::DeclType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OpClass {
    /// `EQ NE LT LE GT GE`: any equal operand types, result boolean.
    Relational,
    /// `plus min mult div`: numeric operands, result is the operand type.
    /// Integer division stays integral; real division stays real.
    Arithmetic,
    /// `or and`: boolean operands, result boolean.
    Logical,
}

pub(crate) fn classify_op(op: &str) -> Option<OpClass> {
    match op {
        "EQ" | "NE" | "LT" | "LE" | "GT" | "GE" => Some(OpClass::Relational),
        "plus" | "min" | "mult" | "div" => Some(OpClass::Arithmetic),
        "or" | "and" => Some(OpClass::Logical),
        _ => None,
    }
}

pub(crate) fn is_numeric(ty: DeclType) -> bool {
    matches!(ty, DeclType::Int | DeclType::Real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_op() {
        assert_eq!(classify_op("EQ"), Some(OpClass::Relational));
        assert_eq!(classify_op("plus"), Some(OpClass::Arithmetic));
        assert_eq!(classify_op("div"), Some(OpClass::Arithmetic));
        assert_eq!(classify_op("and"), Some(OpClass::Logical));
        assert_eq!(classify_op("~"), None);
        assert_eq!(classify_op("as"), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(DeclType::Int));
        assert!(is_numeric(DeclType::Real));
        assert!(!is_numeric(DeclType::Bool));
        assert!(!is_numeric(DeclType::Void));
    }
}
