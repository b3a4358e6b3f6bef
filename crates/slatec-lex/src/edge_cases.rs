//! Edge case tests for slatec-lex
