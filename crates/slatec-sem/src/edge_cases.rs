//! Edge case tests for slatec-sem
