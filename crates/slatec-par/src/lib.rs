//! slatec-par - Predictive parser for the Slate language.
//!
//! Parsing is LL(1): left-to-right, leftmost derivation, one token of
//! lookahead, driven by an explicit stack instead of recursion. The whole
//! decision procedure is a table lookup:
//!
//! ```text
//!                     lookahead terminal
//!                   ┌─────────────────────
//!   non-terminal X  │  Produce(p)   expand production p
//!        (stack top)│  Synch        report X missing, pop it
//!                   │  Empty        report the token illegal, skip it
//! ```
//!
//! The three cell kinds are also the whole error-recovery story: `Synch`
//! cells sit on FOLLOW sets (the construct can be abandoned because what
//! comes next is something a complete X would have been followed by) and
//! `Empty` cells skip tokens no derivation could use. Recovery never
//! unwinds the run; a parse always consumes its input to the end marker.
//!
//! While it parses, the driver grows a [`tree::ParseTree`] for reporting
//! and dispatches the action symbols embedded in productions to two sinks:
//! the semantic analyser and the code-generation stage (out of scope here;
//! only the seam exists). See [`grammar`] for the productions and table
//! construction, [`parser`] for the driver.

pub mod actions;
mod edge_cases;
pub mod grammar;
pub mod parser;
pub mod symbols;
pub mod tree;

pub use grammar::{Entry, ParseTable, PRODUCTIONS};
pub use parser::Parser;
pub use symbols::{NonTerminal, Terminal};
pub use tree::{NodeId, NodeLabel, ParseTree};
