//! Action symbols embedded in grammar productions.
//!
//! The original dispatch-by-name scheme is replaced by closed enums: every
//! action the parser can pop is a variant here, and the two sinks are
//! traits so the parser stays ignorant of the analyser and of whatever
//! receives code-generation events.

use slatec_lex::Token;
use slatec_util::SymbolTable;

/// Semantic actions, dispatched to the [`SemanticSink`] when they surface
/// at the top of the parse stack. Actions that inspect a token are placed
/// *before* the terminal they refer to, so the token is still the lookahead
/// when they fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SemanticAction {
    /// A declaration opens: identifiers now create fresh entries.
    BeginDeclaration,
    /// The declaration's identifier list is complete.
    EndDeclaration,
    /// Record the current identifier as being declared.
    DeclareId,
    /// The current token names the declared type; annotate and check the
    /// recorded identifiers.
    DeclareType,
    /// The current identifier must already be declared somewhere visible.
    UseIdent,
    /// Push the current identifier's declared type.
    PushTypeIdent,
    /// Push `integer` or `real` depending on the current number literal.
    PushTypeNum,
    /// Push `boolean`.
    PushTypeBool,
    /// Remember the current operator token for the matching apply.
    SaveOperator,
    /// Pop two operand types and the saved operator; check and push result.
    ApplyBinop,
    /// Pop one operand type and the saved operator; check and push result.
    ApplyUnop,
    /// Pop right-hand type and target type; check assignability.
    CheckAssign,
    /// Pop a condition type; must be boolean.
    CheckCondition,
    /// Pop a loop-bound type; must be numeric.
    CheckForBound,
    /// Pop and consume one written expression type.
    CheckWrite,
    EnterScope,
    ExitScope,
}

/// Code-generation events. The generation stage itself is out of scope;
/// these only mark the seam it attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeGenAction {
    InitProgram,
    FinishProgram,
    Assign,
    Input,
    Output,
}

/// Receiver of semantic actions.
pub trait SemanticSink {
    fn apply(
        &mut self,
        action: SemanticAction,
        token: &Token,
        line: u32,
        symtab: &mut SymbolTable,
    );

    /// Called once after the parse loop ends.
    fn eof_check(&mut self, line: u32, symtab: &mut SymbolTable);
}

/// Receiver of code-generation events.
pub trait CodeSink {
    fn emit(&mut self, action: CodeGenAction, token: &Token, line: u32);
}

/// Sink that ignores code-generation events.
#[derive(Debug, Default)]
pub struct NullSink;

impl CodeSink for NullSink {
    fn emit(&mut self, _action: CodeGenAction, _token: &Token, _line: u32) {}
}

/// Sink that ignores semantic actions; parsing-only callers and benches.
#[derive(Debug, Default)]
pub struct NullSemantics;

impl SemanticSink for NullSemantics {
    fn apply(
        &mut self,
        _action: SemanticAction,
        _token: &Token,
        _line: u32,
        _symtab: &mut SymbolTable,
    ) {
    }

    fn eof_check(&mut self, _line: u32, _symtab: &mut SymbolTable) {}
}
