//! The semantic analyser.
//!
//! Receives the action symbols the parser pops, keeps the operand-type and
//! saved-operator stacks, and annotates the symbol table with declared
//! types. Like the other phases it only collects errors; after reporting
//! one it pushes `void` as a poison type, and every check treats `void`
//! operands as already-reported, so a single broken subexpression does not
//! fan out into a cascade.

use slatec_lex::{number_is_real, Token};
use slatec_par::actions::{SemanticAction, SemanticSink};
use slatec_util::diagnostics::{SemanticError, SemanticErrorKind};
use slatec_util::symtab::{DeclType, Role, SymbolId, SymbolTable};

use crate::types::{classify_op, is_numeric, OpClass};

#[derive(Default)]
pub struct SemanticAnalyser {
    semantic_errors: Vec<SemanticError>,
    /// Operand types of partially-checked expressions.
    type_stack: Vec<DeclType>,
    /// Operators saved ahead of their operands.
    op_stack: Vec<&'static str>,
    /// Identifiers inserted by the declaration currently being parsed.
    pending_decl: Vec<SymbolId>,
}

impl SemanticAnalyser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn semantic_errors(&self) -> &[SemanticError] {
        &self.semantic_errors
    }

    fn report(&mut self, line: u32, kind: SemanticErrorKind, symtab: &mut SymbolTable) {
        symtab.set_error_flag();
        self.semantic_errors.push(SemanticError { line, kind });
    }

    fn declare_type(&mut self, token: &Token, line: u32, symtab: &mut SymbolTable) {
        let ty = match token {
            Token::Keyword("integer") => DeclType::Int,
            Token::Keyword("real") => DeclType::Real,
            Token::Keyword("boolean") => DeclType::Bool,
            // Recovery left something else here; the syntax error already
            // covers it.
            _ => {
                self.pending_decl.clear();
                return;
            }
        };
        let pending = std::mem::take(&mut self.pending_decl);
        for id in pending {
            let (lexeme, scope) = {
                let entry = symtab.entry(id);
                (entry.lexeme.clone(), entry.scope)
            };
            if symtab.declared_in_scope(&lexeme, scope, id) {
                self.report(line, SemanticErrorKind::AlreadyDeclared(lexeme), symtab);
            }
            // Annotate even a redeclared entry so later uses resolve to a
            // typed row instead of erroring a second time.
            let entry = symtab.entry_mut(id);
            entry.ty = Some(ty);
            entry.role = Some(Role::Variable);
        }
    }

    fn use_ident(&mut self, token: &Token, line: u32, symtab: &mut SymbolTable) {
        if let Token::Ident(id) = token {
            if symtab.entry(*id).ty.is_none() {
                let lexeme = symtab.lexeme(*id).to_owned();
                self.report(line, SemanticErrorKind::NotDeclared(lexeme), symtab);
            }
        }
    }

    fn push_type_ident(&mut self, token: &Token, symtab: &SymbolTable) {
        if let Token::Ident(id) = token {
            // Undeclared identifiers poison the expression; the use check
            // has already reported them.
            self.type_stack
                .push(symtab.entry(*id).ty.unwrap_or(DeclType::Void));
        }
    }

    fn apply_binop(&mut self, line: u32, symtab: &mut SymbolTable) {
        let (Some(rhs), Some(lhs), Some(op)) = (
            self.type_stack.pop(),
            self.type_stack.pop(),
            self.op_stack.pop(),
        ) else {
            return;
        };
        if lhs == DeclType::Void || rhs == DeclType::Void {
            self.type_stack.push(DeclType::Void);
            return;
        }
        if lhs != rhs {
            self.report(
                line,
                SemanticErrorKind::OperandMismatch {
                    op: op.to_owned(),
                    lhs,
                    rhs,
                },
                symtab,
            );
            self.type_stack.push(DeclType::Void);
            return;
        }
        let result = match classify_op(op) {
            Some(OpClass::Relational) => Some(DeclType::Bool),
            Some(OpClass::Arithmetic) => is_numeric(lhs).then_some(lhs),
            Some(OpClass::Logical) => (lhs == DeclType::Bool).then_some(DeclType::Bool),
            None => Some(lhs),
        };
        match result {
            Some(ty) => self.type_stack.push(ty),
            None => {
                self.report(
                    line,
                    SemanticErrorKind::InvalidOperand {
                        op: op.to_owned(),
                        found: lhs,
                    },
                    symtab,
                );
                self.type_stack.push(DeclType::Void);
            }
        }
    }

    fn apply_unop(&mut self, line: u32, symtab: &mut SymbolTable) {
        let (Some(operand), Some(op)) = (self.type_stack.pop(), self.op_stack.pop()) else {
            return;
        };
        if operand == DeclType::Void {
            self.type_stack.push(DeclType::Void);
            return;
        }
        // `~` is logical negation.
        if operand == DeclType::Bool {
            self.type_stack.push(DeclType::Bool);
        } else {
            self.report(
                line,
                SemanticErrorKind::UnaryMismatch {
                    op: op.to_owned(),
                    found: operand,
                },
                symtab,
            );
            self.type_stack.push(DeclType::Void);
        }
    }

    fn check_assign(&mut self, line: u32, symtab: &mut SymbolTable) {
        let (Some(found), Some(expected)) = (self.type_stack.pop(), self.type_stack.pop()) else {
            return;
        };
        if expected == DeclType::Void || found == DeclType::Void {
            return;
        }
        if expected != found {
            self.report(
                line,
                SemanticErrorKind::AssignmentMismatch { expected, found },
                symtab,
            );
        }
    }

    fn check_condition(&mut self, line: u32, symtab: &mut SymbolTable) {
        let Some(ty) = self.type_stack.pop() else {
            return;
        };
        if ty != DeclType::Bool && ty != DeclType::Void {
            self.report(line, SemanticErrorKind::ConditionNotBoolean(ty), symtab);
        }
    }

    fn check_for_bound(&mut self, line: u32, symtab: &mut SymbolTable) {
        let Some(ty) = self.type_stack.pop() else {
            return;
        };
        if !is_numeric(ty) && ty != DeclType::Void {
            self.report(line, SemanticErrorKind::BoundNotNumeric(ty), symtab);
        }
    }
}

impl SemanticSink for SemanticAnalyser {
    fn apply(
        &mut self,
        action: SemanticAction,
        token: &Token,
        line: u32,
        symtab: &mut SymbolTable,
    ) {
        match action {
            SemanticAction::BeginDeclaration => {
                symtab.set_declaration_flag(true);
                self.pending_decl.clear();
            }
            SemanticAction::EndDeclaration => {
                symtab.set_declaration_flag(false);
            }
            SemanticAction::DeclareId => {
                if let Token::Ident(id) = token {
                    self.pending_decl.push(*id);
                }
            }
            SemanticAction::DeclareType => self.declare_type(token, line, symtab),
            SemanticAction::UseIdent => self.use_ident(token, line, symtab),
            SemanticAction::PushTypeIdent => self.push_type_ident(token, symtab),
            SemanticAction::PushTypeNum => {
                if let Token::Number(lexeme) = token {
                    let ty = if number_is_real(lexeme) {
                        DeclType::Real
                    } else {
                        DeclType::Int
                    };
                    self.type_stack.push(ty);
                }
            }
            SemanticAction::PushTypeBool => self.type_stack.push(DeclType::Bool),
            SemanticAction::SaveOperator => {
                if let Token::Punct(op) = token {
                    self.op_stack.push(op);
                }
            }
            SemanticAction::ApplyBinop => self.apply_binop(line, symtab),
            SemanticAction::ApplyUnop => self.apply_unop(line, symtab),
            SemanticAction::CheckAssign => self.check_assign(line, symtab),
            SemanticAction::CheckCondition => self.check_condition(line, symtab),
            SemanticAction::CheckForBound => self.check_for_bound(line, symtab),
            SemanticAction::CheckWrite => {
                self.type_stack.pop();
            }
            SemanticAction::EnterScope => symtab.enter_scope(),
            SemanticAction::ExitScope => symtab.exit_scope(),
        }
    }

    fn eof_check(&mut self, line: u32, symtab: &mut SymbolTable) {
        if symtab.current_scope() > 0 {
            self.report(line, SemanticErrorKind::UnclosedBlock, symtab);
            while symtab.current_scope() > 0 {
                symtab.exit_scope();
            }
        }
        self.type_stack.clear();
        self.op_stack.clear();
    }
}
