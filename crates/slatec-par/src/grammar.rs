//! Productions and the LL(1) parsing table.
//!
//! The grammar is the left-factored form of the language's surface syntax:
//! list constructs get `-tail` helper non-terminals and the expression
//! layers (`Expression` / `Operand` / `Term` / `Factor`) each split into a
//! head and an optional tail, which removes the common prefixes the
//! original layering had. Semantic and code-generation action symbols sit
//! inside right-hand sides; they are transparent to FIRST/FOLLOW and are
//! never matched against input.
//!
//! The table itself is derived from the production list: a production lands
//! on the FIRST set of its right-hand side (plus FOLLOW for nullable ones),
//! every remaining FOLLOW cell becomes [`Entry::Synch`] and everything else
//! [`Entry::Empty`]. Deriving the table keeps every row exactly
//! [`Terminal::COUNT`] wide and cannot drift out of sync with the grammar.
//! The one deliberate ambiguity, the dangling `else`, resolves toward the
//! `else` production because productions are placed in order and earlier
//! placements win.

use std::sync::OnceLock;

use indexmap::IndexSet;

use crate::actions::{CodeGenAction, SemanticAction};
use crate::symbols::{NonTerminal, Terminal};

/// One symbol of a production's right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarSymbol {
    /// Terminal to match.
    T(Terminal),
    /// Non-terminal to expand.
    N(NonTerminal),
    /// Semantic action to dispatch.
    Sa(SemanticAction),
    /// Code-generation event to emit.
    Cg(CodeGenAction),
    /// Explicit empty production marker; becomes a parse-tree leaf but is
    /// never pushed on the parse stack.
    Eps,
}

/// A production `lhs → rhs`.
#[derive(Debug)]
pub struct Production {
    pub lhs: NonTerminal,
    pub rhs: &'static [GrammarSymbol],
}

use self::GrammarSymbol::{Cg, Eps, Sa, N, T};
use crate::actions::CodeGenAction as G;
use crate::actions::SemanticAction as A;
use crate::symbols::NonTerminal as Nt;
use crate::symbols::Terminal as Tm;

pub static PRODUCTIONS: &[Production] = &[
    // Program
    Production {
        lhs: Nt::Program,
        rhs: &[
            T(Tm::Begin),
            N(Nt::DescriptionList),
            N(Nt::StatementList),
            T(Tm::End),
        ],
    },
    // Declarations
    Production {
        lhs: Nt::DescriptionList,
        rhs: &[N(Nt::Description), N(Nt::DescriptionList)],
    },
    Production {
        lhs: Nt::DescriptionList,
        rhs: &[Eps],
    },
    // The declaration flag goes up before `dim` is consumed, so the first
    // identifier is already scanned as a declaration site.
    Production {
        lhs: Nt::Description,
        rhs: &[
            Sa(A::BeginDeclaration),
            T(Tm::Dim),
            N(Nt::IdentifierList),
            Sa(A::EndDeclaration),
            T(Tm::Colon),
            Sa(A::DeclareType),
            N(Nt::Type),
            T(Tm::Semicolon),
        ],
    },
    Production {
        lhs: Nt::IdentifierList,
        rhs: &[Sa(A::DeclareId), T(Tm::Id), N(Nt::IdentifierTail)],
    },
    Production {
        lhs: Nt::IdentifierTail,
        rhs: &[
            T(Tm::Comma),
            Sa(A::DeclareId),
            T(Tm::Id),
            N(Nt::IdentifierTail),
        ],
    },
    Production {
        lhs: Nt::IdentifierTail,
        rhs: &[Eps],
    },
    // Statements
    Production {
        lhs: Nt::StatementList,
        rhs: &[N(Nt::Statement), N(Nt::StatementTail)],
    },
    Production {
        lhs: Nt::StatementList,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::StatementTail,
        rhs: &[T(Tm::Semicolon), N(Nt::StatementList)],
    },
    Production {
        lhs: Nt::StatementTail,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::CompoundStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::AssignmentStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::ConditionalStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::FixedLoopStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::ConditionalLoopStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::InputStatement)],
    },
    Production {
        lhs: Nt::Statement,
        rhs: &[N(Nt::OutputStatement)],
    },
    Production {
        lhs: Nt::CompoundStatement,
        rhs: &[
            T(Tm::Begin),
            Sa(A::EnterScope),
            N(Nt::DescriptionList),
            N(Nt::StatementList),
            Sa(A::ExitScope),
            T(Tm::End),
        ],
    },
    Production {
        lhs: Nt::AssignmentStatement,
        rhs: &[
            Sa(A::UseIdent),
            Sa(A::PushTypeIdent),
            T(Tm::Id),
            T(Tm::As),
            N(Nt::Expression),
            Sa(A::CheckAssign),
            Cg(G::Assign),
        ],
    },
    Production {
        lhs: Nt::ConditionalStatement,
        rhs: &[
            T(Tm::If),
            N(Nt::Expression),
            Sa(A::CheckCondition),
            T(Tm::Then),
            N(Nt::Statement),
            N(Nt::ElsePart),
        ],
    },
    // Listed before the ε alternative so the `else` column resolves to it.
    Production {
        lhs: Nt::ElsePart,
        rhs: &[T(Tm::Else), N(Nt::Statement)],
    },
    Production {
        lhs: Nt::ElsePart,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::FixedLoopStatement,
        rhs: &[
            T(Tm::For),
            Sa(A::UseIdent),
            Sa(A::PushTypeIdent),
            T(Tm::Id),
            T(Tm::As),
            N(Nt::Expression),
            Sa(A::CheckAssign),
            T(Tm::To),
            N(Nt::Expression),
            Sa(A::CheckForBound),
            T(Tm::Do),
            N(Nt::Statement),
        ],
    },
    Production {
        lhs: Nt::ConditionalLoopStatement,
        rhs: &[
            T(Tm::While),
            N(Nt::Expression),
            Sa(A::CheckCondition),
            T(Tm::Do),
            N(Nt::Statement),
        ],
    },
    Production {
        lhs: Nt::InputStatement,
        rhs: &[
            T(Tm::Read),
            T(Tm::LParen),
            N(Nt::ReadList),
            T(Tm::RParen),
            Cg(G::Input),
        ],
    },
    Production {
        lhs: Nt::ReadList,
        rhs: &[Sa(A::UseIdent), T(Tm::Id), N(Nt::ReadTail)],
    },
    Production {
        lhs: Nt::ReadTail,
        rhs: &[T(Tm::Comma), Sa(A::UseIdent), T(Tm::Id), N(Nt::ReadTail)],
    },
    Production {
        lhs: Nt::ReadTail,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::OutputStatement,
        rhs: &[
            T(Tm::Write),
            T(Tm::LParen),
            N(Nt::ExpressionList),
            T(Tm::RParen),
            Cg(G::Output),
        ],
    },
    Production {
        lhs: Nt::ExpressionList,
        rhs: &[
            N(Nt::Expression),
            Sa(A::CheckWrite),
            N(Nt::ExpressionListTail),
        ],
    },
    Production {
        lhs: Nt::ExpressionListTail,
        rhs: &[
            T(Tm::Comma),
            N(Nt::Expression),
            Sa(A::CheckWrite),
            N(Nt::ExpressionListTail),
        ],
    },
    Production {
        lhs: Nt::ExpressionListTail,
        rhs: &[Eps],
    },
    // Expressions
    Production {
        lhs: Nt::Expression,
        rhs: &[N(Nt::Operand), N(Nt::ExpressionTail)],
    },
    Production {
        lhs: Nt::ExpressionTail,
        rhs: &[
            Sa(A::SaveOperator),
            N(Nt::RelationalOperation),
            N(Nt::Operand),
            Sa(A::ApplyBinop),
        ],
    },
    Production {
        lhs: Nt::ExpressionTail,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::Operand,
        rhs: &[N(Nt::Term), N(Nt::OperandTail)],
    },
    Production {
        lhs: Nt::OperandTail,
        rhs: &[
            Sa(A::SaveOperator),
            N(Nt::AdditiveOperation),
            N(Nt::Term),
            Sa(A::ApplyBinop),
            N(Nt::OperandTail),
        ],
    },
    Production {
        lhs: Nt::OperandTail,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::Term,
        rhs: &[N(Nt::Factor), N(Nt::TermTail)],
    },
    Production {
        lhs: Nt::TermTail,
        rhs: &[
            Sa(A::SaveOperator),
            N(Nt::MultiplicativeOperation),
            N(Nt::Factor),
            Sa(A::ApplyBinop),
            N(Nt::TermTail),
        ],
    },
    Production {
        lhs: Nt::TermTail,
        rhs: &[Eps],
    },
    Production {
        lhs: Nt::Factor,
        rhs: &[N(Nt::Identifier)],
    },
    Production {
        lhs: Nt::Factor,
        rhs: &[N(Nt::Number)],
    },
    Production {
        lhs: Nt::Factor,
        rhs: &[N(Nt::LogicalConstant)],
    },
    Production {
        lhs: Nt::Factor,
        rhs: &[
            Sa(A::SaveOperator),
            N(Nt::UnaryOperation),
            N(Nt::Factor),
            Sa(A::ApplyUnop),
        ],
    },
    Production {
        lhs: Nt::Factor,
        rhs: &[T(Tm::LParen), N(Nt::Expression), T(Tm::RParen)],
    },
    Production {
        lhs: Nt::Identifier,
        rhs: &[Sa(A::UseIdent), Sa(A::PushTypeIdent), T(Tm::Id)],
    },
    Production {
        lhs: Nt::Number,
        rhs: &[Sa(A::PushTypeNum), T(Tm::Num)],
    },
    Production {
        lhs: Nt::LogicalConstant,
        rhs: &[Sa(A::PushTypeBool), T(Tm::True)],
    },
    Production {
        lhs: Nt::LogicalConstant,
        rhs: &[Sa(A::PushTypeBool), T(Tm::False)],
    },
    Production {
        lhs: Nt::Type,
        rhs: &[T(Tm::Integer)],
    },
    Production {
        lhs: Nt::Type,
        rhs: &[T(Tm::Real)],
    },
    Production {
        lhs: Nt::Type,
        rhs: &[T(Tm::Boolean)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Ne)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Eq)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Lt)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Le)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Gt)],
    },
    Production {
        lhs: Nt::RelationalOperation,
        rhs: &[T(Tm::Ge)],
    },
    Production {
        lhs: Nt::AdditiveOperation,
        rhs: &[T(Tm::Plus)],
    },
    Production {
        lhs: Nt::AdditiveOperation,
        rhs: &[T(Tm::Min)],
    },
    Production {
        lhs: Nt::AdditiveOperation,
        rhs: &[T(Tm::Or)],
    },
    Production {
        lhs: Nt::MultiplicativeOperation,
        rhs: &[T(Tm::Mult)],
    },
    Production {
        lhs: Nt::MultiplicativeOperation,
        rhs: &[T(Tm::Div)],
    },
    Production {
        lhs: Nt::MultiplicativeOperation,
        rhs: &[T(Tm::And)],
    },
    Production {
        lhs: Nt::UnaryOperation,
        rhs: &[T(Tm::Tilde)],
    },
];

/// One cell of the parsing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Expand production `PRODUCTIONS[p]`.
    Produce(usize),
    /// Follow-set recovery: report the non-terminal missing and pop it.
    Synch,
    /// No entry: report the lookahead illegal and skip it.
    Empty,
}

/// The immutable LL(1) action matrix.
pub struct ParseTable {
    cells: Vec<Entry>,
}

impl ParseTable {
    /// The table for [`PRODUCTIONS`], built once per process.
    pub fn global() -> &'static ParseTable {
        static TABLE: OnceLock<ParseTable> = OnceLock::new();
        TABLE.get_or_init(ParseTable::build)
    }

    pub fn lookup(&self, row: NonTerminal, col: Terminal) -> Entry {
        self.cells[row.row() * Terminal::COUNT + col.col()]
    }

    fn build() -> ParseTable {
        let (nullable, first) = compute_first();
        let follow = compute_follow(&nullable, &first);

        let mut cells = vec![Entry::Empty; NonTerminal::COUNT * Terminal::COUNT];
        let cell = |row: usize, col: usize| row * Terminal::COUNT + col;

        for (p, prod) in PRODUCTIONS.iter().enumerate() {
            let row = prod.lhs.row();
            let (first_of_rhs, rhs_nullable) = first_of(prod.rhs, &nullable, &first);
            for t in &first_of_rhs {
                let slot = &mut cells[cell(row, t.col())];
                if *slot == Entry::Empty {
                    *slot = Entry::Produce(p);
                }
            }
            if rhs_nullable {
                for t in &follow[row] {
                    let slot = &mut cells[cell(row, t.col())];
                    if *slot == Entry::Empty {
                        *slot = Entry::Produce(p);
                    }
                }
            }
        }

        for n in NonTerminal::ALL {
            for t in &follow[n.row()] {
                let slot = &mut cells[cell(n.row(), t.col())];
                if *slot == Entry::Empty {
                    *slot = Entry::Synch;
                }
            }
        }

        ParseTable { cells }
    }
}

/// FIRST of a symbol sequence; action symbols and `Eps` are transparent.
/// The second component is whether the whole sequence can derive ε.
fn first_of(
    rhs: &[GrammarSymbol],
    nullable: &[bool; NonTerminal::COUNT],
    first: &[IndexSet<Terminal>],
) -> (IndexSet<Terminal>, bool) {
    let mut set = IndexSet::new();
    for sym in rhs {
        match sym {
            T(t) => {
                set.insert(*t);
                return (set, false);
            }
            N(m) => {
                set.extend(first[m.row()].iter().copied());
                if !nullable[m.row()] {
                    return (set, false);
                }
            }
            Sa(_) | Cg(_) | Eps => {}
        }
    }
    (set, true)
}

fn compute_first() -> ([bool; NonTerminal::COUNT], Vec<IndexSet<Terminal>>) {
    let mut nullable = [false; NonTerminal::COUNT];
    let mut first: Vec<IndexSet<Terminal>> = vec![IndexSet::new(); NonTerminal::COUNT];
    loop {
        let mut changed = false;
        for prod in PRODUCTIONS {
            let row = prod.lhs.row();
            let (set, rhs_nullable) = first_of(prod.rhs, &nullable, &first);
            for t in set {
                changed |= first[row].insert(t);
            }
            if rhs_nullable && !nullable[row] {
                nullable[row] = true;
                changed = true;
            }
        }
        if !changed {
            return (nullable, first);
        }
    }
}

fn compute_follow(
    nullable: &[bool; NonTerminal::COUNT],
    first: &[IndexSet<Terminal>],
) -> Vec<IndexSet<Terminal>> {
    let mut follow: Vec<IndexSet<Terminal>> = vec![IndexSet::new(); NonTerminal::COUNT];
    follow[NonTerminal::Program.row()].insert(Terminal::EndMarker);
    loop {
        let mut changed = false;
        for prod in PRODUCTIONS {
            let lhs_row = prod.lhs.row();
            for (i, sym) in prod.rhs.iter().enumerate() {
                let N(b) = sym else { continue };
                let row = b.row();
                let (trailer, trailer_nullable) = first_of(&prod.rhs[i + 1..], nullable, first);
                for t in trailer {
                    changed |= follow[row].insert(t);
                }
                if trailer_nullable {
                    let inherited: Vec<Terminal> = follow[lhs_row].iter().copied().collect();
                    for t in inherited {
                        changed |= follow[row].insert(t);
                    }
                }
            }
        }
        if !changed {
            return follow;
        }
    }
}
