//! The compiler's symbol table.
//!
//! One table serves the whole pipeline: the scanner interns identifiers into
//! it, the parser consults it when a declaration opens on an identifier
//! lookahead, and the semantic analyser annotates entries with declared
//! types. The table is an owned value; each phase borrows it mutably for
//! exactly the calls it makes, so there is no hidden shared state.
//!
//! Entries are append-only. Leaving a scope never removes entries — lookups
//! resolve shadowing by scanning from the newest entry backwards, and tokens
//! keep referring to their entries by index after the scope is gone.

use std::fmt;

use crate::index_vec::{Idx, IndexVec};

/// Index of an entry in the [`SymbolTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl Idx for SymbolId {
    fn from_usize(idx: usize) -> Self {
        SymbolId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Declared type of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclType {
    Int,
    Real,
    Bool,
    Void,
}

impl fmt::Display for DeclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclType::Int => write!(f, "integer"),
            DeclType::Real => write!(f, "real"),
            DeclType::Bool => write!(f, "boolean"),
            DeclType::Void => write!(f, "void"),
        }
    }
}

/// What a symbol names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Variable,
    Function,
}

/// One row of the symbol table.
#[derive(Clone, Debug)]
pub struct SymbolEntry {
    pub lexeme: String,
    /// Scope level the symbol was created in (0 = global).
    pub scope: u32,
    /// Declared type, set by the semantic analyser; `None` until declared.
    pub ty: Option<DeclType>,
    pub role: Option<Role>,
    pub arity: Option<usize>,
    pub params: Vec<DeclType>,
}

impl SymbolEntry {
    fn undeclared(lexeme: &str, scope: u32) -> Self {
        Self {
            lexeme: lexeme.to_owned(),
            scope,
            ty: None,
            role: None,
            arity: None,
            params: Vec::new(),
        }
    }
}

/// Append-only symbol table with a scope stack.
///
/// The scope stack holds, for each open scope, the table length at the point
/// the scope was entered. The current scope level is the stack depth minus
/// one; the global scope is level 0 and is never popped.
pub struct SymbolTable {
    entries: IndexVec<SymbolId, SymbolEntry>,
    scope_stack: Vec<usize>,
    declaration_flag: bool,
    error_flag: bool,
}

impl SymbolTable {
    /// A fresh table holding only the reserved `output` builtin.
    ///
    /// `output` is a global `void` function of one `integer` parameter. No
    /// grammar production refers to it; it is reserved for the execution
    /// stage and kept so identifier indices stay stable across tools.
    pub fn new() -> Self {
        let mut entries = IndexVec::new();
        entries.push(SymbolEntry {
            lexeme: "output".to_owned(),
            scope: 0,
            ty: Some(DeclType::Void),
            role: Some(Role::Function),
            arity: Some(1),
            params: vec![DeclType::Int],
        });
        Self {
            entries,
            scope_stack: vec![0],
            declaration_flag: false,
            error_flag: false,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for `id`. Ids handed out by this table are always valid.
    pub fn entry(&self, id: SymbolId) -> &SymbolEntry {
        &self.entries[id]
    }

    pub fn entry_mut(&mut self, id: SymbolId) -> &mut SymbolEntry {
        &mut self.entries[id]
    }

    /// Lexeme for `id`.
    pub fn lexeme(&self, id: SymbolId) -> &str {
        &self.entries[id].lexeme
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolEntry)> {
        self.entries.iter_enumerated()
    }

    /// Current scope level (0 = global).
    pub fn current_scope(&self) -> u32 {
        (self.scope_stack.len() - 1) as u32
    }

    /// Open a new scope.
    pub fn enter_scope(&mut self) {
        self.scope_stack.push(self.entries.len());
    }

    /// Close the innermost scope. The global scope stays open.
    pub fn exit_scope(&mut self) {
        if self.scope_stack.len() > 1 {
            self.scope_stack.pop();
        }
    }

    /// Append a new, undeclared entry at the current scope.
    pub fn insert(&mut self, lexeme: &str) -> SymbolId {
        let scope = self.current_scope();
        self.entries.push(SymbolEntry::undeclared(lexeme, scope))
    }

    /// Newest entry with this lexeme, if any. Scanning backwards makes the
    /// latest declaration win, which is what gives shadowing.
    pub fn find_latest(&self, lexeme: &str) -> Option<SymbolId> {
        self.entries
            .iter_enumerated()
            .rev()
            .find(|(_, e)| e.lexeme == lexeme)
            .map(|(id, _)| id)
    }

    /// Resolve an identifier occurrence to a table index.
    ///
    /// At a use-site this finds the newest matching entry, inserting an
    /// undeclared one if the lexeme has never been seen. While the
    /// declaration flag is up every occurrence is a fresh declaration and
    /// always gets a new entry.
    pub fn install(&mut self, lexeme: &str) -> SymbolId {
        if !self.declaration_flag {
            if let Some(id) = self.find_latest(lexeme) {
                return id;
            }
        }
        self.insert(lexeme)
    }

    /// Is there a declared entry `(lexeme, scope)` other than `excluding`?
    /// Used for the redeclaration check; undeclared placeholder entries do
    /// not count.
    pub fn declared_in_scope(&self, lexeme: &str, scope: u32, excluding: SymbolId) -> bool {
        self.entries.iter_enumerated().any(|(id, e)| {
            id != excluding && e.scope == scope && e.ty.is_some() && e.lexeme == lexeme
        })
    }

    pub fn declaration_flag(&self) -> bool {
        self.declaration_flag
    }

    pub fn set_declaration_flag(&mut self, value: bool) {
        self.declaration_flag = value;
    }

    /// The monotonic error flag: any phase raises it, nothing lowers it.
    pub fn error_flag(&self) -> bool {
        self.error_flag
    }

    pub fn set_error_flag(&mut self) {
        self.error_flag = true;
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
