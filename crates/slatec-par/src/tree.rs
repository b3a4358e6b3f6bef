//! Parse-tree arena.
//!
//! Nodes live in one `IndexVec` and refer to each other by id, so the tree
//! has no owning cycles and recovery cleanup is a single pass over the
//! arena. Nodes are never physically deleted; removal unlinks them from
//! their parent, which keeps every issued `NodeId` valid.

use slatec_lex::Token;
use slatec_util::index_vec::{Idx, IndexVec};
use slatec_util::SymbolTable;

use crate::symbols::{NonTerminal, Terminal};

/// Index of a node in the [`ParseTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl Idx for NodeId {
    fn from_usize(idx: usize) -> Self {
        NodeId(idx as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeLabel {
    NonTerminal(NonTerminal),
    Terminal(Terminal),
    /// Elided production; kept in the tree, skipped by the renderer.
    Epsilon,
}

#[derive(Clone, Debug)]
pub struct ParseNode {
    pub label: NodeLabel,
    /// The matched token, for terminal leaves.
    pub token: Option<Token>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    removed: bool,
}

/// The parse tree, rooted at `Program`.
pub struct ParseTree {
    nodes: IndexVec<NodeId, ParseNode>,
    root: NodeId,
}

impl ParseTree {
    pub fn new() -> Self {
        let mut nodes = IndexVec::new();
        let root = nodes.push(ParseNode {
            label: NodeLabel::NonTerminal(NonTerminal::Program),
            token: None,
            children: Vec::new(),
            parent: None,
            removed: false,
        });
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id]
    }

    /// Append a child to `parent`, returning the new node's id.
    pub fn add_child(&mut self, parent: NodeId, label: NodeLabel) -> NodeId {
        let id = self.nodes.push(ParseNode {
            label,
            token: None,
            children: Vec::new(),
            parent: Some(parent),
            removed: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Attach the matched token to a terminal node.
    pub fn set_token(&mut self, id: NodeId, token: Token) {
        self.nodes[id].token = Some(token);
    }

    /// Unlink `id` from its parent. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        self.nodes[id].removed = true;
        self.nodes[parent].children.retain(|&c| c != id);
    }

    /// Drop leftovers of error recovery: non-terminals that were never
    /// expanded and terminals that never matched a token.
    pub fn cleanup(&mut self) {
        let dead: Vec<NodeId> = self
            .nodes
            .iter_enumerated()
            .filter(|(id, node)| {
                *id != self.root
                    && !node.removed
                    && node.children.is_empty()
                    && node.token.is_none()
                    && node.label != NodeLabel::Epsilon
            })
            .map(|(id, _)| id)
            .collect();
        for id in dead {
            self.remove(id);
        }
    }

    /// Number of live nodes (root included), mostly for tests.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| !n.removed).count()
    }

    /// Indented pre-order rendering. Epsilon leaves are not surfaced.
    pub fn render(&self, symtab: &SymbolTable) -> String {
        let mut out = String::new();
        out.push_str(self.node_text(self.root, symtab).as_str());
        out.push('\n');
        let children = self.visible_children(self.root);
        for (i, &child) in children.iter().enumerate() {
            self.render_node(child, "", i + 1 == children.len(), symtab, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        id: NodeId,
        prefix: &str,
        last: bool,
        symtab: &SymbolTable,
        out: &mut String,
    ) {
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(self.node_text(id, symtab).as_str());
        out.push('\n');

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        let children = self.visible_children(id);
        for (i, &child) in children.iter().enumerate() {
            self.render_node(child, &child_prefix, i + 1 == children.len(), symtab, out);
        }
    }

    fn visible_children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&c| !self.nodes[c].removed && self.nodes[c].label != NodeLabel::Epsilon)
            .collect()
    }

    fn node_text(&self, id: NodeId, symtab: &SymbolTable) -> String {
        let node = &self.nodes[id];
        match (&node.token, &node.label) {
            (Some(token), _) => token.describe(symtab),
            (None, NodeLabel::NonTerminal(n)) => n.name().to_owned(),
            (None, NodeLabel::Terminal(t)) => t.spelling().to_owned(),
            (None, NodeLabel::Epsilon) => "EPSILON".to_owned(),
        }
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_program() {
        let tree = ParseTree::new();
        assert_eq!(
            tree.node(tree.root()).label,
            NodeLabel::NonTerminal(NonTerminal::Program)
        );
    }

    #[test]
    fn test_add_child_links_both_ways() {
        let mut tree = ParseTree::new();
        let child = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::Begin));
        assert_eq!(tree.node(tree.root()).children, vec![child]);
        assert_eq!(tree.node(child).parent, Some(tree.root()));
    }

    #[test]
    fn test_remove_unlinks_from_parent() {
        let mut tree = ParseTree::new();
        let a = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::Begin));
        let b = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::End));
        tree.remove(a);
        assert_eq!(tree.node(tree.root()).children, vec![b]);
    }

    #[test]
    fn test_remove_root_is_noop() {
        let mut tree = ParseTree::new();
        tree.remove(tree.root());
        assert_eq!(tree.live_count(), 1);
    }

    #[test]
    fn test_cleanup_drops_unexpanded_leaves() {
        let mut tree = ParseTree::new();
        let stmt = tree.add_child(
            tree.root(),
            NodeLabel::NonTerminal(NonTerminal::Statement),
        );
        let matched = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::End));
        tree.set_token(matched, Token::Keyword("end"));
        let unmatched = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::Semicolon));
        let eps = tree.add_child(stmt, NodeLabel::Epsilon);

        tree.cleanup();

        // `stmt` has an epsilon child, so it survives; the token-less
        // terminal goes; the epsilon marker stays.
        let root_children = &tree.node(tree.root()).children;
        assert!(root_children.contains(&stmt));
        assert!(root_children.contains(&matched));
        assert!(!root_children.contains(&unmatched));
        assert!(tree.node(stmt).children.contains(&eps));
    }

    #[test]
    fn test_render_elides_epsilon() {
        let symtab = SymbolTable::new();
        let mut tree = ParseTree::new();
        let begin = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::Begin));
        tree.set_token(begin, Token::Keyword("begin"));
        let dlist = tree.add_child(
            tree.root(),
            NodeLabel::NonTerminal(NonTerminal::DescriptionList),
        );
        tree.add_child(dlist, NodeLabel::Epsilon);
        let end = tree.add_child(tree.root(), NodeLabel::Terminal(Terminal::End));
        tree.set_token(end, Token::Keyword("end"));

        let rendered = tree.render(&symtab);
        assert_eq!(
            rendered,
            "Program\n\
             ├── (KEYWORD, begin)\n\
             ├── Description-list\n\
             └── (KEYWORD, end)\n"
        );
        assert!(!rendered.contains("EPSILON"));
    }
}
