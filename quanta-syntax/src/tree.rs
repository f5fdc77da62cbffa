// The minimal tree interface scoring is written against.
//
// Any parser output that can name a node's kind and list its children in
// order can be scored; tree-sitter trees and the arena-backed fixture trees
// both implement it.

use crate::TextRange;

/// A node in a syntax tree.
pub trait SyntaxNode: Clone {
    /// Grammar kind label, e.g. `function_definition` or `(`.
    fn kind(&self) -> &str;

    /// Ordered children, named and anonymous alike.
    fn children(&self) -> Vec<Self>;

    /// Source span, when the tree carries one. Scoring never reads it.
    fn span(&self) -> Option<TextRange> {
        None
    }

    /// Upper bound on the number of nodes reachable from here (this node
    /// included), if the tree knows one without walking.
    fn subtree_size(&self) -> Option<usize> {
        None
    }
}

/// A whole syntax tree. An empty tree has no root.
pub trait SyntaxTree {
    type Node<'a>: SyntaxNode
    where
        Self: 'a;

    fn root(&self) -> Option<Self::Node<'_>>;
}

impl SyntaxNode for tree_sitter::Node<'_> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }

    fn span(&self) -> Option<TextRange> {
        Some(self.range().into())
    }

    fn subtree_size(&self) -> Option<usize> {
        Some(self.descendant_count())
    }
}

impl SyntaxTree for tree_sitter::Tree {
    type Node<'a> = tree_sitter::Node<'a>;

    fn root(&self) -> Option<Self::Node<'_>> {
        Some(self.root_node())
    }
}
