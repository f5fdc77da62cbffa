// Arena-backed syntax trees built by hand.
//
// Used to score trees without a grammar. Children are stored as indices, so
// `link` can also express shared nodes and cycles, which real parsers never
// produce.

use crate::{SyntaxNode, SyntaxTree};

/// Position of a node inside a [`FixtureTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

#[derive(Debug, Clone)]
struct FixtureEntry {
    kind: String,
    children: Vec<NodeIndex>,
}

/// A hand-built syntax tree.
#[derive(Debug, Clone, Default)]
pub struct FixtureTree {
    nodes: Vec<FixtureEntry>,
}

impl FixtureTree {
    /// A tree with no nodes at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A tree holding a single root node of `root_kind`.
    pub fn new(root_kind: &str) -> Self {
        Self {
            nodes: vec![FixtureEntry {
                kind: root_kind.to_string(),
                children: Vec::new(),
            }],
        }
    }

    pub fn root_index(&self) -> Option<NodeIndex> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeIndex(0))
        }
    }

    /// Append a new child of `kind` under `parent`.
    pub fn push(&mut self, parent: NodeIndex, kind: &str) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(FixtureEntry {
            kind: kind.to_string(),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);
        index
    }

    /// Append `count` leaf children of `kind` under `parent`.
    pub fn push_leaves(&mut self, parent: NodeIndex, kind: &str, count: usize) {
        for _ in 0..count {
            self.push(parent, kind);
        }
    }

    /// Add an edge to an existing node. Linking an ancestor creates a cycle.
    pub fn link(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.nodes[parent.0].children.push(child);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: NodeIndex) -> FixtureNode<'_> {
        FixtureNode { tree: self, index }
    }
}

/// Borrowed view of one node in a [`FixtureTree`].
#[derive(Debug, Clone, Copy)]
pub struct FixtureNode<'a> {
    tree: &'a FixtureTree,
    index: NodeIndex,
}

impl FixtureNode<'_> {
    pub fn index(&self) -> NodeIndex {
        self.index
    }
}

impl SyntaxNode for FixtureNode<'_> {
    fn kind(&self) -> &str {
        &self.tree.nodes[self.index.0].kind
    }

    fn children(&self) -> Vec<Self> {
        self.tree.nodes[self.index.0]
            .children
            .iter()
            .map(|&index| FixtureNode {
                tree: self.tree,
                index,
            })
            .collect()
    }

    fn subtree_size(&self) -> Option<usize> {
        // Every node of a well-formed arena is visited at most once.
        Some(self.tree.len())
    }
}

impl SyntaxTree for FixtureTree {
    type Node<'a> = FixtureNode<'a>;

    fn root(&self) -> Option<Self::Node<'_>> {
        self.root_index().map(|index| self.node(index))
    }
}
