// Tree scoring: visit every node once, count kinds, weigh the counts.
//
// Contributions are derived from counts after the walk, so the breakdown does
// not depend on visiting order and `contribution == count × weight` holds
// exactly.

use std::collections::HashMap;

use quanta_syntax::{SyntaxNode, SyntaxTree};

use crate::error::{QuantaError, Result};
use crate::types::Breakdown;
use crate::weights::WeightTable;

/// Visit ceiling for trees that cannot report their own size.
pub const DEFAULT_NODE_LIMIT: usize = 10_000_000;

/// Score a whole tree. An empty tree scores zero.
pub fn score<T: SyntaxTree + ?Sized>(tree: &T, table: &WeightTable) -> Result<Breakdown> {
    match tree.root() {
        Some(root) => score_node(&root, table),
        None => Ok(Breakdown::default()),
    }
}

/// Score the subtree rooted at `root`, bounded by the size the node reports.
pub fn score_node<N: SyntaxNode>(root: &N, table: &WeightTable) -> Result<Breakdown> {
    let limit = root.subtree_size().unwrap_or(DEFAULT_NODE_LIMIT);
    score_with_limit(root, table, limit)
}

/// Score the subtree rooted at `root`, failing with `MalformedTree` once more
/// than `limit` nodes have been visited.
///
/// A finite tree never exceeds its own node count, so overrunning the limit
/// means the structure loops back on itself or shares subtrees.
pub fn score_with_limit<N: SyntaxNode>(
    root: &N,
    table: &WeightTable,
    limit: usize,
) -> Result<Breakdown> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut visited = 0usize;
    let mut stack = vec![root.clone()];

    // Pre-order: children are pushed in reverse so the first child pops next.
    while let Some(node) = stack.pop() {
        visited += 1;
        if visited > limit {
            return Err(QuantaError::MalformedTree(format!(
                "traversal visited more than {limit} nodes; the tree contains a cycle, \
                 a shared subtree, or exceeds the node limit"
            )));
        }

        let kind = node.kind();
        if let Some(count) = counts.get_mut(kind) {
            *count += 1;
        } else {
            counts.insert(kind.to_string(), 1);
        }

        stack.extend(node.children().into_iter().rev());
    }

    Ok(Breakdown::from_counts(counts, |kind| table.weight_for(kind)))
}
