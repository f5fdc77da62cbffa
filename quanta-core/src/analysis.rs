// Per-file analysis: weight table lookup, parse, score.

use quanta_syntax::{LanguageRegistry, SyntaxNode, SyntaxTree};

use crate::error::{QuantaError, Result};
use crate::score::{DEFAULT_NODE_LIMIT, score_with_limit};
use crate::types::{Breakdown, FileAnalysisResult, LanguageId};
use crate::weights::{WeightRegistry, WeightTable};

/// Build a result from an already-parsed tree.
pub fn from_tree<T: SyntaxTree + ?Sized>(
    path: impl Into<String>,
    tree: &T,
    table: &WeightTable,
    line_count: u64,
) -> Result<FileAnalysisResult> {
    let breakdown = crate::score::score(tree, table)?;
    Ok(FileAnalysisResult::new(
        path,
        table.language().clone(),
        line_count,
        breakdown,
    ))
}

/// Parses source text and scores it against a weight registry.
///
/// Holds no mutable state; one analyzer can serve any number of threads.
#[derive(Debug)]
pub struct Analyzer<'w> {
    weights: &'w WeightRegistry,
    languages: LanguageRegistry,
    node_cap: Option<usize>,
}

impl<'w> Analyzer<'w> {
    pub fn new(weights: &'w WeightRegistry) -> Self {
        Self {
            weights,
            languages: LanguageRegistry::new(),
            node_cap: None,
        }
    }

    /// Refuse trees with more than `cap` nodes.
    #[must_use]
    pub fn with_node_cap(mut self, cap: Option<usize>) -> Self {
        self.node_cap = cap;
        self
    }

    pub fn weights(&self) -> &WeightRegistry {
        self.weights
    }

    pub fn languages(&self) -> &LanguageRegistry {
        &self.languages
    }

    /// Analyze one unit of source. `language` names a grammar; its trees are
    /// scored with the weight table that grammar points at (`tsx` scores with
    /// `typescript`), and the result carries that table's language.
    ///
    /// Fails with `UnsupportedLanguage` when no weight table or grammar exists,
    /// `ParseFailure` when the source does not parse cleanly, and
    /// `MalformedTree` when the tree exceeds the node cap.
    pub fn analyze(
        &self,
        path: &str,
        source: &str,
        language: &str,
        line_count: u64,
    ) -> Result<FileAnalysisResult> {
        let id = LanguageId::new(language);
        let grammar = self.languages.get(id.as_str());
        let table = self
            .weights
            .resolve(grammar.as_ref().map_or(id.as_str(), |g| g.weights_language()))?;
        let grammar =
            grammar.ok_or_else(|| QuantaError::UnsupportedLanguage(id.to_string()))?;
        let tree = grammar.parse(source)?;
        let breakdown = self.score_tree(&tree, table)?;
        Ok(FileAnalysisResult::new(
            path,
            table.language().clone(),
            line_count,
            breakdown,
        ))
    }

    fn score_tree(&self, tree: &tree_sitter::Tree, table: &WeightTable) -> Result<Breakdown> {
        let Some(root) = tree.root() else {
            return Ok(Breakdown::default());
        };
        let size = root.subtree_size().unwrap_or(DEFAULT_NODE_LIMIT);
        match self.node_cap {
            Some(cap) if size > cap => Err(QuantaError::MalformedTree(format!(
                "tree has {size} nodes, above the configured limit of {cap}"
            ))),
            _ => score_with_limit(&root, table, size),
        }
    }
}
