pub mod fixture;
pub mod languages;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use fixture::{FixtureNode, FixtureTree, NodeIndex};
pub use languages::{LanguageRegistry, LanguageSupport};
pub use tree::{SyntaxNode, SyntaxTree};

/// Error type for the syntax layer.
#[derive(thiserror::Error, Debug)]
pub enum SyntaxError {
    #[error("Parse error in {language} source: {message}")]
    Parse { language: String, message: String },

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

// ── Span type ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl From<tree_sitter::Range> for TextRange {
    fn from(r: tree_sitter::Range) -> Self {
        Self {
            start_byte: r.start_byte,
            end_byte: r.end_byte,
            start_row: r.start_point.row,
            start_col: r.start_point.column,
            end_row: r.end_point.row,
            end_col: r.end_point.column,
        }
    }
}
