pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rust;
pub mod tsx;
pub mod typescript;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::{Result, SyntaxError};

/// Trait implemented by each language's grammar binding.
pub trait LanguageSupport: Send + Sync + std::fmt::Debug {
    /// Language identifier (e.g., "cpp", "python").
    fn id(&self) -> &'static str;

    /// File extensions this language handles, lowercase and without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Tree-sitter language for parsing.
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Language whose weight table scores this grammar's trees.
    fn weights_language(&self) -> &'static str {
        self.id()
    }

    /// Parse `source` into a tree. Trees containing syntax errors are rejected.
    fn parse(&self, source: &str) -> Result<tree_sitter::Tree> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.tree_sitter_language())
            .map_err(|e| SyntaxError::TreeSitter(format!("Failed to set language: {e}")))?;

        let tree = parser.parse(source, None).ok_or_else(|| SyntaxError::Parse {
            language: self.id().to_string(),
            message: "tree-sitter parse returned None".to_string(),
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let message = first_error(root).map_or_else(
                || "syntax error".to_string(),
                |node| {
                    let pos = node.start_position();
                    format!("syntax error at line {}, column {}", pos.row + 1, pos.column + 1)
                },
            );
            return Err(SyntaxError::Parse {
                language: self.id().to_string(),
                message,
            });
        }

        Ok(tree)
    }
}

/// Locate the first ERROR or MISSING node in document order.
fn first_error(root: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    None
}

/// Registry of all supported languages.
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: HashMap<String, Arc<dyn LanguageSupport>>,
    extension_map: HashMap<String, String>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let mut reg = Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
        };
        reg.register(Arc::new(python::PythonSupport));
        reg.register(Arc::new(javascript::JavaScriptSupport));
        reg.register(Arc::new(typescript::TypeScriptSupport));
        reg.register(Arc::new(tsx::TsxSupport));
        reg.register(Arc::new(java::JavaSupport));
        reg.register(Arc::new(cpp::CppSupport));
        reg.register(Arc::new(rust::RustSupport));
        reg.register(Arc::new(go::GoSupport));
        reg
    }

    fn register(&mut self, lang: Arc<dyn LanguageSupport>) {
        for ext in lang.extensions() {
            self.extension_map
                .insert((*ext).to_string(), lang.id().to_string());
        }
        self.languages.insert(lang.id().to_string(), lang);
    }

    /// Look up the language support for a file by its extension (case-insensitive).
    pub fn for_file(&self, path: &Path) -> Option<Arc<dyn LanguageSupport>> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        let lang_id = self.extension_map.get(&ext)?;
        self.languages.get(lang_id).cloned()
    }

    /// Get a language by its identifier.
    pub fn get(&self, id: &str) -> Option<Arc<dyn LanguageSupport>> {
        self.languages.get(id).cloned()
    }

    /// List all registered language IDs, sorted.
    pub fn language_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Parse `source` with the grammar registered under `language`.
    pub fn parse(&self, source: &str, language: &str) -> Result<tree_sitter::Tree> {
        let lang = self
            .get(language)
            .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_string()))?;
        lang.parse(source)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
