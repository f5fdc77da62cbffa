use super::LanguageSupport;

/// TypeScript with JSX. Parsed with its own grammar, scored with the
/// TypeScript weights.
#[derive(Debug)]
pub struct TsxSupport;

impl LanguageSupport for TsxSupport {
    fn id(&self) -> &'static str {
        "tsx"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tsx"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn weights_language(&self) -> &'static str {
        "typescript"
    }
}
