use super::LanguageSupport;

#[derive(Debug)]
pub struct JavaScriptSupport;

impl LanguageSupport for JavaScriptSupport {
    fn id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }
}
