use super::LanguageSupport;

#[derive(Debug)]
pub struct TypeScriptSupport;

impl LanguageSupport for TypeScriptSupport {
    fn id(&self) -> &'static str {
        "typescript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["ts", "mts", "cts"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typescript_source() {
        let tree = TypeScriptSupport
            .parse("interface User { name: string }\nconst u: User = { name: \"a\" };\n")
            .unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert!(tree.root_node().child_count() > 0);
    }
}
