use super::LanguageSupport;

#[derive(Debug)]
pub struct CppSupport;

impl LanguageSupport for CppSupport {
    fn id(&self) -> &'static str {
        "cpp"
    }

    fn extensions(&self) -> &'static [&'static str] {
        // Plain C headers are read with the C++ grammar.
        &["cpp", "cc", "cxx", "c++", "hpp", "h", "hxx"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_cpp::LANGUAGE.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cpp_source() {
        let source = "#include <vector>\nint main() {\n    std::vector<int> v;\n    return 0;\n}\n";
        let tree = CppSupport.parse(source).unwrap();
        assert_eq!(tree.root_node().kind(), "translation_unit");
        assert!(tree.root_node().child_count() > 0);
    }
}
