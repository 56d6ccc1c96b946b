//! Go language implementation.

use crate::language::Language;

/// Go language implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GoLang;

impl Language for GoLang {
    fn file_pattern(&self) -> &'static str {
        r"\.go$"
    }

    fn display_name(&self) -> &'static str {
        "Go"
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn import_query(&self) -> &'static str {
        // `name` covers package identifiers as well as `_` and `.` imports
        r#"
        (import_spec
            name: (_)? @alias
            path: (_) @path)
        "#
    }

    fn function_query(&self) -> &'static str {
        r#"
        (function_declaration
            name: (identifier) @name) @decl
        "#
    }

    fn call_query(&self) -> &'static str {
        r#"
        (call_expression
            function: (_) @callee) @call
        "#
    }

    fn scope_node_kinds(&self) -> &'static [&'static str] {
        &["function_declaration", "method_declaration", "func_literal"]
    }

    fn is_test_file(&self, file_name: &str) -> bool {
        file_name.ends_with("_test.go")
    }
}

impl std::fmt::Display for GoLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
