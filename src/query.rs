//! Locating function declarations with tree-sitter queries.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use crate::language::Language;
use crate::parser::SourceFile;

/// Compiles one of the language's built-in queries
///
/// The query sources are static and covered by tests, so a compile failure
/// is a programming error rather than a runtime condition.
pub(crate) fn compile_query(language: impl Language, source: &str) -> Query {
    Query::new(&language.tree_sitter_language(), source).unwrap_or_else(|e| {
        panic!(
            "invalid built-in {} query at row {}, column {}: {}",
            language, e.row, e.column, e.message
        )
    })
}

/// Returns the index of a capture every built-in query is known to define
pub(crate) fn capture_index(query: &Query, name: &str) -> u32 {
    query
        .capture_index_for_name(name)
        .unwrap_or_else(|| panic!("built-in query has no @{name} capture"))
}

/// A located function declaration, borrowed from the file that contains it
#[derive(Debug, Clone, Copy)]
pub struct FunctionHandle<'tree> {
    node: Node<'tree>,
    name: &'tree str,
}

impl<'tree> FunctionHandle<'tree> {
    /// The declaration node (the whole `func ... { ... }`)
    pub fn node(&self) -> Node<'tree> {
        self.node
    }

    pub fn name(&self) -> &'tree str {
        self.name
    }

    /// Zero-based row of the `func` keyword
    pub fn start_line(&self) -> usize {
        self.node.start_position().row
    }

    /// Zero-based row of the closing brace
    pub fn end_line(&self) -> usize {
        self.node.end_position().row
    }
}

/// Finds the first function declared as `name` in document order
///
/// Matching is exact and case-sensitive. Methods are not function
/// declarations and are never returned. Returns `None` when no declaration
/// matches.
pub fn find_function<'tree, L: Language>(
    file: &'tree SourceFile<L>,
    name: &str,
) -> Option<FunctionHandle<'tree>> {
    let language = file.language();
    let query = compile_query(language, language.function_query());
    let decl_index = capture_index(&query, "decl");
    let name_index = capture_index(&query, "name");

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, file.root_node(), file.source().as_bytes());

    while let Some(match_) = matches.next() {
        let mut decl_node = None;
        let mut name_node = None;
        for capture in match_.captures {
            if capture.index == decl_index {
                decl_node = Some(capture.node);
            } else if capture.index == name_index {
                name_node = Some(capture.node);
            }
        }

        if let (Some(node), Some(name_node)) = (decl_node, name_node)
            && file.text(name_node) == name
        {
            return Some(FunctionHandle {
                node,
                name: file.text(name_node),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoLang;
    use crate::parser::parse_source;

    const SOURCE: &str = "package main

func helper() int {
    return 1
}

func (s *Server) run() {}

func run() {
    helper()
}

func Run() {}
";

    #[test]
    fn test_find_function() -> anyhow::Result<()> {
        let file = parse_source("main.go", SOURCE.to_string(), GoLang)?;

        let handle = find_function(&file, "run").expect("run should be found");
        assert_eq!(handle.name(), "run");
        assert_eq!(handle.node().kind(), "function_declaration");
        assert_eq!(handle.start_line(), 8);
        assert_eq!(handle.end_line(), 10);

        Ok(())
    }

    #[test]
    fn test_find_function_is_case_sensitive() -> anyhow::Result<()> {
        let file = parse_source("main.go", SOURCE.to_string(), GoLang)?;

        let handle = find_function(&file, "Run").expect("Run should be found");
        assert_eq!(handle.start_line(), 12);
        assert_eq!(handle.start_line(), handle.end_line());

        assert!(find_function(&file, "RUN").is_none());
        assert!(find_function(&file, "help").is_none());

        Ok(())
    }

    #[test]
    fn test_find_function_skips_methods() -> anyhow::Result<()> {
        let source = "package main\n\nfunc (s *Server) Start() {}\n";
        let file = parse_source("server.go", source.to_string(), GoLang)?;

        assert!(find_function(&file, "Start").is_none());

        Ok(())
    }

    #[test]
    fn test_first_declaration_wins() -> anyhow::Result<()> {
        let source = "package main\n\nfunc dup() {}\n\nfunc dup() {\n}\n";
        let file = parse_source("dup.go", source.to_string(), GoLang)?;

        for _ in 0..3 {
            let handle = find_function(&file, "dup").expect("dup should be found");
            assert_eq!(handle.start_line(), 2);
        }

        Ok(())
    }
}
