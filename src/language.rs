//! Programming language definitions used by the tracer.

use regex::Regex;

/// Trait representing a programming language the tracer can parse and query
///
/// Only Go is implemented. The trait keeps grammar-specific knowledge (node
/// kinds, query sources, file naming conventions) out of the engine.
pub trait Language: std::fmt::Debug + std::fmt::Display + Copy {
    /// Returns a regex pattern that matches source files for this language
    fn file_pattern(&self) -> &'static str;

    /// Returns the display name for this language
    fn display_name(&self) -> &'static str;

    /// Returns the Tree Sitter language grammar for the given language
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Query capturing `@alias` (optional) and `@path` for every import
    fn import_query(&self) -> &'static str;

    /// Query capturing `@decl` and its `@name` for every function declaration
    fn function_query(&self) -> &'static str;

    /// Query capturing every `@call` expression and its `@callee`
    fn call_query(&self) -> &'static str;

    /// Node kinds that open a new function scope
    fn scope_node_kinds(&self) -> &'static [&'static str];

    /// Whether a file name marks a test-only file
    fn is_test_file(&self, file_name: &str) -> bool;

    /// Creates a compiled regex for matching files of this language
    fn file_regex(&self) -> Regex {
        Regex::new(self.file_pattern()).expect("language file pattern must be a valid regex")
    }
}
