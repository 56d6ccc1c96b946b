//! This module provides utilities for parsing source code using tree-sitter.
//!
//! A parsed file is represented by [`SourceFile`], which owns both the syntax
//! tree and the exact text it was parsed from. Node spans are only meaningful
//! against that text, so node content is only handed out through the
//! `SourceFile` that owns the node.

use std::fs;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

use crate::error::{Result, TraceError};
use crate::language::Language;

/// A parsed source file: the syntax tree together with its backing text
pub struct SourceFile<L: Language> {
    path: PathBuf,
    language: L,
    source: String,
    tree: Tree,
}

impl<L: Language> SourceFile<L> {
    /// Path the file was read from (or labelled with, for in-memory sources)
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> L {
        self.language
    }

    /// The full text the tree was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns the text covered by a node of this file's tree
    pub fn text<'a>(&'a self, node: Node<'_>) -> &'a str {
        // Spans of a tree parsed from a `String` always fall on char boundaries
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }
}

impl<L: Language> std::fmt::Debug for SourceFile<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("language", &self.language)
            .field("len", &self.source.len())
            .finish()
    }
}

/// Parses source code content using Tree Sitter for the specified language
///
/// # Arguments
/// * `path` - Label used for the file in errors and reports
/// * `source_code` - The source code to parse
/// * `language` - The programming language of the source code
///
/// # Returns
/// * `Result<SourceFile<L>>` - The parsed file, or `TraceError::Parse` when
///   the parser produced no tree. Trees containing error nodes are not failures.
pub fn parse_source<L: Language>(
    path: impl Into<PathBuf>,
    source_code: String,
    language: L,
) -> Result<SourceFile<L>> {
    let path = path.into();

    let mut parser = Parser::new();
    parser
        .set_language(&language.tree_sitter_language())
        .map_err(|e| {
            tracing::error!("Failed to set language for parser: {}", e);
            TraceError::Parse { path: path.clone() }
        })?;

    let tree = parser
        .parse(&source_code, None)
        .ok_or_else(|| TraceError::Parse { path: path.clone() })?;

    tracing::debug!(
        "Successfully parsed {} ({} nodes in tree)",
        path.display(),
        tree.root_node().descendant_count()
    );

    Ok(SourceFile {
        path,
        language,
        source: source_code,
        tree,
    })
}

/// Parses a file using Tree Sitter for the specified language
///
/// # Arguments
/// * `file_path` - Path to the file to parse
/// * `language` - The programming language of the file
///
/// # Returns
/// * `Result<SourceFile<L>>` - The parsed file, `TraceError::Io` if it could
///   not be read, or `TraceError::Parse` if no tree could be produced
pub fn parse_file<L: Language>(file_path: &Path, language: L) -> Result<SourceFile<L>> {
    let source_code = fs::read_to_string(file_path).map_err(|source| TraceError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    parse_source(file_path, source_code, language)
}
