//! Extraction of import declarations.

use std::collections::BTreeMap;

use streaming_iterator::StreamingIterator;
use tree_sitter::QueryCursor;

use crate::language::Language;
use crate::parser::SourceFile;
use crate::query::{capture_index, compile_query};

/// Maps a package alias (or derived package name) to its full import path
///
/// Sorted by alias so anything printed from it is stable between runs.
pub type ImportMap = BTreeMap<String, String>;

/// Extracts import declarations from a parsed file
///
/// An import without an explicit alias is keyed by the last segment of its
/// path (`"a/b/c"` becomes `c`). This is purely textual: no module manifest
/// is consulted, so packages whose name differs from their directory get the
/// directory name. Imports with an empty path are dropped.
pub fn parse_imports<L: Language>(file: &SourceFile<L>) -> ImportMap {
    let language = file.language();
    let query = compile_query(language, language.import_query());
    let alias_index = capture_index(&query, "alias");
    let path_index = capture_index(&query, "path");

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, file.root_node(), file.source().as_bytes());

    let mut imports = ImportMap::new();
    while let Some(match_) = matches.next() {
        let mut alias = "";
        let mut import_path = "";

        for capture in match_.captures {
            let content = file.text(capture.node);
            if capture.index == alias_index {
                alias = content;
            } else if capture.index == path_index {
                import_path = content.trim_matches(|c: char| c == '"' || c == '`');
            }
        }

        if import_path.is_empty() {
            continue;
        }

        let alias = if alias.is_empty() {
            derive_alias(import_path)
        } else {
            alias
        };

        if !alias.is_empty() {
            imports.insert(alias.to_string(), import_path.to_string());
        }
    }

    tracing::debug!(
        "Found {} import(s) in {}",
        imports.len(),
        file.path().display()
    );

    imports
}

/// Final segment of an import path
fn derive_alias(import_path: &str) -> &str {
    import_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoLang;
    use crate::parser::parse_source;

    fn imports_of(source: &str) -> anyhow::Result<ImportMap> {
        let file = parse_source("main.go", source.to_string(), GoLang)?;
        Ok(parse_imports(&file))
    }

    #[test]
    fn test_grouped_imports() -> anyhow::Result<()> {
        let imports = imports_of(
            r#"package main

import (
    "fmt"
    "root/internal/cli"
    x "a/b/c"
)
"#,
        )?;

        assert_eq!(imports.len(), 3);
        assert_eq!(imports["fmt"], "fmt");
        assert_eq!(imports["cli"], "root/internal/cli");
        assert_eq!(imports["x"], "a/b/c");
        assert!(!imports.contains_key("c"));

        Ok(())
    }

    #[test]
    fn test_single_import_derives_alias() -> anyhow::Result<()> {
        let imports = imports_of("package main\n\nimport \"a/b/c\"\n")?;

        assert_eq!(imports.len(), 1);
        assert_eq!(imports["c"], "a/b/c");

        Ok(())
    }

    #[test]
    fn test_raw_string_and_special_names() -> anyhow::Result<()> {
        let imports = imports_of(
            "package main

import (
    _ \"embed\"
    . \"strings\"
    `net/http`
)
",
        )?;

        assert_eq!(imports["_"], "embed");
        assert_eq!(imports["."], "strings");
        assert_eq!(imports["http"], "net/http");

        Ok(())
    }

    #[test]
    fn test_no_imports() -> anyhow::Result<()> {
        let imports = imports_of("package main\n\nfunc main() {}\n")?;
        assert!(imports.is_empty());

        Ok(())
    }

    #[test]
    fn test_empty_path_is_dropped() -> anyhow::Result<()> {
        let imports = imports_of("package main\n\nimport (\n    \"\"\n    e \"\"\n)\n")?;
        assert!(imports.is_empty());

        Ok(())
    }

    #[test]
    fn test_derive_alias() {
        assert_eq!(derive_alias("a/b/c"), "c");
        assert_eq!(derive_alias("fmt"), "fmt");
        assert_eq!(derive_alias("gopkg.in/yaml.v3"), "yaml.v3");
        assert_eq!(derive_alias("a/b/"), "b");
    }
}
