//! Extraction of the calls made by a function declaration.

use std::collections::HashSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, QueryCursor};

use crate::language::Language;
use crate::parser::SourceFile;
use crate::query::{FunctionHandle, capture_index, compile_query};

/// Returns the distinct callee expressions called directly by `function`
///
/// Each entry is the callee's verbatim text (`fmt.Println`, `helper`,
/// `a.b.C`), in order of first occurrence. Calls inside a function literal
/// nested in the declaration belong to that literal and are left out.
pub fn extract_calls<L: Language>(
    file: &SourceFile<L>,
    function: &FunctionHandle<'_>,
) -> Vec<String> {
    let language = file.language();
    let query = compile_query(language, language.call_query());
    let call_index = capture_index(&query, "call");
    let callee_index = capture_index(&query, "callee");

    let declaration = function.node();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, declaration, file.source().as_bytes());

    let mut calls = Vec::new();
    let mut seen = HashSet::new();

    while let Some(match_) = matches.next() {
        let mut call_node = None;
        let mut callee_node = None;
        for capture in match_.captures {
            if capture.index == call_index {
                call_node = Some(capture.node);
            } else if capture.index == callee_index {
                callee_node = Some(capture.node);
            }
        }

        let (Some(call_node), Some(callee_node)) = (call_node, callee_node) else {
            continue;
        };

        let owner = enclosing_scope(call_node, language);
        if owner.map(|scope| scope.id()) != Some(declaration.id()) {
            continue;
        }

        let callee = file.text(callee_node);
        if seen.insert(callee) {
            calls.push(callee.to_string());
        }
    }

    tracing::debug!(
        "Found {} distinct call(s) in {}",
        calls.len(),
        function.name()
    );

    calls
}

/// Nearest ancestor of `node` that opens a function scope
fn enclosing_scope<'tree>(node: Node<'tree>, language: impl Language) -> Option<Node<'tree>> {
    let scope_kinds = language.scope_node_kinds();
    let mut ancestor = node.parent();
    while let Some(candidate) = ancestor {
        if scope_kinds.contains(&candidate.kind()) {
            return Some(candidate);
        }
        ancestor = candidate.parent();
    }
    None
}
