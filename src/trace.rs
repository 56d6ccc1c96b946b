//! The tracing workflow: parse a file, find a function, resolve its calls.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::calls::extract_calls;
use crate::error::{Result, TraceError};
use crate::imports::{ImportMap, parse_imports};
use crate::language::Language;
use crate::parser::parse_file;
use crate::query::find_function;
use crate::resolver::{Location, Resolver};

/// Outcome of tracing one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub file: PathBuf,
    pub function: String,
    /// Zero-based row where the declaration starts
    pub start_line: usize,
    /// Zero-based row where the declaration ends
    pub end_line: usize,
    pub imports: ImportMap,
    pub calls: Vec<TracedCall>,
}

/// A call made by the traced function
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TracedCall {
    /// Callee text as written, e.g. `cli.Execute`
    pub call: String,
    pub target: CallTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallTarget {
    /// Declared in a package of the current module
    Resolved(Location),
    /// An imported package was named but the declaration was not found
    Unresolved { reason: String },
    /// Not of the form `alias.Name` with `alias` an import; not looked up
    Skipped,
}

impl CallTarget {
    pub fn location(&self) -> Option<&Location> {
        match self {
            CallTarget::Resolved(location) => Some(location),
            _ => None,
        }
    }
}

/// Splits `alias.Name` into its two parts
///
/// Longer selector chains (`a.b.C`) are method or field accesses and are
/// not treated as package-qualified calls.
pub fn qualified_call(call: &str) -> Option<(&str, &str)> {
    let (alias, name) = call.split_once('.')?;
    if alias.is_empty() || name.is_empty() || name.contains('.') {
        return None;
    }
    Some((alias, name))
}

/// Traces `function` in `file_path` and resolves its package-qualified calls
///
/// Failures on the traced file itself (unreadable, unparsable, function not
/// declared) are returned. Failures while resolving an individual call only
/// mark that call as unresolved.
pub fn trace_function<L: Language>(
    file_path: &Path,
    function: &str,
    resolver: &Resolver<L>,
) -> Result<TraceReport> {
    tracing::info!("Parsing file: {}...", file_path.display());
    let file = parse_file(file_path, resolver.language())?;

    let imports = parse_imports(&file);

    tracing::info!("Searching for function: {}...", function);
    let handle = find_function(&file, function).ok_or_else(|| TraceError::FunctionNotFound {
        function: function.to_string(),
        file: file_path.to_path_buf(),
    })?;

    tracing::info!("Extracting calls...");
    let calls = extract_calls(&file, &handle)
        .into_iter()
        .map(|call| {
            let target = resolve_call(&call, &imports, resolver);
            TracedCall { call, target }
        })
        .collect();

    Ok(TraceReport {
        file: file_path.to_path_buf(),
        function: function.to_string(),
        start_line: handle.start_line(),
        end_line: handle.end_line(),
        imports,
        calls,
    })
}

fn resolve_call<L: Language>(
    call: &str,
    imports: &ImportMap,
    resolver: &Resolver<L>,
) -> CallTarget {
    let Some((alias, name)) = qualified_call(call) else {
        return CallTarget::Skipped;
    };
    let Some(import_path) = imports.get(alias) else {
        return CallTarget::Skipped;
    };

    match resolver.resolve(import_path, name) {
        Ok(Some(location)) => CallTarget::Resolved(location),
        Ok(None) => CallTarget::Unresolved {
            reason: format!("external package {}", import_path),
        },
        Err(e) => {
            tracing::warn!("Could not resolve {}: {}", call, e);
            CallTarget::Unresolved {
                reason: e.to_string(),
            }
        }
    }
}
