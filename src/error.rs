//! Error type shared by the tracing engine.

use std::path::PathBuf;

/// Errors produced while parsing, locating, or resolving functions.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The file could not be read (missing, permissions, not UTF-8).
    #[error("failed to read file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser produced no tree at all for the file.
    #[error("failed to parse file {}", path.display())]
    Parse { path: PathBuf },

    /// The function requested by the user is not declared in the target file.
    #[error("function '{function}' not found in {}", file.display())]
    FunctionNotFound { function: String, file: PathBuf },

    /// No candidate file of an imported package declares the called function.
    #[error("function {function} not found in {import_path}")]
    NotFound {
        function: String,
        import_path: String,
    },

    /// A package directory computed from an import path could not be listed.
    #[error("failed to read directory {}: {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The current module's name or root directory could not be determined.
    #[error("failed to get module name: {reason}")]
    ModuleIdentity { reason: String },
}

pub type Result<T, E = TraceError> = std::result::Result<T, E>;
