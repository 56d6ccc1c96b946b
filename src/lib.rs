//! Static call tracing for Go modules.
//!
//! Given a Go file and a function name, ctrace finds the function's
//! declaration, lists the calls it makes, and resolves package-qualified
//! calls (`alias.Function`) to the file and line inside the current module
//! where `Function` is declared. Nothing is executed or type-checked; all
//! answers come from tree-sitter queries over the source text.

pub mod calls;
pub mod cli;
pub mod config;
pub mod error;
pub mod file_search;
pub mod imports;
pub mod language;
pub mod languages;
pub mod module;
pub mod output;
pub mod parser;
pub mod query;
pub mod resolver;
pub mod trace;

pub use calls::extract_calls;
pub use error::TraceError;
pub use imports::{ImportMap, parse_imports};
pub use language::Language;
pub use languages::GoLang;
pub use module::{GoModDiscovery, GoModule, ModuleProvider};
pub use parser::{SourceFile, parse_file, parse_source};
pub use query::{FunctionHandle, find_function};
pub use resolver::{Location, Resolver};
pub use trace::{CallTarget, TraceReport, TracedCall, trace_function};
