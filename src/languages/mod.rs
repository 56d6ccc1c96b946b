//! Programming language implementations.

mod go;

pub use go::GoLang;
