//! Errors outside the parse itself: reading files, configuration and
//! emitting syntax trees.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CompilerError {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(quill::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{}'", .path.display())]
    #[diagnostic(code(quill::config), help("quill.json holds `compilerOptions` and `files`"))]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("assignment chain of depth {depth} is too deep to emit as JSON (limit {limit})")]
    #[diagnostic(code(quill::emit), help("use `--emit-ast source` for long chains"))]
    TooDeep { depth: usize, limit: usize },

    #[error("failed to serialize the syntax tree")]
    #[diagnostic(code(quill::emit))]
    Emit(#[from] serde_json::Error),
}
