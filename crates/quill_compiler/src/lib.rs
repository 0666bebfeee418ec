//! quill_compiler: Program orchestration.
//!
//! Holds the configuration and the set of source files, parses every file in
//! its own session and merges the results.

mod emit;
mod error;
mod options;
mod program;

pub use emit::{emit_module, MAX_JSON_DEPTH};
pub use error::CompilerError;
pub use options::{parse_config, parse_config_file, CompilerOptions, EmitAst, QuillConfig};
pub use program::{ParsedFile, Program, ProgramResult, SourceFile};
