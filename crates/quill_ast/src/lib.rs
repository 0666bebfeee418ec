//! quill_ast: Syntax tree definitions for the quill language.
//!
//! Defines the token kinds produced by the scanner and the statement,
//! declaration and expression nodes produced by the parser.

pub mod node;
pub mod syntax_kind;

// Re-export key types
pub use node::*;
pub use syntax_kind::SyntaxKind;
