//! quill_core: Core utilities for the quill language front end.
//!
//! Provides source positions, spans and line mapping shared by the scanner,
//! parser and diagnostics crates.

pub mod text;

// Re-export commonly used types
pub use text::{LineAndColumn, LineMap, Location, TextPos, TextSpan};
