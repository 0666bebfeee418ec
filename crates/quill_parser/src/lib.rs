//! quill_parser: Recursive descent parser for quill.
//!
//! Pulls tokens from the scanner, builds the syntax tree and resolves names
//! against the scope chain as it goes. Errors are recovered at statement
//! granularity.

mod error;
mod parser;

pub use error::{Expected, ParseError, ParseErrorKind};
pub use parser::{parse, ParseResult, Parser};
