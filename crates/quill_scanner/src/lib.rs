//! quill_scanner: Tokenizer for quill source text.
//!
//! The scanner is pulled one token at a time by the parser. It keeps the
//! current token and the one before it; each token owns its text.

mod char_codes;
mod scanner;
mod token;

pub use scanner::{tokenize, Scanner};
pub use token::TokenInfo;
