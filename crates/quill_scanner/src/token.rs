//! Token information produced by the scanner.

use quill_ast::syntax_kind::SyntaxKind;
use quill_core::text::{Location, TextSpan};

/// Information about a scanned token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Where the token sits in the source text.
    pub span: TextSpan,
    /// The exact source text of the token. Empty for end-of-file.
    pub text: String,
}

impl TokenInfo {
    pub fn new(kind: SyntaxKind, span: TextSpan, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    /// The end-of-file token at `pos`.
    pub fn end_of_file(pos: u32) -> Self {
        Self::new(SyntaxKind::EndOfFileToken, TextSpan::empty(pos), String::new())
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    /// Start position of the token.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.span.start
    }

    /// End position of the token (exclusive).
    #[inline]
    pub fn end(&self) -> u32 {
        self.span.end()
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.span.location()
    }
}
