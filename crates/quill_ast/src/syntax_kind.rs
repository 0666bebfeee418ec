//! SyntaxKind enum - every token kind the scanner can produce.

use std::fmt;

/// The kind of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // Keywords
    FunctionKeyword = 0,
    LetKeyword = 1,
    TypeKeyword = 2,
    ReturnKeyword = 3,

    // Punctuation
    EqualsToken = 4,
    SemicolonToken = 5,
    ColonToken = 6,

    // Literals and names
    NumericLiteral = 7,
    /// Both `true` and `false`; the value is recovered from the token text.
    BooleanLiteral = 8,
    Identifier = 9,

    EndOfFileToken = 10,
    Unknown = 11,
}

impl SyntaxKind {
    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::TypeKeyword
                | SyntaxKind::ReturnKeyword
        )
    }

    /// Get the text of a keyword kind.
    pub fn keyword_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::FunctionKeyword => Some("function"),
            SyntaxKind::LetKeyword => Some("let"),
            SyntaxKind::TypeKeyword => Some("type"),
            SyntaxKind::ReturnKeyword => Some("return"),
            _ => None,
        }
    }

    /// Classify a word. Matching is exact and case-sensitive.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        match text {
            "function" => Some(SyntaxKind::FunctionKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "type" => Some(SyntaxKind::TypeKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            "true" | "false" => Some(SyntaxKind::BooleanLiteral),
            _ => None,
        }
    }

    /// Get the text of a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::EqualsToken => Some("="),
            SyntaxKind::SemicolonToken => Some(";"),
            SyntaxKind::ColonToken => Some(":"),
            _ => None,
        }
    }
}

impl fmt::Display for SyntaxKind {
    /// Human-readable description used in diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.keyword_text().or_else(|| self.punctuation_text()) {
            return write!(f, "'{}'", text);
        }
        match self {
            SyntaxKind::NumericLiteral => write!(f, "number"),
            SyntaxKind::BooleanLiteral => write!(f, "boolean"),
            SyntaxKind::Identifier => write!(f, "identifier"),
            SyntaxKind::EndOfFileToken => write!(f, "end of file"),
            _ => write!(f, "unknown token"),
        }
    }
}
