//! The quill scanner.
//!
//! Converts source text into tokens on demand. Positions are byte offsets.

use crate::char_codes::*;
use crate::token::TokenInfo;
use quill_ast::syntax_kind::SyntaxKind;
use quill_core::text::{TextPos, TextSpan};

/// The scanner converts quill source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: String,
    /// Current byte position in the text (end of the current token).
    pos: usize,
    /// The current token.
    token: TokenInfo,
    /// The token that was current before the last `advance`.
    prev_token: Option<TokenInfo>,
    /// Whether `advance` has been called at least once.
    started: bool,
}

impl Scanner {
    /// Create a new scanner for the given source text. No token is scanned
    /// until the first call to [`Scanner::advance`].
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            pos: 0,
            token: TokenInfo::new(SyntaxKind::Unknown, TextSpan::empty(0), String::new()),
            prev_token: None,
            started: false,
        }
    }

    /// Get the full source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the current token kind.
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.token.kind
    }

    #[inline]
    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    /// The token that was current before the last advance.
    #[inline]
    pub fn prev_token(&self) -> Option<&TokenInfo> {
        self.prev_token.as_ref()
    }

    /// Get the current byte position (end of the current token).
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether the current token is end-of-file.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.started && self.token.kind == SyntaxKind::EndOfFileToken
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_white_space(&mut self) {
        while let Some(ch) = self.current_byte() {
            if !is_white_space(ch) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Move the current token into the previous slot and scan the next one.
    ///
    /// Once end-of-file has been produced, further calls leave both slots
    /// untouched and keep returning end-of-file.
    pub fn advance(&mut self) -> SyntaxKind {
        if self.is_at_end() {
            return self.token.kind;
        }

        let next = self.scan_token();
        let previous = std::mem::replace(&mut self.token, next);
        if self.started {
            self.prev_token = Some(previous);
        }
        self.started = true;
        self.token.kind
    }

    fn scan_token(&mut self) -> TokenInfo {
        self.skip_white_space();
        let start = self.pos;

        let Some(ch) = self.current_byte() else {
            return TokenInfo::end_of_file(start as TextPos);
        };

        let kind = match ch {
            _ if is_digit(ch) => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(start),
            b'=' => { self.pos += 1; SyntaxKind::EqualsToken }
            b';' => { self.pos += 1; SyntaxKind::SemicolonToken }
            b':' => { self.pos += 1; SyntaxKind::ColonToken }
            _ => self.scan_unknown(),
        };

        self.make_token(kind, start)
    }

    fn make_token(&self, kind: SyntaxKind, start: usize) -> TokenInfo {
        TokenInfo::new(
            kind,
            TextSpan::from_bounds(start as TextPos, self.pos as TextPos),
            &self.text[start..self.pos],
        )
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_number(&mut self) -> SyntaxKind {
        while !self.is_eof() && is_digit(self.text.as_bytes()[self.pos]) {
            self.pos += 1;
        }
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self, start: usize) -> SyntaxKind {
        self.pos += 1;
        while !self.is_eof() && is_identifier_part(self.text.as_bytes()[self.pos]) {
            self.pos += 1;
        }
        SyntaxKind::from_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    /// Consume one whole character, so non-ASCII input never splits a
    /// UTF-8 sequence.
    fn scan_unknown(&mut self) -> SyntaxKind {
        let width = self.text[self.pos..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
        SyntaxKind::Unknown
    }
}

/// Scan a whole source text, returning every token before end-of-file.
pub fn tokenize(text: &str) -> Vec<TokenInfo> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    while scanner.advance() != SyntaxKind::EndOfFileToken {
        tokens.push(scanner.token().clone());
    }
    tokens
}
