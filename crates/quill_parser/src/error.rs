//! Parse errors and their lowering into diagnostics.

use quill_ast::syntax_kind::SyntaxKind;
use quill_core::text::TextSpan;
use quill_diagnostics::{messages, Diagnostic};
use std::fmt;
use thiserror::Error;

/// What the parser wanted when it hit an unexpected token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// One specific token, e.g. `;`.
    Token(SyntaxKind),
    /// Any atom: identifier, number or boolean.
    IdentifierOrLiteral,
    /// A name. Reported when a literal shows up where a name is required.
    Identifier,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{}", kind),
            Expected::IdentifierOrLiteral => write!(f, "an identifier or a literal"),
            Expected::Identifier => write!(f, "an identifier"),
        }
    }
}

/// Fieldless classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    UnexpectedToken,
    InvalidNumericLiteral,
    CannotRedeclare,
    UndeclaredReference,
}

/// A failed parse step. Each one aborts the statement being parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected} but found {}", describe_token(.found, .text))]
    UnexpectedToken {
        span: TextSpan,
        expected: Expected,
        found: SyntaxKind,
        text: String,
    },

    #[error("numeric literal '{text}' does not fit in a 64-bit float")]
    InvalidNumericLiteral { span: TextSpan, text: String },

    #[error("cannot redeclare symbol '{name}'")]
    CannotRedeclare { span: TextSpan, name: String },

    /// `is_type` is set for the name after `:` in a `let`.
    #[error("cannot reference {}'{name}' before declaration", type_prefix(.is_type))]
    UndeclaredReference {
        span: TextSpan,
        name: String,
        is_type: bool,
    },
}

fn describe_token(kind: &SyntaxKind, text: &str) -> String {
    match kind {
        SyntaxKind::Identifier | SyntaxKind::NumericLiteral | SyntaxKind::BooleanLiteral => {
            format!("{} '{}'", kind, text)
        }
        SyntaxKind::Unknown => format!("'{}'", text),
        _ => kind.to_string(),
    }
}

fn type_prefix(is_type: &bool) -> &'static str {
    if *is_type {
        "type "
    } else {
        ""
    }
}

impl ParseError {
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            ParseError::UnexpectedToken { .. } => ParseErrorKind::UnexpectedToken,
            ParseError::InvalidNumericLiteral { .. } => ParseErrorKind::InvalidNumericLiteral,
            ParseError::CannotRedeclare { .. } => ParseErrorKind::CannotRedeclare,
            ParseError::UndeclaredReference { .. } => ParseErrorKind::UndeclaredReference,
        }
    }

    /// Where in the source the error points.
    pub fn span(&self) -> TextSpan {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::InvalidNumericLiteral { span, .. }
            | ParseError::CannotRedeclare { span, .. }
            | ParseError::UndeclaredReference { span, .. } => *span,
        }
    }

    /// Lower into a catalogued diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        match self {
            ParseError::UnexpectedToken {
                expected: Expected::Token(kind),
                found,
                text,
                ..
            } => Diagnostic::at(
                span,
                &messages::_0_EXPECTED_BUT_FOUND_1,
                &[kind.to_string().as_str(), describe_token(found, text).as_str()],
            ),
            ParseError::UnexpectedToken {
                expected: Expected::IdentifierOrLiteral,
                found,
                text,
                ..
            } => Diagnostic::at(
                span,
                &messages::IDENTIFIER_OR_LITERAL_EXPECTED_BUT_FOUND_0,
                &[describe_token(found, text).as_str()],
            ),
            ParseError::UnexpectedToken {
                expected: Expected::Identifier,
                text,
                ..
            } => Diagnostic::at(span, &messages::IDENTIFIER_EXPECTED_BUT_FOUND_LITERAL_0, &[text.as_str()]),
            ParseError::InvalidNumericLiteral { text, .. } => {
                Diagnostic::at(span, &messages::NUMERIC_LITERAL_0_IS_OUT_OF_RANGE, &[text.as_str()])
            }
            ParseError::CannotRedeclare { name, .. } => {
                Diagnostic::at(span, &messages::CANNOT_REDECLARE_SYMBOL_0, &[name.as_str()])
            }
            ParseError::UndeclaredReference { name, is_type, .. } => {
                let message = if *is_type {
                    &messages::CANNOT_REFERENCE_TYPE_0_BEFORE_DECLARATION
                } else {
                    &messages::CANNOT_REFERENCE_0_BEFORE_DECLARATION
                };
                Diagnostic::at(span, message, &[name.as_str()])
            }
        }
    }
}
