//! The quill parser implementation.
//!
//! A recursive descent parser over the token stream. Name resolution is
//! woven into parsing: every referenced name must already be declared in the
//! active scope chain, and every declaration is installed as soon as its
//! right-hand side has been parsed.

use quill_ast::node::*;
use quill_ast::syntax_kind::SyntaxKind;
use quill_binder::{ScopeId, ScopeTree};
use quill_core::text::{Location, TextPos, TextSpan};
use quill_diagnostics::DiagnosticCollection;
use quill_scanner::Scanner;

use crate::error::{Expected, ParseError};

type ParseOutcome<T> = Result<T, ParseError>;

/// Everything one parse session produces.
#[derive(Debug)]
pub struct ParseResult {
    /// The statements that parsed successfully, in source order.
    pub module: Module,
    /// One diagnostic per failed statement.
    pub diagnostics: DiagnosticCollection,
    /// The structured errors behind `diagnostics`, in the same order.
    pub errors: Vec<ParseError>,
    /// The scope chain after parsing, holding every installed declaration.
    pub scopes: ScopeTree,
    /// The scope declarations were installed into.
    pub scope: ScopeId,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Look `name` up from the active scope.
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.scopes.lookup(self.scope, name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.is_declared(self.scope, name)
    }
}

/// Parse `source_text` in a fresh session with an empty root scope.
pub fn parse(source_text: &str) -> ParseResult {
    Parser::new(source_text).parse_module()
}

/// The parser produces a [`Module`] from quill source text.
pub struct Parser {
    scanner: Scanner,
    file_name: Option<String>,
    scopes: ScopeTree,
    /// The scope declarations go into and lookups start from.
    scope: ScopeId,
    diagnostics: DiagnosticCollection,
    errors: Vec<ParseError>,
    /// Set once the current statement attempt has reported its error.
    has_reported: bool,
}

impl Parser {
    pub fn new(source_text: &str) -> Self {
        Self::with_scopes(source_text, ScopeTree::new(), ScopeId::ROOT)
    }

    /// Parse against a pre-built scope chain, declaring into `scope`.
    /// Names bound in any ancestor of `scope` are visible and cannot be
    /// redeclared.
    pub fn with_scopes(source_text: &str, scopes: ScopeTree, scope: ScopeId) -> Self {
        Self {
            scanner: Scanner::new(source_text),
            file_name: None,
            scopes,
            scope,
            diagnostics: DiagnosticCollection::new(),
            errors: Vec::new(),
            has_reported: false,
        }
    }

    /// Attach a file name to every reported diagnostic.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn parse_module(mut self) -> ParseResult {
        self.next_token();

        let mut module = Module::new();
        while self.current_token() != SyntaxKind::EndOfFileToken {
            let statement_pos = self.token_pos();
            match self.parse_statement() {
                Ok(statement) => module.push(statement),
                Err(_) => {
                    self.synchronize(statement_pos);
                    self.has_reported = false;
                }
            }
        }

        ParseResult {
            module,
            diagnostics: self.diagnostics,
            errors: self.errors,
            scopes: self.scopes,
            scope: self.scope,
        }
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.kind()
    }

    #[inline]
    fn next_token(&mut self) -> SyntaxKind {
        self.scanner.advance()
    }

    #[inline]
    fn token_pos(&self) -> TextPos {
        self.scanner.token().pos()
    }

    #[inline]
    fn token_location(&self) -> Location {
        self.scanner.token().location()
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> ParseOutcome<()> {
        if self.current_token() == kind {
            self.next_token();
            return Ok(());
        }
        Err(self.unexpected(Expected::Token(kind)))
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Error reporting and recovery
    // ========================================================================

    /// Record `error` unless this statement attempt already reported one,
    /// then hand it back for propagation.
    fn report(&mut self, error: ParseError) -> ParseError {
        if !self.has_reported {
            self.has_reported = true;
            let mut diagnostic = error.to_diagnostic();
            if let Some(file_name) = &self.file_name {
                diagnostic = diagnostic.in_file(file_name.clone());
            }
            self.diagnostics.add(diagnostic);
            self.errors.push(error.clone());
        }
        error
    }

    fn unexpected(&mut self, expected: Expected) -> ParseError {
        let token = self.scanner.token();
        let error = ParseError::UnexpectedToken {
            span: token.span,
            expected,
            found: token.kind,
            text: token.text.clone(),
        };
        self.report(error)
    }

    /// Skip to a statement boundary after a failed statement that began at
    /// `statement_pos`.
    ///
    /// Stops after a `;`, before a keyword or at end-of-file. A statement
    /// that failed on its first token gets that token discarded first, so
    /// the driver always moves forward.
    fn synchronize(&mut self, statement_pos: TextPos) {
        if self.token_pos() == statement_pos {
            self.next_token();
        }

        while self.current_token() != SyntaxKind::EndOfFileToken {
            if self
                .scanner
                .prev_token()
                .is_some_and(|token| token.is(SyntaxKind::SemicolonToken))
            {
                return;
            }
            if self.current_token().is_keyword() {
                return;
            }
            self.next_token();
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn parse_statement(&mut self) -> ParseOutcome<Statement> {
        let location = self.token_location();
        let statement = match self.current_token() {
            SyntaxKind::LetKeyword => Statement::Declaration(self.parse_let_declaration(location)?),
            SyntaxKind::TypeKeyword => {
                Statement::Declaration(self.parse_type_alias_declaration(location)?)
            }
            _ => Statement::Expression(ExpressionStatement {
                location,
                expression: self.parse_expression()?,
            }),
        };
        self.expect_token(SyntaxKind::SemicolonToken)?;
        Ok(statement)
    }

    /// `let name (: type)? = expression`
    fn parse_let_declaration(&mut self, location: Location) -> ParseOutcome<Declaration> {
        self.next_token();
        let name = self.parse_identifier()?;
        self.check_not_declared(&name)?;

        let type_annotation = if self.optional_token(SyntaxKind::ColonToken) {
            let type_name = self.parse_identifier()?;
            self.check_declared(&type_name, true)?;
            Some(type_name)
        } else {
            None
        };

        self.expect_token(SyntaxKind::EqualsToken)?;
        let initializer = self.parse_expression()?;

        let declaration = Declaration::Let(LetDeclaration {
            location,
            name,
            type_annotation,
            initializer,
        });
        self.declare(&declaration);
        Ok(declaration)
    }

    /// `type name = aliased`. The aliased name is not resolved.
    fn parse_type_alias_declaration(&mut self, location: Location) -> ParseOutcome<Declaration> {
        self.next_token();
        let name = self.parse_identifier()?;
        self.check_not_declared(&name)?;

        self.expect_token(SyntaxKind::EqualsToken)?;
        let aliased = self.parse_identifier()?;

        let declaration = Declaration::TypeAlias(TypeAliasDeclaration {
            location,
            name,
            aliased,
        });
        self.declare(&declaration);
        Ok(declaration)
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// `atom ('=' expression)?`, where only a declared identifier may be
    /// assigned to. Chains fold to the right.
    fn parse_expression(&mut self) -> ParseOutcome<Expression> {
        let mut targets = Vec::new();
        let value = loop {
            let atom = self.parse_atom()?;
            let Expression::Identifier(identifier) = atom else {
                break atom;
            };
            self.check_declared(&identifier, false)?;
            if !self.optional_token(SyntaxKind::EqualsToken) {
                break Expression::Identifier(identifier);
            }
            targets.push(identifier);
        };

        Ok(targets.into_iter().rev().fold(value, |value, target| {
            Expression::Assignment(AssignmentExpression {
                location: target.location,
                target,
                value: Box::new(value),
            })
        }))
    }

    fn parse_atom(&mut self) -> ParseOutcome<Expression> {
        let token = self.scanner.token().clone();
        let location = token.location();
        match token.kind {
            SyntaxKind::Identifier => {
                self.next_token();
                Ok(Expression::Identifier(Identifier::new(location, token.text)))
            }
            SyntaxKind::NumericLiteral => {
                self.next_token();
                match token.text.parse::<f64>() {
                    Ok(value) if value.is_finite() => {
                        Ok(Expression::NumericLiteral(NumericLiteral { location, value }))
                    }
                    _ => Err(self.report(ParseError::InvalidNumericLiteral {
                        span: token.span,
                        text: token.text,
                    })),
                }
            }
            SyntaxKind::BooleanLiteral => {
                self.next_token();
                Ok(Expression::BooleanLiteral(BooleanLiteral {
                    location,
                    value: token.text == "true",
                }))
            }
            _ => Err(self.unexpected(Expected::IdentifierOrLiteral)),
        }
    }

    /// A name position. Parsed like an atom, so a literal here is reported
    /// as the wrong kind of atom.
    fn parse_identifier(&mut self) -> ParseOutcome<Identifier> {
        let token = self.scanner.token().clone();
        match self.parse_atom()? {
            Expression::Identifier(identifier) => Ok(identifier),
            _ => Err(self.report(ParseError::UnexpectedToken {
                span: token.span,
                expected: Expected::Identifier,
                found: token.kind,
                text: token.text,
            })),
        }
    }

    // ========================================================================
    // Name resolution
    // ========================================================================

    fn check_declared(&mut self, identifier: &Identifier, is_type: bool) -> ParseOutcome<()> {
        if self.scopes.is_declared(self.scope, &identifier.text) {
            return Ok(());
        }
        Err(self.report(ParseError::UndeclaredReference {
            span: identifier_span(identifier),
            name: identifier.text.clone(),
            is_type,
        }))
    }

    fn check_not_declared(&mut self, name: &Identifier) -> ParseOutcome<()> {
        if !self.scopes.is_declared(self.scope, &name.text) {
            return Ok(());
        }
        Err(self.report(ParseError::CannotRedeclare {
            span: identifier_span(name),
            name: name.text.clone(),
        }))
    }

    fn declare(&mut self, declaration: &Declaration) {
        let name = declaration.name().text.clone();
        self.scopes.declare(self.scope, name, declaration.clone());
    }
}

fn identifier_span(identifier: &Identifier) -> TextSpan {
    TextSpan::new(identifier.location.pos, identifier.text.len() as TextPos)
}
