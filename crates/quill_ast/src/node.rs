//! Syntax tree node definitions.
//!
//! Every node carries the [`Location`] of its first token. Nodes own their
//! text; nothing borrows from the scanner.

use quill_core::text::Location;
use serde::Serialize;

// ============================================================================
// Names and literals
// ============================================================================

/// An identifier as written in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    pub location: Location,
    pub text: String,
}

impl Identifier {
    pub fn new(location: Location, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericLiteral {
    pub location: Location,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooleanLiteral {
    pub location: Location,
    pub value: bool,
}

// ============================================================================
// Expressions
// ============================================================================

/// `target = value`. Chains nest to the right: `a = b = c` is
/// `a = (b = c)`.
///
/// `Clone`, `PartialEq` and `Drop` walk the chain in a loop, so a chain of
/// any length can be copied, compared and freed without deep recursion.
#[derive(Debug, Serialize)]
pub struct AssignmentExpression {
    pub location: Location,
    pub target: Identifier,
    pub value: Box<Expression>,
}

impl AssignmentExpression {
    /// The links below this one, outermost first, and the non-assignment
    /// expression that ends the chain.
    fn links(&self) -> (Vec<&AssignmentExpression>, &Expression) {
        let mut links = Vec::new();
        let mut tail = self.value.as_ref();
        while let Expression::Assignment(next) = tail {
            links.push(next);
            tail = &next.value;
        }
        (links, tail)
    }
}

impl Clone for AssignmentExpression {
    fn clone(&self) -> Self {
        let (links, tail) = self.links();
        let mut value = tail.clone();
        for link in links.into_iter().rev() {
            value = Expression::Assignment(AssignmentExpression {
                location: link.location,
                target: link.target.clone(),
                value: Box::new(value),
            });
        }
        Self {
            location: self.location,
            target: self.target.clone(),
            value: Box::new(value),
        }
    }
}

impl PartialEq for AssignmentExpression {
    fn eq(&self, other: &Self) -> bool {
        let (mut left, mut right) = (self, other);
        loop {
            if left.location != right.location || left.target != right.target {
                return false;
            }
            match (left.value.as_ref(), right.value.as_ref()) {
                (Expression::Assignment(l), Expression::Assignment(r)) => {
                    left = l;
                    right = r;
                }
                (l, r) => return l == r,
            }
        }
    }
}

impl Drop for AssignmentExpression {
    fn drop(&mut self) {
        // Unlink one level at a time; each link is dropped with a leaf value.
        let mut pending = std::mem::replace(self.value.as_mut(), Expression::empty());
        while let Expression::Assignment(mut next) = pending {
            pending = std::mem::replace(next.value.as_mut(), Expression::empty());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    Identifier(Identifier),
    NumericLiteral(NumericLiteral),
    BooleanLiteral(BooleanLiteral),
    Assignment(AssignmentExpression),
}

impl Expression {
    /// Filler left behind when a chain is unlinked.
    fn empty() -> Self {
        Expression::BooleanLiteral(BooleanLiteral {
            location: Location::default(),
            value: false,
        })
    }

    pub fn location(&self) -> Location {
        match self {
            Expression::Identifier(n) => n.location,
            Expression::NumericLiteral(n) => n.location,
            Expression::BooleanLiteral(n) => n.location,
            Expression::Assignment(n) => n.location,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Number of assignments in a right-nested chain; `0` for an atom.
    pub fn assignment_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Expression::Assignment(assignment) = current {
            depth += 1;
            current = &assignment.value;
        }
        depth
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// `let name: type_annotation = initializer`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetDeclaration {
    pub location: Location,
    pub name: Identifier,
    pub type_annotation: Option<Identifier>,
    pub initializer: Expression,
}

/// `type name = aliased`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAliasDeclaration {
    pub location: Location,
    pub name: Identifier,
    pub aliased: Identifier,
}

/// A named entity. Values and type aliases share one name space, so both
/// kinds live in the same scope tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Declaration {
    Let(LetDeclaration),
    TypeAlias(TypeAliasDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &Identifier {
        match self {
            Declaration::Let(n) => &n.name,
            Declaration::TypeAlias(n) => &n.name,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Declaration::Let(n) => n.location,
            Declaration::TypeAlias(n) => n.location,
        }
    }

    pub fn is_type_alias(&self) -> bool {
        matches!(self, Declaration::TypeAlias(_))
    }
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub location: Location,
    pub expression: Expression,
}

/// Adjacently tagged so the tag never collides with the `kind` of a
/// nested declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "node")]
pub enum Statement {
    Expression(ExpressionStatement),
    Declaration(Declaration),
}

impl Statement {
    pub fn location(&self) -> Location {
        match self {
            Statement::Expression(n) => n.location,
            Statement::Declaration(n) => n.location(),
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Statement::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Statement::Expression(stmt) => Some(&stmt.expression),
            _ => None,
        }
    }
}

/// The statements of one source text, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Module {
    pub statements: Vec<Statement>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The declarations of this module, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.statements.iter().filter_map(Statement::as_declaration)
    }

    /// Find the top-level declaration of `name`.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations().find(|decl| decl.name().text == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(pos: u32, text: &str) -> Identifier {
        Identifier::new(Location::new(pos), text)
    }

    #[test]
    fn test_assignment_depth() {
        let chain = Expression::Assignment(AssignmentExpression {
            location: Location::new(0),
            target: ident(0, "a"),
            value: Box::new(Expression::Assignment(AssignmentExpression {
                location: Location::new(4),
                target: ident(4, "b"),
                value: Box::new(Expression::NumericLiteral(NumericLiteral {
                    location: Location::new(8),
                    value: 3.0,
                })),
            })),
        });
        assert_eq!(chain.assignment_depth(), 2);
        assert_eq!(chain.location(), Location::new(0));
        assert!(chain.as_identifier().is_none());
    }

    fn chain(depth: usize, leaf: &str) -> Expression {
        let mut value = Expression::Identifier(ident(0, leaf));
        for _ in 0..depth {
            value = Expression::Assignment(AssignmentExpression {
                location: Location::new(0),
                target: ident(0, "a"),
                value: Box::new(value),
            });
        }
        value
    }

    #[test]
    fn test_deep_chain_clone_compare_and_drop() {
        let original = chain(200_000, "z");
        let copy = original.clone();
        assert_eq!(copy.assignment_depth(), 200_000);
        assert!(copy == original);
        assert!(copy != chain(199_999, "z"));
        drop(copy);
        drop(original);
    }

    #[test]
    fn test_chains_differ_at_the_leaf() {
        assert_ne!(chain(3, "z"), chain(3, "y"));
        assert_eq!(chain(3, "z"), chain(3, "z").clone());
    }

    #[test]
    fn test_module_declaration_lookup() {
        let mut module = Module::new();
        module.push(Statement::Declaration(Declaration::TypeAlias(TypeAliasDeclaration {
            location: Location::new(0),
            name: ident(5, "t"),
            aliased: ident(9, "number"),
        })));
        module.push(Statement::Expression(ExpressionStatement {
            location: Location::new(17),
            expression: Expression::Identifier(ident(17, "t")),
        }));
        assert_eq!(module.len(), 2);
        assert_eq!(module.declarations().count(), 1);
        assert!(module.declaration("t").is_some_and(Declaration::is_type_alias));
        assert!(module.declaration("number").is_none());
        assert_eq!(module.statements[1].location(), Location::new(17));
    }
}
