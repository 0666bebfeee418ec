//! Parser integration tests.
//!
//! Verifies the syntax tree, name resolution and statement-level recovery.

use quill_ast::node::*;
use quill_parser::{parse, ParseErrorKind, ParseResult, Parser};

/// Helper: the error kinds reported while parsing `source`.
fn error_kinds(source: &str) -> Vec<ParseErrorKind> {
    parse(source).errors.iter().map(|e| e.kind()).collect()
}

/// Helper: assert that `source` parses cleanly into `expected` statements.
fn assert_parses(source: &str, expected: usize) -> ParseResult {
    let result = parse(source);
    assert!(
        !result.has_errors(),
        "source: {}\nerrors: {:?}",
        source,
        result.errors
    );
    assert_eq!(result.module.len(), expected, "source: {}", source);
    result
}

// ============================================================================
// Empty input
// ============================================================================

#[test]
fn test_empty_source() {
    assert_parses("", 0);
}

#[test]
fn test_whitespace_only_source() {
    let result = assert_parses(" \t\n\r\n  ", 0);
    assert!(result.diagnostics.is_empty());
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_let_declaration() {
    let result = assert_parses("let a = 1;", 1);
    let Some(Declaration::Let(decl)) = result.module.statements[0].as_declaration() else {
        panic!("expected a let declaration");
    };
    assert_eq!(decl.name.text, "a");
    assert_eq!(decl.location.pos, 0);
    assert_eq!(decl.name.location.pos, 4);
    assert!(decl.type_annotation.is_none());
    assert!(matches!(decl.initializer, Expression::NumericLiteral(NumericLiteral { value, .. }) if value == 1.0));
    assert!(result.is_declared("a"));
}

#[test]
fn test_boolean_initializers() {
    let result = assert_parses("let t = true; let f = false;", 2);
    let values: Vec<_> = result
        .module
        .declarations()
        .map(|decl| match decl {
            Declaration::Let(LetDeclaration {
                initializer: Expression::BooleanLiteral(lit),
                ..
            }) => lit.value,
            other => panic!("unexpected declaration {:?}", other),
        })
        .collect();
    assert_eq!(values, vec![true, false]);
}

#[test]
fn test_type_alias_does_not_resolve_aliased_name() {
    let result = assert_parses("type t = number;", 1);
    assert!(result.lookup("t").is_some_and(Declaration::is_type_alias));
    assert!(!result.is_declared("number"));
}

#[test]
fn test_type_annotation_requires_declared_type() {
    assert_eq!(
        error_kinds("let x: t = 1;"),
        vec![ParseErrorKind::UndeclaredReference]
    );
    let result = parse("let x: t = 1;");
    assert_eq!(result.diagnostics.diagnostics()[0].code, 2003);
    assert!(!result.is_declared("x"));

    let result = assert_parses("type t = number;\nlet x: t = 1;", 2);
    let Some(Declaration::Let(decl)) = result.module.declaration("x") else {
        panic!("expected x to be a let declaration");
    };
    assert_eq!(decl.type_annotation.as_ref().map(|t| t.text.as_str()), Some("t"));
}

#[test]
fn test_sample_program() {
    let source = "let a = 1;\nlet c = 2;\ntype t = number;\nlet b: t = c = false;\n";
    let result = assert_parses(source, 4);
    for name in ["a", "b", "c", "t"] {
        assert!(result.is_declared(name), "{} should be declared", name);
    }
}

#[test]
fn test_declaration_not_visible_in_own_initializer() {
    assert_eq!(
        error_kinds("let a = a;"),
        vec![ParseErrorKind::UndeclaredReference]
    );
    assert!(!parse("let a = a;").is_declared("a"));
}

#[test]
fn test_literal_as_declaration_name() {
    let result = parse("let 5 = 1;");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind(), ParseErrorKind::UnexpectedToken);
    assert_eq!(result.diagnostics.diagnostics()[0].code, 1003);
    assert!(result.module.is_empty());
}

// ============================================================================
// Redeclaration and shadowing
// ============================================================================

#[test]
fn test_redeclare_fails() {
    let result = parse("let a = 1; let a = 2;");
    assert_eq!(result.module.len(), 1);
    assert_eq!(
        result.errors.iter().map(|e| e.kind()).collect::<Vec<_>>(),
        vec![ParseErrorKind::CannotRedeclare]
    );
    // The error points at the second `a`.
    assert_eq!(result.errors[0].span().start, 15);
}

#[test]
fn test_let_and_type_share_names() {
    assert_eq!(
        error_kinds("type a = number; let a = 1;"),
        vec![ParseErrorKind::CannotRedeclare]
    );
}

#[test]
fn test_name_in_ancestor_scope_cannot_be_redeclared() {
    let prelude = parse("type number = number;");
    assert!(!prelude.has_errors());

    let mut scopes = prelude.scopes;
    let child = scopes.push_scope(prelude.scope);
    let result = Parser::with_scopes("let x: number = 1;\nlet number = 2;", scopes, child)
        .parse_module();

    assert_eq!(result.module.len(), 1);
    assert_eq!(
        result.errors.iter().map(|e| e.kind()).collect::<Vec<_>>(),
        vec![ParseErrorKind::CannotRedeclare]
    );
    // New declarations land in the child, not the prelude.
    let (found_in, _) = result.scopes.resolve(child, "x").unwrap();
    assert_eq!(found_in, child);
    assert!(!result.scopes.is_declared(result.scopes.root(), "x"));
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_assignment_chain_is_right_nested() {
    let result = assert_parses("let a = 1; let b = 2; a = b = 3;", 3);
    let expr = result.module.statements[2].as_expression().unwrap();
    assert_eq!(expr.assignment_depth(), 2);

    let Expression::Assignment(outer) = expr else {
        panic!("expected an assignment");
    };
    assert_eq!(outer.target.text, "a");
    let Expression::Assignment(inner) = outer.value.as_ref() else {
        panic!("expected a nested assignment");
    };
    assert_eq!(inner.target.text, "b");
    assert_eq!(inner.location.pos, 26);
    assert!(matches!(*inner.value, Expression::NumericLiteral(_)));
}

#[test]
fn test_long_assignment_chain_parses_and_drops() {
    let source = "let a = 1;\n".to_owned() + &"a = ".repeat(200_000) + "1;";
    let result = assert_parses(&source, 2);
    let expr = result.module.statements[1].as_expression().unwrap();
    assert_eq!(expr.assignment_depth(), 200_000);
    drop(result);
}

#[test]
fn test_long_chain_initializer_is_bound() {
    // The binding table keeps its own copy of the declaration.
    let source = "let a = 1;\nlet b = ".to_owned() + &"a = ".repeat(200_000) + "1;";
    let result = assert_parses(&source, 2);
    let Some(Declaration::Let(bound)) = result.scopes.lookup(result.scope, "b") else {
        panic!("expected b to be bound");
    };
    assert_eq!(bound.initializer.assignment_depth(), 200_000);
    drop(result);
}

#[test]
fn test_assignment_target_must_be_declared() {
    assert_eq!(
        error_kinds("let a = 1; z = a;"),
        vec![ParseErrorKind::UndeclaredReference]
    );
}

#[test]
fn test_literal_is_not_assignable() {
    let result = parse("1 = 2;");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.diagnostics.diagnostics()[0].message_text, "Expected ';' but found '='.");
}

#[test]
fn test_expression_statements() {
    assert_parses("1; true; 42;", 3);
}

// ============================================================================
// Numeric literals
// ============================================================================

#[test]
fn test_overflowing_number() {
    let source = format!("let a = {};", "9".repeat(400));
    assert_eq!(
        error_kinds(&source),
        vec![ParseErrorKind::InvalidNumericLiteral]
    );
    assert_eq!(parse(&source).errors[0].span().start, 8);
}

#[test]
fn test_large_but_finite_number() {
    let source = format!("let a = {};", "9".repeat(300));
    let result = assert_parses(&source, 1);
    let Some(Declaration::Let(decl)) = result.module.declaration("a") else {
        panic!("expected a let declaration");
    };
    assert!(matches!(decl.initializer, Expression::NumericLiteral(NumericLiteral { value, .. }) if value > 9e299));
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_recovery_after_missing_initializer() {
    let result = parse("let a = ;\nlet b = 5;");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.module.len(), 1);
    assert!(result.is_declared("b"));
    assert!(!result.is_declared("a"));
    let diag = &result.diagnostics.diagnostics()[0];
    assert_eq!(diag.message_text, "Expected an identifier or a literal but found ';'.");
    assert_eq!(diag.span.map(|s| s.start), Some(8));
}

#[test]
fn test_undeclared_reference_keeps_neighbours() {
    let result = parse("let a = 1;\nlet b = x;\nlet c = a;");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.module.len(), 2);
    let names: Vec<_> = result.module.declarations().map(|d| d.name().text.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_missing_semicolon_at_end_of_file() {
    let result = parse("let a = 1");
    assert_eq!(result.module.len(), 0);
    assert_eq!(
        result.diagnostics.diagnostics()[0].message_text,
        "Expected ';' but found end of file."
    );
    // Installed before the terminator was checked.
    assert!(result.is_declared("a"));
}

#[test]
fn test_recovery_from_unknown_characters() {
    let result = parse("@ # let a = 1;");
    assert_eq!(result.module.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.is_declared("a"));
}

#[test]
fn test_reserved_keywords_do_not_loop() {
    let result = parse("function return let a = 1;");
    assert!(result.is_declared("a"));
    assert_eq!(result.module.len(), 1);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_one_diagnostic_per_failed_statement() {
    let result = parse("let a = 1; let a = b = ;\nlet c = 2;");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.module.len(), 2);
}
