//! Conformance suite for quill.
//!
//! Each case is a small program plus the diagnostic codes it must produce, in
//! order. Cases are grouped by category and run through a [`Program`] so the
//! whole pipeline is covered.

use quill_compiler::{CompilerOptions, Program};

/// Outcome of a single conformance case.
#[derive(Debug, Clone)]
struct CaseResult {
    name: String,
    category: String,
    expected: Vec<u32>,
    actual: Vec<u32>,
    statements: usize,
}

impl CaseResult {
    fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// Conformance suite runner. All cases go into one program and are parsed
/// together.
struct ConformanceSuite {
    program: Program,
    cases: Vec<(String, String, Vec<u32>)>,
}

impl ConformanceSuite {
    fn new() -> Self {
        Self {
            program: Program::new(CompilerOptions::default()),
            cases: Vec::new(),
        }
    }

    fn add_case(&mut self, name: &str, category: &str, source: &str, expected: &[u32]) {
        self.program.add_source(name, source);
        self.cases
            .push((name.to_string(), category.to_string(), expected.to_vec()));
    }

    fn run(&self) -> Vec<CaseResult> {
        let result = self.program.parse_all();
        self.cases
            .iter()
            .map(|(name, category, expected)| {
                let file = result.file(name);
                CaseResult {
                    name: name.clone(),
                    category: category.clone(),
                    expected: expected.clone(),
                    actual: file
                        .map(|f| f.result.diagnostics.iter().map(|d| d.code).collect())
                        .unwrap_or_default(),
                    statements: file.map_or(0, |f| f.result.module.len()),
                }
            })
            .collect()
    }
}

fn print_summary(results: &[CaseResult]) {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed()).count();

    println!("\n=== quill Conformance Summary ===");
    println!("Total cases: {}", total);
    println!("Passed: {}", passed);
    println!("Failed: {}", total - passed);

    let mut categories: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
    categories.dedup();
    for category in categories {
        let in_category: Vec<_> = results.iter().filter(|r| r.category == category).collect();
        let ok = in_category.iter().filter(|r| r.passed()).count();
        println!("  {}: {}/{}", category, ok, in_category.len());
    }

    for failure in results.iter().filter(|r| !r.passed()) {
        println!(
            "FAIL {} ({} statements): expected {:?}, got {:?}",
            failure.name, failure.statements, failure.expected, failure.actual
        );
    }
}

#[test]
fn test_quill_conformance() {
    let mut suite = ConformanceSuite::new();

    // ========================================================================
    // Category: Parsing
    // ========================================================================
    suite.add_case("empty", "parsing", "", &[]);
    suite.add_case("let_number", "parsing", "let a = 1;", &[]);
    suite.add_case("let_boolean", "parsing", "let a = true;", &[]);
    suite.add_case("type_alias", "parsing", "type t = number;", &[]);
    suite.add_case(
        "sample",
        "parsing",
        "let a = 1;\nlet c = 2;\ntype t = number;\nlet b: t = c = false;\n",
        &[],
    );
    suite.add_case("missing_semicolon", "parsing", "let a = 1", &[1001]);
    suite.add_case("missing_initializer", "parsing", "let a = ;", &[1002]);
    suite.add_case("literal_name", "parsing", "type 1 = t;", &[1003]);
    suite.add_case("literal_alias", "parsing", "type t = true;", &[1003]);
    suite.add_case("unknown_character", "parsing", "let a = 1 + 2;", &[1001]);
    suite.add_case("reserved_function", "parsing", "function;", &[1002]);

    // ========================================================================
    // Category: Literals
    // ========================================================================
    suite.add_case("leading_zeros", "literals", "let a = 000123;", &[]);
    suite.add_case(
        "overflow",
        "literals",
        &format!("let a = 1{};", "0".repeat(320)),
        &[1004],
    );

    // ========================================================================
    // Category: Names
    // ========================================================================
    suite.add_case("undeclared", "names", "x;", &[2002]);
    suite.add_case("undeclared_type", "names", "let a: t = 1;", &[2003]);
    suite.add_case("redeclare_let", "names", "let a = 1;\nlet a = 2;", &[2001]);
    suite.add_case("redeclare_type", "names", "type a = b;\nlet a = 2;", &[2001]);
    suite.add_case("self_reference", "names", "let a = a;", &[2002]);
    suite.add_case("assign_undeclared", "names", "let a = 1;\na = b = 2;", &[2002]);

    // ========================================================================
    // Category: Recovery
    // ========================================================================
    suite.add_case(
        "recover_after_bad_let",
        "recovery",
        "let a = ;\nlet b = 5;\nb = b;",
        &[1002],
    );
    suite.add_case(
        "one_error_per_statement",
        "recovery",
        "x = y = z;\nq;",
        &[2002, 2002],
    );
    suite.add_case("recover_at_keyword", "recovery", "let a = 1 type t = a;", &[1001]);

    let results = suite.run();
    print_summary(&results);

    let failed: Vec<_> = results.iter().filter(|r| !r.passed()).map(|r| &r.name).collect();
    assert!(failed.is_empty(), "failing cases: {:?}", failed);
}
