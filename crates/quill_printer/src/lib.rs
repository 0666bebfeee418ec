//! quill_printer: Syntax tree to source text.
//!
//! Prints a [`Module`] back as canonical quill source: one statement per
//! line, single spaces around `=` and after `:`.

use quill_ast::node::*;

/// Options for the printer.
pub struct PrinterOptions {
    /// Drop `: type` annotations from `let` declarations.
    pub strip_types: bool,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            strip_types: false,
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// The printer converts syntax trees to text.
pub struct Printer {
    output: String,
    options: PrinterOptions,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(1024),
            options,
        }
    }

    /// Print a whole module to a string.
    pub fn print_module(&mut self, module: &Module) -> String {
        self.output.clear();
        for (i, statement) in module.statements.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.print_statement(statement);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Declaration(Declaration::Let(decl)) => self.print_let_declaration(decl),
            Statement::Declaration(Declaration::TypeAlias(decl)) => {
                self.print_type_alias_declaration(decl)
            }
            Statement::Expression(stmt) => self.print_expression(&stmt.expression),
        }
        self.write(";");
    }

    fn print_let_declaration(&mut self, decl: &LetDeclaration) {
        self.write("let ");
        self.write(&decl.name.text);
        if let Some(type_name) = &decl.type_annotation {
            if !self.options.strip_types {
                self.write(": ");
                self.write(&type_name.text);
            }
        }
        self.write(" = ");
        self.print_expression(&decl.initializer);
    }

    fn print_type_alias_declaration(&mut self, decl: &TypeAliasDeclaration) {
        self.write("type ");
        self.write(&decl.name.text);
        self.write(" = ");
        self.write(&decl.aliased.text);
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, mut expression: &Expression) {
        loop {
            match expression {
                Expression::Assignment(assignment) => {
                    self.write(&assignment.target.text);
                    self.write(" = ");
                    expression = &assignment.value;
                }
                Expression::Identifier(id) => return self.write(&id.text),
                Expression::NumericLiteral(lit) => {
                    // f64 Display never uses an exponent, so integral values
                    // print as the digit run they were scanned from.
                    let text = lit.value.to_string();
                    return self.write(&text);
                }
                Expression::BooleanLiteral(lit) => {
                    return self.write(if lit.value { "true" } else { "false" })
                }
            }
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Print `module` with default options.
pub fn print_module(module: &Module) -> String {
    Printer::new().print_module(module)
}
