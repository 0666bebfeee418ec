//! Syntax tree output for `emitAst`.

use crate::error::CompilerError;
use crate::options::EmitAst;
use quill_ast::node::{Declaration, Module, Statement};
use quill_printer::Printer;

/// Deepest assignment chain the JSON form will serialize. Serialization
/// recurses once per link.
pub const MAX_JSON_DEPTH: usize = 256;

/// Render `module` in the requested form. `EmitAst::None` renders nothing.
pub fn emit_module(module: &Module, mode: EmitAst) -> Result<Option<String>, CompilerError> {
    match mode {
        EmitAst::None => Ok(None),
        EmitAst::Json => {
            let depth = max_assignment_depth(module);
            if depth > MAX_JSON_DEPTH {
                return Err(CompilerError::TooDeep {
                    depth,
                    limit: MAX_JSON_DEPTH,
                });
            }
            Ok(Some(serde_json::to_string_pretty(module)?))
        }
        EmitAst::Source => Ok(Some(Printer::new().print_module(module))),
    }
}

fn max_assignment_depth(module: &Module) -> usize {
    module
        .statements
        .iter()
        .map(|statement| match statement {
            Statement::Expression(stmt) => stmt.expression.assignment_depth(),
            Statement::Declaration(Declaration::Let(decl)) => decl.initializer.assignment_depth(),
            Statement::Declaration(Declaration::TypeAlias(_)) => 0,
        })
        .max()
        .unwrap_or(0)
}
