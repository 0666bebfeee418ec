//! Binding tables: one per scope, mapping names to declarations.

use quill_ast::node::Declaration;
use rustc_hash::FxHashMap;

/// A binding table maps declared names to their declarations.
///
/// Inserting an existing name overwrites it. Rejecting redeclarations is
/// the parser's job, not the table's.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    table: FxHashMap<String, Declaration>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.table.get(name)
    }

    /// Insert or overwrite `name`, returning the previous declaration.
    pub fn set(&mut self, name: impl Into<String>, declaration: Declaration) -> Option<Declaration> {
        self.table.insert(name.into(), declaration)
    }

    pub fn has(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.table.iter().map(|(name, decl)| (name.as_str(), decl))
    }
}
