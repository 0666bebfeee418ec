//! Scope chain management.
//!
//! Scopes live in a [`ScopeTree`] and refer to their parent by index, so a
//! child never owns its parent and the whole chain is dropped with the tree.

use crate::symbol::BindingTable;
use quill_ast::node::Declaration;

/// Index of a scope inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The root scope every tree starts with.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single scope: its own bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    /// The names declared directly in this scope.
    pub bindings: BindingTable,
    /// The parent scope (None for the root).
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            bindings: BindingTable::new(),
            parent,
        }
    }
}

/// All scopes of one parse session.
#[derive(Debug)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Create a tree holding only the root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(None)],
        }
    }

    #[inline]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Open a new scope whose lookups fall back to `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(Some(parent)));
        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).parent
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Bind `name` in `scope`'s own table, overwriting any existing binding
    /// there. Never fails.
    pub fn declare(&mut self, scope: ScopeId, name: impl Into<String>, declaration: Declaration) {
        self.scopes[scope.index()].bindings.set(name, declaration);
    }

    /// Find `name` in `scope` or the nearest ancestor that binds it.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Declaration> {
        self.ancestors(scope)
            .find_map(|id| self.get(id).bindings.get(name))
    }

    /// Like [`ScopeTree::lookup`], but also reports which scope held the
    /// binding.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Declaration)> {
        self.ancestors(scope)
            .find_map(|id| self.get(id).bindings.get(name).map(|decl| (id, decl)))
    }

    pub fn is_declared(&self, scope: ScopeId, name: &str) -> bool {
        self.lookup(scope, name).is_some()
    }

    /// `scope` followed by each of its ancestors up to the root.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |&id| self.parent(id))
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
