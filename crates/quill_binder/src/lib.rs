//! quill_binder: Binding tables and the scope chain.
//!
//! The parser declares names into a [`ScopeTree`] as it parses and asks it
//! whether referenced names are visible. Each scope owns a
//! [`BindingTable`] and points at its parent by [`ScopeId`].

mod scope;
mod symbol;

pub use scope::{Scope, ScopeId, ScopeTree};
pub use symbol::BindingTable;
