//! `ScopeStack`: the ordered stack of `SymbolTable`s the parser consults
//! while resolving identifiers, plus the shadow slot used for struct field
//! tables and function parameter tables.

use vela_util::Symbol;

use crate::symbol::{Binding, SymbolTable};

/// An ordered sequence of symbol tables, index 0 the outermost (global)
/// scope. `shadow` is a transient override: when set, `current()` returns
/// it instead of the top of the stack, without pushing a new frame. This
/// models parsing a struct body (against its field table) or a function
/// body (against its parameter table) -- neither should see, or be seen
/// by, the enclosing block's ordinary scoping rules.
pub struct ScopeStack {
    scopes: Vec<SymbolTable>,
    shadow: Option<SymbolTable>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![SymbolTable::new()],
            shadow: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Pushes a fresh, empty scope.
    pub fn begin_scope(&mut self) {
        self.scopes.push(SymbolTable::new());
    }

    /// Pops and discards the innermost scope. Forbidden at depth 0 -- that
    /// would destroy the global scope, and indicates a parser bug, not a
    /// user error.
    pub fn end_scope(&mut self) {
        assert!(
            self.scopes.len() > 1,
            "internal error: attempted to end the global scope"
        );
        self.scopes.pop();
    }

    /// The table the parser should currently read and write through: the
    /// shadow table if one is active, otherwise the innermost scope.
    pub fn current(&mut self) -> &mut SymbolTable {
        if let Some(shadow) = self.shadow.as_mut() {
            shadow
        } else {
            self.scopes.last_mut().expect("scope stack is never empty")
        }
    }

    /// Looks up `name` starting at the innermost real scope and walking
    /// outward to the global scope. Does not consult an active shadow
    /// table -- shadowing is for struct/function body parsing, which is
    /// deliberately isolated from the surrounding block's bindings.
    pub fn retrieve(&self, name: Symbol) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|table| table.retrieve(name))
    }

    /// True if `name` is bound in any scope below the innermost one (used
    /// by redeclaration checks, which only care about the *current* scope
    /// colliding with an outer one, not with itself).
    pub fn exists_in_outer_scope(&self, name: Symbol) -> bool {
        if self.scopes.len() < 2 {
            return false;
        }
        self.scopes[..self.scopes.len() - 1]
            .iter()
            .rev()
            .any(|table| table.is_in(name))
    }

    /// Redirects `current()` to `table` without pushing a stack frame.
    /// Only one shadow can be active at a time.
    pub fn shadow(&mut self, table: SymbolTable) {
        assert!(self.shadow.is_none(), "internal error: nested shadow");
        self.shadow = Some(table);
    }

    /// Ends the active shadow, returning the table that was shadowed in.
    pub fn unshadow(&mut self) -> SymbolTable {
        self.shadow.take().expect("internal error: no active shadow")
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Kind, ParserAnnotation};
    use crate::symbol::{Binding, DeclState};

    fn binding(name: &str) -> Binding {
        Binding::new(
            Symbol::intern(name),
            1,
            ParserAnnotation::new(Kind::Int, true, 32, 1),
            DeclState::Declared,
        )
    }

    #[test]
    fn test_begin_end_scope_changes_depth() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.depth(), 1);
        stack.begin_scope();
        assert_eq!(stack.depth(), 2);
        stack.end_scope();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "global scope")]
    fn test_end_scope_at_depth_zero_panics() {
        let mut stack = ScopeStack::new();
        stack.end_scope();
    }

    #[test]
    fn test_retrieve_walks_outer_scopes() {
        let mut stack = ScopeStack::new();
        stack.current().add(binding("x"));
        stack.begin_scope();
        assert!(stack.retrieve(Symbol::intern("x")).is_some());
    }

    #[test]
    fn test_exists_in_outer_scope() {
        let mut stack = ScopeStack::new();
        stack.current().add(binding("x"));
        stack.begin_scope();
        assert!(stack.exists_in_outer_scope(Symbol::intern("x")));
        assert!(!stack.exists_in_outer_scope(Symbol::intern("y")));
    }

    #[test]
    fn test_shadow_redirects_current_without_pushing() {
        let mut stack = ScopeStack::new();
        let depth_before = stack.depth();

        let mut fields = SymbolTable::new();
        fields.add(binding("field_a"));
        stack.shadow(fields);

        assert_eq!(stack.depth(), depth_before);
        assert!(stack.current().is_in(Symbol::intern("field_a")));

        let restored = stack.unshadow();
        assert!(restored.is_in(Symbol::intern("field_a")));
    }
}
