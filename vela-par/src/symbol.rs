//! `Binding` and `SymbolTable`: the declaration-state machine the parser
//! consults while resolving identifiers.
//!
//! Named `Binding` rather than `Symbol` to avoid colliding with
//! `vela_util::Symbol`, the interned-string handle used as the table's key.

use vela_util::{FxHashMap, Symbol};

use crate::annotation::ParserAnnotation;

/// Where a declared name sits in its lifecycle.
///
/// `Declared` moves to `Defined` and never back; `Uninitialized` is the
/// reserved slot for a function declared without a body yet (forward
/// reference); `FnParam` only ever lives in a function's own parameter
/// table, never in the enclosing scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclState {
    None,
    Declared,
    Uninitialized,
    Defined,
    FnParam,
}

/// A declared name: its type, where it was declared, and its lifecycle
/// state. Struct types carry their own field table; functions carry their
/// own parameter table. Neither is visited through the ordinary scope
/// stack -- the parser shadows onto them explicitly while parsing the
/// struct body or function body.
#[derive(Debug, Clone)]
pub struct Binding {
    pub name: Symbol,
    pub declared_on_line: u32,
    pub annotation: ParserAnnotation,
    pub state: DeclState,
    pub struct_fields: Option<SymbolTable>,
    pub fn_params: Option<SymbolTable>,
}

impl Binding {
    pub fn new(name: Symbol, declared_on_line: u32, annotation: ParserAnnotation, state: DeclState) -> Self {
        Self {
            name,
            declared_on_line,
            annotation,
            state,
            struct_fields: None,
            fn_params: None,
        }
    }
}

/// A mapping from identifier to `Binding`. Re-`add`ing the same name
/// replaces the prior entry -- this is how a `Declared` binding becomes
/// `Defined` once its initializer is parsed.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: FxHashMap<Symbol, Binding>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Inserts or overwrites `binding`, returning the stored copy.
    pub fn add(&mut self, binding: Binding) -> Binding {
        self.entries.insert(binding.name, binding.clone());
        binding
    }

    pub fn retrieve(&self, name: Symbol) -> Option<&Binding> {
        self.entries.get(&name)
    }

    pub fn retrieve_mut(&mut self, name: Symbol) -> Option<&mut Binding> {
        self.entries.get_mut(&name)
    }

    pub fn is_in(&self, name: Symbol) -> bool {
        self.entries.contains_key(&name)
    }

    /// Appends `param` to `fn_name`'s parameter table. Fails if `fn_name`
    /// has no binding in this table, or its binding isn't a function.
    pub fn register_fn_param(&mut self, fn_name: Symbol, param: Binding) -> Result<(), String> {
        let fn_binding = self
            .entries
            .get_mut(&fn_name)
            .ok_or_else(|| format!("no such function '{}' to register a parameter on", fn_name))?;

        if !fn_binding.annotation.is_function {
            return Err(format!("'{}' is not a function", fn_name));
        }

        let params = fn_binding.fn_params.get_or_insert_with(SymbolTable::new);
        if params.is_in(param.name) {
            return Err(format!(
                "duplicate parameter name '{}' in function '{}'",
                param.name, fn_name
            ));
        }
        params.add(param);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
