//! The symbol scope tree.
//!
//! Scopes and symbols live in two arenas owned by [`SymbolTable`] and refer to
//! each other by index, so handles stay valid while the tree grows.

use std::collections::BTreeMap;

use crate::lexer::tokens::Token;

use super::type_table::{TypeId, TypeTable};

/// Name of the root scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Name under which a function's return value is registered in its scope.
pub const RETURN_VALUE_SYMBOL: &str = ":retVal:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Variable,
    GlobalVariable,
    Parameter,
    ReturnValue,
    Class,
}

impl SymbolKind {
    /// Kinds that can be read and assigned like a variable.
    pub fn is_variable_like(&self) -> bool {
        matches!(
            self,
            SymbolKind::Variable
                | SymbolKind::GlobalVariable
                | SymbolKind::Parameter
                | SymbolKind::ReturnValue
        )
    }
}

/// Which kind of symbol a lookup expects, given where the name appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredKind {
    Function,
    Variable,
    Any,
}

impl PreferredKind {
    fn accepts(&self, kind: SymbolKind) -> bool {
        match self {
            PreferredKind::Function => kind == SymbolKind::Function,
            PreferredKind::Variable => kind.is_variable_like(),
            PreferredKind::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub scope: ScopeId,
    /// Token of the declaring name; its position orders declarations and uses.
    pub declaration: Token,
    /// Declared type, or return type for functions. Absent when the written
    /// type could not be resolved.
    pub ty: Option<TypeId>,
    /// Parameter types of a function, in order.
    pub params: Vec<(String, Option<TypeId>)>,
}

impl Symbol {
    /// A symbol not yet placed in a scope; [`SymbolTable::add_symbol`] sets `scope`.
    pub fn new(name: &str, kind: SymbolKind, declaration: Token, ty: Option<TypeId>) -> Self {
        Symbol {
            name: name.to_string(),
            kind,
            scope: ScopeId(0),
            declaration,
            ty,
            params: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub parent: Option<ScopeId>,
    symbols: BTreeMap<String, SymbolId>,
    children: BTreeMap<String, ScopeId>,
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            scopes: vec![Scope {
                name: GLOBAL_SCOPE.to_string(),
                parent: None,
                symbols: BTreeMap::new(),
                children: BTreeMap::new(),
            }],
            symbols: vec![],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scope(id).parent
    }

    /// Declares `symbol` in `scope`. Fails without changing anything when the
    /// name is already taken in that same scope; ancestors may be shadowed.
    pub fn add_symbol(&mut self, scope: ScopeId, mut symbol: Symbol) -> Option<SymbolId> {
        if self.scopes[scope.0].symbols.contains_key(&symbol.name) {
            return None;
        }

        let id = SymbolId(self.symbols.len());
        symbol.scope = scope;
        self.scopes[scope.0].symbols.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Some(id)
    }

    /// Symbol declared directly in `scope`, ignoring ancestors.
    pub fn local_symbol(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scope(scope).symbols.get(name).copied()
    }

    /// Resolves `name` from `scope` outwards.
    ///
    /// A name found in a scope but of the wrong kind for `preferred` still
    /// yields to a matching-kind symbol further out; the near match is only
    /// returned if no ancestor has one.
    pub fn get_symbol(
        &self,
        scope: ScopeId,
        name: &str,
        preferred: PreferredKind,
    ) -> Option<SymbolId> {
        let found = match self.local_symbol(scope, name) {
            Some(found) => found,
            None => {
                let parent = self.parent(scope)?;
                return self.get_symbol(parent, name, preferred);
            }
        };

        if preferred.accepts(self.symbol(found).kind) {
            return Some(found);
        }

        let alternative = self
            .parent(scope)
            .and_then(|parent| self.get_symbol(parent, name, preferred))
            .filter(|alt| preferred.accepts(self.symbol(*alt).kind));

        Some(alternative.unwrap_or(found))
    }

    /// Creates a child scope. Fails if `parent` already has a child of that name.
    pub fn add_sub_scope(&mut self, parent: ScopeId, name: &str) -> Option<ScopeId> {
        if self.scopes[parent.0].children.contains_key(name) {
            return None;
        }

        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            name: name.to_string(),
            parent: Some(parent),
            symbols: BTreeMap::new(),
            children: BTreeMap::new(),
        });
        self.scopes[parent.0].children.insert(name.to_string(), id);
        Some(id)
    }

    pub fn sub_scope(&self, parent: ScopeId, name: &str) -> Option<ScopeId> {
        self.scope(parent).children.get(name).copied()
    }

    /// Dotted path from the root, e.g. `global.main.block3:5`.
    pub fn qualified_name(&self, scope: ScopeId) -> String {
        let mut parts = vec![self.scope(scope).name.as_str()];
        let mut current = self.parent(scope);

        while let Some(id) = current {
            parts.push(self.scope(id).name.as_str());
            current = self.parent(id);
        }

        parts.reverse();
        parts.join(".")
    }

    /// Human readable description: `int add( a : int, b : int, )` for
    /// functions, `x : int` for everything else.
    pub fn signature(&self, id: SymbolId, types: &TypeTable) -> String {
        let symbol = self.symbol(id);
        let type_name = |ty: Option<TypeId>| match ty {
            Some(ty) => types.name(ty).to_string(),
            None => String::from("?"),
        };

        match symbol.kind {
            SymbolKind::Function => {
                let mut signature = format!("{} {}( ", type_name(symbol.ty), symbol.name);
                for (name, ty) in &symbol.params {
                    signature.push_str(&format!("{} : {}, ", name, type_name(*ty)));
                }
                signature.push(')');
                signature
            }
            SymbolKind::Class => format!("{} : class", symbol.name),
            _ => format!("{} : {}", symbol.name, type_name(symbol.ty)),
        }
    }

    pub fn qualified_signature(&self, id: SymbolId, types: &TypeTable) -> String {
        format!(
            "{}.{}",
            self.qualified_name(self.symbol(id).scope),
            self.signature(id, types)
        )
    }

    /// Every symbol's qualified signature, scope by scope, depth first.
    pub fn dump(&self, types: &TypeTable) -> Vec<String> {
        let mut lines = vec![];
        self.dump_scope(self.global(), types, &mut lines);
        lines
    }

    fn dump_scope(&self, scope: ScopeId, types: &TypeTable, lines: &mut Vec<String>) {
        for id in self.scope(scope).symbols.values() {
            lines.push(self.qualified_signature(*id, types));
        }
        for child in self.scope(scope).children.values() {
            self.dump_scope(*child, types, lines);
        }
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}
