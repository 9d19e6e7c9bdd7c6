//! Declaration pass: builds the scope tree, registers every declared name and
//! resolves every written type.

use tracing::trace;

use crate::{
    ast::{
        ast::{FnDef, GlobalVarDef, ParamList, Program},
        expressions::{BoolLit, FloatLit, IntLit, StringLit},
        statements::{BlockStmt, BreakStmt, Name, VarDeclStmt, WhileStmt},
        types::TypeNode,
        visitor::{Accept, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    scope::{ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable, RETURN_VALUE_SYMBOL},
    type_table::{TypeId, TypeTable, BOOL, FLOAT, INT, STRING},
};

/// Looks up the written type of `node`.
pub fn resolve_type(types: &TypeTable, node: &TypeNode) -> Result<TypeId, Error> {
    let name = node.full_name();
    types.get(&name).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownType { type_: name },
            node.token.position,
        )
    })
}

/// Like [`resolve_type`], but rejects types that cannot hold a value.
fn resolve_storage_type(types: &TypeTable, node: &TypeNode) -> Result<TypeId, Error> {
    let ty = resolve_type(types, node)?;
    if types.info(ty).size == 0 {
        return Err(Error::new(
            ErrorImpl::InvalidType {
                type_: node.full_name(),
            },
            node.token.position,
        ));
    }
    Ok(ty)
}

pub struct FirstPass<'t> {
    types: &'t TypeTable,
    symbols: &'t mut SymbolTable,
    current: ScopeId,
    /// One entry per function definition being walked: whether its scope was entered.
    functions: Vec<bool>,
    /// Number of enclosing `while` loops.
    loop_depth: usize,
    errors: Vec<Error>,
}

impl<'t> FirstPass<'t> {
    pub fn new(types: &'t TypeTable, symbols: &'t mut SymbolTable) -> Self {
        let current = symbols.global();
        FirstPass {
            types,
            symbols,
            current,
            functions: vec![],
            loop_depth: 0,
            errors: vec![],
        }
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn leave_scope(&mut self) {
        if let Some(parent) = self.symbols.parent(self.current) {
            self.current = parent;
        }
    }

    fn declare_function(&mut self, node: &mut FnDef) -> bool {
        let function = node.name.value.clone();

        let return_type = match resolve_type(self.types, &node.return_type) {
            Ok(ty) => Some(ty),
            Err(error) => {
                self.errors.push(error);
                None
            }
        };
        node.return_type.resolved = return_type;

        let global = self.symbols.global();
        let symbol = Symbol::new(
            &function,
            SymbolKind::Function,
            node.name.token.clone(),
            return_type,
        );
        let Some(id) = self.symbols.add_symbol(global, symbol) else {
            self.errors.push(Error::new(
                ErrorImpl::FunctionAlreadyDeclared { function },
                node.name.token.position,
            ));
            return false;
        };
        node.symbol = Some(id);

        // Function names are unique in the global scope, so this cannot clash.
        let Some(scope) = self.symbols.add_sub_scope(global, &function) else {
            return false;
        };
        self.current = scope;

        let return_value = Symbol::new(
            RETURN_VALUE_SYMBOL,
            SymbolKind::ReturnValue,
            node.name.token.clone(),
            return_type,
        );
        if self.symbols.add_symbol(scope, return_value).is_none() {
            self.errors.push(Error::new(
                ErrorImpl::ReturnValueAlreadyDeclared {
                    function: function.clone(),
                },
                node.name.token.position,
            ));
        }

        let mut signature = vec![];
        for param in node.params.params.iter_mut() {
            let ty = match resolve_storage_type(self.types, &param.ty) {
                Ok(ty) => ty,
                Err(error) => {
                    self.errors.push(error);
                    continue;
                }
            };
            param.ty.resolved = Some(ty);

            let symbol = Symbol::new(
                &param.name.value,
                SymbolKind::Parameter,
                param.name.token.clone(),
                Some(ty),
            );
            match self.symbols.add_symbol(scope, symbol) {
                Some(id) => {
                    param.symbol = Some(id);
                    signature.push((param.name.value.clone(), Some(ty)));
                }
                None => self.errors.push(Error::new(
                    ErrorImpl::ParameterAlreadyDeclared {
                        parameter: param.name.value.clone(),
                        function: function.clone(),
                    },
                    param.name.token.position,
                )),
            }
        }
        self.symbols.symbol_mut(id).params = signature;

        trace!(
            function = %function,
            params = node.params.params.len(),
            "function declared"
        );
        true
    }

    /// Resolves the type of a variable declaration and registers its name in
    /// the current scope. Returns `false` when the type is unusable.
    fn declare_variable(
        &mut self,
        ty: &mut TypeNode,
        name: &Name,
        kind: SymbolKind,
        symbol: &mut Option<SymbolId>,
    ) -> bool {
        let resolved = match resolve_storage_type(self.types, ty) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.errors.push(error);
                return false;
            }
        };
        ty.resolved = Some(resolved);

        let declared = Symbol::new(&name.value, kind, name.token.clone(), Some(resolved));
        *symbol = self.symbols.add_symbol(self.current, declared);
        if symbol.is_none() {
            self.errors.push(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.value.clone(),
                },
                name.token.position,
            ));
        }
        true
    }
}

impl Visitor for FirstPass<'_> {
    fn enter_fn_def(&mut self, node: &mut FnDef, _last: bool) -> bool {
        let entered = self.declare_function(node);
        self.functions.push(entered);
        entered
    }

    fn leave_fn_def(&mut self, _node: &mut FnDef, _last: bool) {
        if self.functions.pop() == Some(true) {
            self.leave_scope();
        }
    }

    // Return and parameter types were resolved with the function itself.
    fn enter_param_list(&mut self, _node: &mut ParamList, _last: bool) -> bool {
        false
    }

    fn enter_global_var(&mut self, node: &mut GlobalVarDef, _last: bool) -> bool {
        self.declare_variable(
            &mut node.ty,
            &node.name,
            SymbolKind::GlobalVariable,
            &mut node.symbol,
        );
        false
    }

    fn enter_var_decl(&mut self, node: &mut VarDeclStmt, _last: bool) -> bool {
        self.declare_variable(
            &mut node.ty,
            &node.name,
            SymbolKind::Variable,
            &mut node.symbol,
        )
    }

    fn enter_block(&mut self, node: &mut BlockStmt, _last: bool) -> bool {
        let name = node.scope_name();
        let scope = self
            .symbols
            .add_sub_scope(self.current, &name)
            .or_else(|| self.symbols.sub_scope(self.current, &name));

        match scope {
            Some(scope) => {
                self.current = scope;
                true
            }
            None => false,
        }
    }

    fn leave_block(&mut self, node: &mut BlockStmt, _last: bool) {
        if self.symbols.scope(self.current).name == node.scope_name() {
            self.leave_scope();
        }
    }

    fn enter_while(&mut self, _node: &mut WhileStmt, _last: bool) -> bool {
        self.loop_depth += 1;
        true
    }

    fn leave_while(&mut self, _node: &mut WhileStmt, _last: bool) {
        self.loop_depth -= 1;
    }

    fn enter_break(&mut self, node: &mut BreakStmt, _last: bool) -> bool {
        if self.loop_depth == 0 {
            self.errors.push(Error::new(
                ErrorImpl::BreakOutsideLoop,
                node.token.position,
            ));
        }
        false
    }

    fn enter_int(&mut self, node: &mut IntLit, _last: bool) -> bool {
        node.ty = self.types.get(INT);
        false
    }

    fn enter_float(&mut self, node: &mut FloatLit, _last: bool) -> bool {
        node.ty = self.types.get(FLOAT);
        false
    }

    fn enter_bool(&mut self, node: &mut BoolLit, _last: bool) -> bool {
        node.ty = self.types.get(BOOL);
        false
    }

    fn enter_string(&mut self, node: &mut StringLit, _last: bool) -> bool {
        node.ty = self.types.get(STRING);
        false
    }
}

/// Runs the declaration pass over `program`, filling `symbols`.
pub fn first_pass(program: &mut Program, types: &TypeTable, symbols: &mut SymbolTable) -> Vec<Error> {
    let mut pass = FirstPass::new(types, symbols);
    program.accept(&mut pass, true);
    pass.into_errors()
}
