//! Reference resolution and type checking.
//!
//! Walks the tree with the scope tree built by the declaration pass, binds
//! every name to its symbol and computes the type of every expression that
//! appears in a statement. The scope tree and type table are only read.

use crate::{
    ast::{
        ast::{FnDef, Program},
        expressions::{ArgList, BinaryExpr, BinaryOp, Expr, IdentExpr, UnaryOp},
        statements::{
            AssignStmt, BlockStmt, CallStmt, IfThenElseStmt, IfThenStmt, ReturnStmt, VarDeclStmt,
            WhileStmt,
        },
        visitor::{Accept, Visitor},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::Token,
};

use super::{
    scope::{PreferredKind, ScopeId, SymbolId, SymbolKind, SymbolTable, RETURN_VALUE_SYMBOL},
    type_table::{TypeId, TypeTable, BOOL, FLOAT, INT, STRING, VOID},
};

pub struct SecondPass<'t> {
    types: &'t TypeTable,
    symbols: &'t SymbolTable,
    current: ScopeId,
    functions: Vec<bool>,
    errors: Vec<Error>,
}

impl<'t> SecondPass<'t> {
    pub fn new(types: &'t TypeTable, symbols: &'t SymbolTable) -> Self {
        SecondPass {
            types,
            symbols,
            current: symbols.global(),
            functions: vec![],
            errors: vec![],
        }
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn error(&mut self, error: ErrorImpl, token: &Token) {
        self.errors.push(Error::new(error, token.position));
    }

    fn type_name(&self, ty: TypeId) -> String {
        self.types.name(ty).to_string()
    }

    fn is_type(&self, ty: TypeId, name: &str) -> bool {
        self.types.get(name) == Some(ty)
    }

    fn is_numeric(&self, ty: TypeId) -> bool {
        self.is_type(ty, INT) || self.is_type(ty, FLOAT)
    }

    /// Binds `node` to the symbol its name refers to from the current scope.
    fn resolve(&mut self, node: &mut IdentExpr, preferred: PreferredKind) {
        let symbols = self.symbols;
        let Some(id) = symbols.get_symbol(self.current, &node.name, preferred) else {
            self.error(
                ErrorImpl::UnknownSymbol {
                    symbol: node.name.clone(),
                },
                &node.token,
            );
            return;
        };

        let symbol = symbols.symbol(id);
        let ordered = matches!(symbol.kind, SymbolKind::Variable | SymbolKind::GlobalVariable);
        if ordered && symbol.declaration.position > node.token.position {
            let line = symbol.declaration.position.line;
            self.error(
                ErrorImpl::UsedBeforeDeclaration {
                    symbol: node.name.clone(),
                    line,
                },
                &node.token,
            );
            return;
        }

        node.symbol = Some(id);
        node.ty = symbol.ty;
    }

    /// Type of a name used as a value.
    fn ident_type(&mut self, node: &IdentExpr, do_not_use: Option<SymbolId>) -> Option<TypeId> {
        let id = node.symbol?;

        if self.symbols.symbol(id).kind == SymbolKind::Function {
            self.error(
                ErrorImpl::FunctionUsedAsVariable {
                    symbol: node.name.clone(),
                },
                &node.token,
            );
            return None;
        }
        if do_not_use == Some(id) {
            self.error(
                ErrorImpl::UsedInOwnDefinition {
                    symbol: node.name.clone(),
                },
                &node.token,
            );
            return None;
        }

        node.ty
    }

    /// Computes, records and returns the type of `expr`.
    ///
    /// `None` means the expression is ill-typed and the problem has already
    /// been reported, so callers stay silent. `do_not_use` is the variable
    /// currently being initialised.
    pub fn result_type_of(&mut self, expr: &mut Expr, do_not_use: Option<SymbolId>) -> Option<TypeId> {
        let ty = match expr {
            Expr::Int(_) | Expr::Float(_) | Expr::Bool(_) | Expr::String(_) => return expr.ty(),
            Expr::Ident(node) => self.ident_type(node, do_not_use),
            Expr::Unary(node) => {
                let operand = self.result_type_of(&mut node.operand, do_not_use)?;
                let (valid, expected, operation) = match node.op {
                    UnaryOp::Neg => (self.is_numeric(operand), "'int' or 'float'", "-"),
                    UnaryOp::Not => (self.is_type(operand, BOOL), "'bool'", "!"),
                };

                if !valid {
                    let received = self.type_name(operand);
                    self.error(
                        ErrorImpl::OperandTypeError {
                            operation: operation.to_string(),
                            expected: expected.to_string(),
                            received: format!("'{}'", received),
                        },
                        node.operand.token(),
                    );
                    return None;
                }
                Some(operand)
            }
            Expr::Binary(node) => self.binary_type(node, do_not_use),
            Expr::Call(node) => self.call_type(&node.callee, &mut node.args, do_not_use),
        };

        if ty.is_some() {
            expr.set_ty(ty);
        }
        ty
    }

    fn binary_type(&mut self, node: &mut BinaryExpr, do_not_use: Option<SymbolId>) -> Option<TypeId> {
        if node.op == BinaryOp::MemberAccess {
            let left = self.result_type_of(&mut node.left, do_not_use)?;
            let type_ = self.type_name(left);
            self.error(
                ErrorImpl::UnsupportedOperation {
                    operation: node.op.symbol().to_string(),
                    type_,
                },
                &node.token,
            );
            return None;
        }

        let left = self.result_type_of(&mut node.left, do_not_use);
        let right = self.result_type_of(&mut node.right, do_not_use);
        let (left, right) = (left?, right?);

        let result = match node.op {
            BinaryOp::Equal | BinaryOp::Unequal => {
                (left == right).then(|| self.types.get(BOOL)).flatten()
            }
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEquals | BinaryOp::GreaterEquals => {
                (left == right && self.is_numeric(left))
                    .then(|| self.types.get(BOOL))
                    .flatten()
            }
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => {
                (self.is_type(left, BOOL) && self.is_type(right, BOOL)).then_some(left)
            }
            BinaryOp::Add if self.is_type(left, STRING) || self.is_type(right, STRING) => {
                self.types.get(STRING)
            }
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
                (left == right && self.is_numeric(left)).then_some(left)
            }
            BinaryOp::Mod => {
                (self.is_type(left, INT) && self.is_type(right, INT)).then_some(left)
            }
            BinaryOp::Subscript => return self.subscript_type(node, left, right),
            BinaryOp::MemberAccess => None,
        };

        if result.is_none() {
            let expected = match node.op {
                BinaryOp::Equal | BinaryOp::Unequal => "matching types",
                BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => "'bool' operands",
                BinaryOp::Mod => "'int' operands",
                BinaryOp::Add => "matching numeric types or a 'string'",
                _ => "matching numeric types",
            };
            let received = format!("'{}' and '{}'", self.type_name(left), self.type_name(right));
            self.error(
                ErrorImpl::OperandTypeError {
                    operation: node.op.symbol().to_string(),
                    expected: expected.to_string(),
                    received,
                },
                &node.token,
            );
        }
        result
    }

    fn subscript_type(&mut self, node: &BinaryExpr, left: TypeId, right: TypeId) -> Option<TypeId> {
        let (expected, received) = match self.types.element_of(left) {
            None => ("an array", left),
            Some(_) if !self.is_type(right, INT) => ("an 'int' index", right),
            Some(element) => return Some(element),
        };

        let received = format!("'{}'", self.type_name(received));
        self.error(
            ErrorImpl::OperandTypeError {
                operation: node.op.symbol().to_string(),
                expected: expected.to_string(),
                received,
            },
            node.right.token(),
        );
        None
    }

    /// Checks a call against the callee's signature and yields its return type.
    ///
    /// Every argument is typed; each one that disagrees with its parameter is
    /// reported on its own, and a wrong argument count does not stop the
    /// arguments that do line up from being checked.
    fn call_type(
        &mut self,
        callee: &IdentExpr,
        args: &mut ArgList,
        do_not_use: Option<SymbolId>,
    ) -> Option<TypeId> {
        let arg_types: Vec<Option<TypeId>> = args
            .args
            .iter_mut()
            .map(|arg| self.result_type_of(arg, do_not_use))
            .collect();

        let symbols = self.symbols;
        let symbol = symbols.symbol(callee.symbol?);
        if symbol.kind != SymbolKind::Function {
            self.error(
                ErrorImpl::NotAFunction {
                    symbol: callee.name.clone(),
                },
                &callee.token,
            );
            return None;
        }

        if arg_types.len() != symbol.params.len() {
            self.error(
                ErrorImpl::ArgumentCountMismatch {
                    function: callee.name.clone(),
                    expected: symbol.params.len(),
                    received: arg_types.len(),
                },
                &callee.token,
            );
        }

        for (index, ((arg, actual), (_, required))) in args
            .args
            .iter()
            .zip(&arg_types)
            .zip(&symbol.params)
            .enumerate()
        {
            if let (Some(actual), Some(required)) = (actual, required) {
                if actual != required {
                    let error = ErrorImpl::ArgumentTypeMatchError {
                        index: index + 1,
                        expected: self.type_name(*required),
                        received: self.type_name(*actual),
                    };
                    self.error(error, arg.token());
                }
            }
        }

        symbol.ty
    }

    fn check_condition(&mut self, condition: &mut Expr, statement: &str, token: &Token) {
        let Some(ty) = self.result_type_of(condition, None) else {
            return;
        };

        if !self.is_type(ty, BOOL) {
            let received = self.type_name(ty);
            self.error(
                ErrorImpl::ConditionTypeError {
                    statement: statement.to_string(),
                    received,
                },
                token,
            );
        }
    }

    fn check_assignable(&mut self, expected: TypeId, received: TypeId, token: &Token) {
        if expected != received {
            let error = ErrorImpl::TypeMatchError {
                expected: self.type_name(expected),
                received: self.type_name(received),
            };
            self.error(error, token);
        }
    }

    fn leave_scope(&mut self) {
        if let Some(parent) = self.symbols.parent(self.current) {
            self.current = parent;
        }
    }
}

impl Visitor for SecondPass<'_> {
    fn enter_fn_def(&mut self, node: &mut FnDef, _last: bool) -> bool {
        let scope = node
            .symbol
            .and_then(|_| self.symbols.sub_scope(self.symbols.global(), &node.name.value));

        if let Some(scope) = scope {
            self.current = scope;
        }
        self.functions.push(scope.is_some());
        scope.is_some()
    }

    fn leave_fn_def(&mut self, _node: &mut FnDef, _last: bool) {
        if self.functions.pop() == Some(true) {
            self.leave_scope();
        }
    }

    fn enter_block(&mut self, node: &mut BlockStmt, _last: bool) -> bool {
        match self.symbols.sub_scope(self.current, &node.scope_name()) {
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

    fn enter_ident(&mut self, node: &mut IdentExpr, _last: bool) -> bool {
        self.resolve(node, PreferredKind::Variable);
        false
    }

    fn enter_callee(&mut self, node: &mut IdentExpr, _last: bool) -> bool {
        self.resolve(node, PreferredKind::Function);
        false
    }

    // The member name is not a reference in the current scope.
    fn enter_binary(&mut self, node: &mut BinaryExpr, _last: bool) -> bool {
        if node.op == BinaryOp::MemberAccess {
            node.left.accept(self, false);
            return false;
        }
        true
    }

    fn enter_var_decl(&mut self, node: &mut VarDeclStmt, _last: bool) -> bool {
        node.symbol.is_some()
    }

    fn leave_var_decl(&mut self, node: &mut VarDeclStmt, _last: bool) {
        let (Some(expected), Some(initializer)) = (node.ty.resolved, node.initializer.as_mut())
        else {
            return;
        };
        if node.symbol.is_none() {
            return;
        }

        if let Some(received) = self.result_type_of(initializer, node.symbol) {
            self.check_assignable(expected, received, &node.token);
        }
    }

    fn leave_assign(&mut self, node: &mut AssignStmt, _last: bool) {
        let target = self.ident_type(&node.target, None);
        let value = self.result_type_of(&mut node.value, None);

        if let (Some(expected), Some(received)) = (target, value) {
            self.check_assignable(expected, received, &node.token);
        }
    }

    fn leave_while(&mut self, node: &mut WhileStmt, _last: bool) {
        self.check_condition(&mut node.condition, "while", &node.token);
    }

    fn leave_if_then(&mut self, node: &mut IfThenStmt, _last: bool) {
        self.check_condition(&mut node.condition, "if", &node.token);
    }

    fn leave_if_then_else(&mut self, node: &mut IfThenElseStmt, _last: bool) {
        self.check_condition(&mut node.condition, "if-else", &node.token);
    }

    fn leave_call_stmt(&mut self, node: &mut CallStmt, _last: bool) {
        self.call_type(&node.callee, &mut node.args, None);
    }

    fn leave_return(&mut self, node: &mut ReturnStmt, _last: bool) {
        let expected = self
            .symbols
            .get_symbol(self.current, RETURN_VALUE_SYMBOL, PreferredKind::Any)
            .and_then(|id| self.symbols.symbol(id).ty);
        let Some(expected) = expected else {
            return;
        };

        match node.value.as_mut() {
            None if self.is_type(expected, VOID) => {}
            None => {
                let expected = self.type_name(expected);
                self.error(ErrorImpl::MissingReturnValue { expected }, &node.token);
            }
            Some(value) => {
                let Some(received) = self.result_type_of(value, None) else {
                    return;
                };
                if received != expected {
                    let error = ErrorImpl::ReturnTypeMismatch {
                        expected: self.type_name(expected),
                        received: self.type_name(received),
                    };
                    self.error(error, &node.token);
                }
            }
        }
    }
}

/// Resolves references and checks types over a program that passed the
/// declaration pass with the same `types` and `symbols`.
pub fn second_pass(program: &mut Program, types: &TypeTable, symbols: &SymbolTable) -> Vec<Error> {
    let mut pass = SecondPass::new(types, symbols);
    program.accept(&mut pass, true);
    pass.into_errors()
}
