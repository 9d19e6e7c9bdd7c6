//! Enter/recurse/leave traversal over the AST.
//!
//! For every node the walker calls `enter_*`; when that returns `true` the
//! children are visited in source order, each told whether it is the last
//! sibling. `leave_*` runs afterwards whether or not the children were visited.
//! All hooks default to "continue, do nothing", so a pass only overrides the
//! node kinds it cares about.

use crate::visitor_hooks;

use super::{
    ast::{FnDef, GlobalStmt, GlobalVarDef, Param, ParamList, Program},
    expressions::{
        ArgList, BinaryExpr, BoolLit, CallExpr, Expr, FloatLit, IdentExpr, IntLit, StringLit,
        UnaryExpr,
    },
    statements::{
        AssignStmt, BlockStmt, BreakStmt, CallStmt, EmptyStmt, IfThenElseStmt, IfThenStmt,
        ReturnStmt, Stmt, VarDeclStmt, WhileStmt,
    },
    types::TypeNode,
};

pub trait Visitor {
    visitor_hooks! {
        enter_program, leave_program => Program;
        enter_fn_def, leave_fn_def => FnDef;
        enter_global_var, leave_global_var => GlobalVarDef;
        enter_param_list, leave_param_list => ParamList;
        enter_param, leave_param => Param;
        enter_type_node, leave_type_node => TypeNode;

        enter_block, leave_block => BlockStmt;
        enter_while, leave_while => WhileStmt;
        enter_if_then, leave_if_then => IfThenStmt;
        enter_if_then_else, leave_if_then_else => IfThenElseStmt;
        enter_assign, leave_assign => AssignStmt;
        enter_return, leave_return => ReturnStmt;
        enter_var_decl, leave_var_decl => VarDeclStmt;
        enter_call_stmt, leave_call_stmt => CallStmt;
        enter_break, leave_break => BreakStmt;
        enter_empty, leave_empty => EmptyStmt;

        enter_arg_list, leave_arg_list => ArgList;
        enter_int, leave_int => IntLit;
        enter_float, leave_float => FloatLit;
        enter_bool, leave_bool => BoolLit;
        enter_string, leave_string => StringLit;
        enter_ident, leave_ident => IdentExpr;
        enter_callee, leave_callee => IdentExpr;
        enter_unary, leave_unary => UnaryExpr;
        enter_binary, leave_binary => BinaryExpr;
        enter_call_expr, leave_call_expr => CallExpr;
    }
}

/// A node that can be walked by a [`Visitor`].
pub trait Accept {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool);
}

/// Visits `items` in order, flagging the final one as the last sibling.
fn accept_all<T: Accept, V: Visitor + ?Sized>(items: &mut [T], visitor: &mut V) {
    let count = items.len();
    for (i, item) in items.iter_mut().enumerate() {
        item.accept(visitor, i + 1 == count);
    }
}

impl Accept for Program {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_program(self, last) {
            accept_all(&mut self.globals, visitor);
        }
        visitor.leave_program(self, last);
    }
}

impl Accept for GlobalStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        match self {
            GlobalStmt::Function(f) => f.accept(visitor, last),
            GlobalStmt::Variable(v) => v.accept(visitor, last),
        }
    }
}

impl Accept for FnDef {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_fn_def(self, last) {
            self.return_type.accept(visitor, false);
            self.params.accept(visitor, false);
            self.body.accept(visitor, true);
        }
        visitor.leave_fn_def(self, last);
    }
}

impl Accept for GlobalVarDef {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_global_var(self, last) {
            self.ty.accept(visitor, true);
        }
        visitor.leave_global_var(self, last);
    }
}

impl Accept for ParamList {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_param_list(self, last) {
            accept_all(&mut self.params, visitor);
        }
        visitor.leave_param_list(self, last);
    }
}

impl Accept for Param {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_param(self, last) {
            self.ty.accept(visitor, true);
        }
        visitor.leave_param(self, last);
    }
}

impl Accept for TypeNode {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        visitor.enter_type_node(self, last);
        visitor.leave_type_node(self, last);
    }
}

impl Accept for Stmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        match self {
            Stmt::Empty(s) => s.accept(visitor, last),
            Stmt::Break(s) => s.accept(visitor, last),
            Stmt::While(s) => s.accept(visitor, last),
            Stmt::IfThen(s) => s.accept(visitor, last),
            Stmt::IfThenElse(s) => s.accept(visitor, last),
            Stmt::Block(s) => s.accept(visitor, last),
            Stmt::Assign(s) => s.accept(visitor, last),
            Stmt::Return(s) => s.accept(visitor, last),
            Stmt::VarDecl(s) => s.accept(visitor, last),
            Stmt::Call(s) => s.accept(visitor, last),
        }
    }
}

impl Accept for EmptyStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        visitor.enter_empty(self, last);
        visitor.leave_empty(self, last);
    }
}

impl Accept for BreakStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        visitor.enter_break(self, last);
        visitor.leave_break(self, last);
    }
}

impl Accept for WhileStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_while(self, last) {
            self.condition.accept(visitor, false);
            self.body.accept(visitor, true);
        }
        visitor.leave_while(self, last);
    }
}

impl Accept for IfThenStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_if_then(self, last) {
            self.condition.accept(visitor, false);
            self.then_branch.accept(visitor, true);
        }
        visitor.leave_if_then(self, last);
    }
}

impl Accept for IfThenElseStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_if_then_else(self, last) {
            self.condition.accept(visitor, false);
            self.then_branch.accept(visitor, false);
            self.else_branch.accept(visitor, true);
        }
        visitor.leave_if_then_else(self, last);
    }
}

impl Accept for BlockStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_block(self, last) {
            accept_all(&mut self.statements, visitor);
        }
        visitor.leave_block(self, last);
    }
}

impl Accept for AssignStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_assign(self, last) {
            self.target.accept(visitor, false);
            self.value.accept(visitor, true);
        }
        visitor.leave_assign(self, last);
    }
}

impl Accept for ReturnStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_return(self, last) {
            if let Some(value) = &mut self.value {
                value.accept(visitor, true);
            }
        }
        visitor.leave_return(self, last);
    }
}

impl Accept for VarDeclStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_var_decl(self, last) {
            let has_initializer = self.initializer.is_some();
            self.ty.accept(visitor, !has_initializer);
            if let Some(initializer) = &mut self.initializer {
                initializer.accept(visitor, true);
            }
        }
        visitor.leave_var_decl(self, last);
    }
}

impl Accept for CallStmt {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_call_stmt(self, last) {
            accept_callee(&mut self.callee, visitor, false);
            self.args.accept(visitor, true);
        }
        visitor.leave_call_stmt(self, last);
    }
}

impl Accept for ArgList {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_arg_list(self, last) {
            accept_all(&mut self.args, visitor);
        }
        visitor.leave_arg_list(self, last);
    }
}

impl Accept for Expr {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        match self {
            Expr::Int(e) => {
                visitor.enter_int(e, last);
                visitor.leave_int(e, last);
            }
            Expr::Float(e) => {
                visitor.enter_float(e, last);
                visitor.leave_float(e, last);
            }
            Expr::Bool(e) => {
                visitor.enter_bool(e, last);
                visitor.leave_bool(e, last);
            }
            Expr::String(e) => {
                visitor.enter_string(e, last);
                visitor.leave_string(e, last);
            }
            Expr::Ident(e) => e.accept(visitor, last),
            Expr::Unary(e) => e.accept(visitor, last),
            Expr::Binary(e) => e.accept(visitor, last),
            Expr::Call(e) => e.accept(visitor, last),
        }
    }
}

impl Accept for IdentExpr {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        visitor.enter_ident(self, last);
        visitor.leave_ident(self, last);
    }
}

/// Identifiers in callee position get their own hooks.
fn accept_callee<V: Visitor + ?Sized>(callee: &mut IdentExpr, visitor: &mut V, last: bool) {
    visitor.enter_callee(callee, last);
    visitor.leave_callee(callee, last);
}

impl Accept for UnaryExpr {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_unary(self, last) {
            self.operand.accept(visitor, true);
        }
        visitor.leave_unary(self, last);
    }
}

impl Accept for BinaryExpr {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_binary(self, last) {
            self.left.accept(visitor, false);
            self.right.accept(visitor, true);
        }
        visitor.leave_binary(self, last);
    }
}

impl Accept for CallExpr {
    fn accept<V: Visitor + ?Sized>(&mut self, visitor: &mut V, last: bool) {
        if visitor.enter_call_expr(self, last) {
            accept_callee(&mut self.callee, visitor, false);
            self.args.accept(visitor, true);
        }
        visitor.leave_call_expr(self, last);
    }
}
