//! Unit tests for the visitor protocol and the cleanup pass.

use super::{
    ast::{FnDef, Program},
    cleanup::remove_empty_statements,
    expressions::{BinaryExpr, IdentExpr, IntLit},
    statements::{BlockStmt, Stmt, StmtType, WhileStmt},
    visitor::{Accept, Visitor},
};
use crate::{lexer::lexer::tokenize, parser::parser::parse};

fn program(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    parse(&tokens).unwrap()
}

/// Records the order in which hooks fire.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
    skip_while_children: bool,
}

impl Visitor for Recorder {
    fn enter_fn_def(&mut self, node: &mut FnDef, _last: bool) -> bool {
        self.events.push(format!("enter fn {}", node.name.value));
        true
    }
    fn leave_fn_def(&mut self, node: &mut FnDef, _last: bool) {
        self.events.push(format!("leave fn {}", node.name.value));
    }
    fn enter_while(&mut self, _node: &mut WhileStmt, _last: bool) -> bool {
        self.events.push("enter while".into());
        !self.skip_while_children
    }
    fn leave_while(&mut self, _node: &mut WhileStmt, _last: bool) {
        self.events.push("leave while".into());
    }
    fn enter_binary(&mut self, node: &mut BinaryExpr, _last: bool) -> bool {
        self.events.push(format!("enter {}", node.op));
        true
    }
    fn enter_ident(&mut self, node: &mut IdentExpr, last: bool) -> bool {
        self.events.push(format!("ident {} last={}", node.name, last));
        true
    }
    fn enter_callee(&mut self, node: &mut IdentExpr, _last: bool) -> bool {
        self.events.push(format!("callee {}", node.name));
        true
    }
    fn enter_int(&mut self, node: &mut IntLit, last: bool) -> bool {
        self.events.push(format!("int {} last={}", node.value, last));
        true
    }
}

#[test]
fn test_children_visited_in_order() {
    let mut program = program("void f() { while (a < 1) g(b); }");
    let mut recorder = Recorder::default();
    program.accept(&mut recorder, true);

    assert_eq!(
        recorder.events,
        vec![
            "enter fn f",
            "enter while",
            "enter Less",
            "ident a last=false",
            "int 1 last=true",
            "callee g",
            "ident b last=true",
            "leave while",
            "leave fn f",
        ]
    );
}

#[test]
fn test_leave_runs_when_children_skipped() {
    let mut program = program("void f() { while (a) x = 1; }");
    let mut recorder = Recorder {
        skip_while_children: true,
        ..Default::default()
    };
    program.accept(&mut recorder, true);

    assert_eq!(
        recorder.events,
        vec!["enter fn f", "enter while", "leave while", "leave fn f"]
    );
}

#[test]
fn test_default_visitor_walks_everything() {
    struct Nothing;
    impl Visitor for Nothing {}

    let mut program = program("int g; int f(int a) { if (a) { return a; } else return 0; }");
    let before = program.clone();
    program.accept(&mut Nothing, true);

    assert_eq!(program, before);
}

#[test]
fn test_cleanup_removes_empty_statements() {
    let mut program = program("void f() { ; int x; { } { ; ; } { x = 1; ; } ; }");
    let removed = remove_empty_statements(&mut program);

    let body = match &program.globals[0] {
        super::ast::GlobalStmt::Function(f) => &f.body,
        super::ast::GlobalStmt::Variable(_) => panic!("expected a function"),
    };
    let kinds: Vec<StmtType> = body.statements.iter().map(|s| s.get_stmt_type()).collect();
    assert_eq!(kinds, vec![StmtType::VarDecl, StmtType::Block]);

    match &body.statements[1] {
        Stmt::Block(BlockStmt { statements, .. }) => assert_eq!(statements.len(), 1),
        other => panic!("expected a block, got {:?}", other.get_stmt_type()),
    }
    assert_eq!(removed, 7);
}

#[test]
fn test_cleanup_keeps_loop_bodies() {
    let mut program = program("void f() { while (a) ; }");
    remove_empty_statements(&mut program);

    let body = match &program.globals[0] {
        super::ast::GlobalStmt::Function(f) => &f.body,
        super::ast::GlobalStmt::Variable(_) => panic!("expected a function"),
    };
    assert_eq!(body.statements.len(), 1);
    assert_eq!(body.statements[0].get_stmt_type(), StmtType::While);
}

#[test]
fn test_block_scope_name() {
    let program = program("void f() {\n  { }\n}");

    match &program.globals[0] {
        super::ast::GlobalStmt::Function(f) => {
            assert_eq!(f.body.scope_name(), "block1:10");
            match &f.body.statements[0] {
                Stmt::Block(inner) => assert_eq!(inner.scope_name(), "block2:3"),
                other => panic!("expected a block, got {:?}", other.get_stmt_type()),
            }
        }
        super::ast::GlobalStmt::Variable(_) => panic!("expected a function"),
    }
}
