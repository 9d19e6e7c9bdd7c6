//! Unit tests for the parser module.
//!
//! Expressions are checked through their compact `Display` form; statements
//! and declarations through the shape of the resulting tree.

use super::parser::{parse, parse_expression};
use crate::{
    ast::{
        ast::{GlobalStmt, Program},
        statements::{Stmt, StmtType},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    Position,
};

fn expr(source: &str) -> String {
    let tokens = tokenize(source).unwrap();
    parse_expression(&tokens).unwrap().to_string()
}

fn program(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    parse(&tokens).unwrap()
}

fn parse_error(source: &str) -> Error {
    let tokens = tokenize(source).unwrap();
    parse(&tokens).unwrap_err()
}

/// Statements of the body of the first global, which must be a function.
fn body(program: &Program) -> &Vec<Stmt> {
    match &program.globals[0] {
        GlobalStmt::Function(f) => &f.body.statements,
        GlobalStmt::Variable(_) => panic!("expected a function"),
    }
}

#[test]
fn test_parse_literals() {
    assert_eq!(expr("42"), "42");
    assert_eq!(expr("2.5"), "2.5");
    assert_eq!(expr("true"), "true");
    assert_eq!(expr("\"hi\""), "\"hi\"");
}

#[test]
fn test_precedence() {
    assert_eq!(expr("1 + 2 * 3"), "Add(1, Mul(2, 3))");
    assert_eq!(expr("(1 + 2) * 3"), "Mul(Add(1, 2), 3)");
    assert_eq!(expr("1 * 2 + 3 % 4"), "Add(Mul(1, 2), Mod(3, 4))");
    assert_eq!(expr("a + 1 < b * 2"), "Less(Add(a, 1), Mul(b, 2))");
}

#[test]
fn test_left_associativity() {
    assert_eq!(expr("1 - 2 - 3"), "Sub(Sub(1, 2), 3)");
    assert_eq!(expr("a < b == c"), "Equal(Less(a, b), c)");
    assert_eq!(expr("a.b.c"), "MemberAccess(MemberAccess(a, b), c)");
}

#[test]
fn test_logical_operators() {
    assert_eq!(expr("!a && b || c"), "Or(And(Not(a), b), c)");
    assert_eq!(expr("a ^ ~b"), "Xor(a, Not(b))");
    assert_eq!(expr("a != b"), "Unequal(a, b)");
}

#[test]
fn test_prefix_operators() {
    assert_eq!(expr("-x * y"), "Mul(Neg(x), y)");
    assert_eq!(expr("+5"), "5");
    assert_eq!(expr("- -1"), "Neg(Neg(1))");
}

#[test]
fn test_prefix_operand_stops_before_postfix() {
    assert_eq!(expr("-a[i]"), "Subscript(Neg(a), i)");
    assert_eq!(expr("-(a[i])"), "Neg(Subscript(a, i))");
    assert_eq!(expr("-(f(x))"), "Neg(Call(f, [x]))");

    let tokens = tokenize("-f(x)").unwrap();
    assert!(parse_expression(&tokens).is_err());
}

#[test]
fn test_calls_and_subscripts() {
    assert_eq!(expr("f()"), "Call(f, [])");
    assert_eq!(
        expr("f(1, g(2), x[3])"),
        "Call(f, [1, Call(g, [2]), Subscript(x, 3)])"
    );
    assert_eq!(expr("m[i][j + 1]"), "Subscript(Subscript(m, i), Add(j, 1))");
}

#[test]
fn test_expression_errors() {
    for source in ["(1 + 2", "1 2", "f(1,)", "a.1", "(a + b)(c)", "x[1"] {
        let tokens = tokenize(source).unwrap();
        assert!(parse_expression(&tokens).is_err(), "{} should not parse", source);
    }
}

#[test]
fn test_parse_function_definition() {
    let program = program("int add(int a, int b) { return a + b; }");

    assert_eq!(program.globals.len(), 1);
    match &program.globals[0] {
        GlobalStmt::Function(f) => {
            assert_eq!(f.name.value, "add");
            assert_eq!(f.return_type.full_name(), "int");
            assert_eq!(f.params.params.len(), 2);
            assert_eq!(f.params.params[1].name.value, "b");
            assert_eq!(f.body.statements.len(), 1);
        }
        GlobalStmt::Variable(_) => panic!("expected a function"),
    }
}

#[test]
fn test_parse_globals_and_array_types() {
    let program = program("int[] a; void f(float[] xs) { } bool flag;");

    assert_eq!(program.globals.len(), 3);
    match &program.globals[0] {
        GlobalStmt::Variable(v) => {
            assert_eq!(v.name.value, "a");
            assert!(v.ty.is_array);
            assert_eq!(v.ty.full_name(), "int[]");
        }
        GlobalStmt::Function(_) => panic!("expected a global variable"),
    }
    match &program.globals[1] {
        GlobalStmt::Function(f) => assert_eq!(f.params.params[0].ty.full_name(), "float[]"),
        GlobalStmt::Variable(_) => panic!("expected a function"),
    }
}

#[test]
fn test_parse_statement_kinds() {
    let program = program(
        "void main() {
            int x = 1;
            float y;
            x = x + 1;
            print(x, y);
            while (x < 10) x = x + 1;
            { }
            ;
            return;
        }",
    );

    let kinds: Vec<StmtType> = body(&program).iter().map(|s| s.get_stmt_type()).collect();
    assert_eq!(
        kinds,
        vec![
            StmtType::VarDecl,
            StmtType::VarDecl,
            StmtType::Assign,
            StmtType::Call,
            StmtType::While,
            StmtType::Block,
            StmtType::Empty,
            StmtType::Return,
        ]
    );
}

#[test]
fn test_parse_if_else() {
    let program = program("void f() { if (a) b = 1; else b = 2; if (a) { } }");
    let statements = body(&program);

    assert_eq!(statements[0].get_stmt_type(), StmtType::IfThenElse);
    assert_eq!(statements[1].get_stmt_type(), StmtType::IfThen);
}

#[test]
fn test_dangling_else_binds_to_inner_if() {
    let program = program("void f() { if (a) if (b) x = 1; else x = 2; }");

    match &body(&program)[0] {
        Stmt::IfThen(outer) => {
            assert_eq!(outer.then_branch.get_stmt_type(), StmtType::IfThenElse)
        }
        other => panic!("expected if-then, got {:?}", other.get_stmt_type()),
    }
}

#[test]
fn test_deeply_nested_if_statements() {
    let source = format!("void f() {{ {}x = 1; }}", "if (c) ".repeat(30));
    let program = program(&source);

    let mut depth = 0;
    let mut stmt = &body(&program)[0];
    while let Stmt::IfThen(if_stmt) = stmt {
        depth += 1;
        stmt = &if_stmt.then_branch;
    }
    assert_eq!(depth, 30);
    assert_eq!(stmt.get_stmt_type(), StmtType::Assign);
}

#[test]
fn test_deeply_nested_if_else_statements() {
    let source = format!(
        "void f() {{ {}x = 1;{} }}",
        "if (c) ".repeat(30),
        " else x = 2;".repeat(30)
    );
    let program = program(&source);

    let mut depth = 0;
    let mut stmt = &body(&program)[0];
    while let Stmt::IfThenElse(if_stmt) = stmt {
        depth += 1;
        stmt = &if_stmt.then_branch;
    }
    assert_eq!(depth, 30);
}

#[test]
fn test_return_with_value() {
    let program = program("int f() { return 1 + 2; }");

    match &body(&program)[0] {
        Stmt::Return(ret) => assert_eq!(ret.value.as_ref().unwrap().to_string(), "Add(1, 2)"),
        other => panic!("expected return, got {:?}", other.get_stmt_type()),
    }
}

#[test]
fn test_empty_program() {
    assert!(program("").globals.is_empty());
}

#[test]
fn test_committed_while_reports_at_keyword() {
    let error = parse_error("void f() { while x < 10 { } }");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenAfter {
            token: "x".into(),
            previous: "while".into(),
            production: "while statement".into(),
        }
    );
    assert_eq!(error.get_position(), Position::new(1, 18));
}

#[test]
fn test_missing_semicolon_reports_furthest_token() {
    let error = parse_error("int main() {\n  int x = 1\n}");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenAfter {
            token: "}".into(),
            previous: "1".into(),
            production: "variable declaration".into(),
        }
    );
    assert_eq!(error.get_position(), Position::new(3, 1));
}

#[test]
fn test_unexpected_end_of_file() {
    let error = parse_error("int main() {");

    assert_eq!(error.get_error_name(), "UnexpectedEndOfFile");
}

#[test]
fn test_committed_else_branch() {
    let error = parse_error("void f() { if (a) x = 1; else }");

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position(), Position::new(1, 31));
}
