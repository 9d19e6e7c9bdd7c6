//! End-to-end tests driving the whole pipeline from source text to either an
//! annotated program or a list of diagnostics.

use scriptc::{
    ast::{ast::GlobalStmt, expressions::Expr, statements::Stmt},
    pipeline::{compile_source, Compilation},
};

const SAMPLE: &str = r#"
// Running totals over an array.
int total;
float scale;

int sum(int[] values, int count) {
    int i = 0;
    int acc = 0;
    while (i < count) {
        acc = acc + values[i];
        i = i + 1;
        if (acc > 1000) break;
    }
    return acc;
}

bool is_even(int n) {
    return n % 2 == 0;
}

void report(string label, int value) {
    string line = label + ": " + value;
    print(line);
}

void print(string text) { }

void main(int[] data) {
    /* the empty statements below are dropped */
    ;
    total = sum(data, 10);
    if (is_even(total)) {
        report("even", total);
    } else {
        report("odd", -total);
    }
    scale = 1.5 * 2.0;
}
"#;

fn error_names(compilation: &Compilation) -> Vec<&str> {
    compilation
        .diagnostics
        .iter()
        .map(|e| e.get_error_name())
        .collect()
}

#[test]
fn test_sample_program_compiles() {
    let compilation = compile_source(SAMPLE);

    assert!(compilation.is_success(), "{:?}", compilation.diagnostics);
    let artifact = compilation.artifact.expect("artifact for a clean compile");
    assert_eq!(artifact.program.globals.len(), 7);

    let dump = artifact.symbols.dump(&artifact.types);
    assert!(dump.contains(&String::from("global.int sum( values : int[], count : int, )")));
    assert!(dump.contains(&String::from("global.total : int")));
    assert!(dump.contains(&String::from("global.is_even.n : int")));
}

#[test]
fn test_empty_statements_are_removed() {
    let compilation = compile_source(SAMPLE);
    let artifact = compilation.artifact.expect("artifact for a clean compile");

    let main = artifact
        .program
        .globals
        .iter()
        .find_map(|global| match global {
            GlobalStmt::Function(f) if f.name.value == "main" => Some(f),
            _ => None,
        })
        .expect("main is defined");
    assert!(main
        .body
        .statements
        .iter()
        .all(|stmt| !matches!(stmt, Stmt::Empty(_))));
    assert_eq!(main.body.statements.len(), 3);
}

#[test]
fn test_numeric_literals_keep_their_value() {
    let compilation = compile_source("void f() { int a = 42; float b = 2.25; }");
    let artifact = compilation.artifact.expect("artifact for a clean compile");

    let statements = match &artifact.program.globals[0] {
        GlobalStmt::Function(f) => &f.body.statements,
        GlobalStmt::Variable(_) => panic!("expected a function"),
    };
    match &statements[0] {
        Stmt::VarDecl(decl) => match decl.initializer.as_ref() {
            Some(Expr::Int(literal)) => assert_eq!(literal.value, 42),
            other => panic!("expected an integer literal, got {:?}", other),
        },
        other => panic!("expected a declaration, got {:?}", other.get_stmt_type()),
    }
    match &statements[1] {
        Stmt::VarDecl(decl) => match decl.initializer.as_ref() {
            Some(Expr::Float(literal)) => assert_eq!(literal.value, 2.25),
            other => panic!("expected a float literal, got {:?}", other),
        },
        other => panic!("expected a declaration, got {:?}", other.get_stmt_type()),
    }
}

#[test]
fn test_recompiling_is_idempotent() {
    let first = compile_source(SAMPLE);
    let second = compile_source(SAMPLE);

    assert!(first.diagnostics.is_empty());
    assert!(second.diagnostics.is_empty());
    assert_eq!(
        first.artifact.map(|a| a.program),
        second.artifact.map(|a| a.program)
    );
}

#[test]
fn test_lexical_error_stops_pipeline() {
    let source = "void f() {\n  int x = 12abc;\n}";
    let compilation = compile_source(source);

    assert_eq!(error_names(&compilation), vec!["InvalidNumberSuffix"]);
    assert!(compilation.tokens.is_empty());
    assert!(compilation.artifact.is_none());

    let rendered = compilation.render(source, "bad.sc");
    let lines: Vec<&str> = rendered[0].lines().collect();
    assert_eq!(lines[1], "-> bad.sc:2:13");
    assert_eq!(lines[4], "2 |   int x = 12abc;");
    assert_eq!(lines[5], "  | ------------^");
}

#[test]
fn test_integer_overflow_is_reported() {
    let source = "void f() {\n  int x = 99999999999999999999;\n}";
    let compilation = compile_source(source);

    assert_eq!(error_names(&compilation), vec!["NumberParseError"]);
    assert!(compilation.artifact.is_none());

    let rendered = compilation.render(source, "big.sc");
    let lines: Vec<&str> = rendered[0].lines().collect();
    assert_eq!(lines[1], "-> big.sc:2:11");
    assert_eq!(lines[4], "2 |   int x = 99999999999999999999;");
}

#[test]
fn test_syntax_error_is_reported_once() {
    let source = "int main() {\n  int x = 1\n  return x;\n}";
    let compilation = compile_source(source);

    assert_eq!(error_names(&compilation), vec!["UnexpectedToken"]);
    assert!(compilation.artifact.is_none());

    let rendered = compilation.render(source, "main.sc");
    let lines: Vec<&str> = rendered[0].lines().collect();
    assert_eq!(
        lines[0],
        "Error: UnexpectedToken (did you miss a semicolon or a bracket?)"
    );
    assert_eq!(lines[1], "-> main.sc:3:3");
    assert_eq!(lines[4], "3 | return x ;");
    assert_eq!(lines[5], "  | ^");
}

#[test]
fn test_declaration_errors_block_checking() {
    // `y` is unknown, but the redeclaration stops the pipeline first.
    let compilation = compile_source("void f() { int x; int x; x = y; }");

    assert_eq!(error_names(&compilation), vec!["VariableAlreadyDeclared"]);
}

#[test]
fn test_semantic_errors_accumulate() {
    let compilation = compile_source(
        "int add(int a, int b) { return a + b; }
         void main() {
             bool b;
             int i;
             b = i;
             int r = add(1);
             r = add(1, true);
             undefined = 3;
             string s = \"a\" + 1;
         }",
    );

    assert_eq!(
        error_names(&compilation),
        vec![
            "TypeMatchError",
            "ArgumentCountMismatch",
            "ArgumentTypeMatchError",
            "UnknownSymbol",
        ]
    );
    assert!(compilation.artifact.is_none());
}

#[test]
fn test_scoping_rules() {
    assert!(compile_source("void f(int x) { { int x; x = 1; } x = 2; }").is_success());
    assert!(compile_source("int f(int n) { int m = n; return m + n; }").is_success());

    let compilation = compile_source("void f() { x = 1; int x; }");
    assert_eq!(error_names(&compilation), vec!["UsedBeforeDeclaration"]);
}

#[test]
fn test_break_binds_to_innermost_loop() {
    assert!(compile_source(
        "void f() { while (true) { while (false) { break; } break; } }"
    )
    .is_success());

    let compilation = compile_source("void f() { if (true) break; }");
    assert_eq!(error_names(&compilation), vec!["BreakOutsideLoop"]);
}
