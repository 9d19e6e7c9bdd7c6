//! The compile pipeline: lex, parse, clean up, declaration pass, checking pass.
//!
//! Every stage runs to completion before the next one starts. A lexical or
//! syntax error stops the pipeline at once; a semantic pass reports all of its
//! errors and then stops the pipeline if there were any.

use std::{fs, io, path::Path, time::Instant};

use tracing::{debug, info};

use crate::{
    ast::{ast::Program, cleanup::remove_empty_statements},
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::Token},
    parser::parser::parse,
    render_diagnostic, render_lexical_error,
    type_checker::{
        first_pass::first_pass, scope::SymbolTable, second_pass::second_pass,
        type_table::TypeTable,
    },
};

/// Output of a clean compilation, handed to downstream consumers.
#[derive(Debug)]
pub struct Artifact {
    /// The tree with every name bound and every checked expression typed.
    pub program: Program,
    pub symbols: SymbolTable,
    pub types: TypeTable,
}

#[derive(Debug)]
pub struct Compilation {
    /// Empty when lexing failed.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Error>,
    /// Present only when no stage reported anything.
    pub artifact: Option<Artifact>,
}

impl Compilation {
    fn failed(tokens: Vec<Token>, diagnostics: Vec<Error>) -> Self {
        Compilation {
            tokens,
            diagnostics,
            artifact: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Every diagnostic rendered with its source line and caret.
    pub fn render(&self, source: &str, file: &str) -> Vec<String> {
        self.diagnostics
            .iter()
            .map(|error| {
                if error.is_lexical() {
                    render_lexical_error(error, source, file)
                } else {
                    render_diagnostic(error, &self.tokens, file)
                }
            })
            .collect()
    }
}

pub fn compile_source(source: &str) -> Compilation {
    let start = Instant::now();

    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => return Compilation::failed(vec![], vec![error]),
    };
    debug!(elapsed = ?start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let mut program = match parse(&tokens) {
        Ok(program) => program,
        Err(error) => return Compilation::failed(tokens, vec![error]),
    };
    let removed = remove_empty_statements(&mut program);
    debug!(elapsed = ?parse_start.elapsed(), removed, "parsed");

    let types = TypeTable::with_primitives();
    let mut symbols = SymbolTable::new();

    let pass_start = Instant::now();
    let errors = first_pass(&mut program, &types, &mut symbols);
    debug!(
        elapsed = ?pass_start.elapsed(),
        symbols = symbols.symbol_count(),
        scopes = symbols.scope_count(),
        types = types.type_count(),
        errors = errors.len(),
        "declaration pass finished"
    );
    if !errors.is_empty() {
        return Compilation::failed(tokens, errors);
    }

    let pass_start = Instant::now();
    let errors = second_pass(&mut program, &types, &symbols);
    debug!(
        elapsed = ?pass_start.elapsed(),
        errors = errors.len(),
        "checking pass finished"
    );
    if !errors.is_empty() {
        return Compilation::failed(tokens, errors);
    }

    info!(elapsed = ?start.elapsed(), "compiled");
    Compilation {
        tokens,
        diagnostics: vec![],
        artifact: Some(Artifact {
            program,
            symbols,
            types,
        }),
    }
}

/// Reads `path` whole and compiles it. Returns the source alongside the
/// result so diagnostics can be rendered.
pub fn compile_file(path: &Path) -> io::Result<(String, Compilation)> {
    let source = fs::read_to_string(path)?;
    let compilation = compile_source(&source);
    Ok((source, compilation))
}
