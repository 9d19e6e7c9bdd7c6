/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program and global declaration nodes
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants
/// - types: Written type annotations
/// - visitor: The enter/recurse/leave traversal protocol
/// - cleanup: Removal of empty statements after parsing
pub mod ast;
pub mod cleanup;
pub mod expressions;
pub mod statements;
pub mod types;
pub mod visitor;

#[cfg(test)]
mod tests;
