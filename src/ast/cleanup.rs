use super::{
    ast::Program,
    statements::BlockStmt,
    visitor::{Accept, Visitor},
};

/// Drops `;` placeholders and blocks left with nothing in them.
///
/// Runs bottom-up, so a block that only held empty statements is itself
/// removed from its parent.
#[derive(Default)]
pub struct EmptyStatementRemover {
    pub removed: usize,
}

impl Visitor for EmptyStatementRemover {
    fn leave_block(&mut self, node: &mut BlockStmt, _last: bool) {
        let before = node.statements.len();
        node.statements.retain(|stmt| !stmt.is_empty());
        self.removed += before - node.statements.len();
    }
}

/// Prunes the program in place and returns how many statements were removed.
pub fn remove_empty_statements(program: &mut Program) -> usize {
    let mut remover = EmptyStatementRemover::default();
    program.accept(&mut remover, true);
    remover.removed
}
