use crate::{lexer::tokens::Token, type_checker::type_table::TypeId};

/// A written type annotation: `int` or `int[]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub name: String,
    pub is_array: bool,
    pub token: Token,
    pub resolved: Option<TypeId>,
}

impl TypeNode {
    pub fn new(token: Token, is_array: bool) -> Self {
        TypeNode {
            name: token.value.clone(),
            is_array,
            token,
            resolved: None,
        }
    }

    /// Name as registered in the type table.
    pub fn full_name(&self) -> String {
        if self.is_array {
            format!("{}[]", self.name)
        } else {
            self.name.clone()
        }
    }
}
