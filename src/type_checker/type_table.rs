use std::collections::HashMap;

/// Handle to a registered type. Two types are the same type exactly when their
/// ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct TypeInfo {
    pub name: String,
    pub size: u32,
    pub is_array: bool,
    /// Element type of an array type.
    pub element: Option<TypeId>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    types: Vec<TypeInfo>,
    lookup: HashMap<String, TypeId>,
}

pub const VOID: &str = "void";
pub const INT: &str = "int";
pub const FLOAT: &str = "float";
pub const BOOL: &str = "bool";
pub const STRING: &str = "string";

impl TypeTable {
    pub fn new() -> Self {
        TypeTable::default()
    }

    /// The built-in types: `void int float bool string` and an array form of
    /// every non-void primitive.
    pub fn with_primitives() -> Self {
        let mut table = TypeTable::new();
        table.add(VOID, 0);

        for (name, size) in [(INT, 4), (FLOAT, 4), (BOOL, 1), (STRING, 4)] {
            let element = table.add(name, size);
            table.add_array(element);
        }

        table
    }

    /// Registers a scalar type. Re-adding an existing name returns the old id.
    pub fn add(&mut self, name: &str, size: u32) -> TypeId {
        self.insert(TypeInfo {
            name: name.to_string(),
            size,
            is_array: false,
            element: None,
        })
    }

    /// Registers `element[]`. Arrays are references, so they share the pointer size.
    pub fn add_array(&mut self, element: TypeId) -> TypeId {
        let name = format!("{}[]", self.info(element).name);
        self.insert(TypeInfo {
            name,
            size: 4,
            is_array: true,
            element: Some(element),
        })
    }

    fn insert(&mut self, info: TypeInfo) -> TypeId {
        if let Some(id) = self.lookup.get(&info.name) {
            return *id;
        }

        let id = TypeId(self.types.len());
        self.lookup.insert(info.name.clone(), id);
        self.types.push(info);
        id
    }

    pub fn get(&self, name: &str) -> Option<TypeId> {
        self.lookup.get(name).copied()
    }

    pub fn info(&self, id: TypeId) -> &TypeInfo {
        &self.types[id.0]
    }

    pub fn name(&self, id: TypeId) -> &str {
        &self.info(id).name
    }

    pub fn element_of(&self, id: TypeId) -> Option<TypeId> {
        self.info(id).element
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
