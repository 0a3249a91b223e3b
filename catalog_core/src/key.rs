use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use serde::{Deserialize, Serialize};

/// One ordered (Column, Field) pair backing an Index (§3 invariant 3:
/// "A Key references a Column through a Field").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub object: SchemaObject,
    pub position: u32,
    pub column_id: ObjectId,
    pub field_id: ObjectId,
}

impl Key {
    pub fn new(
        id: ObjectId,
        index_id: ObjectId,
        database_id: ObjectId,
        position: u32,
        column_id: ObjectId,
        field_id: ObjectId,
    ) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(index_id),
                crate::identifier::Identifier::new("").unwrap(),
                ObjectCategory::Key,
                Scope::Permanent,
                database_id,
            ),
            position,
            column_id,
            field_id,
        }
    }
}
