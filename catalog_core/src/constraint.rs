use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

/// A table-level constraint (§2). Carries the columns it covers so the
/// planner and the DDL layer can both answer "what does this enforce".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraint {
    pub object: SchemaObject,
    pub position: u32,
    pub kind: ConstraintKind,
    pub column_ids: Vec<ObjectId>,
    /// `Check` constraints carry the predicate text; otherwise empty.
    pub check_expression: Option<String>,
}

impl Constraint {
    pub fn new(
        id: ObjectId,
        table_id: ObjectId,
        database_id: ObjectId,
        name: Identifier,
        position: u32,
        kind: ConstraintKind,
        column_ids: Vec<ObjectId>,
    ) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(table_id),
                name,
                ObjectCategory::Constraint,
                Scope::Permanent,
                database_id,
            ),
            position,
            kind,
            column_ids,
            check_expression: None,
        }
    }
}
