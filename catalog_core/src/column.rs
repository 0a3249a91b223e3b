use crate::default_value::Default_;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use serde::{Deserialize, Serialize};

/// Column storage type, simplified to the set the File variants care
/// about for field-type migration and capability decisions (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int,
    BigInt,
    Float,
    Char(u32),
    VarChar(u32),
    /// No declared maximum length (`VARCHAR` without a length, `TEXT`).
    Unlimited,
    UniqueIdentifier,
    Binary(u32),
    Array,
}

impl ColumnType {
    pub fn is_string(&self) -> bool {
        matches!(
            self,
            ColumnType::Char(_) | ColumnType::VarChar(_) | ColumnType::Unlimited
        )
    }

    /// The column's own canonical length, used by `check_field_type`
    /// when rewriting a `UniqueIdentifier` field's length.
    pub fn canonical_length(&self) -> Option<u32> {
        match self {
            ColumnType::Char(n) | ColumnType::VarChar(n) | ColumnType::Binary(n) => Some(*n),
            ColumnType::UniqueIdentifier => Some(36),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ColumnFlags: u32 {
        const NULLABLE = 1 << 0;
        const HIDDEN = 1 << 1;
    }
}

/// A typed attribute of a Table (§2 "Column/Key/Field/Constraint").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub object: SchemaObject,
    pub position: u32,
    pub column_type: ColumnType,
    pub default: Option<Default_>,
    pub flags: ColumnFlags,
}

impl Column {
    pub fn new(
        id: ObjectId,
        table_id: ObjectId,
        database_id: ObjectId,
        name: crate::identifier::Identifier,
        position: u32,
        column_type: ColumnType,
    ) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(table_id),
                name,
                ObjectCategory::Column,
                Scope::Permanent,
                database_id,
            ),
            position,
            column_type,
            default: None,
            flags: ColumnFlags::NULLABLE,
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.flags.contains(ColumnFlags::NULLABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Identifier;

    #[test]
    fn ten_thousand_columns_get_consecutive_positions() {
        let columns: Vec<Column> = (0..10_000)
            .map(|i| {
                Column::new(
                    ObjectId(i as i64 + 1),
                    ObjectId(1),
                    ObjectId(100),
                    Identifier::new(format!("c{}", i)).unwrap(),
                    i as u32,
                    ColumnType::Int,
                )
            })
            .collect();
        for (i, c) in columns.iter().enumerate() {
            assert_eq!(c.position, i as u32);
        }
    }
}
