use crate::column::Column;
use crate::constraint::Constraint;
use crate::file::File;
use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use std::sync::atomic::AtomicI64;

/// Groups columns, constraints, indexes, and files (§2 "Table / Index").
pub struct Table {
    pub object: SchemaObject,
    pub columns: Vec<Column>,
    pub constraints: Vec<Constraint>,
    pub indexes: Vec<Index>,
    pub files: Vec<File>,
    id_sequence: AtomicI64,
}

impl Table {
    pub fn new(id: ObjectId, database_id: ObjectId, name: Identifier, first_child_id: i64) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(database_id),
                name,
                ObjectCategory::Table,
                Scope::Permanent,
                database_id,
            ),
            columns: Vec::new(),
            constraints: Vec::new(),
            indexes: Vec::new(),
            files: Vec::new(),
            id_sequence: AtomicI64::new(first_child_id),
        }
    }

    /// Reassemble a table from its stored parts (melt path); bypasses
    /// `new`'s empty-children defaults since the parts already carry a
    /// full child graph.
    pub fn from_parts(
        object: SchemaObject,
        id_sequence: i64,
        columns: Vec<Column>,
        constraints: Vec<Constraint>,
        indexes: Vec<Index>,
        files: Vec<File>,
    ) -> Self {
        Self {
            object,
            columns,
            constraints,
            indexes,
            files,
            id_sequence: AtomicI64::new(id_sequence),
        }
    }

    pub fn next_child_id(&self) -> ObjectId {
        ObjectId::next_in_sequence(&self.id_sequence)
    }

    pub fn id_sequence_value(&self) -> i64 {
        self.id_sequence.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// §3 invariant 1: names unique within parent scope, case-sensitive.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.object.name.as_str() == name)
    }

    pub fn add_column(&mut self, column: Column) -> Result<(), crate::error::CatalogError> {
        if self.column_by_name(column.object.name.as_str()).is_some() {
            return Err(crate::error::CatalogError::BadArgument(format!(
                "duplicate column name {:?} in table {:?}",
                column.object.name,
                self.object.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }
}

/// An Index owns Keys and references exactly one File (§3 relationships).
pub struct Index {
    pub object: SchemaObject,
    pub keys: Vec<crate::key::Key>,
    pub file_id: ObjectId,
}

impl Index {
    pub fn new(id: ObjectId, table_id: ObjectId, database_id: ObjectId, name: Identifier, file_id: ObjectId) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(table_id),
                name,
                ObjectCategory::Index,
                Scope::Permanent,
                database_id,
            ),
            keys: Vec::new(),
            file_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    #[test]
    fn duplicate_column_names_are_rejected_case_sensitively() {
        let mut table = Table::new(ObjectId(1), ObjectId(100), Identifier::new("t").unwrap(), 2);
        table
            .add_column(Column::new(
                table.next_child_id(),
                ObjectId(1),
                ObjectId(100),
                Identifier::new("Id").unwrap(),
                0,
                ColumnType::Int,
            ))
            .unwrap();
        // Same spelling is rejected...
        let dup_err = table.add_column(Column::new(
            table.next_child_id(),
            ObjectId(1),
            ObjectId(100),
            Identifier::new("Id").unwrap(),
            1,
            ColumnType::Int,
        ));
        assert!(dup_err.is_err());
        // ...but a different case is a distinct name (case-sensitive).
        table
            .add_column(Column::new(
                table.next_child_id(),
                ObjectId(1),
                ObjectId(100),
                Identifier::new("id").unwrap(),
                1,
                ColumnType::Int,
            ))
            .unwrap();
        assert_eq!(table.columns.len(), 2);
    }
}
