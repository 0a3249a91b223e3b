use crate::capability::LogicalFile;
use crate::error::CatalogError;
use crate::field::Field;
use crate::file_id::FileId;
use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use serde::{Deserialize, Serialize};

/// Which access method a File instance is backed by. Kept as a closed
/// tag (rather than relying solely on dynamic dispatch) so logging,
/// telemetry, and serialization never need to downcast the trait object
/// (§9: replace open polymorphism with a tagged variant wherever the
/// capability interface itself isn't the reason for the indirection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileKind {
    Record,
    Heap,
    Btree,
    Btree2,
    Vector,
    Vector2,
    Bitmap,
    Array,
    KdTree,
    FullText,
    FullText2,
    Inverted,
    Lob,
}

/// One row per physical access-method instance (§2 "File (abstract)").
///
/// `File` owns its `FileId` and its `Field`s; the capability answers
/// come from `driver`, a boxed `LogicalFile` supplied by whichever
/// `catalog_drivers` type matches `kind`.
pub struct File {
    pub object: SchemaObject,
    pub kind: FileKind,
    pub file_id: FileId,
    pub fields: Vec<Field>,
    pub driver: Box<dyn LogicalFile>,
}

impl File {
    pub fn new(
        id: ObjectId,
        table_id: ObjectId,
        database_id: ObjectId,
        kind: FileKind,
        driver: Box<dyn LogicalFile>,
    ) -> Self {
        Self {
            object: SchemaObject::new(
                id,
                Some(table_id),
                Identifier::new("").unwrap(),
                ObjectCategory::File,
                Scope::Permanent,
                database_id,
            ),
            kind,
            file_id: FileId::new(),
            fields: Vec::new(),
            driver,
        }
    }

    /// §3 invariant 2: a File has exactly one object-ID field, at
    /// position 0.
    pub fn check_oid_invariant(&self) -> Result<(), CatalogError> {
        match self.fields.first() {
            Some(f) if f.position == 0 && f.is_object_id() => Ok(()),
            _ => Err(CatalogError::MetaDatabaseCorrupted(format!(
                "file {:?} has no object-ID field at position 0",
                self.object.id
            ))),
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("object", &self.object)
            .field("kind", &self.kind)
            .field("file_id", &self.file_id)
            .field("fields", &self.fields)
            .finish()
    }
}
