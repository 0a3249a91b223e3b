use crate::column::ColumnType;
use crate::file_id::EncodingForm;
use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use serde::{Deserialize, Serialize};

/// Virtual/function fields a File can project without storing them as
/// user columns (§2, §4.2 "function field").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FunctionField {
    Min,
    Max,
    Count,
    Score,
    Tf,
    NeighborId,
    NeighborDistance,
    ClusterId,
    ClusterKeyword,
}

/// What a Field projects: a stored Column, an object-ID, or a
/// function-field computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldSource {
    ObjectId,
    Column(ObjectId),
    Function(FunctionField),
}

/// Ascending/descending order a Btree-like File stores a key field in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// The projection of a Column into one File (§2 glossary: "Field").
///
/// Distinct from Column because the same Column may project
/// differently (different length/encoding) into multiple indexes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub object: SchemaObject,
    pub position: u32,
    pub source: FieldSource,
    pub field_type: ColumnType,
    /// Stored length in the FileID sense: character count for fixed
    /// types, byte count once `check_field_type` has rewritten it.
    pub length: u32,
    pub encoding_form: EncodingForm,
    pub sort_order: SortOrder,
    pub key_id: Option<ObjectId>,
}

impl Field {
    pub fn new(
        id: ObjectId,
        file_id: ObjectId,
        database_id: ObjectId,
        position: u32,
        source: FieldSource,
        field_type: ColumnType,
    ) -> Self {
        let length = field_type.canonical_length().unwrap_or(0);
        Self {
            object: SchemaObject::new(
                id,
                Some(file_id),
                Identifier::new("").unwrap(),
                ObjectCategory::Field,
                Scope::Permanent,
                database_id,
            ),
            position,
            source,
            field_type,
            length,
            encoding_form: EncodingForm::Unknown,
            sort_order: SortOrder::Ascending,
            key_id: None,
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self.source, FieldSource::Function(_))
    }

    pub fn is_object_id(&self) -> bool {
        matches!(self.source, FieldSource::ObjectId)
    }

    /// A schema-derived label for this field: which column it projects,
    /// or that it's the object-ID, rather than a caller-supplied name
    /// (Fields themselves carry no name — only the Column they
    /// project does).
    fn fetch_key_label(&self) -> String {
        match self.source {
            FieldSource::ObjectId => "ObjectID".to_string(),
            FieldSource::Column(id) => format!("Column#{}", id.0),
            FieldSource::Function(function) => format!("{function:?}"),
        }
    }
}

/// The ordered field list `LogicalFile::get_fetch_key` returns for any
/// driver whose fetch key is "the declared key fields, or the object-ID
/// field if none are declared" (§4.2: "the ordered field list
/// `isAbleToFetch` consumes" — derived from the File's actual Fields,
/// never a placeholder disconnected from the table's real columns).
pub fn fetch_key_labels(fields: &[Field]) -> Vec<String> {
    let mut key_fields: Vec<&Field> = fields.iter().filter(|f| f.key_id.is_some()).collect();
    if key_fields.is_empty() {
        key_fields = fields.iter().filter(|f| f.is_object_id()).collect();
    }
    key_fields.sort_by_key(|f| f.position);
    key_fields.iter().map(|f| f.fetch_key_label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectId;

    fn oid_field() -> Field {
        Field::new(ObjectId(1), ObjectId(2), ObjectId(100), 0, FieldSource::ObjectId, ColumnType::BigInt)
    }

    #[test]
    fn falls_back_to_object_id_when_no_key_fields_are_declared() {
        let fields = vec![oid_field()];
        assert_eq!(fetch_key_labels(&fields), vec!["ObjectID".to_string()]);
    }

    #[test]
    fn prefers_declared_key_fields_in_position_order() {
        let oid = oid_field();
        let mut key_at_position_one = Field::new(
            ObjectId(3),
            ObjectId(2),
            ObjectId(100),
            1,
            FieldSource::Column(ObjectId(10)),
            ColumnType::Int,
        );
        key_at_position_one.key_id = Some(ObjectId(20));
        let mut key_at_position_two = Field::new(
            ObjectId(4),
            ObjectId(2),
            ObjectId(100),
            2,
            FieldSource::Column(ObjectId(11)),
            ColumnType::Int,
        );
        key_at_position_two.key_id = Some(ObjectId(21));
        let fields = vec![oid, key_at_position_two, key_at_position_one];
        assert_eq!(
            fetch_key_labels(&fields),
            vec!["Column#10".to_string(), "Column#11".to_string()]
        );
    }
}
