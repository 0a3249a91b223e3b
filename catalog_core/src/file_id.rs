use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every parameter a storage driver might need, named so the catalog
/// and each access method agree on meaning without sharing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileIdKey {
    Temporary,
    Mounted,
    ReadOnly,
    FieldCount,
    KeyFieldCount,
    FieldType,
    FieldLength,
    FieldEncodingForm,
    FieldHint,
    FieldSortOrder,
    UniqueMode,
    FileHint,
    AreaPath,
    DatabaseId,
    TableId,
    FileId,
    /// Layout version, gates the `check_field_type` migration (§4.3).
    Version,
    /// Whether the File holds one row per object unconditionally
    /// (e.g. a configurable Vector) rather than only when its driver
    /// type always does (§4.3 "Vector: ... hasAllTuples configurable").
    AllTuples,
}

/// Key/value records carry an optional index for families keyed by
/// field position (`FieldType(3)`, `FieldLength(3)`, ...).
pub type IndexedKey = (FileIdKey, Option<u32>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileIdValue {
    Bool(bool),
    Int(i32),
    Int64(i64),
    Str(String),
    PathVec(Vec<String>),
}

impl FileIdValue {
    fn type_name(&self) -> &'static str {
        match self {
            FileIdValue::Bool(_) => "bool",
            FileIdValue::Int(_) => "int",
            FileIdValue::Int64(_) => "int64",
            FileIdValue::Str(_) => "str",
            FileIdValue::PathVec(_) => "path_vec",
        }
    }
}

/// Encoding form recorded for a string field; `Unknown` triggers the
/// `check_field_type` migration when the layout version is old.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingForm {
    Unknown,
    Utf8,
    Utf16,
}

/// An ordered dictionary describing everything a storage driver needs
/// to open itself (§4.1). Mutating a FileID on a persisted File is only
/// legitimate through `check_field_type`'s migration path (§3 invariant 7).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileId {
    values: BTreeMap<IndexedKey, FileIdValue>,
}

impl FileId {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_bool(&mut self, key: FileIdKey, v: bool) {
        self.values.insert((key, None), FileIdValue::Bool(v));
    }

    pub fn set_int(&mut self, key: FileIdKey, v: i32) {
        self.values.insert((key, None), FileIdValue::Int(v));
    }

    pub fn set_int64(&mut self, key: FileIdKey, v: i64) {
        self.values.insert((key, None), FileIdValue::Int64(v));
    }

    pub fn set_str(&mut self, key: FileIdKey, v: impl Into<String>) {
        self.values.insert((key, None), FileIdValue::Str(v.into()));
    }

    pub fn set_path_vec(&mut self, key: FileIdKey, v: Vec<String>) {
        self.values.insert((key, None), FileIdValue::PathVec(v));
    }

    pub fn set_bool_indexed(&mut self, key: FileIdKey, index: u32, v: bool) {
        self.values
            .insert((key, Some(index)), FileIdValue::Bool(v));
    }

    pub fn set_int_indexed(&mut self, key: FileIdKey, index: u32, v: i32) {
        self.values.insert((key, Some(index)), FileIdValue::Int(v));
    }

    pub fn set_str_indexed(&mut self, key: FileIdKey, index: u32, v: impl Into<String>) {
        self.values
            .insert((key, Some(index)), FileIdValue::Str(v.into()));
    }

    fn get(&self, key: FileIdKey, index: Option<u32>) -> Option<&FileIdValue> {
        self.values.get(&(key, index))
    }

    /// Missing key yields `Ok(None)`, never an error (§4.1 failure mode).
    /// A type mismatch on a present key is `InvalidFileId`.
    pub fn get_bool(&self, key: FileIdKey) -> Result<Option<bool>, CatalogError> {
        self.get_typed(key, None, "bool", |v| match v {
            FileIdValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: FileIdKey) -> Result<Option<i32>, CatalogError> {
        self.get_typed(key, None, "int", |v| match v {
            FileIdValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_int64(&self, key: FileIdKey) -> Result<Option<i64>, CatalogError> {
        self.get_typed(key, None, "int64", |v| match v {
            FileIdValue::Int64(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_str(&self, key: FileIdKey) -> Result<Option<&str>, CatalogError> {
        match self.get(key, None) {
            None => Ok(None),
            Some(FileIdValue::Str(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(CatalogError::InvalidFileId {
                key: format!("{:?}", key),
                actual: other.type_name(),
                requested: "str",
            }),
        }
    }

    pub fn get_path_vec(&self, key: FileIdKey) -> Result<Option<&[String]>, CatalogError> {
        match self.get(key, None) {
            None => Ok(None),
            Some(FileIdValue::PathVec(v)) => Ok(Some(v.as_slice())),
            Some(other) => Err(CatalogError::InvalidFileId {
                key: format!("{:?}", key),
                actual: other.type_name(),
                requested: "path_vec",
            }),
        }
    }

    pub fn get_int_indexed(&self, key: FileIdKey, index: u32) -> Result<Option<i32>, CatalogError> {
        self.get_typed(key, Some(index), "int", |v| match v {
            FileIdValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_str_indexed(&self, key: FileIdKey, index: u32) -> Result<Option<&str>, CatalogError> {
        match self.get(key, Some(index)) {
            None => Ok(None),
            Some(FileIdValue::Str(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(CatalogError::InvalidFileId {
                key: format!("{:?}[{}]", key, index),
                actual: other.type_name(),
                requested: "str",
            }),
        }
    }

    fn get_typed<T>(
        &self,
        key: FileIdKey,
        index: Option<u32>,
        requested: &'static str,
        extract: impl Fn(&FileIdValue) -> Option<T>,
    ) -> Result<Option<T>, CatalogError> {
        match self.get(key, index) {
            None => Ok(None),
            Some(v) => extract(v).map(Some).ok_or_else(|| CatalogError::InvalidFileId {
                key: format!("{:?}", key),
                actual: v.type_name(),
                requested,
            }),
        }
    }

    pub fn layout_version(&self) -> i32 {
        self.get_int(FileIdKey::Version).ok().flatten().unwrap_or(0)
    }

    pub fn set_layout_version(&mut self, version: i32) {
        self.set_int(FileIdKey::Version, version);
    }

    /// Structural equality, ignoring insertion order (it's a dictionary).
    pub fn equals(&self, other: &FileId) -> bool {
        self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_yields_none_not_error() {
        let fid = FileId::new();
        assert_eq!(fid.get_int(FileIdKey::FieldCount).unwrap(), None);
    }

    #[test]
    fn type_mismatch_is_invalid_file_id() {
        let mut fid = FileId::new();
        fid.set_bool(FileIdKey::Temporary, true);
        let err = fid.get_int(FileIdKey::Temporary).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidFileId { .. }));
    }

    #[test]
    fn indexed_family_keeps_positions_independent() {
        let mut fid = FileId::new();
        fid.set_int_indexed(FileIdKey::FieldType, 0, 1);
        fid.set_int_indexed(FileIdKey::FieldType, 1, 2);
        assert_eq!(fid.get_int_indexed(FileIdKey::FieldType, 0).unwrap(), Some(1));
        assert_eq!(fid.get_int_indexed(FileIdKey::FieldType, 1).unwrap(), Some(2));
    }

    #[test]
    fn equals_is_order_independent() {
        let mut a = FileId::new();
        a.set_bool(FileIdKey::Temporary, true);
        a.set_int(FileIdKey::FieldCount, 2);
        let mut b = FileId::new();
        b.set_int(FileIdKey::FieldCount, 2);
        b.set_bool(FileIdKey::Temporary, true);
        assert!(a.equals(&b));
    }

    #[test]
    fn serialize_then_deserialize_round_trips() {
        let mut fid = FileId::new();
        fid.set_path_vec(FileIdKey::AreaPath, vec!["/data/a".into()]);
        let json = serde_json::to_string(&fid).unwrap();
        let restored: FileId = serde_json::from_str(&json).unwrap();
        assert!(fid.equals(&restored));
    }
}
