use crate::migration::populate_common_file_id;
use catalog_core::{
    fetch_key_labels, CatalogError, File, FileId, FileIdKey, FunctionField, LogicalFile,
    Predicate, SkipInsertType, TransactionHandle,
};

/// How a Btree enforces uniqueness (§4.3, confirmed against
/// `BtreeFile.h`'s `Uniqueness` enum): `None` keeps key and data fields
/// separate, `OnlyKey` makes the declared key columns alone unique,
/// `WithValue` folds the data fields into the key so the whole tuple is
/// unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Uniqueness {
    #[default]
    None,
    OnlyKey,
    WithValue,
}

/// The version from which Min/Max became projectable virtual fields
/// (§4.3: "adds two virtual min/max fields per first key if version ≥
/// 1").
const MIN_MAX_INTRODUCED_AT_VERSION: i32 = 1;

/// The ordered index access method: range predicates, ascending or
/// descending key order, and — once a File's layout version has been
/// migrated past the point the Min/Max projection was introduced —
/// virtual `Min`/`Max` function fields computed from the tree's
/// extremes rather than stored (§4.3, grounded on `BtreeFile.cpp`).
#[derive(Debug, Default)]
pub struct BtreeFile {
    pub uniqueness: Uniqueness,
}

impl LogicalFile for BtreeFile {
    fn is_able_to_fetch(&self) -> bool {
        true
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(
            predicate,
            Predicate::Equals { .. }
                | Predicate::NotEquals { .. }
                | Predicate::GreaterThan { .. }
                | Predicate::GreaterThanEquals { .. }
                | Predicate::LessThan { .. }
                | Predicate::LessThanEquals { .. }
                | Predicate::Between { .. }
                | Predicate::NotNull { .. }
                | Predicate::EqualsToNull { .. }
        )
    }

    fn is_able_to_sort(&self) -> bool {
        true
    }

    fn is_has_function_field(&self, function: FunctionField) -> bool {
        matches!(function, FunctionField::Min | FunctionField::Max)
    }

    fn get_fetch_key(&self, file: &File, _tx: &dyn TransactionHandle) -> Vec<String> {
        fetch_key_labels(&file.fields)
    }

    fn is_key_unique(&self) -> bool {
        self.uniqueness != Uniqueness::None
    }

    fn has_all_tuples(&self) -> bool {
        false
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }
}

impl BtreeFile {
    /// Min/Max are only projectable once the File's layout has been
    /// migrated to the version that introduced them; an older file
    /// reports them absent until `check_field_type` runs (§4.3).
    pub fn is_has_function_field_for(&self, file: &File, function: FunctionField) -> bool {
        file.file_id.layout_version() >= MIN_MAX_INTRODUCED_AT_VERSION
            && self.is_has_function_field(function)
    }

    /// `KeyFieldCount` counts every declared key field, plus the
    /// declared data fields too unless `uniqueness` is `OnlyKey`
    /// (`BtreeFile.cpp::setFileID`: `if (fields[i]->isKey()) ++k; else
    /// if (fields[i]->isData() && _uniqueness != OnlyKey) ++k;`). A
    /// field is a key field when it carries a `key_id`; any other
    /// non-virtual field is a data field.
    fn key_field_count(&self, file: &File) -> i32 {
        let mut k = 0;
        for field in &file.fields {
            if field.key_id.is_some() {
                k += 1;
            } else if !field.is_virtual() && self.uniqueness != Uniqueness::OnlyKey {
                k += 1;
            }
        }
        k
    }

    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_int(FileIdKey::KeyFieldCount, self.key_field_count(file));
        file_id.set_str(
            FileIdKey::UniqueMode,
            if self.uniqueness != Uniqueness::None {
                "KeyField"
            } else {
                "None"
            },
        );
        Ok(file_id)
    }
}
