use crate::migration::populate_common_file_id;
use catalog_core::{
    fetch_key_labels, CatalogError, File, FileId, FileIdKey, FunctionField, LogicalFile,
    Predicate, SkipInsertType, TransactionHandle,
};

/// A unique-keyed vector index projecting a virtual `Count` function
/// field — the row count of its own extent — rather than storing it.
/// `has_all_tuples` is a constructor-time choice, not a fixed trait of
/// the access method (§4.3, grounded on `VectorFile.cpp`'s
/// `m_bHasAllTuples` constructor parameter).
#[derive(Debug, Default)]
pub struct VectorFile {
    pub has_all_tuples: bool,
}

impl LogicalFile for VectorFile {
    fn is_able_to_fetch(&self) -> bool {
        true
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(predicate, Predicate::NeighborIn { .. } | Predicate::Equals { .. })
    }

    fn is_able_to_sort(&self) -> bool {
        false
    }

    fn is_has_function_field(&self, function: FunctionField) -> bool {
        matches!(function, FunctionField::Count)
    }

    fn get_fetch_key(&self, file: &File, _tx: &dyn TransactionHandle) -> Vec<String> {
        fetch_key_labels(&file.fields)
    }

    fn is_key_unique(&self) -> bool {
        true
    }

    fn has_all_tuples(&self) -> bool {
        self.has_all_tuples
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        // A row whose first key is null is skipped unless every row is
        // kept regardless (`VectorFile.cpp::getSkipInsertType`).
        if self.has_all_tuples {
            SkipInsertType::None
        } else {
            SkipInsertType::FirstKeyIsNull
        }
    }
}

impl VectorFile {
    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_int(FileIdKey::KeyFieldCount, 1);
        file_id.set_str(FileIdKey::UniqueMode, "KeyField");
        file_id.set_bool(FileIdKey::AllTuples, self.has_all_tuples);
        Ok(file_id)
    }
}
