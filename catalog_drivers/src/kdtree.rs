use crate::migration::populate_common_file_id;
use catalog_core::{
    CatalogError, File, FileId, FileIdKey, FunctionField, LogicalFile, Predicate, SkipInsertType,
    TransactionHandle,
};

/// A multidimensional nearest-neighbor index: the only File variant
/// that answers `NeighborIn`, and the only one that skips rows whose
/// first key component is null rather than indexing them (§4.3,
/// grounded on `KdTreeFile.cpp`).
#[derive(Debug, Default)]
pub struct KdTreeFile;

impl LogicalFile for KdTreeFile {
    fn is_able_to_fetch(&self) -> bool {
        false
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(predicate, Predicate::NeighborIn { .. })
    }

    fn is_able_to_sort(&self) -> bool {
        true
    }

    fn is_has_function_field(&self, function: FunctionField) -> bool {
        matches!(
            function,
            FunctionField::NeighborId | FunctionField::NeighborDistance
        )
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::FirstKeyIsNull
    }

    fn get_fetch_key(&self, _file: &File, _tx: &dyn TransactionHandle) -> Vec<String> {
        Vec::new()
    }

    fn is_key_unique(&self) -> bool {
        false
    }

    fn has_all_tuples(&self) -> bool {
        false
    }
}

impl KdTreeFile {
    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_bool(FileIdKey::Mounted, true);
        Ok(file_id)
    }
}
