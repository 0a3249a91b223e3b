use crate::migration::populate_common_file_id;
use catalog_core::{
    fetch_key_labels, CatalogError, File, FileId, FileIdKey, LogicalFile, Predicate,
    SkipInsertType, TransactionHandle,
};

/// An append-mostly file that allows duplicate key values — the one
/// difference from [`crate::RecordFile`] (§4.3, grounded on `HeapFile.cpp`).
#[derive(Debug, Default)]
pub struct HeapFile {
    pub compressed_fields: u64,
}

impl LogicalFile for HeapFile {
    fn is_able_to_fetch(&self) -> bool {
        true
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(predicate, Predicate::Equals { .. } | Predicate::NotNull { .. })
    }

    fn is_able_to_sort(&self) -> bool {
        false
    }

    fn get_fetch_key(&self, file: &File, _tx: &dyn TransactionHandle) -> Vec<String> {
        fetch_key_labels(&file.fields)
    }

    fn is_key_unique(&self) -> bool {
        false
    }

    fn has_all_tuples(&self) -> bool {
        true
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }
}

impl HeapFile {
    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_int(FileIdKey::KeyFieldCount, 1);
        file_id.set_bool(FileIdKey::Mounted, true);
        Ok(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Field, FieldSource, FileKind, NullTransaction, ObjectId};

    #[test]
    fn heap_file_allows_duplicate_keys() {
        let driver = HeapFile::default();
        assert!(!driver.is_key_unique());
        assert!(driver.has_all_tuples());
    }

    #[test]
    fn fetch_key_falls_back_to_object_id() {
        let mut file = File::new(
            ObjectId(1),
            ObjectId(2),
            ObjectId(100),
            FileKind::Heap,
            Box::new(HeapFile::default()),
        );
        file.push_field(Field::new(
            ObjectId(3),
            ObjectId(1),
            ObjectId(100),
            0,
            FieldSource::ObjectId,
            catalog_core::ColumnType::BigInt,
        ));
        let driver = HeapFile::default();
        assert_eq!(
            driver.get_fetch_key(&file, &NullTransaction::read_write()),
            vec!["ObjectID".to_string()]
        );
    }
}
