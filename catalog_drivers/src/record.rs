use crate::migration::populate_common_file_id;
use catalog_core::{
    fetch_key_labels, CatalogError, File, FileId, FileIdKey, LogicalFile, Predicate,
    SkipInsertType, TransactionHandle,
};

/// A fixed-length, OID-keyed record file: the plain row-store access
/// method every Table's base data lands in when no other hint applies
/// (§4.3, grounded on `RecordFile.cpp`'s FIXED-hint default).
///
/// `compressed_fields` is storage telemetry only — a bitmask of which
/// positions this instance happened to pack below their declared
/// length on the last flush. It never changes a capability answer.
#[derive(Debug, Default)]
pub struct RecordFile {
    pub compressed_fields: u64,
}

impl LogicalFile for RecordFile {
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
        true
    }

    fn has_all_tuples(&self) -> bool {
        true
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }
}

impl RecordFile {
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
    use catalog_core::{Field, FieldSource, FileKind, ObjectId};

    fn sample_file() -> File {
        let mut file = File::new(
            ObjectId(1),
            ObjectId(2),
            ObjectId(100),
            FileKind::Record,
            Box::new(RecordFile::default()),
        );
        file.push_field(Field::new(
            ObjectId(3),
            ObjectId(1),
            ObjectId(100),
            0,
            FieldSource::ObjectId,
            catalog_core::ColumnType::BigInt,
        ));
        file
    }

    #[test]
    fn record_file_fetches_by_object_id_only() {
        let driver = RecordFile::default();
        let file = sample_file();
        assert!(driver.is_able_to_fetch());
        assert_eq!(
            driver.get_fetch_key(&file, &catalog_core::NullTransaction::read_write()),
            vec!["ObjectID".to_string()]
        );
        assert!(driver.is_key_unique());
        assert!(driver.has_all_tuples());
    }

    #[test]
    fn populate_file_id_reports_one_key_field() {
        let file = sample_file();
        let driver = RecordFile::default();
        let file_id = driver.populate_file_id(&file).unwrap();
        assert_eq!(file_id.get_int(FileIdKey::KeyFieldCount).unwrap(), Some(1));
        assert_eq!(file_id.get_int(FileIdKey::FieldCount).unwrap(), Some(1));
    }
}
