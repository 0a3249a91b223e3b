use crate::migration::populate_common_file_id;
use catalog_core::{
    CatalogError, File, FileId, FileIdKey, LogicalFile, Predicate, SkipInsertType,
    TransactionHandle,
};

/// A minimal inverted-index driver: `Like` pushdown only, and the
/// result comes back as a bit set over posting lists rather than a row
/// scan. No `Score`/`Tf` function-field ranking — that belongs to a
/// richer full-text engine outside this kernel's scope (§4.3, grounded
/// on the `InvertedFile`/`FullTextFile` split in the original source).
#[derive(Debug, Default)]
pub struct InvertedFile;

impl LogicalFile for InvertedFile {
    fn is_able_to_fetch(&self) -> bool {
        false
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(predicate, Predicate::Like { .. })
    }

    fn is_able_to_get_by_bitset(&self) -> bool {
        true
    }

    fn is_able_to_sort(&self) -> bool {
        false
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

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::ValueIsNull
    }
}

impl InvertedFile {
    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_int(FileIdKey::KeyFieldCount, 0);
        Ok(file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_file_only_answers_like_predicates() {
        let driver = InvertedFile;
        assert!(driver.is_able_to_search(&Predicate::Like {
            field: "body".into(),
            pattern: "%rust%".into(),
        }));
        assert!(!driver.is_able_to_search(&Predicate::Equals {
            field: "body".into(),
            value: "x".into(),
        }));
        assert!(driver.is_able_to_get_by_bitset());
    }

    #[test]
    fn skips_rows_whose_indexed_value_is_null() {
        assert_eq!(InvertedFile.get_skip_insert_type(), SkipInsertType::ValueIsNull);
    }
}
