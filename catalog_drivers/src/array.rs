use crate::migration::populate_common_file_id;
use catalog_core::{
    CatalogError, File, FileId, FileIdKey, LogicalFile, Predicate, SkipInsertType,
    TransactionHandle,
};

/// An index over array-typed columns: flat comparison predicates only,
/// no boolean combinators (an array membership test doesn't compose the
/// way a bitmap's per-row flag does) (§4.3, grounded on `ArrayFile.cpp`).
#[derive(Debug, Default)]
pub struct ArrayFile;

impl LogicalFile for ArrayFile {
    fn is_able_to_fetch(&self) -> bool {
        false
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
        )
    }

    fn is_able_to_get_by_bitset(&self) -> bool {
        true
    }

    fn is_able_to_search_by_bitset(&self) -> bool {
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
        true
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }
}

impl ArrayFile {
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
    fn array_file_rejects_boolean_combinators() {
        let driver = ArrayFile;
        let combinator = Predicate::And(
            Box::new(Predicate::Equals {
                field: "a".into(),
                value: "1".into(),
            }),
            Box::new(Predicate::Equals {
                field: "b".into(),
                value: "2".into(),
            }),
        );
        assert!(!driver.is_able_to_search(&combinator));
        assert!(driver.is_able_to_search(&Predicate::Between {
            field: "a".into(),
            low: "1".into(),
            high: "9".into(),
        }));
    }

    #[test]
    fn array_file_always_reports_all_tuples_and_bitset_search() {
        let driver = ArrayFile;
        assert!(driver.has_all_tuples());
        assert!(driver.is_able_to_search_by_bitset());
    }
}
