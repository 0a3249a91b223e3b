use crate::migration::populate_common_file_id;
use catalog_core::{
    CatalogError, File, FileId, FileIdKey, LogicalFile, Predicate, SkipInsertType,
    TransactionHandle,
};

/// A bitmap index: every comparison predicate plus boolean combinators,
/// always returnable as a bit set since one bitmap word covers every
/// row regardless of selectivity (§4.3, grounded on `BitmapFile.cpp`).
#[derive(Debug, Default)]
pub struct BitmapFile;

impl LogicalFile for BitmapFile {
    fn is_able_to_fetch(&self) -> bool {
        false
    }

    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::And(l, r) | Predicate::Or(l, r) => {
                self.is_able_to_search(l) && self.is_able_to_search(r)
            }
            Predicate::Like { .. } | Predicate::NeighborIn { .. } => false,
            _ => true,
        }
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

impl BitmapFile {
    pub fn populate_file_id(&self, file: &File) -> Result<FileId, CatalogError> {
        let mut file_id = populate_common_file_id(file);
        file_id.set_int(FileIdKey::KeyFieldCount, 0);
        file_id.set_bool(FileIdKey::Mounted, true);
        Ok(file_id)
    }
}
