use crate::capability::Capability;
use crate::error::CatalogError;
use crate::file_id::FileId;
use crate::transaction::TransactionHandle;
use std::time::SystemTime;

/// A tuple of opaque, already-encoded field values flowing across the
/// driver boundary. The physical page layout of any one access method
/// is out of scope (§1); this is the narrowest shared shape that lets
/// the catalog exercise the lifecycle/DML contract in tests.
pub type Tuple = Vec<Vec<u8>>;

/// Full lifecycle + DML surface every access method implements (§6).
///
/// This is the contract the planner and recovery code call through;
/// `catalog_drivers` provides one implementation per `FileKind`.
pub trait LogicalFileDriver: Send + Sync {
    fn create(&mut self, file_id: &FileId) -> Result<(), CatalogError>;
    fn destroy(&mut self) -> Result<(), CatalogError>;
    fn mount(&mut self) -> Result<(), CatalogError>;
    fn unmount(&mut self) -> Result<(), CatalogError>;
    fn flush(&mut self) -> Result<(), CatalogError>;
    fn start_backup(&mut self, restorable: bool) -> Result<(), CatalogError>;
    fn end_backup(&mut self) -> Result<(), CatalogError>;
    fn recover(&mut self, point_in_time: Option<SystemTime>) -> Result<(), CatalogError>;
    fn restore(&mut self, point_in_time: Option<SystemTime>) -> Result<(), CatalogError>;
    /// Reports whether the sync left anything incomplete and whether
    /// any data was modified during the pass.
    fn sync(&mut self) -> Result<(bool, bool), CatalogError>;

    fn insert(&mut self, tx: &dyn TransactionHandle, tuple: Tuple) -> Result<(), CatalogError>;
    fn update(
        &mut self,
        tx: &dyn TransactionHandle,
        key: Tuple,
        tuple: Tuple,
    ) -> Result<(), CatalogError>;
    fn delete(&mut self, tx: &dyn TransactionHandle, key: Tuple) -> Result<(), CatalogError>;
    fn fetch(&self, tx: &dyn TransactionHandle, key: Tuple) -> Result<Option<Tuple>, CatalogError>;
    fn scan(&self, tx: &dyn TransactionHandle) -> Result<Vec<Tuple>, CatalogError>;
    fn search(
        &self,
        tx: &dyn TransactionHandle,
        predicate: &crate::capability::Predicate,
    ) -> Result<Vec<Tuple>, CatalogError>;
    fn search_by_bitset(
        &self,
        tx: &dyn TransactionHandle,
        input: &[u64],
    ) -> Result<Vec<u64>, CatalogError>;
    fn get_by_bitset(&self, tx: &dyn TransactionHandle) -> Result<Vec<u64>, CatalogError>;

    fn is_able_to(&self, capability: Capability) -> bool;

    /// Storage telemetry: approximate on-disk size in bytes.
    fn get_size(&self) -> u64;
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// An in-memory driver good enough to exercise the lifecycle/DML
    /// contract in tests without a real storage engine.
    pub struct InMemoryDriver {
        rows: Mutex<BTreeMap<Vec<u8>, Tuple>>,
        mounted: bool,
    }

    impl Default for InMemoryDriver {
        fn default() -> Self {
            Self {
                rows: Mutex::new(BTreeMap::new()),
                mounted: false,
            }
        }
    }

    impl LogicalFileDriver for InMemoryDriver {
        fn create(&mut self, _file_id: &FileId) -> Result<(), CatalogError> {
            self.mounted = true;
            Ok(())
        }
        fn destroy(&mut self) -> Result<(), CatalogError> {
            self.rows.lock().unwrap().clear();
            Ok(())
        }
        fn mount(&mut self) -> Result<(), CatalogError> {
            self.mounted = true;
            Ok(())
        }
        fn unmount(&mut self) -> Result<(), CatalogError> {
            self.mounted = false;
            Ok(())
        }
        fn flush(&mut self) -> Result<(), CatalogError> {
            Ok(())
        }
        fn start_backup(&mut self, _restorable: bool) -> Result<(), CatalogError> {
            Ok(())
        }
        fn end_backup(&mut self) -> Result<(), CatalogError> {
            Ok(())
        }
        fn recover(&mut self, _point_in_time: Option<SystemTime>) -> Result<(), CatalogError> {
            Ok(())
        }
        fn restore(&mut self, _point_in_time: Option<SystemTime>) -> Result<(), CatalogError> {
            Ok(())
        }
        fn sync(&mut self) -> Result<(bool, bool), CatalogError> {
            Ok((false, false))
        }
        fn insert(&mut self, _tx: &dyn TransactionHandle, tuple: Tuple) -> Result<(), CatalogError> {
            let key = tuple.first().cloned().unwrap_or_default();
            self.rows.lock().unwrap().insert(key, tuple);
            Ok(())
        }
        fn update(
            &mut self,
            _tx: &dyn TransactionHandle,
            key: Tuple,
            tuple: Tuple,
        ) -> Result<(), CatalogError> {
            let k = key.first().cloned().unwrap_or_default();
            self.rows.lock().unwrap().insert(k, tuple);
            Ok(())
        }
        fn delete(&mut self, _tx: &dyn TransactionHandle, key: Tuple) -> Result<(), CatalogError> {
            let k = key.first().cloned().unwrap_or_default();
            self.rows.lock().unwrap().remove(&k);
            Ok(())
        }
        fn fetch(
            &self,
            _tx: &dyn TransactionHandle,
            key: Tuple,
        ) -> Result<Option<Tuple>, CatalogError> {
            let k = key.first().cloned().unwrap_or_default();
            Ok(self.rows.lock().unwrap().get(&k).cloned())
        }
        fn scan(&self, _tx: &dyn TransactionHandle) -> Result<Vec<Tuple>, CatalogError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }
        fn search(
            &self,
            _tx: &dyn TransactionHandle,
            _predicate: &crate::capability::Predicate,
        ) -> Result<Vec<Tuple>, CatalogError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }
        fn search_by_bitset(
            &self,
            _tx: &dyn TransactionHandle,
            input: &[u64],
        ) -> Result<Vec<u64>, CatalogError> {
            Ok(input.to_vec())
        }
        fn get_by_bitset(&self, _tx: &dyn TransactionHandle) -> Result<Vec<u64>, CatalogError> {
            Ok((0..self.rows.lock().unwrap().len() as u64).collect())
        }
        fn is_able_to(&self, capability: Capability) -> bool {
            matches!(capability, Capability::Undo)
        }
        fn get_size(&self) -> u64 {
            self.rows.lock().unwrap().len() as u64 * 64
        }
    }

    #[test]
    fn in_memory_driver_round_trips_insert_and_fetch() {
        use crate::transaction::NullTransaction;
        let tx = NullTransaction::read_write();
        let mut driver = InMemoryDriver::default();
        driver.insert(&tx, vec![b"k1".to_vec(), b"v1".to_vec()]).unwrap();
        let found = driver.fetch(&tx, vec![b"k1".to_vec()]).unwrap();
        assert_eq!(found, Some(vec![b"k1".to_vec(), b"v1".to_vec()]));
    }
}
