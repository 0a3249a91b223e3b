use crate::archive::Archive;
use crate::error::CatalogError;
use crate::identifier::Identifier;
use crate::object::{ObjectCategory, ObjectId, Scope, SchemaObject};
use crate::table::Table;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

bitflags::bitflags! {
    /// Attributes packed into one flag word (§4.5).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct DatabaseAttributes: u32 {
        const ONLINE = 1 << 0;
        const READ_ONLY = 1 << 1;
        const UNMOUNTED = 1 << 2;
        const RECOVERY_FULL = 1 << 3;
        const SUPER_USER_MODE = 1 << 4;
        const SLAVE_STARTED = 1 << 5;
    }
}

impl Default for DatabaseAttributes {
    fn default() -> Self {
        DatabaseAttributes::ONLINE
    }
}

/// The three path categories a Database owns, each defaulting to the
/// next outer value when unset, ultimately to a system parameter
/// (§4.5).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PathTriple {
    pub data: Option<String>,
    pub logical_log: Option<String>,
    pub system: Option<String>,
}

impl PathTriple {
    pub fn effective_data(&self, system_default: &str) -> String {
        self.data.clone().unwrap_or_else(|| system_default.to_string())
    }

    pub fn effective_logical_log(&self, system_default: &str) -> String {
        self.logical_log
            .clone()
            .or_else(|| self.data.clone())
            .unwrap_or_else(|| system_default.to_string())
    }

    pub fn effective_system(&self, system_default: &str) -> String {
        self.system
            .clone()
            .or_else(|| self.data.clone())
            .unwrap_or_else(|| system_default.to_string())
    }
}

/// A staged `{prev, post}` path change applied transactionally (§4.5,
/// §8 scenario 5).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PathChange {
    pub prev: PathTriple,
    pub post: PathTriple,
}

/// Lock acquisition budget for `get_locked` (§4.5, §5 cancellation).
#[derive(Debug, Clone, Copy)]
pub enum LockTimeout {
    Unlimited,
    Millis(u64),
}

/// What a `get_locked` call is trying to do, for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOperation {
    Read,
    Write,
}

/// Who currently holds a table's lock: a writer excludes everyone, any
/// number of readers may hold it together (§4.5, §5).
#[derive(Default)]
struct LockState {
    reading: HashMap<ObjectId, u32>,
    writing: HashSet<ObjectId>,
}

impl LockState {
    fn conflicts(&self, table_id: ObjectId, operation: LockOperation) -> bool {
        if self.writing.contains(&table_id) {
            return true;
        }
        matches!(operation, LockOperation::Write) && self.reading.contains_key(&table_id)
    }

    fn acquire(&mut self, table_id: ObjectId, operation: LockOperation) {
        match operation {
            LockOperation::Write => {
                self.writing.insert(table_id);
            }
            LockOperation::Read => {
                *self.reading.entry(table_id).or_insert(0) += 1;
            }
        }
    }

    fn release(&mut self, table_id: ObjectId, operation: LockOperation) {
        match operation {
            LockOperation::Write => {
                self.writing.remove(&table_id);
            }
            LockOperation::Read => {
                if let Some(count) = self.reading.get_mut(&table_id) {
                    *count -= 1;
                    if *count == 0 {
                        self.reading.remove(&table_id);
                    }
                }
            }
        }
    }
}

/// Sequential database → table → tuple lock acquisition, bounded by a
/// caller-supplied timeout (§4.5, §5). The database level is a
/// diagnostic counter only, incremented on a successful table grant and
/// decremented on release; real mutual exclusion lives in `state`,
/// where a caller conflicting with an existing holder parks on `signal`
/// until the holder releases or its deadline passes (grounded on
/// `GamesmanNova`'s `ResourceManager`: a `Mutex`-guarded holder map with
/// a `Condvar` the releasing side notifies).
struct LockTable {
    database_holders: AtomicU32,
    state: Mutex<LockState>,
    signal: Condvar,
}

impl Default for LockTable {
    fn default() -> Self {
        Self {
            database_holders: AtomicU32::new(0),
            state: Mutex::new(LockState::default()),
            signal: Condvar::new(),
        }
    }
}

impl LockTable {
    fn lock_state(&self) -> MutexGuard<'_, LockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("lock table mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Fixes the database → table lock *order* and blocks while a
    /// conflicting holder is present. `deadline` bounds how long a
    /// caller parks before giving up (§5 cancellation); `None` parks
    /// indefinitely.
    fn try_acquire(
        &self,
        table_id: ObjectId,
        operation: LockOperation,
        deadline: Option<Instant>,
    ) -> Result<(), CatalogError> {
        let mut state = self.lock_state();
        loop {
            if !state.conflicts(table_id, operation) {
                state.acquire(table_id, operation);
                self.database_holders.fetch_add(1, Ordering::SeqCst);
                return Ok(());
            }
            state = match deadline {
                None => match self.signal.wait(state) {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                },
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(CatalogError::LockTimeout {
                            resource: format!("table {:?}", table_id),
                        });
                    }
                    match self.signal.wait_timeout(state, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    }
                }
            };
        }
    }

    fn release(&self, table_id: ObjectId, operation: LockOperation) {
        self.lock_state().release(table_id, operation);
        self.database_holders.fetch_sub(1, Ordering::SeqCst);
        self.signal.notify_all();
    }
}

/// RAII handle returned by [`Database::get_locked`]. Releases its table
/// lock and wakes any parked waiters when dropped, so a scope that
/// exits early (an error, a panic unwind) still gives the lock back
/// (§4.5, §5: scoped acquisition with guaranteed release).
pub struct TableLock<'a> {
    database: &'a Database,
    table_id: ObjectId,
    operation: LockOperation,
    table: Arc<Table>,
}

impl std::fmt::Debug for TableLock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableLock")
            .field("table_id", &self.table_id)
            .field("operation", &self.operation)
            .finish()
    }
}

impl Deref for TableLock<'_> {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.table
    }
}

impl TableLock<'_> {
    pub fn as_arc(&self) -> &Arc<Table> {
        &self.table
    }
}

impl Drop for TableLock<'_> {
    fn drop(&mut self) {
        self.database.lock_table.release(self.table_id, self.operation);
    }
}

/// Top-level container: path triple, cache of loaded objects,
/// freeze/melt, privilege roots, snapshot linkage (§4.5).
pub struct Database {
    pub object: SchemaObject,
    pub attributes: RwLock<DatabaseAttributes>,
    pub paths: RwLock<PathTriple>,
    pub path_changes: RwLock<Vec<PathChange>>,
    pub master_url: RwLock<Option<String>>,
    tables: RwLock<HashMap<ObjectId, Arc<Table>>>,
    frozen_tables: RwLock<HashMap<ObjectId, Vec<u8>>>,
    freeze_refcount: RwLock<HashMap<ObjectId, u32>>,
    id_sequence: AtomicI64,
    lock_table: LockTable,
}

impl Database {
    pub fn new(id: ObjectId, name: Identifier) -> Self {
        Self {
            object: SchemaObject::new(id, None, name, ObjectCategory::Database, Scope::Permanent, id),
            attributes: RwLock::new(DatabaseAttributes::default()),
            paths: RwLock::new(PathTriple::default()),
            path_changes: RwLock::new(Vec::new()),
            master_url: RwLock::new(None),
            tables: RwLock::new(HashMap::new()),
            frozen_tables: RwLock::new(HashMap::new()),
            freeze_refcount: RwLock::new(HashMap::new()),
            id_sequence: AtomicI64::new(1),
            lock_table: LockTable::default(),
        }
    }

    pub fn new_meta() -> Self {
        let db = Self::new(ObjectId::SYSTEM, Identifier::new("$$SystemDatabase").unwrap());
        db.object_scope_meta();
        db
    }

    fn object_scope_meta(&self) {
        // Meta databases are read-only (§3 invariant 6); flip the flag
        // directly since `self.object.scope` is not `mut` from here.
        let mut attrs = self.write_attrs();
        *attrs = DatabaseAttributes::ONLINE | DatabaseAttributes::READ_ONLY;
    }

    fn write_attrs(&self) -> std::sync::RwLockWriteGuard<'_, DatabaseAttributes> {
        match self.attributes.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("database attributes lock poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn next_child_id(&self) -> ObjectId {
        ObjectId::next_in_sequence(&self.id_sequence)
    }

    pub fn next_child_id_seed(&self, seed: i64) {
        self.id_sequence.store(seed, Ordering::SeqCst);
    }

    /// Stage a path change; it takes effect only once `apply_path_change`
    /// is called after the corresponding log record is durable.
    pub fn stage_path_change(&self, post: PathTriple) {
        let prev = self.paths.read().unwrap().clone();
        self.path_changes.write().unwrap().push(PathChange {
            prev,
            post: post.clone(),
        });
        *self.paths.write().unwrap() = post;
    }

    pub fn last_path_change(&self) -> Option<PathChange> {
        self.path_changes.read().unwrap().last().cloned()
    }

    /// Sequential database → table → tuple lock acquisition (§4.5).
    /// Returns a guard holding the table if every level was acquired
    /// before the deadline; on timeout or on a missing table, leaves no
    /// partial state (§5) — the lock is released before the error
    /// returns.
    pub fn get_locked(
        &self,
        table_id: ObjectId,
        operation: LockOperation,
        timeout: LockTimeout,
    ) -> Result<TableLock<'_>, CatalogError> {
        let deadline = match timeout {
            LockTimeout::Unlimited => None,
            LockTimeout::Millis(ms) => Some(Instant::now() + Duration::from_millis(ms)),
        };
        self.lock_table.try_acquire(table_id, operation, deadline)?;
        match self.tables.read().unwrap().get(&table_id).cloned() {
            Some(table) => Ok(TableLock {
                database: self,
                table_id,
                operation,
                table,
            }),
            None => {
                self.lock_table.release(table_id, operation);
                Err(CatalogError::BadArgument(format!("no such table {:?}", table_id)))
            }
        }
    }

    pub fn insert_table(&self, table: Table) {
        self.tables
            .write()
            .unwrap()
            .insert(table.object.id, Arc::new(table));
    }

    pub fn table(&self, id: ObjectId) -> Option<Arc<Table>> {
        self.tables.read().unwrap().get(&id).cloned()
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().unwrap().len()
    }

    /// Remove a table from the live catalog (§3 Lifecycle: Persistent ->
    /// Deleted -> ReallyDeleted). The transaction manager that would
    /// stage this behind a commit is out of scope (§1); here the
    /// removal is immediate and unconditional.
    pub fn drop_table(&self, table_id: ObjectId) -> Option<Arc<Table>> {
        self.frozen_tables.write().unwrap().remove(&table_id);
        self.freeze_refcount.write().unwrap().remove(&table_id);
        self.tables.write().unwrap().remove(&table_id)
    }

    pub fn table_by_name(&self, name: &str) -> Option<Arc<Table>> {
        self.tables
            .read()
            .unwrap()
            .values()
            .find(|t| t.object.name.as_str() == name)
            .cloned()
    }

    /// Opportunistically compact a cold table's child graph into one
    /// blob and drop it from memory (§4.5, §3 "freeze"). Idempotent:
    /// freezing an already-frozen table is a no-op. Guarded by a
    /// reference count so a table still in use by another reader is
    /// never frozen.
    pub fn freeze(&self, table_id: ObjectId) -> Result<(), CatalogError> {
        let refcount = *self.freeze_refcount.read().unwrap().get(&table_id).unwrap_or(&0);
        if refcount > 0 {
            return Ok(());
        }
        let Some(table) = self.tables.write().unwrap().remove(&table_id) else {
            return Ok(()); // already frozen or never loaded
        };
        let blob = Archive::serialize_table(&table)?;
        self.frozen_tables.write().unwrap().insert(table_id, blob);
        Ok(())
    }

    /// Rematerialize a frozen table on next access (§4.5 "melt").
    pub fn melt(&self, table_id: ObjectId) -> Result<Arc<Table>, CatalogError> {
        if let Some(table) = self.tables.read().unwrap().get(&table_id) {
            return Ok(table.clone());
        }
        let blob = self
            .frozen_tables
            .write()
            .unwrap()
            .remove(&table_id)
            .ok_or_else(|| CatalogError::BadArgument(format!("table {:?} not frozen", table_id)))?;
        let table = Archive::deserialize_table(&blob)?;
        let arc = Arc::new(table);
        self.tables.write().unwrap().insert(table_id, arc.clone());
        Ok(arc)
    }

    pub fn is_online(&self) -> bool {
        self.attributes.read().unwrap().contains(DatabaseAttributes::ONLINE)
    }

    pub fn mark_offline(&self) {
        let mut attrs = self.write_attrs();
        attrs.remove(DatabaseAttributes::ONLINE);
    }
}
