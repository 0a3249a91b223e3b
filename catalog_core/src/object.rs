use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

/// A database-scoped (or, for databases themselves, process-global)
/// 64-bit object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub i64);

/// Sentinel meta-table IDs decrement from here so they never collide
/// with ascending user object IDs (§4.4).
const META_ID_SENTINEL: i64 = i64::MAX;

static NEXT_META_ID: AtomicI64 = AtomicI64::new(META_ID_SENTINEL);
static NEXT_DATABASE_ID: AtomicI64 = AtomicI64::new(1);

impl ObjectId {
    /// Fixed ID for the single, process-global meta-database (§3 invariant 6).
    pub const SYSTEM: ObjectId = ObjectId(0);

    /// Allocate the next descending meta-table object ID.
    pub fn next_meta() -> Self {
        ObjectId(NEXT_META_ID.fetch_sub(1, Ordering::SeqCst))
    }

    /// Allocate the next process-global database ID.
    pub fn next_database() -> Self {
        ObjectId(NEXT_DATABASE_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Allocate the next ID in a per-database ascending sequence.
    pub fn next_in_sequence(sequence: &AtomicI64) -> Self {
        ObjectId(sequence.fetch_add(1, Ordering::SeqCst))
    }
}

/// The category tag every schema object carries, mirroring the
/// component table in §2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Database,
    Table,
    Column,
    Key,
    Constraint,
    Index,
    File,
    Field,
    Area,
    AreaContent,
    Privilege,
    Cascade,
    Partition,
    Function,
}

/// Where an object lives and how long it is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Persisted to the meta-tables and durable across restarts.
    Permanent,
    /// Lives only for the duration of a session.
    SessionTemporary,
    /// In-memory only, read-only (the meta-database itself).
    Meta,
}

/// Lifecycle status of a schema object (§3 Lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Constructed in memory; persistence deferred.
    Created,
    /// Logged and inserted into its meta-table row.
    Persistent,
    /// DROP has been issued; files not yet destroyed.
    Deleted,
    /// A File has been mounted but schema attach is not yet complete.
    Mounted,
    /// Post-commit: files destroyed, object fully gone.
    ReallyDeleted,
}

/// Fields shared by every catalog entity (§3 "Schema object").
///
/// Concrete schema types (`Table`, `Index`, `File`, ...) embed this as
/// their first field rather than inheriting from it, per §9's directive
/// to replace deep inheritance with tagged variants holding common state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaObject {
    pub id: ObjectId,
    pub parent_id: Option<ObjectId>,
    pub name: Identifier,
    pub category: ObjectCategory,
    pub scope: Scope,
    pub status: Status,
    /// Logical mutation timestamp (monotonically increasing counter,
    /// not wall-clock, to keep freeze/melt round-trips deterministic).
    pub timestamp: u64,
    pub database_id: ObjectId,
}

impl SchemaObject {
    pub fn new(
        id: ObjectId,
        parent_id: Option<ObjectId>,
        name: Identifier,
        category: ObjectCategory,
        scope: Scope,
        database_id: ObjectId,
    ) -> Self {
        Self {
            id,
            parent_id,
            name,
            category,
            scope,
            status: Status::Created,
            timestamp: 0,
            database_id,
        }
    }

    /// Transition Created -> Persistent after a successful log write
    /// and meta-table row insert.
    pub fn mark_persistent(&mut self) {
        debug_assert!(matches!(self.status, Status::Created | Status::Mounted));
        self.status = Status::Persistent;
        self.timestamp += 1;
    }

    /// Transition Persistent -> Deleted on DROP.
    pub fn mark_deleted(&mut self) {
        self.status = Status::Deleted;
        self.timestamp += 1;
    }

    /// Transition Deleted -> ReallyDeleted post-commit.
    pub fn mark_really_deleted(&mut self) {
        debug_assert!(matches!(self.status, Status::Deleted));
        self.status = Status::ReallyDeleted;
        self.timestamp += 1;
    }

    /// UNDO during recovery: Deleted -> Persistent.
    pub fn undo_delete(&mut self) {
        debug_assert!(matches!(self.status, Status::Deleted));
        self.status = Status::Persistent;
        self.timestamp += 1;
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.status, Status::Persistent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_ids_decrement_and_never_collide_with_user_ids() {
        let a = ObjectId::next_meta();
        let b = ObjectId::next_meta();
        assert!(b.0 < a.0);
        assert!(a.0 > 0);
    }

    #[test]
    fn lifecycle_transitions_follow_the_state_machine() {
        let mut obj = SchemaObject::new(
            ObjectId(1),
            None,
            Identifier::new("t").unwrap(),
            ObjectCategory::Table,
            Scope::Permanent,
            ObjectId(100),
        );
        assert_eq!(obj.status, Status::Created);
        obj.mark_persistent();
        assert!(obj.is_persistent());
        obj.mark_deleted();
        assert_eq!(obj.status, Status::Deleted);
        obj.mark_really_deleted();
        assert_eq!(obj.status, Status::ReallyDeleted);
    }

    #[test]
    fn undo_restores_persistent_from_deleted() {
        let mut obj = SchemaObject::new(
            ObjectId(2),
            None,
            Identifier::new("t").unwrap(),
            ObjectCategory::Table,
            Scope::Permanent,
            ObjectId(100),
        );
        obj.mark_persistent();
        obj.mark_deleted();
        obj.undo_delete();
        assert!(obj.is_persistent());
    }
}
