use crate::database::{DatabaseAttributes, PathChange, PathTriple};
use crate::error::CatalogError;
use crate::identifier::Identifier;
use crate::object::ObjectId;
use serde::{Deserialize, Serialize};

/// `Database::Log::{Create, Drop, Unmount, Move, Alter}` (§6). Every
/// variant is named, not distinguished by a positional tag, so adding a
/// field to one kind never shifts the layout of another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseLogKind {
    Create { paths: PathTriple },
    Drop,
    Unmount,
    Move { change: PathChange },
    Alter { attributes: DatabaseAttributes },
}

/// A durable record of one database-level mutation.
///
/// Field order is fixed (name, id, then category-specific fields) per
/// §6; `version` is carried explicitly rather than relying on whatever
/// shape `serde` happens to produce, so a future field can be added to
/// one `DatabaseLogKind` variant without breaking replay of records
/// written by an older binary (§9 design note 2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseLogRecord {
    pub version: u8,
    pub name: Identifier,
    pub id: ObjectId,
    pub kind: DatabaseLogKind,
}

pub const CURRENT_LOG_VERSION: u8 = 1;

impl DatabaseLogRecord {
    pub fn create(name: Identifier, id: ObjectId, paths: PathTriple) -> Self {
        Self {
            version: CURRENT_LOG_VERSION,
            name,
            id,
            kind: DatabaseLogKind::Create { paths },
        }
    }

    pub fn drop_(name: Identifier, id: ObjectId) -> Self {
        Self {
            version: CURRENT_LOG_VERSION,
            name,
            id,
            kind: DatabaseLogKind::Drop,
        }
    }

    pub fn unmount(name: Identifier, id: ObjectId) -> Self {
        Self {
            version: CURRENT_LOG_VERSION,
            name,
            id,
            kind: DatabaseLogKind::Unmount,
        }
    }

    pub fn move_(name: Identifier, id: ObjectId, change: PathChange) -> Self {
        Self {
            version: CURRENT_LOG_VERSION,
            name,
            id,
            kind: DatabaseLogKind::Move { change },
        }
    }

    pub fn alter(name: Identifier, id: ObjectId, attributes: DatabaseAttributes) -> Self {
        Self {
            version: CURRENT_LOG_VERSION,
            name,
            id,
            kind: DatabaseLogKind::Alter { attributes },
        }
    }
}

/// Where committed log records go. The transaction manager and log
/// file that actually durably store these are opaque collaborators
/// (§1); this crate only needs the seam so recovery tests can replay
/// against an in-memory stand-in.
pub trait LogSink: Send + Sync {
    fn append(&mut self, record: DatabaseLogRecord) -> Result<(), CatalogError>;
}

/// An ordered, in-memory `LogSink` good enough for recovery tests.
#[derive(Default)]
pub struct VecLogSink {
    pub records: Vec<DatabaseLogRecord>,
}

impl LogSink for VecLogSink {
    fn append(&mut self, record: DatabaseLogRecord) -> Result<(), CatalogError> {
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_round_trip_through_serde() {
        let record = DatabaseLogRecord::move_(
            Identifier::new("d").unwrap(),
            ObjectId(1),
            PathChange {
                prev: PathTriple::default(),
                post: PathTriple {
                    data: Some("/data2".into()),
                    logical_log: None,
                    system: None,
                },
            },
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: DatabaseLogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.version, CURRENT_LOG_VERSION);
        assert!(matches!(restored.kind, DatabaseLogKind::Move { .. }));
    }

    #[test]
    fn vec_log_sink_preserves_commit_order() {
        let mut sink = VecLogSink::default();
        sink.append(DatabaseLogRecord::create(
            Identifier::new("d").unwrap(),
            ObjectId(1),
            PathTriple::default(),
        ))
        .unwrap();
        sink.append(DatabaseLogRecord::drop_(Identifier::new("d").unwrap(), ObjectId(1)))
            .unwrap();
        assert!(matches!(sink.records[0].kind, DatabaseLogKind::Create { .. }));
        assert!(matches!(sink.records[1].kind, DatabaseLogKind::Drop));
    }
}
