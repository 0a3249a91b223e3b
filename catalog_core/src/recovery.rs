use crate::database::{Database, DatabaseAttributes, PathChange};
use crate::error::CatalogError;
use crate::log_record::{DatabaseLogKind, DatabaseLogRecord, LogSink};

/// Replay committed log records against a database's attributes and
/// path triple (§6: "the authoritative replay source" for recovery).
/// Records must already be in commit order; this function applies
/// them in the order given without reordering or deduplication.
pub fn replay(db: &Database, records: &[DatabaseLogRecord]) {
    for record in records {
        match &record.kind {
            DatabaseLogKind::Create { paths } => {
                *db.paths.write().unwrap() = paths.clone();
            }
            DatabaseLogKind::Drop => {
                db.mark_offline();
            }
            DatabaseLogKind::Unmount => {
                let mut attrs = match db.attributes.write() {
                    Ok(guard) => guard,
                    Err(poisoned) => {
                        log::warn!("database attributes lock poisoned during replay, recovering");
                        poisoned.into_inner()
                    }
                };
                attrs.insert(DatabaseAttributes::UNMOUNTED);
            }
            DatabaseLogKind::Move { change } => {
                *db.paths.write().unwrap() = change.post.clone();
                db.path_changes.write().unwrap().push(change.clone());
            }
            DatabaseLogKind::Alter { attributes } => {
                *db.attributes.write().unwrap() = *attributes;
            }
        }
    }
}

/// Undo a previously-applied Move (§9 Open Question 1): emit a
/// symmetric move record (`post`/`prev` swapped) to the log *before*
/// the forward-applied file rename is reverted, so a crash between the
/// two leaves the log, not the live path triple, as the source of
/// truth on the next recovery pass.
pub fn undo_move(
    db: &Database,
    sink: &mut dyn LogSink,
    change: &PathChange,
) -> Result<(), CatalogError> {
    let symmetric = PathChange {
        prev: change.post.clone(),
        post: change.prev.clone(),
    };
    sink.append(DatabaseLogRecord::move_(
        db.object.name.clone(),
        db.object.id,
        symmetric.clone(),
    ))?;
    *db.paths.write().unwrap() = symmetric.post.clone();
    db.path_changes.write().unwrap().push(symmetric);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::PathTriple;
    use crate::identifier::Identifier;
    use crate::log_record::VecLogSink;
    use crate::object::ObjectId;

    #[test]
    fn replay_rebuilds_path_triple_from_move_records() {
        let db = Database::new(ObjectId(1), Identifier::new("d").unwrap());
        let records = vec![DatabaseLogRecord::move_(
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
        )];
        replay(&db, &records);
        assert_eq!(db.paths.read().unwrap().data.as_deref(), Some("/data2"));
    }

    #[test]
    fn replay_unmount_sets_the_unmounted_attribute() {
        let db = Database::new(ObjectId(1), Identifier::new("d").unwrap());
        let records = vec![DatabaseLogRecord::unmount(Identifier::new("d").unwrap(), ObjectId(1))];
        replay(&db, &records);
        assert!(db
            .attributes
            .read()
            .unwrap()
            .contains(DatabaseAttributes::UNMOUNTED));
    }

    #[test]
    fn undo_move_emits_a_symmetric_record_and_restores_prev_path() {
        let db = Database::new(ObjectId(1), Identifier::new("d").unwrap());
        let forward = PathChange {
            prev: PathTriple {
                data: Some("/data1".into()),
                logical_log: None,
                system: None,
            },
            post: PathTriple {
                data: Some("/data2".into()),
                logical_log: None,
                system: None,
            },
        };
        let mut sink = VecLogSink::default();
        undo_move(&db, &mut sink, &forward).unwrap();

        assert_eq!(db.paths.read().unwrap().data.as_deref(), Some("/data1"));
        assert_eq!(sink.records.len(), 1);
        match &sink.records[0].kind {
            DatabaseLogKind::Move { change } => {
                assert_eq!(change.prev.data.as_deref(), Some("/data2"));
                assert_eq!(change.post.data.as_deref(), Some("/data1"));
            }
            other => panic!("expected a Move record, got {:?}", other),
        }
    }
}
