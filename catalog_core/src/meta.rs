use crate::capability::{LogicalFile, Predicate, SkipInsertType};
use crate::column::{Column, ColumnType};
use crate::database::Database;
use crate::field::{fetch_key_labels, Field, FieldSource};
use crate::file::{File, FileKind};
use crate::file_id::FileIdKey;
use crate::identifier::Identifier;
use crate::object::ObjectId;
use crate::table::Table;
use crate::transaction::TransactionHandle;

/// One row of the fixed system-table catalog (§4.4, §6's system-table
/// table): a name plus its declared columns in order.
pub struct MetaTableSpec {
    pub name: &'static str,
    pub columns: &'static [(&'static str, ColumnType)],
}

pub static SYSTEM_TABLES: &[MetaTableSpec] = &[
    MetaTableSpec {
        name: "System_Database",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("Path", ColumnType::Unlimited),
            ("Attribute", ColumnType::Int),
        ],
    },
    MetaTableSpec {
        name: "System_Table",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("DatabaseID", ColumnType::BigInt),
        ],
    },
    MetaTableSpec {
        name: "System_Column",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("TableID", ColumnType::BigInt),
            ("Type", ColumnType::Int),
            ("Position", ColumnType::Int),
        ],
    },
    MetaTableSpec {
        name: "System_Index",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("TableID", ColumnType::BigInt),
            ("FileID", ColumnType::BigInt),
        ],
    },
    MetaTableSpec {
        name: "System_File",
        columns: &[
            ("Kind", ColumnType::Int),
            ("TableID", ColumnType::BigInt),
            ("FileIDBlob", ColumnType::Unlimited),
        ],
    },
    MetaTableSpec {
        name: "System_Field",
        columns: &[
            ("TableID", ColumnType::BigInt),
            ("Position", ColumnType::Int),
            ("Type", ColumnType::Int),
        ],
    },
    MetaTableSpec {
        name: "System_Key",
        columns: &[
            ("TableID", ColumnType::BigInt),
            ("ColumnID", ColumnType::BigInt),
        ],
    },
    MetaTableSpec {
        name: "System_Area",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("Path", ColumnType::Unlimited),
        ],
    },
    MetaTableSpec {
        name: "System_Constraint",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("ParentID", ColumnType::BigInt),
            ("Category", ColumnType::Int),
            ("Position", ColumnType::Int),
            ("ColumnID", ColumnType::Unlimited),
        ],
    },
    MetaTableSpec {
        name: "System_AreaContent",
        columns: &[
            ("AreaID", ColumnType::BigInt),
            ("ObjectID", ColumnType::BigInt),
        ],
    },
    MetaTableSpec {
        name: "System_Privilege",
        columns: &[
            ("UserID", ColumnType::BigInt),
            ("Privilege", ColumnType::Unlimited),
            ("ObjectType", ColumnType::Int),
            ("ObjectID", ColumnType::BigInt),
        ],
    },
    MetaTableSpec {
        name: "System_Cascade",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("Target", ColumnType::Unlimited),
        ],
    },
    MetaTableSpec {
        name: "System_Partition",
        columns: &[
            ("TableID", ColumnType::BigInt),
            ("Category", ColumnType::Int),
            ("FunctionName", ColumnType::VarChar(128)),
            ("ColumnID", ColumnType::Unlimited),
        ],
    },
    MetaTableSpec {
        name: "System_Function",
        columns: &[
            ("Name", ColumnType::VarChar(128)),
            ("Routine", ColumnType::Unlimited),
        ],
    },
];

/// The capability answers every system table's backing File gives:
/// fetch by object ID, scan everything, sorted, one row per object
/// (§4.3's Record/Heap rules applied to the meta-database's own rows).
struct MetaRecordFile;

impl LogicalFile for MetaRecordFile {
    fn is_able_to_fetch(&self) -> bool {
        true
    }
    fn is_able_to_sort(&self) -> bool {
        true
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
    fn is_able_to_search(&self, predicate: &Predicate) -> bool {
        matches!(predicate, Predicate::Equals { .. } | Predicate::NotNull { .. })
    }
}

/// Build the fixed `System_*` tables inside one in-memory meta
/// `Database` (§4.4). Called once at process start; the returned
/// `Database` is the single source of truth for every `System_*` row
/// thereafter.
pub fn bootstrap() -> Database {
    let db = Database::new_meta();
    for spec in SYSTEM_TABLES {
        let table_id = ObjectId::next_meta();
        let mut table = Table::new(
            table_id,
            ObjectId::SYSTEM,
            Identifier::new(spec.name).expect("system table names are always valid identifiers"),
            1,
        );
        for (position, (col_name, col_type)) in spec.columns.iter().enumerate() {
            let col_id = ObjectId::next_meta();
            table
                .add_column(Column::new(
                    col_id,
                    table_id,
                    ObjectId::SYSTEM,
                    Identifier::new(*col_name).expect("system column names are always valid identifiers"),
                    position as u32 + 1,
                    *col_type,
                ))
                .expect("system table columns never collide by construction");
        }

        let file_obj_id = ObjectId::next_meta();
        let mut file = File::new(
            file_obj_id,
            table_id,
            ObjectId::SYSTEM,
            FileKind::Record,
            Box::new(MetaRecordFile),
        );
        file.push_field(Field::new(
            ObjectId::next_meta(),
            file_obj_id,
            ObjectId::SYSTEM,
            0,
            FieldSource::ObjectId,
            ColumnType::BigInt,
        ));
        for (position, column) in table.columns.iter().enumerate() {
            file.push_field(Field::new(
                ObjectId::next_meta(),
                file_obj_id,
                ObjectId::SYSTEM,
                position as u32 + 1,
                FieldSource::Column(column.object.id),
                column.column_type,
            ));
        }
        file.file_id.set_bool(FileIdKey::Mounted, true);
        file.file_id.set_int(FileIdKey::FieldCount, file.field_count() as i32);
        file.check_oid_invariant()
            .expect("system files always declare an OID field at position 0");
        table.files.push(file);
        db.insert_table(table);
    }
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_builds_one_table_per_system_spec() {
        let db = bootstrap();
        assert_eq!(db.table_count(), SYSTEM_TABLES.len());
    }

    #[test]
    fn every_system_file_satisfies_the_oid_invariant() {
        let db = bootstrap();
        for spec in SYSTEM_TABLES {
            let table = db
                .table_by_name(spec.name)
                .unwrap_or_else(|| panic!("missing system table {}", spec.name));
            for file in &table.files {
                assert!(file.check_oid_invariant().is_ok());
            }
        }
    }
}
