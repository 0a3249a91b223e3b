use catalog_core::{
    Column, ColumnType, Field, FieldSource, File, FileKind, Identifier, LogicalFile, ObjectId,
    Predicate, Table,
};
use catalog_drivers::{
    check_field_type, register_drivers, ArrayFile, BitmapFile, BtreeFile, HeapFile, InvertedFile,
    KdTreeFile, RecordFile, VectorFile,
};

/// Every registered driver answers `is_able_to_search` on at least one
/// predicate and refuses at least one other — a capability-query table
/// that is neither a constant accept nor a constant deny.
#[test]
fn each_driver_is_selectively_searchable() {
    let equals = Predicate::Equals {
        field: "id".into(),
        value: "1".into(),
    };
    let neighbor = Predicate::NeighborIn {
        field: "vec".into(),
        query: vec![0.0, 0.0],
        k: 3,
    };
    let like = Predicate::Like {
        field: "body".into(),
        pattern: "%x%".into(),
    };

    let drivers: Vec<(&str, Box<dyn LogicalFile>)> = vec![
        ("record", Box::new(RecordFile::default())),
        ("heap", Box::new(HeapFile::default())),
        ("btree", Box::new(BtreeFile::default())),
        ("vector", Box::new(VectorFile::default())),
        ("bitmap", Box::new(BitmapFile::default())),
        ("array", Box::new(ArrayFile::default())),
        ("kdtree", Box::new(KdTreeFile::default())),
        ("inverted", Box::new(InvertedFile::default())),
    ];

    for (name, driver) in &drivers {
        let accepts_any = driver.is_able_to_search(&equals)
            || driver.is_able_to_search(&neighbor)
            || driver.is_able_to_search(&like);
        assert!(accepts_any, "{name} answers none of the sample predicates");
    }

    assert!(!RecordFile::default().is_able_to_search(&neighbor));
    assert!(!KdTreeFile::default().is_able_to_search(&equals));
    assert!(!BtreeFile::default().is_able_to_search(&neighbor));
}

/// A table built with a mix of driver kinds survives the registry's
/// freeze/melt round trip with each file's concrete behavior intact,
/// not just its `FileKind` tag.
#[test]
fn mixed_driver_table_round_trips_through_the_registry() {
    register_drivers();

    let mut table = Table::new(ObjectId(1), ObjectId(100), Identifier::new("mixed").unwrap(), 3);
    table
        .add_column(Column::new(
            table.next_child_id(),
            ObjectId(1),
            ObjectId(100),
            Identifier::new("id").unwrap(),
            0,
            ColumnType::Int,
        ))
        .unwrap();

    let record_file_id = table.next_child_id();
    let mut record_file = File::new(
        record_file_id,
        ObjectId(1),
        ObjectId(100),
        FileKind::Record,
        Box::new(RecordFile::default()),
    );
    record_file.push_field(Field::new(
        table.next_child_id(),
        record_file_id,
        ObjectId(100),
        0,
        FieldSource::ObjectId,
        ColumnType::BigInt,
    ));
    table.files.push(record_file);

    let bitmap_file_id = table.next_child_id();
    table.files.push(File::new(
        bitmap_file_id,
        ObjectId(1),
        ObjectId(100),
        FileKind::Bitmap,
        Box::new(BitmapFile::default()),
    ));

    let blob = catalog_core::archive::Archive::serialize_table(&table).unwrap();
    let restored = catalog_core::archive::Archive::deserialize_table(&blob).unwrap();

    assert_eq!(restored.files.len(), 2);
    let restored_record = restored
        .files
        .iter()
        .find(|f| f.kind == FileKind::Record)
        .unwrap();
    let restored_bitmap = restored
        .files
        .iter()
        .find(|f| f.kind == FileKind::Bitmap)
        .unwrap();
    assert!(restored_record.driver.is_key_unique());
    assert!(restored_bitmap.driver.has_all_tuples());
}

/// `check_field_type` is idempotent across crate boundaries: migrating
/// an already-current file a second time changes nothing.
#[test]
fn migration_check_is_idempotent_from_outside_the_crate() {
    let mut file = File::new(
        ObjectId(1),
        ObjectId(2),
        ObjectId(100),
        FileKind::Heap,
        Box::new(HeapFile::default()),
    );
    file.push_field(Field::new(
        ObjectId(3),
        ObjectId(1),
        ObjectId(100),
        0,
        FieldSource::Column(ObjectId(9)),
        ColumnType::VarChar(16),
    ));

    check_field_type(&mut file);
    let length_after_first = file.fields[0].length;
    let encoding_after_first = file.fields[0].encoding_form;

    check_field_type(&mut file);
    assert_eq!(file.fields[0].length, length_after_first);
    assert_eq!(file.fields[0].encoding_form, encoding_after_first);
}
