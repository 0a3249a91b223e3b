mod array;
mod bitmap;
mod btree;
mod fulltext;
mod heap;
mod kdtree;
mod migration;
mod record;
mod vector;

pub use array::ArrayFile;
pub use bitmap::BitmapFile;
pub use btree::{BtreeFile, Uniqueness};
pub use fulltext::InvertedFile;
pub use heap::HeapFile;
pub use kdtree::KdTreeFile;
pub use migration::{check_field_type, CURRENT_LAYOUT_VERSION};
pub use record::RecordFile;
pub use vector::VectorFile;

use catalog_core::{archive::ClassRegistry, FileKind, LogicalFile};

/// Makes every driver in this crate reconstructible from its `FileKind`
/// alone, so `catalog_core::archive::Archive::deserialize_table` can
/// rebuild a melted table's `Box<dyn LogicalFile>` without depending on
/// this crate directly (§9: the deserialization factory is the one
/// process-wide singleton this kernel allows).
///
/// Call once at process start, before any `Database::melt` can run.
pub fn register_drivers() {
    ClassRegistry::register(FileKind::Record, || Box::new(RecordFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Heap, || Box::new(HeapFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Btree, || Box::new(BtreeFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Vector, || Box::new(VectorFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Bitmap, || Box::new(BitmapFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Array, || Box::new(ArrayFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::KdTree, || Box::new(KdTreeFile::default()) as Box<dyn LogicalFile>);
    ClassRegistry::register(FileKind::Inverted, || Box::new(InvertedFile::default()) as Box<dyn LogicalFile>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::archive::Archive;
    use catalog_core::{File, FileKind, Identifier, ObjectId, Table};

    #[test]
    fn registered_drivers_survive_a_freeze_melt_round_trip() {
        register_drivers();
        let mut table = Table::new(ObjectId(1), ObjectId(100), Identifier::new("t").unwrap(), 2);
        let file = File::new(
            ObjectId(2),
            ObjectId(1),
            ObjectId(100),
            FileKind::Btree,
            Box::new(BtreeFile::default()),
        );
        table.files.push(file);

        let blob = Archive::serialize_table(&table).unwrap();
        let restored = Archive::deserialize_table(&blob).unwrap();
        assert_eq!(restored.files.len(), 1);
        assert!(restored.files[0].driver.is_able_to_sort());
    }
}
