use catalog_core::{ColumnType, EncodingForm, FileId, FileIdKey, File};

/// The FileID layout version every driver in this crate writes when it
/// creates a new File.
pub const CURRENT_LAYOUT_VERSION: i32 = 2;

/// The version below which `check_field_type` considers a FileID old
/// enough to carry an EncodingForm/FieldLength inconsistency (§4.3:
/// "when a persisted FileID has `version < 3`"; confirmed against
/// `RecordFile.cpp::checkFieldType`'s `cFileID.getVersion() < 3`
/// guard). This is deliberately one higher than
/// [`CURRENT_LAYOUT_VERSION`]: a freshly created file is stamped at 2
/// and still gets re-checked on every subsequent open, exactly as the
/// original never bumps the version inside this routine either.
pub const MIGRATION_TRIGGER_VERSION: i32 = 3;

/// Rewrite field length/encoding metadata left by an engine older than
/// [`MIGRATION_TRIGGER_VERSION`] (§4.3). `Unlimited`-typed fields have
/// no canonical length to backfill and are skipped regardless of
/// version — the one exception the rule names explicitly.
pub fn check_field_type(file: &mut File) {
    if file.file_id.layout_version() >= MIGRATION_TRIGGER_VERSION {
        return;
    }
    for field in &mut file.fields {
        if field.encoding_form != EncodingForm::Unknown {
            continue;
        }
        if field.field_type == ColumnType::Unlimited {
            continue;
        }
        if let Some(len) = field.field_type.canonical_length() {
            field.length = len;
        }
        field.encoding_form = EncodingForm::Utf8;
    }
}

/// The part of `populate_file_id` every variant shares: field
/// length/type/encoding/sort-order parameters keyed by position, plus
/// the field count and the layout version this crate writes. Each
/// variant adds its own key-count, unique-mode, and hint-derived keys
/// on top of this.
pub fn populate_common_file_id(file: &File) -> FileId {
    let mut file_id = FileId::new();
    file_id.set_int(FileIdKey::FieldCount, file.fields.len() as i32);
    file_id.set_layout_version(CURRENT_LAYOUT_VERSION);
    for field in &file.fields {
        file_id.set_int_indexed(FileIdKey::FieldLength, field.position, field.length as i32);
        file_id.set_bool_indexed(
            FileIdKey::FieldSortOrder,
            field.position,
            matches!(field.sort_order, catalog_core::SortOrder::Descending),
        );
    }
    file_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Field, FieldSource, FileKind, ObjectId};

    fn old_file_with_varchar_field() -> File {
        let mut file = File::new(
            ObjectId(1),
            ObjectId(2),
            ObjectId(100),
            FileKind::Record,
            Box::new(crate::RecordFile::default()),
        );
        file.push_field(Field::new(
            ObjectId(3),
            ObjectId(1),
            ObjectId(100),
            0,
            FieldSource::ObjectId,
            ColumnType::BigInt,
        ));
        file.push_field(Field::new(
            ObjectId(4),
            ObjectId(1),
            ObjectId(100),
            1,
            FieldSource::Column(ObjectId(5)),
            ColumnType::VarChar(64),
        ));
        file
    }

    #[test]
    fn rewrites_encoding_and_length_below_trigger_version() {
        let mut file = old_file_with_varchar_field();
        check_field_type(&mut file);
        assert_eq!(file.fields[1].encoding_form, EncodingForm::Utf8);
        assert_eq!(file.fields[1].length, 64);
    }

    #[test]
    fn a_freshly_stamped_file_still_triggers_migration() {
        // populate_common_file_id stamps CURRENT_LAYOUT_VERSION (2), which
        // is still below MIGRATION_TRIGGER_VERSION (3) by design.
        let mut file = old_file_with_varchar_field();
        file.file_id.set_layout_version(CURRENT_LAYOUT_VERSION);
        check_field_type(&mut file);
        assert_eq!(file.fields[1].encoding_form, EncodingForm::Utf8);
    }

    #[test]
    fn unlimited_columns_are_never_rewritten() {
        let mut file = old_file_with_varchar_field();
        file.fields[1].field_type = ColumnType::Unlimited;
        check_field_type(&mut file);
        assert_eq!(file.fields[1].encoding_form, EncodingForm::Unknown);
    }

    #[test]
    fn already_current_files_are_left_untouched() {
        let mut file = old_file_with_varchar_field();
        file.file_id.set_layout_version(MIGRATION_TRIGGER_VERSION);
        check_field_type(&mut file);
        assert_eq!(file.fields[1].encoding_form, EncodingForm::Unknown);
    }
}
