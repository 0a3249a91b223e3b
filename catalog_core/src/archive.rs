use crate::capability::{LogicalFile, Predicate, SkipInsertType};
use crate::column::Column;
use crate::constraint::Constraint;
use crate::error::CatalogError;
use crate::field::Field;
use crate::file::{File, FileKind};
use crate::file_id::{FileId, FileIdKey, FileIdValue};
use crate::key::Key;
use crate::object::{ObjectId, SchemaObject};
use crate::table::{Index, Table};
use crate::transaction::TransactionHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

/// Offsets class tags by module so multiple archive writers (statement
/// nodes, schema objects, ...) can share one tag space without
/// colliding (§6 "Class tags are offset by module").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ClassTagModule {
    Statement = 0,
    Schema = 1_000_000,
}

pub fn class_tag(module: ClassTagModule, local: u32) -> u32 {
    module as u32 + local
}

/// Factory function a driver crate registers so the deserialization
/// path can reconstruct a `Box<dyn LogicalFile>` purely from a
/// `FileKind`, without `catalog_core` knowing about concrete driver
/// types (§9: "the process-wide singleton is limited to the
/// deserialization factory").
type DriverFactory = fn() -> Box<dyn LogicalFile>;

static DRIVER_REGISTRY: OnceLock<RwLock<HashMap<FileKind, DriverFactory>>> = OnceLock::new();

/// The one process-wide singleton this crate allows (§9): every other
/// cross-reference goes through an explicit `&Database` or
/// `&dyn TransactionHandle`, but a deserialized `File` has no such
/// context to recover its driver from, so the driver crates register
/// themselves here instead.
pub struct ClassRegistry;

impl ClassRegistry {
    fn table() -> &'static RwLock<HashMap<FileKind, DriverFactory>> {
        DRIVER_REGISTRY.get_or_init(|| RwLock::new(HashMap::new()))
    }

    /// Called once per process by each driver crate at startup (or
    /// lazily before first use) to make its `FileKind`s reconstructible.
    pub fn register(kind: FileKind, factory: DriverFactory) {
        match Self::table().write() {
            Ok(mut map) => {
                map.insert(kind, factory);
            }
            Err(poisoned) => {
                log::warn!("driver registry lock poisoned, recovering");
                poisoned.into_inner().insert(kind, factory);
            }
        }
    }

    fn create(kind: FileKind) -> Box<dyn LogicalFile> {
        let map = match Self::table().read() {
            Ok(map) => map,
            Err(poisoned) => {
                log::warn!("driver registry lock poisoned, recovering");
                poisoned.into_inner()
            }
        };
        match map.get(&kind) {
            Some(factory) => factory(),
            None => Box::new(UnregisteredDriver),
        }
    }
}

/// A File whose concrete driver was never registered. Its capability
/// answers are all conservative "no" — this only happens for a
/// driver-less rematerialization in a test or a not-yet-wired access
/// method, never in a fully assembled catalog.
struct UnregisteredDriver;

impl LogicalFile for UnregisteredDriver {
    fn is_able_to_fetch(&self) -> bool {
        false
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
        false
    }
    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }
    fn is_able_to_search(&self, _predicate: &Predicate) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize)]
struct FileSnapshot {
    object: SchemaObject,
    kind: FileKind,
    file_id: FileId,
    fields: Vec<Field>,
}

#[derive(Serialize, Deserialize)]
struct IndexSnapshot {
    object: SchemaObject,
    keys: Vec<Key>,
    file_id: ObjectId,
}

#[derive(Serialize, Deserialize)]
struct TableSnapshot {
    object: SchemaObject,
    id_sequence: i64,
    columns: Vec<Column>,
    constraints: Vec<Constraint>,
    indexes: Vec<IndexSnapshot>,
    files: Vec<FileSnapshot>,
}

/// Versioned archive for the compact blobs freeze/melt and the
/// `file_id_blob`/`default_blob` meta-table columns use (§6, §4.5).
///
/// The on-the-wire format here is `serde_json` rather than a literal
/// class-tag-plus-fields binary stream; the class-tag scheme above is
/// kept as the addressable unit (`ClassTagModule`) because every
/// caller needs it for cross-module lookups, while the byte-level
/// encoding is delegated to `serde` the way the rest of this crate's
/// structures already derive `Serialize`/`Deserialize`.
pub struct Archive;

impl Archive {
    pub fn serialize_table(table: &Table) -> Result<Vec<u8>, CatalogError> {
        let snapshot = TableSnapshot {
            object: table.object.clone(),
            id_sequence: table.id_sequence_value(),
            columns: table.columns.clone(),
            constraints: table.constraints.clone(),
            indexes: table
                .indexes
                .iter()
                .map(|i| IndexSnapshot {
                    object: i.object.clone(),
                    keys: i.keys.clone(),
                    file_id: i.file_id,
                })
                .collect(),
            files: table
                .files
                .iter()
                .map(|f| FileSnapshot {
                    object: f.object.clone(),
                    kind: f.kind,
                    file_id: f.file_id.clone(),
                    fields: f.fields.clone(),
                })
                .collect(),
        };
        serde_json::to_vec(&snapshot).map_err(|e| CatalogError::Io(std::io::Error::other(e)))
    }

    pub fn deserialize_table(bytes: &[u8]) -> Result<Table, CatalogError> {
        let snapshot: TableSnapshot = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::Io(std::io::Error::other(e)))?;
        let table = Table::from_parts(
            snapshot.object,
            snapshot.id_sequence,
            snapshot.columns,
            snapshot.constraints,
            snapshot
                .indexes
                .into_iter()
                .map(|i| Index {
                    object: i.object,
                    keys: i.keys,
                    file_id: i.file_id,
                })
                .collect(),
            snapshot
                .files
                .into_iter()
                .map(|f| File {
                    object: f.object,
                    kind: f.kind,
                    file_id: f.file_id,
                    fields: f.fields,
                    driver: ClassRegistry::create(f.kind),
                })
                .collect(),
        );
        Ok(table)
    }
}

/// Concrete (kind, key, index, value) binary codec for a `FileId`
/// (§6: "FileID is serialized as a sequence of (kind, key, index,
/// value) records"). Big-endian, length-prefixed strings/paths.
pub mod file_id_codec {
    use super::*;

    const KIND_BOOL: u8 = 0;
    const KIND_INT: u8 = 1;
    const KIND_INT64: u8 = 2;
    const KIND_STR: u8 = 3;
    const KIND_PATH_VEC: u8 = 4;

    fn write_string(buf: &mut Vec<u8>, s: &str) {
        buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
        buf.extend_from_slice(s.as_bytes());
    }

    fn read_string(buf: &[u8], pos: &mut usize) -> Result<String, CatalogError> {
        let len = read_u32(buf, pos)? as usize;
        let bytes = buf
            .get(*pos..*pos + len)
            .ok_or_else(|| CatalogError::Io(std::io::Error::other("truncated archive")))?;
        *pos += len;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| CatalogError::Io(std::io::Error::other(e.to_string())))
    }

    fn read_u32(buf: &[u8], pos: &mut usize) -> Result<u32, CatalogError> {
        let bytes = buf
            .get(*pos..*pos + 4)
            .ok_or_else(|| CatalogError::Io(std::io::Error::other("truncated archive")))?;
        *pos += 4;
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    pub fn encode(entries: &[((FileIdKey, Option<u32>), FileIdValue)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for ((key, index), value) in entries {
            write_string(&mut buf, &format!("{:?}", key));
            buf.extend_from_slice(&index.unwrap_or(u32::MAX).to_be_bytes());
            match value {
                FileIdValue::Bool(b) => {
                    buf.push(KIND_BOOL);
                    buf.push(*b as u8);
                }
                FileIdValue::Int(i) => {
                    buf.push(KIND_INT);
                    buf.extend_from_slice(&i.to_be_bytes());
                }
                FileIdValue::Int64(i) => {
                    buf.push(KIND_INT64);
                    buf.extend_from_slice(&i.to_be_bytes());
                }
                FileIdValue::Str(s) => {
                    buf.push(KIND_STR);
                    write_string(&mut buf, s);
                }
                FileIdValue::PathVec(paths) => {
                    buf.push(KIND_PATH_VEC);
                    buf.extend_from_slice(&(paths.len() as u32).to_be_bytes());
                    for p in paths {
                        write_string(&mut buf, p);
                    }
                }
            }
        }
        buf
    }

    /// Decode into raw (key-name, index, value) triples; callers map
    /// the key name back to `FileIdKey` since that mapping lives with
    /// the enum, not the codec.
    pub fn decode_raw(
        buf: &[u8],
    ) -> Result<Vec<(String, Option<u32>, FileIdValue)>, CatalogError> {
        let mut pos = 0usize;
        let count = read_u32(buf, &mut pos)?;
        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let key = read_string(buf, &mut pos)?;
            let raw_index = read_u32(buf, &mut pos)?;
            let index = if raw_index == u32::MAX { None } else { Some(raw_index) };
            let kind = *buf
                .get(pos)
                .ok_or_else(|| CatalogError::Io(std::io::Error::other("truncated archive")))?;
            pos += 1;
            let value = match kind {
                KIND_BOOL => {
                    let b = buf[pos] != 0;
                    pos += 1;
                    FileIdValue::Bool(b)
                }
                KIND_INT => {
                    let v = i32::from_be_bytes(buf[pos..pos + 4].try_into().unwrap());
                    pos += 4;
                    FileIdValue::Int(v)
                }
                KIND_INT64 => {
                    let v = i64::from_be_bytes(buf[pos..pos + 8].try_into().unwrap());
                    pos += 8;
                    FileIdValue::Int64(v)
                }
                KIND_STR => FileIdValue::Str(read_string(buf, &mut pos)?),
                KIND_PATH_VEC => {
                    let n = read_u32(buf, &mut pos)?;
                    let mut paths = Vec::with_capacity(n as usize);
                    for _ in 0..n {
                        paths.push(read_string(buf, &mut pos)?);
                    }
                    FileIdValue::PathVec(paths)
                }
                other => {
                    return Err(CatalogError::Io(std::io::Error::other(format!(
                        "unknown FileID value kind tag {other}"
                    ))))
                }
            };
            out.push((key, index, value));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_id_binary_codec_round_trips() {
        let entries = vec![
            ((FileIdKey::Temporary, None), FileIdValue::Bool(true)),
            ((FileIdKey::FieldCount, None), FileIdValue::Int(3)),
            (
                (FileIdKey::AreaPath, None),
                FileIdValue::PathVec(vec!["/data/a".into(), "/data/b".into()]),
            ),
        ];
        let bytes = file_id_codec::encode(&entries);
        let decoded = file_id_codec::decode_raw(&bytes).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[1].0, format!("{:?}", FileIdKey::FieldCount));
        assert_eq!(decoded[1].2, FileIdValue::Int(3));
    }

    #[test]
    fn class_tag_offsets_by_module() {
        let schema_tag = class_tag(ClassTagModule::Schema, 5);
        let statement_tag = class_tag(ClassTagModule::Statement, 5);
        assert_ne!(schema_tag, statement_tag);
        assert_eq!(schema_tag - statement_tag, ClassTagModule::Schema as u32);
    }
}
