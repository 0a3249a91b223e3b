mod area;
mod capability;
mod column;
mod config;
mod constraint;
mod database;
mod default_value;
mod driver;
mod error;
mod field;
mod file;
mod file_id;
mod hint;
mod identifier;
mod key;
mod log_record;
mod object;
mod table;
mod transaction;

pub mod archive;
pub mod meta;
pub mod recovery;

pub use area::{Area, AreaContent, AreaContentTable};
pub use capability::{Capability, LogicalFile, Predicate, SkipInsertType};
pub use column::{Column, ColumnFlags, ColumnType};
pub use config::CatalogConfig;
pub use constraint::{Constraint, ConstraintKind};
pub use database::{
    Database, DatabaseAttributes, LockOperation, LockTimeout, PathChange, PathTriple, TableLock,
};
pub use default_value::{
    Default_, DefaultFlags, DefaultValue, IdentityDirection, IdentitySpec, NiladicFunction,
};
pub use driver::{LogicalFileDriver, Tuple};
pub use error::{CatalogError, CatalogResult, ErrorLocation};
pub use field::{fetch_key_labels, Field, FieldSource, FunctionField, SortOrder};
pub use file::{File, FileKind};
pub use file_id::{EncodingForm, FileId, FileIdKey, FileIdValue, IndexedKey};
pub use hint::{Hint, HintCategory, HintElement};
pub use identifier::{Identifier, NameParts};
pub use key::Key;
pub use log_record::{
    DatabaseLogKind, DatabaseLogRecord, LogSink, VecLogSink, CURRENT_LOG_VERSION,
};
pub use object::{ObjectCategory, ObjectId, Scope, SchemaObject, Status};
pub use table::{Index, Table};
pub use transaction::{NullTransaction, TransactionHandle};
