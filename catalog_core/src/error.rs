use thiserror::Error;

/// Source location captured at the point an error is raised, for
/// diagnostics only — never part of equality or the error message hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    pub file: &'static str,
    pub line: u32,
}

impl std::fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Catalog-wide error taxonomy.
///
/// Every DDL/DML entry point returns this type so callers get a single,
/// consistent error surface regardless of which access method or schema
/// object is involved.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed statement input (not produced by this crate; carried
    /// through from the parser collaborator).
    #[error("SQL syntax error: {message} ({location})")]
    SqlSyntaxError {
        message: String,
        location: ErrorLocation,
    },

    /// An identifier contains a character from the forbidden set.
    #[error("invalid identifier {name:?}: contains forbidden character {bad_char:?}")]
    InvalidIdentifier { name: String, bad_char: char },

    /// A default literal cannot be assigned to the declared column type.
    #[error("invalid default for column {column}: {message}")]
    InvalidDefault { column: String, message: String },

    /// A well-formed construct this engine does not implement.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Meta-table self-consistency check failed.
    #[error("meta database corrupted: {0}")]
    MetaDatabaseCorrupted(String),

    /// Internal precondition violation at a public API boundary.
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// Hierarchical lock acquisition exceeded its budget.
    #[error("lock timeout acquiring {resource}")]
    LockTimeout { resource: String },

    /// Literal conversion overflow during parse or default evaluation.
    #[error("numeric value out of range: {0}")]
    NumericValueOutOfRange(String),

    /// Reading or writing a FileID parameter with the wrong stored type.
    #[error("invalid FileID access: key {key} stored as {actual}, requested as {requested}")]
    InvalidFileId {
        key: String,
        actual: &'static str,
        requested: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn syntax(message: impl Into<String>, location: ErrorLocation) -> Self {
        Self::SqlSyntaxError {
            message: message.into(),
            location,
        }
    }

    /// Whether this error leaves the catalog untouched and is safe to
    /// retry after the caller fixes its input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MetaDatabaseCorrupted(_))
    }
}

/// Raise a `CatalogError` capturing the call site as `ErrorLocation`.
#[macro_export]
macro_rules! catalog_bail {
    ($variant:ident, $message:expr) => {
        return Err($crate::error::CatalogError::syntax(
            $message,
            $crate::error::ErrorLocation {
                file: file!(),
                line: line!(),
            },
        ))
    };
}

pub type CatalogResult<T> = Result<T, CatalogError>;
