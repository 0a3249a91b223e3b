use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Characters forbidden in any catalog-visible name, per §7's
/// `InvalidIdentifier` taxonomy.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// A canonical, case-preserving, case-sensitive catalog name.
///
/// `Identifier` is the unit of equality for every schema-object name
/// comparison; two identifiers are equal iff their unicode content is
/// byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    /// Construct an identifier, rejecting any forbidden character.
    ///
    /// An empty string is accepted in memory (§8: "valid object in
    /// memory; it cannot be persisted") — parent-scope uniqueness is
    /// what ultimately forces a non-empty name before persistence.
    pub fn new(name: impl Into<String>) -> Result<Self, CatalogError> {
        let name = name.into();
        if let Some(bad_char) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(CatalogError::InvalidIdentifier { name, bad_char });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as it would appear in a SQL statement: quoted only if it
    /// contains characters that require quoting for round-trip fidelity.
    pub fn to_sql_statement(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let needs_quoting = !self
            .0
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if needs_quoting {
            format!("\"{}\"", self.0.replace('"', "\"\""))
        } else {
            self.0.clone()
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splits a generated object name (e.g. an auto-named constraint or
/// index) into the parts used to build it: owning table, role suffix,
/// and a disambiguating ordinal.
///
/// Grounded on the `NameParts` pattern from the original `Schema` module:
/// generated names are always `<table>_<role>[_<ordinal>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub table: String,
    pub role: String,
    pub ordinal: Option<u32>,
}

impl NameParts {
    pub fn new(table: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            role: role.into(),
            ordinal: None,
        }
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn generate(&self) -> String {
        match self.ordinal {
            Some(n) => format!("{}_{}_{}", self.table, self.role, n),
            None => format!("{}_{}", self.table, self.role),
        }
    }
}
