use crate::error::CatalogError;
use serde::{Deserialize, Serialize};

/// Niladic functions recognized in a `Default::Function` (§4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NiladicFunction {
    CurrentTimestamp,
}

/// Sort direction used by `GENERATED ALWAYS AS IDENTITY` to pick the
/// default `Start` when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityDirection {
    Ascending,
    Descending,
}

/// An integer-sequence generator specification (§4.7).
///
/// Every field appears at most once at parse time; unset `start`
/// defaults to `min_value` (ascending) or `max_value` (descending).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentitySpec {
    pub start: Option<i64>,
    pub increment: i64,
    pub max_value: i64,
    pub min_value: i64,
    pub cycle: bool,
    pub get_max: bool,
}

impl IdentitySpec {
    pub fn new(increment: i64, min_value: i64, max_value: i64) -> Self {
        Self {
            start: None,
            increment,
            max_value,
            min_value,
            cycle: false,
            get_max: false,
        }
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn with_get_max(mut self, get_max: bool) -> Self {
        self.get_max = get_max;
        self
    }

    fn direction(&self) -> IdentityDirection {
        if self.increment < 0 {
            IdentityDirection::Descending
        } else {
            IdentityDirection::Ascending
        }
    }

    /// The effective start value, applying the ascending/descending
    /// default rule when `start` was never set.
    pub fn effective_start(&self) -> i64 {
        self.start.unwrap_or(match self.direction() {
            IdentityDirection::Ascending => self.min_value,
            IdentityDirection::Descending => self.max_value,
        })
    }

    /// Validate the definition-time constraints from §4.7.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.increment == 0 {
            return Err(CatalogError::InvalidDefault {
                column: String::new(),
                message: "IDENTITY increment must not be zero".into(),
            });
        }
        if self.min_value >= self.max_value {
            return Err(CatalogError::InvalidDefault {
                column: String::new(),
                message: "IDENTITY min value must be less than max value".into(),
            });
        }
        let start = self.effective_start();
        if start < self.min_value || start > self.max_value {
            return Err(CatalogError::InvalidDefault {
                column: String::new(),
                message: format!(
                    "IDENTITY start {} is outside [{}, {}]",
                    start, self.min_value, self.max_value
                ),
            });
        }
        Ok(())
    }
}

/// Packed flag bits carried alongside a serialized `Default` (§4.7).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultFlags {
    pub use_on_update: bool,
    pub use_always: bool,
}

/// A column default specification (§4.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DefaultValue {
    /// A literal, already checked for assign-compatibility at parse time.
    Constant(String),
    /// Currently only `CURRENT_TIMESTAMP`.
    Function(NiladicFunction),
    /// An integer sequence.
    Identity(IdentitySpec),
    /// Only legal for array-typed columns.
    ConstantArray(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Default_ {
    pub value: DefaultValue,
    pub flags: DefaultFlags,
}

impl Default_ {
    pub fn constant(literal: impl Into<String>) -> Self {
        Self {
            value: DefaultValue::Constant(literal.into()),
            flags: DefaultFlags::default(),
        }
    }

    /// Construct a `CURRENT_TIMESTAMP` default, optionally with
    /// `USING ON UPDATE`. Per §7/§9, an unsupported `USING ON UPDATE` is
    /// accepted and logged at info level rather than rejected — changing
    /// this to an error would be new externally-visible behavior.
    pub fn current_timestamp(use_on_update: bool) -> Self {
        if use_on_update {
            log::info!(
                "USING ON UPDATE is not enforced by this engine; accepting default and ignoring the clause"
            );
        }
        Self {
            value: DefaultValue::Function(NiladicFunction::CurrentTimestamp),
            flags: DefaultFlags {
                use_on_update,
                use_always: false,
            },
        }
    }

    pub fn identity(spec: IdentitySpec, use_always: bool) -> Result<Self, CatalogError> {
        spec.validate()?;
        if spec.get_max && use_always {
            log::info!("GET MAX together with GENERATED ALWAYS is unusual but accepted");
        }
        Ok(Self {
            value: DefaultValue::Identity(spec),
            flags: DefaultFlags {
                use_on_update: false,
                use_always,
            },
        })
    }

    pub fn constant_array(values: Vec<String>) -> Self {
        Self {
            value: DefaultValue::ConstantArray(values),
            flags: DefaultFlags::default(),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self.value, DefaultValue::Identity(_))
    }

    pub fn is_use_always(&self) -> bool {
        self.flags.use_always
    }

    pub fn identity_spec(&self) -> Option<&IdentitySpec> {
        match &self.value {
            DefaultValue::Identity(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn to_sql_statement(&self) -> String {
        match &self.value {
            DefaultValue::Constant(lit) => format!("DEFAULT {}", lit),
            DefaultValue::Function(NiladicFunction::CurrentTimestamp) => {
                let mut s = "DEFAULT CURRENT_TIMESTAMP".to_string();
                if self.flags.use_on_update {
                    s.push_str(" USING ON UPDATE");
                }
                s
            }
            DefaultValue::Identity(spec) => {
                let mut s = if self.flags.use_always {
                    "GENERATED ALWAYS AS IDENTITY".to_string()
                } else {
                    "GENERATED BY DEFAULT AS IDENTITY".to_string()
                };
                s.push_str(&format!(
                    " (START WITH {} INCREMENT BY {} MINVALUE {} MAXVALUE {}{}{})",
                    spec.effective_start(),
                    spec.increment,
                    spec.min_value,
                    spec.max_value,
                    if spec.cycle { " CYCLE" } else { "" },
                    if spec.get_max { " GET MAX" } else { "" },
                ));
                s
            }
            DefaultValue::ConstantArray(values) => {
                format!("DEFAULT ARRAY[{}]", values.join(", "))
            }
        }
    }
}
