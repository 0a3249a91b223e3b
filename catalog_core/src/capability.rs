use crate::field::FunctionField;
use crate::file::File;
use crate::transaction::TransactionHandle;
use serde::{Deserialize, Serialize};

/// Predicate taxonomy `is_able_to_search` understands (§4.2).
///
/// The planner must treat a predicate shape outside this enum as
/// unsupported — there is no catch-all variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Like { field: String, pattern: String },
    Equals { field: String, value: String },
    NotEquals { field: String, value: String },
    GreaterThan { field: String, value: String },
    GreaterThanEquals { field: String, value: String },
    LessThan { field: String, value: String },
    LessThanEquals { field: String, value: String },
    Between { field: String, low: String, high: String },
    NotNull { field: String },
    EqualsToNull { field: String },
    /// k-nearest-neighbor probe: field, query vector, k.
    NeighborIn { field: String, query: Vec<f64>, k: u32 },
}

/// Which rows a File intentionally omits on insert (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipInsertType {
    None,
    FirstKeyIsNull,
    ValueIsNull,
}

/// Driver-reported capabilities used for crash recovery and undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    Undo,
}

/// The uniform query surface every File exposes so the planner can pick
/// an access method without a discriminated enum of index kinds (§4.2,
/// the heart of this specification).
///
/// Every method is total: it never panics and never fails, because a
/// capability query must be answerable without touching storage.
/// `is_able_to_search` must be conservative (§4.2): it may only return
/// `false` when the file provably cannot evaluate the predicate. The
/// default implementation below is the safe "cannot evaluate" answer;
/// each File variant overrides it with its own sublattice.
pub trait LogicalFile: Send + Sync {
    /// Can enumerate all rows in insertion order.
    fn is_able_to_scan(&self, all_tuples: bool) -> bool {
        self.has_all_tuples() || all_tuples
    }

    /// Can retrieve by a key tuple exactly matching the declared key fields.
    fn is_able_to_fetch(&self) -> bool;

    /// Pushdown test on a predicate node. Conservative: default denies.
    fn is_able_to_search(&self, _predicate: &Predicate) -> bool {
        false
    }

    /// Result may be returned as a compressed row-id bit set.
    fn is_able_to_get_by_bitset(&self) -> bool {
        false
    }

    /// Accepts an input bit set to narrow a probe.
    fn is_able_to_search_by_bitset(&self) -> bool {
        false
    }

    /// Can deliver rows in key order (or distance order for K-d trees).
    fn is_able_to_sort(&self) -> bool;

    /// Provides the named function-field projection.
    fn is_has_function_field(&self, function: FunctionField) -> bool {
        let _ = function;
        false
    }

    fn get_skip_insert_type(&self) -> SkipInsertType {
        SkipInsertType::None
    }

    /// The ordered field list `is_able_to_fetch` consumes, derived from
    /// `file`'s actual Fields rather than a name this driver invents.
    fn get_fetch_key(&self, file: &File, tx: &dyn TransactionHandle) -> Vec<String>;

    fn is_key_unique(&self) -> bool;

    fn has_all_tuples(&self) -> bool;

    fn is_able_to_undo(&self) -> bool {
        true
    }
}
