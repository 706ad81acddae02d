//! Store metrics collection.
//!
//! Provides standardized metrics for monitoring store operations:
//! - Operation counters by table, operation and outcome

use metrics::counter;

use crate::error::{StoreError, StoreResult};

/// Metric name constants for consistency.
pub mod names {
    /// Total store operations by table, operation and outcome.
    pub const OPERATIONS_TOTAL: &str = "refhub_store_operations_total";
}

fn outcome(err: Option<&StoreError>) -> &'static str {
    match err {
        None => "ok",
        Some(StoreError::NotFound { .. }) => "not_found",
        Some(StoreError::AlreadyExists(_)) => "conflict",
        Some(StoreError::InvalidReference(_)) => "invalid_reference",
        Some(StoreError::InvalidState(_)) => "invalid_state",
    }
}

/// Record the outcome of a store operation.
pub fn record_operation<T>(table: &'static str, operation: &'static str, result: &StoreResult<T>) {
    counter!(
        names::OPERATIONS_TOTAL,
        "table" => table,
        "operation" => operation,
        "outcome" => outcome(result.as_ref().err())
    )
    .increment(1);
}
