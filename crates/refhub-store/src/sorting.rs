//! Ordering helpers.
//!
//! Every listing in the API is newest first. Ties on the timestamp fall back
//! to the ID so pages are stable between calls.

use chrono::{DateTime, Utc};

/// Sort rows newest first by a timestamp key with an ID tie-breaker.
pub fn newest_first<T, K>(rows: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, K))
where
    K: Ord,
{
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}
