//! Active / churned / new store counts from a search aggregation response.
//!
//! Expected shape:
//!
//! ```text
//! aggregations.time_buckets.buckets.{current_month,previous_month}
//!     .unique_stores.buckets = [ { "key": <store id>, "doc_count": n }, ... ]
//! ```
//!
//! - Active: stores in both periods.
//! - Churned: stores in the previous period only.
//! - New: stores in the current period only.

use std::collections::HashSet;

use serde_json::Value;
use toolbench_core::StoreCounts;

use crate::error::StoreCountError;

const TIME_BUCKETS_POINTER: &str = "/aggregations/time_buckets/buckets";
const UNIQUE_STORES_POINTER: &str = "/unique_stores/buckets";
const CURRENT_PERIOD: &str = "current_month";
const PREVIOUS_PERIOD: &str = "previous_month";

/// Parses `raw` as JSON and computes store counts from it.
///
/// # Errors
///
/// Returns [`StoreCountError::InvalidJson`] when `raw` is not valid JSON, and
/// the other variants as described on [`count_stores`].
pub fn count_stores_from_str(raw: &str) -> Result<StoreCounts, StoreCountError> {
    let payload: Value = serde_json::from_str(raw).map_err(StoreCountError::InvalidJson)?;
    count_parsed(&payload)
}

/// Computes store counts from an already-parsed payload.
///
/// A payload that is itself a JSON string is parsed as JSON first.
///
/// # Errors
///
/// - [`StoreCountError::InvalidJson`] if a string payload is not valid JSON.
/// - [`StoreCountError::MissingTimeBuckets`] if
///   `aggregations.time_buckets.buckets` is absent.
/// - [`StoreCountError::MissingPeriodBuckets`] if either period's
///   `unique_stores.buckets` is absent or not an array.
pub fn count_stores(payload: &Value) -> Result<StoreCounts, StoreCountError> {
    match payload {
        Value::String(raw) => count_stores_from_str(raw),
        other => count_parsed(other),
    }
}

fn count_parsed(payload: &Value) -> Result<StoreCounts, StoreCountError> {
    let buckets = payload
        .pointer(TIME_BUCKETS_POINTER)
        .filter(|v| !v.is_null())
        .ok_or(StoreCountError::MissingTimeBuckets)?;

    let period = |name: &str| {
        buckets
            .get(name)
            .and_then(|p| p.pointer(UNIQUE_STORES_POINTER))
            .and_then(Value::as_array)
    };

    let (Some(current), Some(previous)) = (period(CURRENT_PERIOD), period(PREVIOUS_PERIOD)) else {
        return Err(StoreCountError::MissingPeriodBuckets);
    };

    let current_keys = store_keys(current);
    let previous_keys = store_keys(previous);
    tracing::debug!(
        current = current_keys.len(),
        previous = previous_keys.len(),
        "collected store keys"
    );

    Ok(partition(&current_keys, &previous_keys))
}

/// A store key as it appears in a bucket.
///
/// `identity` is the key's full JSON text, so the number `1` and the string
/// `"1"` stay distinct. `display` is what lands in the id lists: strings
/// unquoted, everything else as JSON text.
struct StoreKey {
    identity: String,
    display: String,
}

/// Sentinel for a bucket without a `key`. Never valid JSON text, so it cannot
/// collide with a real key.
const MISSING_KEY: &str = "undefined";

impl StoreKey {
    fn from_bucket(bucket: &Value) -> Self {
        match bucket.get("key") {
            Some(Value::String(s)) => Self {
                identity: Value::String(s.clone()).to_string(),
                display: s.clone(),
            },
            Some(other) => {
                let text = other.to_string();
                Self {
                    identity: text.clone(),
                    display: text,
                }
            }
            None => {
                tracing::trace!(?bucket, "bucket has no key");
                Self {
                    identity: MISSING_KEY.to_owned(),
                    display: MISSING_KEY.to_owned(),
                }
            }
        }
    }
}

/// Distinct store keys from a bucket list, in first-seen order.
///
/// Every entry contributes a member. Entries with no `key` (including
/// non-object entries) all share one `"undefined"` member, distinct from an
/// explicit `null` key.
fn store_keys(buckets: &[Value]) -> Vec<StoreKey> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for bucket in buckets {
        let key = StoreKey::from_bucket(bucket);
        if seen.insert(key.identity.clone()) {
            keys.push(key);
        }
    }

    keys
}

/// Splits two de-duplicated key lists into active, churned and new.
///
/// Membership is decided on key identity; the id lists carry display text.
fn partition(current: &[StoreKey], previous: &[StoreKey]) -> StoreCounts {
    let current_set: HashSet<&str> = current.iter().map(|k| k.identity.as_str()).collect();
    let previous_set: HashSet<&str> = previous.iter().map(|k| k.identity.as_str()).collect();

    let mut active_ids = Vec::new();
    let mut new_ids = Vec::new();
    for key in current {
        if previous_set.contains(key.identity.as_str()) {
            active_ids.push(key.display.clone());
        } else {
            new_ids.push(key.display.clone());
        }
    }
    let churned_ids: Vec<String> = previous
        .iter()
        .filter(|k| !current_set.contains(k.identity.as_str()))
        .map(|k| k.display.clone())
        .collect();

    let active_count = active_ids.len();
    StoreCounts {
        active_count,
        churned_count: previous.len() - active_count,
        new_count: current.len() - active_count,
        active_ids,
        churned_ids,
        new_ids,
    }
}

#[cfg(test)]
#[path = "store_count_test.rs"]
mod tests;
