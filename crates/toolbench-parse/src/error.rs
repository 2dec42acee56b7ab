use thiserror::Error;

/// Why an aggregation payload could not be turned into store counts.
///
/// The `Display` strings are shown to users verbatim.
#[derive(Debug, Error)]
pub enum StoreCountError {
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Missing aggregations.time_buckets.buckets")]
    MissingTimeBuckets,

    #[error("Missing current_month or previous_month unique_stores.buckets")]
    MissingPeriodBuckets,
}
