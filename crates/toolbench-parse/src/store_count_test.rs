use serde_json::json;

use super::*;

fn payload(current: &Value, previous: &Value) -> Value {
    json!({
        "took": 12,
        "aggregations": {
            "time_buckets": {
                "buckets": {
                    "current_month": {
                        "doc_count": 40,
                        "unique_stores": { "buckets": current }
                    },
                    "previous_month": {
                        "doc_count": 38,
                        "unique_stores": { "buckets": previous }
                    }
                }
            }
        }
    })
}

// -----------------------------------------------------------------------
// counts
// -----------------------------------------------------------------------

#[test]
fn one_of_each_partition() {
    let value = payload(
        &json!([{ "key": "s1" }, { "key": "s2" }]),
        &json!([{ "key": "s2" }, { "key": "s3" }]),
    );
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.active_count, 1);
    assert_eq!(counts.churned_count, 1);
    assert_eq!(counts.new_count, 1);
    assert_eq!(counts.active_ids, vec!["s2"]);
    assert_eq!(counts.churned_ids, vec!["s3"]);
    assert_eq!(counts.new_ids, vec!["s1"]);
}

#[test]
fn empty_periods_give_zero_counts() {
    let counts = count_stores(&payload(&json!([]), &json!([]))).unwrap();
    assert_eq!(counts, StoreCounts::default());
}

#[test]
fn duplicate_keys_count_once() {
    let value = payload(
        &json!([{ "key": "s1", "doc_count": 3 }, { "key": "s1", "doc_count": 1 }]),
        &json!([]),
    );
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.new_count, 1);
    assert_eq!(counts.new_ids, vec!["s1"]);
}

#[test]
fn partitions_sum_to_period_sizes() {
    let value = payload(
        &json!([{ "key": "a" }, { "key": "b" }, { "key": "c" }, { "key": "a" }]),
        &json!([{ "key": "b" }, { "key": "d" }, { "key": "e" }, { "key": "f" }]),
    );
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.churned_count + counts.active_count, 4);
    assert_eq!(counts.new_count + counts.active_count, 3);
    assert_eq!(counts.previous_total(), 4);
    assert_eq!(counts.current_total(), 3);
}

#[test]
fn id_lists_preserve_period_order() {
    let value = payload(
        &json!([{ "key": "z" }, { "key": "m" }, { "key": "a" }, { "key": "q" }]),
        &json!([{ "key": "q" }, { "key": "y" }, { "key": "m" }, { "key": "b" }]),
    );
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.active_ids, vec!["m", "q"]);
    assert_eq!(counts.new_ids, vec!["z", "a"]);
    assert_eq!(counts.churned_ids, vec!["y", "b"]);
}

#[test]
fn numeric_keys_are_identifiers_too() {
    let value = payload(&json!([{ "key": 101 }, { "key": 102 }]), &json!([{ "key": 101 }]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.active_ids, vec!["101"]);
    assert_eq!(counts.new_ids, vec!["102"]);
}

#[test]
fn number_and_string_keys_are_different_stores() {
    let value = payload(&json!([{ "key": 1 }]), &json!([{ "key": "1" }]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.active_count, 0);
    assert_eq!(counts.churned_count, 1);
    assert_eq!(counts.new_count, 1);
    assert_eq!(counts.new_ids, vec!["1"]);
    assert_eq!(counts.churned_ids, vec!["1"]);
}

#[test]
fn number_and_string_keys_dedupe_separately() {
    let value = payload(&json!([{ "key": 1 }, { "key": "1" }, { "key": 1 }]), &json!([]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.new_count, 2);
}

#[test]
fn buckets_without_key_share_one_member() {
    let value = payload(&json!([{ "doc_count": 4 }, { "key": "s1" }, 7]), &json!([]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.new_count, 2);
    assert_eq!(counts.new_ids, vec!["undefined", "s1"]);
}

#[test]
fn single_keyless_bucket_is_new() {
    let value = payload(&json!([{ "doc_count": 3 }]), &json!([]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.new_count, 1);
}

#[test]
fn null_key_is_not_a_missing_key() {
    let value = payload(&json!([{ "key": null }]), &json!([{ "doc_count": 1 }]));
    let counts = count_stores(&value).unwrap();
    assert_eq!(counts.active_count, 0);
    assert_eq!(counts.new_ids, vec!["null"]);
    assert_eq!(counts.churned_ids, vec!["undefined"]);
}

// -----------------------------------------------------------------------
// input forms and validation
// -----------------------------------------------------------------------

#[test]
fn string_input_is_parsed_as_json() {
    let raw = payload(&json!([{ "key": "s1" }]), &json!([{ "key": "s1" }])).to_string();
    let from_str = count_stores_from_str(&raw).unwrap();
    let from_value = count_stores(&Value::String(raw)).unwrap();
    assert_eq!(from_str.active_count, 1);
    assert_eq!(from_str, from_value);
}

#[test]
fn malformed_json_is_reported() {
    let err = count_stores_from_str("{ not json").unwrap_err();
    assert!(matches!(err, StoreCountError::InvalidJson(_)));
    assert_eq!(err.to_string(), "Invalid JSON");

    let err = count_stores(&Value::String("[1,".to_owned())).unwrap_err();
    assert!(matches!(err, StoreCountError::InvalidJson(_)));
}

#[test]
fn missing_time_buckets_is_reported() {
    let err = count_stores(&json!({ "aggregations": {} })).unwrap_err();
    assert!(matches!(err, StoreCountError::MissingTimeBuckets));
    assert_eq!(err.to_string(), "Missing aggregations.time_buckets.buckets");
}

#[test]
fn null_time_buckets_is_reported_as_missing() {
    let value = json!({ "aggregations": { "time_buckets": { "buckets": null } } });
    let err = count_stores(&value).unwrap_err();
    assert!(matches!(err, StoreCountError::MissingTimeBuckets));
}

#[test]
fn non_object_payload_is_missing_time_buckets() {
    let err = count_stores_from_str("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, StoreCountError::MissingTimeBuckets));
}

#[test]
fn missing_previous_period_is_reported() {
    let value = json!({
        "aggregations": { "time_buckets": { "buckets": {
            "current_month": { "unique_stores": { "buckets": [] } }
        } } }
    });
    let err = count_stores(&value).unwrap_err();
    assert!(matches!(err, StoreCountError::MissingPeriodBuckets));
    assert_eq!(
        err.to_string(),
        "Missing current_month or previous_month unique_stores.buckets"
    );
}

#[test]
fn non_array_period_buckets_are_reported() {
    let value = payload(&json!({ "s1": 1 }), &json!([]));
    let err = count_stores(&value).unwrap_err();
    assert!(matches!(err, StoreCountError::MissingPeriodBuckets));
}
