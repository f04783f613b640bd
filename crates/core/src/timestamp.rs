//! Store-native timestamp representation.
//!
//! Documents keep timestamps in the store's own shape,
//! `{"_seconds": i64, "_nanoseconds": u32}`, rather than as strings. Older
//! documents also carry the unprefixed `{"seconds", "nanoseconds"}` form or
//! plain RFC 3339 strings; both are accepted on read.

use chrono::{SecondsFormat, TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::types::Timestamp;

const SECONDS_KEYS: [&str; 2] = ["_seconds", "seconds"];
const NANOS_KEYS: [&str; 2] = ["_nanoseconds", "nanoseconds"];

/// Encode a timestamp in the store-native document shape.
pub fn to_store_value(ts: &Timestamp) -> Value {
    json!({
        "_seconds": ts.timestamp(),
        "_nanoseconds": ts.timestamp_subsec_nanos(),
    })
}

/// Decode a store-native timestamp object into its parts, if `map` is one.
///
/// A timestamp object has exactly two numeric members: seconds and
/// nanoseconds (prefixed or not). Anything else is an ordinary object.
fn store_parts(map: &Map<String, Value>) -> Option<(i64, u32)> {
    if map.len() != 2 {
        return None;
    }
    let seconds = SECONDS_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .and_then(Value::as_i64)?;
    let nanos = NANOS_KEYS
        .iter()
        .find_map(|k| map.get(*k))
        .and_then(Value::as_u64)?;
    u32::try_from(nanos).ok().map(|n| (seconds, n))
}

/// Whether `value` has the store-native timestamp shape.
pub fn is_store_timestamp(value: &Value) -> bool {
    value.as_object().and_then(store_parts).is_some()
}

/// Read a timestamp from a document value.
///
/// Accepts the store-native object and RFC 3339 strings. Returns `None`
/// for anything else, including out-of-range values.
pub fn from_store_value(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Object(map) => {
            let (secs, nanos) = store_parts(map)?;
            Utc.timestamp_opt(secs, nanos).single()
        }
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// Render a timestamp as an ISO-8601 string with millisecond precision.
pub fn to_iso_string(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Recursively rewrite every store-native timestamp in `value` as an
/// ISO-8601 string.
///
/// Walks objects and arrays without a field allowlist, so timestamps nested
/// anywhere in a document are converted.
pub fn normalize_timestamps(value: &mut Value) {
    if let Some(ts) = value
        .as_object()
        .and_then(store_parts)
        .and_then(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).single())
    {
        *value = Value::String(to_iso_string(&ts));
        return;
    }

    match value {
        Value::Object(map) => {
            for val in map.values_mut() {
                normalize_timestamps(val);
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                normalize_timestamps(item);
            }
        }
        _ => {}
    }
}
