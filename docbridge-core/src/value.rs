//! Conversion between canonical JSON values and the store's BSON value tree.
//!
//! Callers work with [`Record`]s made of plain JSON values. Backends work with
//! [`bson::Document`]s, where timestamps are typed values rather than strings.
//! Both directions are generic tree transforms over the tagged value types:
//! arrays are mapped element-wise, documents field-by-field, scalars directly.

use bson::{Bson, Document, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// A canonical record: snake_case field names mapped to plain JSON values.
pub type Record = Map<String, Value>;

/// Unwraps a JSON object into a [`Record`].
///
/// # Errors
///
/// Returns [`StoreError::InvalidDocument`] if the value is not an object.
pub fn into_record(value: Value) -> StoreResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "expected a JSON object, found {other}"
        ))),
    }
}

/// Converts a canonical JSON value into a store-native BSON value.
///
/// Integers become `Int64`, other numbers `Double`. Strings are never parsed, so an
/// ISO-8601 string written by a caller is stored as a string.
///
/// # Errors
///
/// Returns [`StoreError::Serialization`] for unsigned integers that do not fit in an `i64`.
pub fn to_native_value(value: Value) -> StoreResult<Bson> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => native_number(&n)?,
        Value::String(s) => Bson::String(s),
        Value::Array(items) => Bson::Array(
            items
                .into_iter()
                .map(to_native_value)
                .collect::<StoreResult<Vec<_>>>()?,
        ),
        Value::Object(map) => Bson::Document(to_native_document(map)?),
    })
}

/// Converts every value of a JSON object into BSON, keeping keys unchanged.
pub fn to_native_document(map: Map<String, Value>) -> StoreResult<Document> {
    map.into_iter()
        .map(|(key, value)| to_native_value(value).map(|bson| (key, bson)))
        .collect()
}

fn native_number(n: &Number) -> StoreResult<Bson> {
    if let Some(i) = n.as_i64() {
        return Ok(Bson::Int64(i));
    }
    if n.is_u64() {
        return Err(StoreError::Serialization(format!(
            "integer {n} does not fit in a signed 64-bit store value"
        )));
    }

    n.as_f64()
        .map(Bson::Double)
        .ok_or_else(|| StoreError::Serialization(format!("unrepresentable number {n}")))
}

/// Converts a store-native BSON value into a canonical JSON value.
///
/// Store timestamps (`DateTime` and `Timestamp`) become ISO-8601 strings with
/// millisecond precision, e.g. `2024-05-01T09:30:00.000Z`. Non-finite doubles
/// become `null`. Object ids and other BSON-only scalars become their string form.
/// A `DateTime` outside chrono's representable range is rendered as its decimal
/// millisecond count.
pub fn to_canonical_value(value: Bson) -> Value {
    match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Symbol(s) => Value::String(s),
        Bson::DateTime(dt) => Value::String(iso_from_millis(dt.timestamp_millis())),
        Bson::Timestamp(ts) => Value::String(iso_from_timestamp(ts)),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Array(items) => Value::Array(
            items
                .into_iter()
                .map(to_canonical_value)
                .collect(),
        ),
        Bson::Document(doc) => Value::Object(to_canonical_document(doc)),
        other => Value::String(other.to_string()),
    }
}

/// Converts every value of a BSON document into JSON, keeping keys unchanged.
pub fn to_canonical_document(doc: Document) -> Map<String, Value> {
    doc.into_iter()
        .map(|(key, value)| (key, to_canonical_value(value)))
        .collect()
}

fn iso_from_millis(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => {
            debug!(millis, "timestamp out of range; rendering raw milliseconds");
            millis.to_string()
        }
    }
}

fn iso_from_timestamp(ts: Timestamp) -> String {
    iso_from_millis(i64::from(ts.time) * 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    #[test]
    fn datetime_becomes_iso_string() {
        let dt = bson::DateTime::from_millis(1_714_555_800_123);

        assert_eq!(
            to_canonical_value(Bson::DateTime(dt)),
            json!("2024-05-01T09:30:00.123Z"),
        );
    }

    #[test]
    fn timestamps_are_converted_inside_nested_values() {
        let dt = bson::DateTime::from_millis(0);
        let native = Bson::Document(doc! {
            "sessions": [ { "startTime": dt }, { "startTime": Bson::Null } ],
            "meta": { "markedAt": Bson::Timestamp(Timestamp { time: 60, increment: 1 }) },
            "seats": 30_i32,
        });

        assert_eq!(
            to_canonical_value(native),
            json!({
                "sessions": [
                    { "startTime": "1970-01-01T00:00:00.000Z" },
                    { "startTime": null },
                ],
                "meta": { "markedAt": "1970-01-01T00:01:00.000Z" },
                "seats": 30,
            }),
        );
    }

    #[test]
    fn json_values_survive_a_trip_through_bson() {
        let value = json!({
            "title": "Intro",
            "price": 100,
            "rating": 4.5,
            "refund": -20,
            "published": true,
            "tags": ["rust", 1, null],
            "nested": { "deep": [ { "x": "2024-05-01T09:30:00.000Z" } ] },
        });

        let native = to_native_value(value.clone()).unwrap();

        assert_eq!(to_canonical_value(native), value);
    }

    #[test]
    fn only_objects_become_records() {
        assert_eq!(into_record(json!({ "uid": "u1" })).unwrap().len(), 1);
        assert!(matches!(into_record(json!([1, 2])), Err(StoreError::InvalidDocument(_))));
    }

    #[test]
    fn out_of_range_datetime_becomes_raw_milliseconds() {
        assert_eq!(
            to_canonical_value(Bson::DateTime(bson::DateTime::MAX)),
            json!(i64::MAX.to_string()),
        );
    }

    #[test]
    fn oversized_unsigned_integer_is_rejected() {
        let err = to_native_value(json!(u64::MAX)).unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
