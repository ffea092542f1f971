//! Built-in converters for the common value type tags.
//!
//! Every converter maps list values element-wise, so `"type": "double"` on an
//! `in` rule yields a list of floats.

use crate::error::{FilterError, Result};
use bigdecimal::{BigDecimal, FromPrimitive};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use model::{RuleMetadata, Value};
use std::str::FromStr;
use uuid::Uuid;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses the date/time shapes produced by query-builder front-ends.
///
/// RFC 3339 input is reduced to its UTC wall time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    parse_with(text, |dt| dt.naive_utc())
}

/// Like [`parse_timestamp`], but RFC 3339 input keeps the wall time written
/// in the literal. Calendar-day bounds are taken from this, so
/// `2023-01-15T22:30:00-05:00` stays on the 15th.
pub fn parse_wall_timestamp(text: &str) -> Option<NaiveDateTime> {
    parse_with(text, |dt| dt.naive_local())
}

fn parse_with(
    text: &str,
    offset_wall_time: fn(DateTime<FixedOffset>) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(offset_wall_time(dt));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn map_elements(value: Value, convert: impl Fn(Value) -> Result<Value> + Copy) -> Result<Value> {
    match value {
        Value::List(items) => items
            .into_iter()
            .map(|item| map_elements(item, convert))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Value::Null => Ok(Value::Null),
        scalar => convert(scalar),
    }
}

fn unconvertible(type_tag: &str, value: &Value) -> FilterError {
    FilterError::conversion(
        type_tag,
        format!("cannot convert {} value {value}", value.type_name()),
    )
}

pub fn to_string(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| match v {
        Value::String(_) => Ok(v),
        other => other
            .as_string()
            .map(Value::String)
            .ok_or_else(|| unconvertible("string", &other)),
    })
}

pub fn to_int(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| {
        v.as_i64()
            .map(Value::Int)
            .ok_or_else(|| unconvertible("int", &v))
    })
}

pub fn to_double(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| {
        v.as_f64()
            .map(Value::Float)
            .ok_or_else(|| unconvertible("double", &v))
    })
}

pub fn to_decimal(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| match v {
        Value::Decimal(_) => Ok(v),
        Value::Int(i) => Ok(Value::Decimal(BigDecimal::from(i))),
        Value::Float(f) => BigDecimal::from_f64(f)
            .map(Value::Decimal)
            .ok_or_else(|| unconvertible("decimal", &Value::Float(f))),
        Value::String(s) => BigDecimal::from_str(s.trim())
            .map(Value::Decimal)
            .map_err(|e| FilterError::conversion("decimal", format!("'{s}': {e}"))),
        other => Err(unconvertible("decimal", &other)),
    })
}

pub fn to_bool(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| match v {
        Value::Boolean(_) => Ok(v),
        Value::Int(i) => Ok(Value::Boolean(i != 0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Value::Boolean(true)),
            "false" | "0" | "no" => Ok(Value::Boolean(false)),
            _ => Err(unconvertible("boolean", &Value::String(s))),
        },
        other => Err(unconvertible("boolean", &other)),
    })
}

/// Date ranges keep each literal's own calendar day; everything else is
/// normalized to UTC.
pub fn to_timestamp(value: Value, metadata: Option<&RuleMetadata>) -> Result<Value> {
    let parse: fn(&str) -> Option<NaiveDateTime> =
        if metadata.is_some_and(RuleMetadata::is_date_range) {
            parse_wall_timestamp
        } else {
            parse_timestamp
        };

    map_elements(value, |v| match v {
        Value::Timestamp(_) => Ok(v),
        Value::Date(d) => d
            .and_hms_opt(0, 0, 0)
            .map(Value::Timestamp)
            .ok_or_else(|| unconvertible("date", &Value::Date(d))),
        Value::String(s) => parse(&s)
            .map(Value::Timestamp)
            .ok_or_else(|| FilterError::conversion("date", format!("'{s}' is not a valid date"))),
        other => Err(unconvertible("date", &other)),
    })
}

pub fn to_uuid(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
    map_elements(value, |v| match v {
        Value::Uuid(_) => Ok(v),
        Value::String(s) => Uuid::parse_str(s.trim())
            .map(Value::Uuid)
            .map_err(|e| FilterError::conversion("uuid", format!("'{s}': {e}"))),
        other => Err(unconvertible("uuid", &other)),
    })
}
