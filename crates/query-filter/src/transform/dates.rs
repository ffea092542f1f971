//! Calendar-day normalization for date ranges.

use crate::{
    conversion::converters::parse_wall_timestamp,
    error::{FilterError, Result},
};
use chrono::{NaiveDateTime, NaiveTime};
use model::Value;

/// Last representable tick of a day at 100ns resolution (23:59:59.9999999).
const END_OF_DAY_NANOS: u32 = 999_999_900;

fn as_timestamp(operator: &str, value: &Value) -> Result<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => Ok(*ts),
        Value::Date(d) => Ok(d.and_time(NaiveTime::MIN)),
        Value::String(s) => parse_wall_timestamp(s).ok_or_else(|| {
            FilterError::conversion("date", format!("{operator} bound '{s}' is not a valid date"))
        }),
        other => Err(FilterError::conversion(
            "date",
            format!("{operator} bound of type {} is not a date", other.type_name()),
        )),
    }
}

pub fn start_of_day(ts: NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}

pub fn end_of_day(ts: NaiveDateTime) -> Option<NaiveDateTime> {
    ts.date().and_hms_nano_opt(23, 59, 59, END_OF_DAY_NANOS)
}

/// Widens `[lower, upper]` to cover both days completely, ignoring the
/// original time-of-day components.
pub fn day_bounds(operator: &str, lower: &Value, upper: &Value) -> Result<Vec<Value>> {
    let start = start_of_day(as_timestamp(operator, lower)?);
    let upper = as_timestamp(operator, upper)?;
    let end = end_of_day(upper).ok_or_else(|| {
        FilterError::conversion("date", format!("{operator} upper bound {upper} is out of range"))
    })?;

    Ok(vec![Value::Timestamp(start), Value::Timestamp(end)])
}
