//! Parameter builders shared by every dialect.
//!
//! Each builder enforces one arity class and returns the values an operator
//! binds, or `None` when it binds nothing.

use crate::{
    error::{FilterError, Result},
    transform::{ParameterFn, dates, parameters},
};
use model::{RuleMetadata, Value};

fn require_value<'v>(operator: &str, value: Option<&'v Value>) -> Result<&'v Value> {
    value.ok_or_else(|| FilterError::NullValue {
        operator: operator.to_string(),
    })
}

/// Treats a scalar as a one-element collection; rejects null, empty lists and
/// null elements.
pub fn collect_values(operator: &str, value: Option<&Value>) -> Result<Vec<Value>> {
    let value = require_value(operator, value)?;
    let items = match value.as_list() {
        Some(items) => items.to_vec(),
        None => vec![value.clone()],
    };

    if items.is_empty() {
        return Err(FilterError::EmptyValue {
            operator: operator.to_string(),
        });
    }
    if items.iter().any(Value::is_null) {
        return Err(FilterError::NullValue {
            operator: operator.to_string(),
        });
    }
    Ok(items)
}

/// `is_null`, `is_empty` and friends: the rule value is ignored.
pub fn no_value(
    _operator: &str,
    _value: Option<&Value>,
    _metadata: Option<&RuleMetadata>,
) -> Result<Option<Vec<Value>>> {
    Ok(None)
}

/// Comparison operators: bind the value as-is.
pub fn single_value(
    operator: &str,
    value: Option<&Value>,
    _metadata: Option<&RuleMetadata>,
) -> Result<Option<Vec<Value>>> {
    let value = require_value(operator, value)?;
    Ok(Some(vec![value.clone()]))
}

/// `in` / `not_in`: one parameter per element.
pub fn one_or_many(
    operator: &str,
    value: Option<&Value>,
    _metadata: Option<&RuleMetadata>,
) -> Result<Option<Vec<Value>>> {
    collect_values(operator, value).map(Some)
}

/// `between` / `not_between`: exactly two bounds, widened to whole days when
/// the metadata tags the range as a date range.
pub fn exactly_two(
    operator: &str,
    value: Option<&Value>,
    metadata: Option<&RuleMetadata>,
) -> Result<Option<Vec<Value>>> {
    let Value::List(items) = require_value(operator, value)? else {
        return Err(FilterError::NotACollection {
            operator: operator.to_string(),
        });
    };

    let [lower, upper] = items.as_slice() else {
        return Err(FilterError::ValueCount {
            operator: operator.to_string(),
        });
    };

    if metadata.is_some_and(RuleMetadata::is_date_range) {
        return dates::day_bounds(operator, lower, upper).map(Some);
    }
    Ok(Some(vec![lower.clone(), upper.clone()]))
}

/// `date_diff`: a single finite number; numeric strings are parsed.
pub fn numeric_value(
    operator: &str,
    value: Option<&Value>,
    _metadata: Option<&RuleMetadata>,
) -> Result<Option<Vec<Value>>> {
    let not_numeric = || FilterError::NotNumeric {
        operator: operator.to_string(),
    };

    let number = match require_value(operator, value)? {
        v @ (Value::Int(_) | Value::Decimal(_)) => v.clone(),
        Value::Float(f) if f.is_finite() => Value::Float(*f),
        Value::String(s) => match (s.trim().parse::<i64>(), s.trim().parse::<f64>()) {
            (Ok(i), _) => Value::Int(i),
            (_, Ok(f)) if f.is_finite() => Value::Float(f),
            _ => return Err(not_numeric()),
        },
        _ => return Err(not_numeric()),
    };
    Ok(Some(vec![number]))
}

/// LIKE-style operators: one pattern per element, wrapped in `prefix`/`suffix`.
pub fn like_patterns(prefix: &'static str, suffix: &'static str) -> ParameterFn {
    parameters(move |operator, value, _metadata| {
        let patterns = collect_values(operator, value)?
            .into_iter()
            .map(|item| match item.as_string() {
                Some(text) => Value::String(format!("{prefix}{text}{suffix}")),
                None => item,
            })
            .collect();
        Ok(Some(patterns))
    })
}
