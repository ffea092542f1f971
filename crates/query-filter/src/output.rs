//! Adapters over a compiled filter for execution APIs that expect named
//! parameters or a different placeholder convention.

use crate::{
    error::{FilterError, Result},
    format::FormatProvider,
};
use model::Value;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Pairs each parameter with the placeholder `format` emits for its index.
pub fn named_parameters(parameters: &[Value], format: &dyn FormatProvider) -> Vec<(String, Value)> {
    parameters
        .iter()
        .enumerate()
        .map(|(index, value)| (format.format_parameter_name(index), value.clone()))
        .collect()
}

/// Rewrites the first `count` placeholders of `query` into `render(index)`.
///
/// Numbered providers are matched by placeholder text, so `@p1` and `@p10`
/// never collide; positional providers (`?`) are rewritten in order of
/// appearance. Placeholders outside `0..count` are left untouched.
pub fn renumber_placeholders(
    query: &str,
    format: &dyn FormatProvider,
    count: usize,
    render: impl Fn(usize) -> String,
) -> Result<String> {
    let prefix = regex::escape(format.parameter_prefix());

    if format.is_positional() {
        let pattern = Regex::new(&prefix).map_err(invalid_pattern)?;
        let mut next = 0;
        let rewritten = pattern.replace_all(query, |caps: &Captures| {
            let index = next;
            next += 1;
            if index < count {
                render(index)
            } else {
                caps[0].to_string()
            }
        });
        return Ok(rewritten.into_owned());
    }

    let indices: HashMap<String, usize> = (0..count)
        .map(|index| (format.format_parameter_name(index), index))
        .collect();
    let pattern = Regex::new(&format!(r"{prefix}\d+")).map_err(invalid_pattern)?;
    let rewritten = pattern.replace_all(query, |caps: &Captures| match indices.get(&caps[0]) {
        Some(&index) => render(index),
        None => caps[0].to_string(),
    });
    Ok(rewritten.into_owned())
}

fn invalid_pattern(err: regex::Error) -> FilterError {
    FilterError::InvalidConfiguration(format!("invalid placeholder pattern: {err}"))
}
