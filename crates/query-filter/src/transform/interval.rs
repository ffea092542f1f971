use crate::error::{FilterError, Result};
use model::RuleMetadata;
use std::fmt;

/// Units understood by `date_diff`. Each dialect accepts a subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalType {
    Year,
    Quarter,
    Month,
    DayOfYear,
    Day,
    Week,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

impl IntervalType {
    pub const ALL: [IntervalType; 12] = [
        IntervalType::Year,
        IntervalType::Quarter,
        IntervalType::Month,
        IntervalType::DayOfYear,
        IntervalType::Day,
        IntervalType::Week,
        IntervalType::Hour,
        IntervalType::Minute,
        IntervalType::Second,
        IntervalType::Millisecond,
        IntervalType::Microsecond,
        IntervalType::Nanosecond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalType::Year => "year",
            IntervalType::Quarter => "quarter",
            IntervalType::Month => "month",
            IntervalType::DayOfYear => "dayofyear",
            IntervalType::Day => "day",
            IntervalType::Week => "week",
            IntervalType::Hour => "hour",
            IntervalType::Minute => "minute",
            IntervalType::Second => "second",
            IntervalType::Millisecond => "millisecond",
            IntervalType::Microsecond => "microsecond",
            IntervalType::Nanosecond => "nanosecond",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.as_str().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads `metadata.intervalType`, defaulting to `day` when it is absent or blank,
/// and checks it against the units a dialect can render.
pub fn resolve_interval(
    metadata: Option<&RuleMetadata>,
    accepted: &[IntervalType],
) -> Result<IntervalType> {
    let token = metadata
        .and_then(|m| m.interval_type.as_deref())
        .map(str::trim)
        .unwrap_or_default();

    if token.is_empty() {
        return Ok(IntervalType::Day);
    }

    IntervalType::parse(token)
        .filter(|interval| accepted.contains(interval))
        .ok_or_else(|| FilterError::InvalidIntervalType {
            interval: token.to_string(),
            valid: accepted
                .iter()
                .map(IntervalType::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })
}
