use serde::{Deserialize, Serialize};

/// Operator-specific side channel attached to a rule.
///
/// Only the keys some transformer actually reads are modelled; anything else
/// present in the source document is dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMetadata {
    /// Unit used by `date_diff` (`day`, `month`, ...).
    #[serde(
        default,
        rename = "intervalType",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval_type: Option<String>,

    /// Range normalization tag read by `between` / `not_between`.
    /// Distinct from the rule's own declared value type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl RuleMetadata {
    pub fn interval(interval_type: impl Into<String>) -> Self {
        Self {
            interval_type: Some(interval_type.into()),
            value_type: None,
        }
    }

    pub fn typed(value_type: impl Into<String>) -> Self {
        Self {
            interval_type: None,
            value_type: Some(value_type.into()),
        }
    }

    /// Whether the range bounds should be treated as calendar dates.
    pub fn is_date_range(&self) -> bool {
        self.value_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("date"))
    }
}
