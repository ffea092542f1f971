use crate::{core::value::Value, filter::metadata::RuleMetadata};
use serde::{Deserialize, Serialize};

/// A leaf condition of a filter tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    pub field_name: String,
    pub operator: String,
    #[serde(default)]
    pub value: Option<Value>,
    /// Declared value type tag (`"date"`, `"int"`, ...); empty when unspecified.
    #[serde(default, rename = "type")]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RuleMetadata>,
}

impl FilterRule {
    pub fn new(field_name: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            operator: operator.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    pub fn with_metadata(mut self, metadata: RuleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// The bound value, with an explicit `Null` treated as absent.
    pub fn present_value(&self) -> Option<&Value> {
        self.value.as_ref().filter(|v| !v.is_null())
    }
}
