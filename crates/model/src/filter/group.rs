use crate::filter::rule::FilterRule;
use serde::{Deserialize, Serialize};

/// A node combining child rules and sub-groups under one combinator.
///
/// `condition` is passed through as given; rules always render before
/// sub-groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub condition: String,
    #[serde(default)]
    pub rules: Vec<FilterRule>,
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
}

impl FilterGroup {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            rules: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn and(rules: Vec<FilterRule>) -> Self {
        Self {
            rules,
            ..Self::new("AND")
        }
    }

    pub fn or(rules: Vec<FilterRule>) -> Self {
        Self {
            rules,
            ..Self::new("OR")
        }
    }

    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_group(mut self, group: FilterGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn child_count(&self) -> usize {
        self.rules.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_count() == 0
    }
}
