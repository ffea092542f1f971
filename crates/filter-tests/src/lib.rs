#![allow(dead_code)]

use model::FilterGroup;
use query_filter::{CompiledFilter, Dialect, FilterBuilder, Result};
use serde_json::json;


/// Deserializes a filter tree the way the CLI reads it from disk.
pub fn tree(value: serde_json::Value) -> FilterGroup {
    serde_json::from_value(value).expect("valid filter tree")
}

pub fn compile(dialect: Dialect, tree: &FilterGroup) -> Result<CompiledFilter> {
    FilterBuilder::new(dialect)?.build(tree)
}

/// `Name = 'John' AND Age > 25`
pub fn name_and_age() -> FilterGroup {
    tree(json!({
        "condition": "AND",
        "rules": [
            { "fieldName": "Name", "operator": "equal", "value": "John" },
            { "fieldName": "Age", "operator": "greater", "value": 25 }
        ]
    }))
}

/// Three levels deep, every level mixing rules with sub-groups.
pub fn nested_orders() -> FilterGroup {
    tree(json!({
        "condition": "AND",
        "rules": [
            { "fieldName": "Status", "operator": "in", "value": ["open", "held"] }
        ],
        "groups": [
            {
                "condition": "OR",
                "rules": [
                    { "fieldName": "Total", "operator": "greater_or_equal", "value": "100.50", "type": "decimal" },
                    { "fieldName": "Customer.Name", "operator": "begins_with", "value": "Ac" }
                ],
                "groups": [
                    {
                        "condition": "AND",
                        "rules": [
                            { "fieldName": "Notes", "operator": "is_not_null" },
                            { "fieldName": "Priority", "operator": "between", "value": [1, 3] }
                        ]
                    }
                ]
            },
            {
                "condition": "OR",
                "rules": [
                    { "fieldName": "Region", "operator": "not_equal", "value": "EU" }
                ]
            }
        ]
    }))
}

pub fn date_range(operator: &str) -> FilterGroup {
    tree(json!({
        "condition": "AND",
        "rules": [{
            "fieldName": "CreatedAt",
            "operator": operator,
            "value": ["2023-01-15T10:30:00", "2023-01-20T14:45:00"],
            "metadata": { "type": "date" }
        }]
    }))
}

pub fn single_rule(field: &str, operator: &str, value: serde_json::Value) -> FilterGroup {
    tree(json!({
        "condition": "AND",
        "rules": [{ "fieldName": field, "operator": operator, "value": value }]
    }))
}
