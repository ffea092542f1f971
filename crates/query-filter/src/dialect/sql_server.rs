use crate::{
    dialect::sql,
    error::Result,
    transform::{
        ComposedTransformer, QueryContext, RuleTransformerRegistry,
        interval::{IntervalType, resolve_interval},
        params,
    },
};

/// `DATEDIFF` accepts every datepart we know about.
const INTERVALS: &[IntervalType] = &IntervalType::ALL;

fn date_diff(ctx: &QueryContext<'_>) -> Result<String> {
    let interval = resolve_interval(ctx.metadata, INTERVALS)?;
    Ok(format!(
        "DATEDIFF({interval}, {}, GETDATE()) = {}",
        ctx.field,
        ctx.placeholder(0)?
    ))
}

pub fn default_transformers() -> Result<RuleTransformerRegistry> {
    let mut registry = RuleTransformerRegistry::new();
    sql::register_common(&mut registry, "LIKE")?;
    registry.register(
        "date_diff",
        ComposedTransformer::new("date_diff", params::numeric_value, date_diff)?,
    )?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::SqlServerFormat,
        transform::{RuleTransformer, TransformResult},
    };
    use model::{FilterRule, RuleMetadata, Value, rule};

    fn transform(rule: &FilterRule, index: usize) -> Result<TransformResult> {
        default_transformers()?
            .get(&rule.operator)?
            .transform(rule, &rule.field_name, index, &SqlServerFormat)
    }

    #[test]
    fn test_contains_joins_patterns_with_or() {
        let result = transform(&rule!("Name", "contains", vec!["a", "b"]), 2).unwrap();
        assert_eq!(result.query, "([Name] LIKE @p2 OR [Name] LIKE @p3)");
        assert_eq!(
            result.parameters,
            Some(vec![Value::from("%a%"), Value::from("%b%")])
        );
    }

    #[test]
    fn test_not_contains_joins_patterns_with_and() {
        let result = transform(&rule!("Name", "not_contains", vec!["a", "b"]), 0).unwrap();
        assert_eq!(result.query, "([Name] NOT LIKE @p0 AND [Name] NOT LIKE @p1)");
    }

    #[test]
    fn test_single_pattern_is_not_parenthesized() {
        let result = transform(&rule!("Name", "begins_with", "Jo"), 0).unwrap();
        assert_eq!(result.query, "[Name] LIKE @p0");
        assert_eq!(result.parameters, Some(vec![Value::from("Jo%")]));
    }

    #[test]
    fn test_in_and_between() {
        let result = transform(&rule!("Id", "in", vec![1, 2, 3]), 1).unwrap();
        assert_eq!(result.query, "[Id] IN (@p1, @p2, @p3)");

        let result = transform(&rule!("Age", "not_between", vec![18, 65]), 0).unwrap();
        assert_eq!(result.query, "[Age] NOT BETWEEN @p0 AND @p1");
        assert_eq!(result.parameter_count(), 2);
    }

    #[test]
    fn test_no_value_operators_bind_nothing() {
        let result = transform(&rule!("Email", "is_not_empty", "ignored"), 5).unwrap();
        assert_eq!(result.query, "[Email] <> ''");
        assert_eq!(result.parameters, None);
    }

    #[test]
    fn test_date_diff_units() {
        let result = transform(&rule!("Created", "date_diff", 3), 0).unwrap();
        assert_eq!(result.query, "DATEDIFF(day, [Created], GETDATE()) = @p0");

        let rule = rule!("Created", "date_diff", 3).with_metadata(RuleMetadata::interval("Nanosecond"));
        let result = transform(&rule, 0).unwrap();
        assert_eq!(result.query, "DATEDIFF(nanosecond, [Created], GETDATE()) = @p0");
    }

    #[test]
    fn test_date_diff_rejects_unknown_unit() {
        let rule = rule!("Created", "date_diff", 3).with_metadata(RuleMetadata::interval("decade"));
        let err = transform(&rule, 0).unwrap_err();
        assert!(err.to_string().starts_with("Invalid interval type 'decade'"));
    }

    #[test]
    fn test_registers_full_operator_set() {
        assert_eq!(default_transformers().unwrap().len(), 21);
    }
}
