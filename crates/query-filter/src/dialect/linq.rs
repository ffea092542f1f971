//! Operator set for the in-memory expression dialect.
//!
//! Fragments are predicate strings over .NET-style member access; `@pN`
//! tokens are substituted by the expression parser, not a database driver.

use crate::{
    error::Result,
    transform::{
        ComposedTransformer, FragmentFn, ParameterFn, QueryContext, RuleTransformerRegistry,
        fragment,
        interval::{IntervalType, resolve_interval},
        parameters, params,
    },
};

const INTERVALS: &[IntervalType] = &[
    IntervalType::Year,
    IntervalType::Month,
    IntervalType::Day,
    IntervalType::Hour,
    IntervalType::Minute,
    IntervalType::Second,
    IntervalType::Millisecond,
];

fn comparison(token: &'static str) -> FragmentFn {
    fragment(move |ctx| Ok(format!("{} {token} {}", ctx.field, ctx.placeholder(0)?)))
}

fn method(name: &'static str, negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let bang = if negated { "!" } else { "" };
        Ok(ctx.join_each(negated, |p| format!("{bang}{}.{name}({p})", ctx.field)))
    })
}

fn membership(negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let token = if negated { "!=" } else { "==" };
        Ok(ctx.join_each(negated, |p| format!("{} {token} {p}", ctx.field)))
    })
}

fn between(negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let (field, lower, upper) = (&ctx.field, ctx.placeholder(0)?, ctx.placeholder(1)?);
        Ok(if negated {
            format!("({field} < {lower}{}{field} > {upper})", ctx.format.or_operator())
        } else {
            format!("({field} >= {lower}{}{field} <= {upper})", ctx.format.and_operator())
        })
    })
}

fn compare_to(literal: &'static str, negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let token = if negated { "!=" } else { "==" };
        Ok(format!("{} {token} {literal}", ctx.field))
    })
}

fn date_diff(ctx: &QueryContext<'_>) -> Result<String> {
    let (field, p) = (&ctx.field, ctx.placeholder(0)?);
    Ok(match resolve_interval(ctx.metadata, INTERVALS)? {
        IntervalType::Year => format!("DateTime.Now.Year - {field}.Year == {p}"),
        IntervalType::Month => format!(
            "(DateTime.Now.Year - {field}.Year) * 12 + DateTime.Now.Month - {field}.Month == {p}"
        ),
        IntervalType::Hour => format!("Math.Floor((DateTime.Now - {field}).TotalHours) == {p}"),
        IntervalType::Minute => {
            format!("Math.Floor((DateTime.Now - {field}).TotalMinutes) == {p}")
        }
        IntervalType::Second => {
            format!("Math.Floor((DateTime.Now - {field}).TotalSeconds) == {p}")
        }
        IntervalType::Millisecond => {
            format!("Math.Floor((DateTime.Now - {field}).TotalMilliseconds) == {p}")
        }
        _ => format!("Math.Floor((DateTime.Now - {field}).TotalDays) == {p}"),
    })
}

pub fn default_transformers() -> Result<RuleTransformerRegistry> {
    let operators: Vec<(&str, ParameterFn, FragmentFn)> = vec![
        ("equal", parameters(params::single_value), comparison("==")),
        ("not_equal", parameters(params::single_value), comparison("!=")),
        ("less", parameters(params::single_value), comparison("<")),
        ("less_or_equal", parameters(params::single_value), comparison("<=")),
        ("greater", parameters(params::single_value), comparison(">")),
        ("greater_or_equal", parameters(params::single_value), comparison(">=")),
        ("in", parameters(params::one_or_many), membership(false)),
        ("not_in", parameters(params::one_or_many), membership(true)),
        ("between", parameters(params::exactly_two), between(false)),
        ("not_between", parameters(params::exactly_two), between(true)),
        ("contains", parameters(params::one_or_many), method("Contains", false)),
        ("not_contains", parameters(params::one_or_many), method("Contains", true)),
        ("begins_with", parameters(params::one_or_many), method("StartsWith", false)),
        ("not_begins_with", parameters(params::one_or_many), method("StartsWith", true)),
        ("ends_with", parameters(params::one_or_many), method("EndsWith", false)),
        ("not_ends_with", parameters(params::one_or_many), method("EndsWith", true)),
        ("is_null", parameters(params::no_value), compare_to("null", false)),
        ("is_not_null", parameters(params::no_value), compare_to("null", true)),
        ("is_empty", parameters(params::no_value), compare_to("\"\"", false)),
        ("is_not_empty", parameters(params::no_value), compare_to("\"\"", true)),
        ("date_diff", parameters(params::numeric_value), fragment(date_diff)),
    ];

    let mut registry = RuleTransformerRegistry::new();
    for (operator, parameter_fn, fragment_fn) in operators {
        registry.register(
            operator,
            ComposedTransformer::new(operator, parameter_fn, fragment_fn)?,
        )?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        format::LinqFormat,
        transform::{RuleTransformer, TransformResult},
    };
    use model::{FilterRule, RuleMetadata, Value, rule};

    fn transform(rule: &FilterRule) -> Result<TransformResult> {
        default_transformers()?
            .get(&rule.operator)?
            .transform(rule, &rule.field_name, 0, &LinqFormat)
    }

    fn query(rule: FilterRule) -> String {
        transform(&rule).unwrap().query
    }

    #[test]
    fn test_string_methods_bind_raw_values() {
        let result = transform(&rule!("Name", "contains", vec!["a", "b"])).unwrap();
        assert_eq!(result.query, "(Name.Contains(@p0) || Name.Contains(@p1))");
        assert_eq!(result.parameters, Some(vec![Value::from("a"), Value::from("b")]));

        assert_eq!(
            query(rule!("Name", "not_begins_with", vec!["x", "y"])),
            "(!Name.StartsWith(@p0) && !Name.StartsWith(@p1))"
        );
        assert_eq!(query(rule!("Name", "ends_with", "z")), "Name.EndsWith(@p0)");
    }

    #[test]
    fn test_membership_and_ranges() {
        assert_eq!(
            query(rule!("Id", "in", vec![1, 2])),
            "(Id == @p0 || Id == @p1)"
        );
        assert_eq!(
            query(rule!("Id", "not_in", vec![1, 2])),
            "(Id != @p0 && Id != @p1)"
        );
        assert_eq!(
            query(rule!("Age", "between", vec![1, 9])),
            "(Age >= @p0 && Age <= @p1)"
        );
        assert_eq!(
            query(rule!("Age", "not_between", vec![1, 9])),
            "(Age < @p0 || Age > @p1)"
        );
    }

    #[test]
    fn test_null_and_empty_checks() {
        assert_eq!(query(rule!("Email", "is_null")), "Email == null");
        assert_eq!(query(rule!("Email", "is_not_empty")), r#"Email != """#);
        assert_eq!(query(rule!("User.Email", "not_equal", "a")), "User.Email != @p0");
    }

    #[test]
    fn test_date_diff_forms() {
        let in_unit = |unit: &str| {
            query(rule!("Created", "date_diff", 1).with_metadata(RuleMetadata::interval(unit)))
        };
        assert_eq!(in_unit("year"), "DateTime.Now.Year - Created.Year == @p0");
        assert_eq!(
            in_unit("month"),
            "(DateTime.Now.Year - Created.Year) * 12 + DateTime.Now.Month - Created.Month == @p0"
        );
        assert_eq!(
            in_unit(""),
            "Math.Floor((DateTime.Now - Created).TotalDays) == @p0"
        );
        assert_eq!(
            in_unit("Millisecond"),
            "Math.Floor((DateTime.Now - Created).TotalMilliseconds) == @p0"
        );
    }

    #[test]
    fn test_date_diff_rejects_quarter() {
        let rule = rule!("Created", "date_diff", 1).with_metadata(RuleMetadata::interval("quarter"));
        assert_eq!(
            transform(&rule).unwrap_err().to_string(),
            "Invalid interval type 'quarter'. Valid values are: year, month, day, hour, minute, second, millisecond"
        );
    }
}
