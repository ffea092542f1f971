use crate::{
    dialect::sql,
    error::Result,
    transform::{
        ComposedTransformer, QueryContext, RuleTransformerRegistry,
        interval::{IntervalType, resolve_interval},
        params,
    },
};

const INTERVALS: &[IntervalType] = &[
    IntervalType::Year,
    IntervalType::Quarter,
    IntervalType::Month,
    IntervalType::Week,
    IntervalType::Day,
    IntervalType::Hour,
    IntervalType::Minute,
    IntervalType::Second,
    IntervalType::Millisecond,
    IntervalType::Microsecond,
];

// `DATEDIFF` only counts days and `TIMESTAMPDIFF` has no millisecond unit.
fn date_diff(ctx: &QueryContext<'_>) -> Result<String> {
    let field = &ctx.field;
    let expr = match resolve_interval(ctx.metadata, INTERVALS)? {
        IntervalType::Day => format!("DATEDIFF(NOW(), {field})"),
        IntervalType::Millisecond => {
            format!("FLOOR(TIMESTAMPDIFF(MICROSECOND, {field}, NOW(6)) / 1000)")
        }
        IntervalType::Microsecond => format!("TIMESTAMPDIFF(MICROSECOND, {field}, NOW(6))"),
        other => format!(
            "TIMESTAMPDIFF({}, {field}, NOW())",
            other.as_str().to_uppercase()
        ),
    };
    Ok(format!("{expr} = {}", ctx.placeholder(0)?))
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
