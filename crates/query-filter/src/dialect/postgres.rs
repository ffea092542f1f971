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
    IntervalType::Day,
    IntervalType::Hour,
    IntervalType::Minute,
    IntervalType::Second,
    IntervalType::Millisecond,
    IntervalType::Microsecond,
];

fn extract_field(interval: IntervalType) -> String {
    match interval {
        IntervalType::Millisecond => "MILLISECONDS".to_string(),
        IntervalType::Microsecond => "MICROSECONDS".to_string(),
        other => other.as_str().to_uppercase(),
    }
}

fn date_diff(ctx: &QueryContext<'_>) -> Result<String> {
    let interval = resolve_interval(ctx.metadata, INTERVALS)?;
    Ok(format!(
        "EXTRACT({} FROM NOW() - {}) = {}",
        extract_field(interval),
        ctx.field,
        ctx.placeholder(0)?
    ))
}

pub fn default_transformers() -> Result<RuleTransformerRegistry> {
    let mut registry = RuleTransformerRegistry::new();
    sql::register_common(&mut registry, "ILIKE")?;
    registry.register(
        "date_diff",
        ComposedTransformer::new("date_diff", params::numeric_value, date_diff)?,
    )?;
    Ok(registry)
}
