//! Operator semantics shared by the SQL dialects.
//!
//! Only quoting, placeholder syntax and the LIKE keyword differ between SQL
//! Server, MySQL and PostgreSQL; those come from the format provider or are
//! passed in by the dialect.

use crate::{
    error::Result,
    transform::{
        ComposedTransformer, FragmentFn, ParameterFn, RuleTransformerRegistry, fragment,
        parameters, params,
    },
};

pub(crate) fn comparison(token: &'static str) -> FragmentFn {
    fragment(move |ctx| Ok(format!("{} {token} {}", ctx.field, ctx.placeholder(0)?)))
}

/// One `LIKE` per pattern, OR-joined; the negated form uses `NOT LIKE` and AND.
pub(crate) fn like(keyword: &'static str, negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let not = if negated { "NOT " } else { "" };
        Ok(ctx.join_each(negated, |p| format!("{} {not}{keyword} {p}", ctx.field)))
    })
}

pub(crate) fn in_list(negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let keyword = if negated { "NOT IN" } else { "IN" };
        Ok(format!(
            "{} {keyword} ({})",
            ctx.field,
            ctx.placeholders.join(", ")
        ))
    })
}

pub(crate) fn between(negated: bool) -> FragmentFn {
    fragment(move |ctx| {
        let keyword = if negated { "NOT BETWEEN" } else { "BETWEEN" };
        Ok(format!(
            "{} {keyword} {} AND {}",
            ctx.field,
            ctx.placeholder(0)?,
            ctx.placeholder(1)?
        ))
    })
}

pub(crate) fn suffix(text: &'static str) -> FragmentFn {
    fragment(move |ctx| Ok(format!("{} {text}", ctx.field)))
}

/// Registers every operator except `date_diff`, which each dialect renders
/// with its own date functions.
pub(crate) fn register_common(
    registry: &mut RuleTransformerRegistry,
    like_keyword: &'static str,
) -> Result<()> {
    let operators: Vec<(&str, ParameterFn, FragmentFn)> = vec![
        ("equal", parameters(params::single_value), comparison("=")),
        ("not_equal", parameters(params::single_value), comparison("<>")),
        ("less", parameters(params::single_value), comparison("<")),
        ("less_or_equal", parameters(params::single_value), comparison("<=")),
        ("greater", parameters(params::single_value), comparison(">")),
        ("greater_or_equal", parameters(params::single_value), comparison(">=")),
        ("in", parameters(params::one_or_many), in_list(false)),
        ("not_in", parameters(params::one_or_many), in_list(true)),
        ("between", parameters(params::exactly_two), between(false)),
        ("not_between", parameters(params::exactly_two), between(true)),
        ("contains", params::like_patterns("%", "%"), like(like_keyword, false)),
        ("not_contains", params::like_patterns("%", "%"), like(like_keyword, true)),
        ("begins_with", params::like_patterns("", "%"), like(like_keyword, false)),
        ("not_begins_with", params::like_patterns("", "%"), like(like_keyword, true)),
        ("ends_with", params::like_patterns("%", ""), like(like_keyword, false)),
        ("not_ends_with", params::like_patterns("%", ""), like(like_keyword, true)),
        ("is_null", parameters(params::no_value), suffix("IS NULL")),
        ("is_not_null", parameters(params::no_value), suffix("IS NOT NULL")),
        ("is_empty", parameters(params::no_value), suffix("= ''")),
        ("is_not_empty", parameters(params::no_value), suffix("<> ''")),
    ];

    for (operator, parameter_fn, fragment_fn) in operators {
        registry.register(
            operator,
            ComposedTransformer::new(operator, parameter_fn, fragment_fn)?,
        )?;
    }
    Ok(())
}
