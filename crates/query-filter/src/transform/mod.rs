//! Rule transformers: one unit per operator that turns a rule into a query
//! fragment plus the parameters it binds.

use crate::{
    error::{FilterError, Result},
    format::FormatProvider,
};
use model::{FilterRule, RuleMetadata, Value};

pub mod dates;
pub mod interval;
pub mod params;
pub mod registry;

pub use interval::IntervalType;
pub use registry::RuleTransformerRegistry;

/// Output of a single transformer call.
///
/// `parameters` is `None` (not empty) when the operator binds nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformResult {
    pub query: String,
    pub parameters: Option<Vec<Value>>,
}

impl TransformResult {
    pub fn parameter_count(&self) -> usize {
        self.parameters.as_ref().map_or(0, Vec::len)
    }
}

pub trait RuleTransformer: Send + Sync {
    /// Renders `rule` against `field_name`, numbering placeholders from
    /// `parameter_index`.
    fn transform(
        &self,
        rule: &FilterRule,
        field_name: &str,
        parameter_index: usize,
        format: &dyn FormatProvider,
    ) -> Result<TransformResult>;

    /// Shorthand for dialects whose placeholders ignore the running index.
    fn transform_positional(
        &self,
        rule: &FilterRule,
        field_name: &str,
        format: &dyn FormatProvider,
    ) -> Result<TransformResult> {
        self.transform(rule, field_name, 0, format)
    }
}

/// Everything a fragment builder needs once the parameters are settled.
pub struct QueryContext<'a> {
    /// Upper-cased operator label used in error messages.
    pub operator: &'a str,
    /// Field name already quoted by the format provider.
    pub field: String,
    pub placeholders: Vec<String>,
    pub metadata: Option<&'a RuleMetadata>,
    pub format: &'a dyn FormatProvider,
}

impl QueryContext<'_> {
    pub fn placeholder(&self, position: usize) -> Result<&str> {
        self.placeholders
            .get(position)
            .map(String::as_str)
            .ok_or_else(|| FilterError::MissingPlaceholder {
                operator: self.operator.to_string(),
                position,
            })
    }

    /// Renders one condition per placeholder and joins them with OR (or AND
    /// when `negated`), parenthesizing when more than one condition results.
    pub fn join_each(&self, negated: bool, render: impl Fn(&str) -> String) -> String {
        let conditions: Vec<String> = self.placeholders.iter().map(|p| render(p)).collect();
        let joiner = if negated {
            self.format.and_operator()
        } else {
            self.format.or_operator()
        };
        match conditions.as_slice() {
            [single] => single.clone(),
            _ => format!("({})", conditions.join(joiner)),
        }
    }
}

pub type ParameterFn = Box<
    dyn Fn(&str, Option<&Value>, Option<&RuleMetadata>) -> Result<Option<Vec<Value>>>
        + Send
        + Sync,
>;

pub type FragmentFn = Box<dyn Fn(&QueryContext<'_>) -> Result<String> + Send + Sync>;

pub fn parameters<P>(builder: P) -> ParameterFn
where
    P: Fn(&str, Option<&Value>, Option<&RuleMetadata>) -> Result<Option<Vec<Value>>>
        + Send
        + Sync
        + 'static,
{
    Box::new(builder)
}

pub fn fragment<F>(builder: F) -> FragmentFn
where
    F: Fn(&QueryContext<'_>) -> Result<String> + Send + Sync + 'static,
{
    Box::new(builder)
}

/// A transformer assembled from a parameter builder and a fragment builder.
///
/// The parameter builder decides whether and what the operator binds; the
/// fragment builder only sees the resulting placeholders.
pub struct ComposedTransformer {
    operator: String,
    parameters: ParameterFn,
    fragment: FragmentFn,
}

impl ComposedTransformer {
    pub fn new<P, F>(operator: &str, parameters: P, fragment: F) -> Result<Self>
    where
        P: Fn(&str, Option<&Value>, Option<&RuleMetadata>) -> Result<Option<Vec<Value>>>
            + Send
            + Sync
            + 'static,
        F: Fn(&QueryContext<'_>) -> Result<String> + Send + Sync + 'static,
    {
        if operator.trim().is_empty() {
            return Err(FilterError::InvalidConfiguration(
                "transformer operator name is required".into(),
            ));
        }

        Ok(Self {
            operator: operator.trim().to_uppercase(),
            parameters: Box::new(parameters),
            fragment: Box::new(fragment),
        })
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }
}

impl RuleTransformer for ComposedTransformer {
    fn transform(
        &self,
        rule: &FilterRule,
        field_name: &str,
        parameter_index: usize,
        format: &dyn FormatProvider,
    ) -> Result<TransformResult> {
        let metadata = rule.metadata.as_ref();
        let parameters = (self.parameters)(self.operator.as_str(), rule.present_value(), metadata)?;

        let count = parameters.as_ref().map_or(0, Vec::len);
        let ctx = QueryContext {
            operator: &self.operator,
            field: format.format_field_name(field_name),
            placeholders: format.format_parameter_names(parameter_index, count),
            metadata,
            format,
        };

        let query = (self.fragment)(&ctx)?;
        Ok(TransformResult { query, parameters })
    }
}

impl std::fmt::Debug for ComposedTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedTransformer")
            .field("operator", &self.operator)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{MySqlFormat, SqlServerFormat};
    use model::rule;

    fn equal() -> ComposedTransformer {
        ComposedTransformer::new("equal", params::single_value, |ctx: &QueryContext<'_>| {
            Ok(format!("{} = {}", ctx.field, ctx.placeholder(0)?))
        })
        .unwrap()
    }

    #[test]
    fn test_blank_operator_is_rejected_at_construction() {
        let result = ComposedTransformer::new("  ", params::no_value, |_: &QueryContext<'_>| {
            Ok(String::new())
        });
        assert!(matches!(result, Err(FilterError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_placeholders_start_at_parameter_index() {
        let result = equal()
            .transform(&rule!("Age", "equal", 30), "Age", 4, &SqlServerFormat)
            .unwrap();
        assert_eq!(result.query, "[Age] = @p4");
        assert_eq!(result.parameters, Some(vec![Value::Int(30)]));
        assert_eq!(result.parameter_count(), 1);
    }

    #[test]
    fn test_positional_overload_matches_indexed_call() {
        let rule = rule!("Age", "equal", 30);
        let indexed = equal().transform(&rule, "Age", 7, &MySqlFormat).unwrap();
        let positional = equal().transform_positional(&rule, "Age", &MySqlFormat).unwrap();
        assert_eq!(indexed, positional);
    }

    #[test]
    fn test_missing_placeholder_is_reported() {
        let broken =
            ComposedTransformer::new("broken", params::no_value, |ctx: &QueryContext<'_>| {
                Ok(ctx.placeholder(0)?.to_string())
            })
            .unwrap();
        let err = broken
            .transform(&rule!("Age", "broken"), "Age", 0, &SqlServerFormat)
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingPlaceholder {
                operator: "BROKEN".into(),
                position: 0
            }
        );
    }
}
