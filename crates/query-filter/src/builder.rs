//! The filter compiler: walks a `FilterGroup` tree and produces one query
//! fragment plus the flat parameter list it binds.

use crate::{
    conversion::{Converter, TypeConversionRegistry},
    dialect::Dialect,
    error::Result,
    format::FormatProvider,
    transform::{RuleTransformer, RuleTransformerRegistry},
};
use model::{FilterGroup, FilterRule, Value};
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Output of a compile call. `parameters[i]` is the value bound to the
/// `i`-th placeholder in `query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledFilter {
    pub query: String,
    pub parameters: Vec<Value>,
}

impl CompiledFilter {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Accumulates bound values during one compile call. The running parameter
/// index is always `params.len()`.
struct Compilation<'a> {
    builder: &'a FilterBuilder,
    params: Vec<Value>,
}

impl Compilation<'_> {
    fn group(&mut self, group: &FilterGroup, nested: bool) -> Result<String> {
        let mut fragments = Vec::with_capacity(group.child_count());

        for rule in &group.rules {
            let fragment = self.rule(rule)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }
        for sub in &group.groups {
            let fragment = self.group(sub, true)?;
            if !fragment.is_empty() {
                fragments.push(fragment);
            }
        }

        Ok(match fragments.len() {
            0 => String::new(),
            1 => fragments.swap_remove(0),
            _ => {
                let joiner = self.builder.format.join_operator(&group.condition);
                let joined = fragments.join(joiner.as_ref());
                if nested { format!("({joined})") } else { joined }
            }
        })
    }

    fn rule(&mut self, rule: &FilterRule) -> Result<String> {
        let transformer = self.builder.transformers.get(&rule.operator)?;
        let value = self.builder.converters.convert(
            rule.value.clone(),
            &rule.value_type,
            rule.metadata.as_ref(),
        )?;
        let converted = FilterRule {
            value,
            ..rule.clone()
        };

        let index = self.params.len();
        trace!(
            operator = %rule.operator,
            field = %rule.field_name,
            index,
            "Transforming rule"
        );

        let result =
            transformer.transform(&converted, &rule.field_name, index, self.builder.format)?;
        match result.parameters {
            // No fragment means no placeholders to bind against.
            Some(bound) if result.query.is_empty() => {
                warn!(
                    operator = %rule.operator,
                    dropped = bound.len(),
                    "Rule rendered an empty fragment, dropping its parameters"
                );
            }
            Some(bound) => self.params.extend(bound),
            None => {}
        }
        Ok(result.query)
    }
}

/// Compiles filter trees for one dialect.
///
/// The registries are read-only during `build`, so a configured builder can
/// be shared between threads.
pub struct FilterBuilder {
    format: &'static dyn FormatProvider,
    transformers: RuleTransformerRegistry,
    converters: TypeConversionRegistry,
}

impl FilterBuilder {
    /// A builder with the dialect's default operators and the default converters.
    pub fn new(dialect: Dialect) -> Result<Self> {
        Ok(Self::from_parts(
            dialect.format_provider(),
            dialect.default_transformers()?,
            TypeConversionRegistry::new(),
        ))
    }

    pub fn sql_server() -> Result<Self> {
        Self::new(Dialect::SqlServer)
    }

    pub fn mysql() -> Result<Self> {
        Self::new(Dialect::MySql)
    }

    pub fn postgres() -> Result<Self> {
        Self::new(Dialect::Postgres)
    }

    pub fn linq() -> Result<Self> {
        Self::new(Dialect::Linq)
    }

    pub fn from_parts(
        format: &'static dyn FormatProvider,
        transformers: RuleTransformerRegistry,
        converters: TypeConversionRegistry,
    ) -> Self {
        Self {
            format,
            transformers,
            converters,
        }
    }

    pub fn register_transformer(
        &mut self,
        operator: &str,
        transformer: impl RuleTransformer + 'static,
    ) -> Result<()> {
        self.transformers.register(operator, transformer)
    }

    pub fn register_type_converter(&mut self, type_tag: &str, converter: Converter) {
        self.converters.register(type_tag, converter);
    }

    pub fn format(&self) -> &'static dyn FormatProvider {
        self.format
    }

    pub fn transformers(&self) -> &RuleTransformerRegistry {
        &self.transformers
    }

    /// Compiles `root` into a query fragment and its ordered parameters.
    ///
    /// The root group is never parenthesized. Any error aborts the whole
    /// compilation; no partial output is returned.
    pub fn build(&self, root: &FilterGroup) -> Result<CompiledFilter> {
        debug!(
            dialect = %self.format.name(),
            children = root.child_count(),
            "Compiling filter"
        );

        let mut compilation = Compilation {
            builder: self,
            params: Vec::new(),
        };
        let query = compilation.group(root, false)?;

        debug!(
            dialect = %self.format.name(),
            parameters = compilation.params.len(),
            "Compiled filter"
        );
        Ok(CompiledFilter {
            query,
            parameters: compilation.params,
        })
    }
}

impl std::fmt::Debug for FilterBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("format", &self.format.name())
            .field("transformers", &self.transformers)
            .field("converters", &self.converters.type_tags())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FilterError,
        transform::{ComposedTransformer, QueryContext, params},
    };
    use model::{group, rule};
    use tracing_test::traced_test;

    #[test]
    fn test_root_group_is_not_parenthesized() {
        let tree = group!("AND";
            rule!("Name", "equal", "John"),
            rule!("Age", "greater", 25)
        );
        let compiled = FilterBuilder::sql_server().unwrap().build(&tree).unwrap();
        assert_eq!(compiled.query, "[Name] = @p0 AND [Age] > @p1");
        assert_eq!(
            compiled.parameters,
            vec![Value::from("John"), Value::Int(25)]
        );
    }

    #[test]
    fn test_empty_group_compiles_to_nothing() {
        let builder = FilterBuilder::postgres().unwrap();
        let compiled = builder.build(&group!("AND")).unwrap();
        assert!(compiled.is_empty());
        assert!(compiled.parameters.is_empty());

        let tree = group!("OR"; rule!("A", "is_null"); group!("AND"), group!("AND"));
        assert_eq!(builder.build(&tree).unwrap().query, r#""A" IS NULL"#);
    }

    #[test]
    fn test_single_child_groups_are_transparent() {
        let tree = group!("AND";
            rule!("A", "equal", 1);
            group!("OR"; rule!("B", "equal", 2))
        );
        let compiled = FilterBuilder::sql_server().unwrap().build(&tree).unwrap();
        assert_eq!(compiled.query, "[A] = @p0 AND [B] = @p1");
    }

    #[test]
    fn test_nested_groups_thread_the_index() {
        let tree = group!("OR";
            rule!("A", "in", vec![1, 2]);
            group!("AND"; rule!("B", "between", vec![3, 4]), rule!("C", "is_null")),
            group!("AND"; rule!("D", "equal", 5), rule!("E", "contains", "x"))
        );
        let compiled = FilterBuilder::sql_server().unwrap().build(&tree).unwrap();
        assert_eq!(
            compiled.query,
            "[A] IN (@p0, @p1) OR ([B] BETWEEN @p2 AND @p3 AND [C] IS NULL) OR ([D] = @p4 AND [E] LIKE @p5)"
        );
        assert_eq!(compiled.parameters.len(), 6);
        assert_eq!(compiled.parameters[5], Value::from("%x%"));
    }

    #[test]
    fn test_values_are_converted_by_declared_type() {
        let tree = group!("AND"; rule!("Age", "greater", "42").with_type("int"));
        let compiled = FilterBuilder::mysql().unwrap().build(&tree).unwrap();
        assert_eq!(compiled.parameters, vec![Value::Int(42)]);

        let tree = group!("AND"; rule!("Age", "greater", "42").with_type("unknown"));
        let compiled = FilterBuilder::mysql().unwrap().build(&tree).unwrap();
        assert_eq!(compiled.parameters, vec![Value::from("42")]);
    }

    #[test]
    fn test_custom_registrations_override_defaults() {
        let mut builder = FilterBuilder::mysql().unwrap();
        builder
            .register_transformer(
                "EQUAL",
                ComposedTransformer::new("equal", params::single_value, |ctx: &QueryContext<'_>| {
                    Ok(format!("{} <=> {}", ctx.field, ctx.placeholder(0)?))
                })
                .unwrap(),
            )
            .unwrap();
        builder.register_type_converter("shout", |value, _| {
            Ok(Value::String(value.as_string().unwrap_or_default().to_uppercase()))
        });

        let tree = group!("AND"; rule!("Name", "equal", "bob").with_type("Shout"));
        let compiled = builder.build(&tree).unwrap();
        assert_eq!(compiled.query, "`Name` <=> ?");
        assert_eq!(compiled.parameters, vec![Value::from("BOB")]);
    }

    #[test]
    fn test_errors_abort_compilation() {
        let builder = FilterBuilder::linq().unwrap();
        let tree = group!("AND"; rule!("A", "equal", 1), rule!("B", "like", "x"));
        assert_eq!(
            builder.build(&tree).unwrap_err(),
            FilterError::NotImplemented("like".into())
        );

        let tree = group!("AND"; rule!("A", "equal"));
        assert!(builder.build(&tree).unwrap_err().is_null_argument());
    }

    #[traced_test]
    #[test]
    fn test_empty_fragment_drops_its_parameters() {
        let mut builder = FilterBuilder::sql_server().unwrap();
        builder
            .register_transformer(
                "silent",
                ComposedTransformer::new("silent", params::one_or_many, |_: &QueryContext<'_>| {
                    Ok(String::new())
                })
                .unwrap(),
            )
            .unwrap();

        let tree = group!("AND";
            rule!("A", "silent", vec![1, 2]),
            rule!("B", "equal", 3)
        );
        let compiled = builder.build(&tree).unwrap();
        assert_eq!(compiled.query, "[B] = @p0");
        assert_eq!(compiled.parameters, vec![Value::Int(3)]);
        assert!(logs_contain("dropping its parameters"));
    }

    #[traced_test]
    #[test]
    fn test_lowercase_combinator_maps_to_dialect_token() {
        let tree = group!("or"; rule!("A", "is_null"), rule!("B", "is_null"));
        let compiled = FilterBuilder::linq().unwrap().build(&tree).unwrap();
        assert_eq!(compiled.query, "A == null || B == null");
        assert!(logs_contain("Compiled filter"));
        assert!(!logs_contain("Unrecognized group condition"));
    }
}
