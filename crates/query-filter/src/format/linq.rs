use crate::format::FormatProvider;

/// In-memory predicate dialect. `@pN` tokens are substituted by the
/// expression evaluator, never sent to a database.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinqFormat;

impl FormatProvider for LinqFormat {
    fn quote_identifier(&self, ident: &str) -> String {
        ident.to_string()
    }

    fn format_parameter_name(&self, index: usize) -> String {
        format!("@p{index}")
    }

    fn parameter_prefix(&self) -> &'static str {
        "@p"
    }

    fn and_operator(&self) -> &'static str {
        " && "
    }

    fn or_operator(&self) -> &'static str {
        " || "
    }

    fn name(&self) -> String {
        "LINQ".into()
    }
}
