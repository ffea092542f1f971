use crate::format::FormatProvider;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlFormat;

impl FormatProvider for MySqlFormat {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{ident}`"#)
    }

    fn format_parameter_name(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn parameter_prefix(&self) -> &'static str {
        "?"
    }

    fn and_operator(&self) -> &'static str {
        " AND "
    }

    fn or_operator(&self) -> &'static str {
        " OR "
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}
