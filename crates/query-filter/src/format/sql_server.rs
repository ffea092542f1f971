use crate::format::FormatProvider;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlServerFormat;

impl FormatProvider for SqlServerFormat {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("[{ident}]")
    }

    fn format_parameter_name(&self, index: usize) -> String {
        format!("@p{index}")
    }

    fn parameter_prefix(&self) -> &'static str {
        "@p"
    }

    fn and_operator(&self) -> &'static str {
        " AND "
    }

    fn or_operator(&self) -> &'static str {
        " OR "
    }

    fn name(&self) -> String {
        "SQL Server".into()
    }
}
