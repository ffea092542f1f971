use crate::format::FormatProvider;

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresFormat;

impl FormatProvider for PostgresFormat {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{ident}""#)
    }

    fn format_parameter_name(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn parameter_prefix(&self) -> &'static str {
        "$"
    }

    fn and_operator(&self) -> &'static str {
        " AND "
    }

    fn or_operator(&self) -> &'static str {
        " OR "
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_one_based() {
        assert_eq!(PostgresFormat.format_parameter_name(0), "$1");
        assert_eq!(PostgresFormat.format_parameter_name(9), "$10");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(PostgresFormat.quote_identifier("Name"), r#""Name""#);
    }
}
