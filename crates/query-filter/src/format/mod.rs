//! Defines the `FormatProvider` trait for dialect-specific lexical rules.

use std::borrow::Cow;
use tracing::warn;

pub mod linq;
pub mod mysql;
pub mod postgres;
pub mod sql_server;

pub use linq::LinqFormat;
pub use mysql::MySqlFormat;
pub use postgres::PostgresFormat;
pub use sql_server::SqlServerFormat;

pub trait FormatProvider: Send + Sync {
    /// Wraps a single identifier segment in the dialect's quotation marks.
    ///
    /// - SQL Server uses brackets: `[my_column]`
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for the parameter at `index` (0-based).
    ///
    /// - SQL Server uses `@p0`, `@p1`, etc.
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?` for every index
    fn format_parameter_name(&self, index: usize) -> String;

    /// Leading characters of every placeholder this provider emits.
    fn parameter_prefix(&self) -> &'static str;

    fn and_operator(&self) -> &'static str;

    fn or_operator(&self) -> &'static str;

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;

    /// Quotes each dot-separated segment of a field path independently.
    fn format_field_name(&self, name: &str) -> String {
        name.split('.')
            .map(|segment| self.quote_identifier(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Placeholders for `count` consecutive parameters starting at `start`.
    fn format_parameter_names(&self, start: usize, count: usize) -> Vec<String> {
        (start..start + count)
            .map(|index| self.format_parameter_name(index))
            .collect()
    }

    /// Maps a group combinator onto this dialect's join token.
    ///
    /// `AND`/`OR` are matched case-insensitively; anything else is emitted
    /// verbatim between spaces.
    fn join_operator<'a>(&self, condition: &'a str) -> Cow<'a, str> {
        let trimmed = condition.trim();
        if trimmed.eq_ignore_ascii_case("and") {
            Cow::Borrowed(self.and_operator())
        } else if trimmed.eq_ignore_ascii_case("or") {
            Cow::Borrowed(self.or_operator())
        } else {
            warn!("Unrecognized group condition '{}', emitting verbatim", condition);
            Cow::Owned(format!(" {condition} "))
        }
    }

    /// True when every parameter renders to the same placeholder text.
    fn is_positional(&self) -> bool {
        self.format_parameter_name(0) == self.format_parameter_name(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_quote_every_segment() {
        let path = "User.Profile.Name";
        assert_eq!(MySqlFormat.format_field_name(path), "`User`.`Profile`.`Name`");
        assert_eq!(
            PostgresFormat.format_field_name(path),
            r#""User"."Profile"."Name""#
        );
        assert_eq!(
            SqlServerFormat.format_field_name(path),
            "[User].[Profile].[Name]"
        );
        assert_eq!(LinqFormat.format_field_name(path), "User.Profile.Name");
    }

    #[test]
    fn test_join_operator_resolves_through_provider() {
        assert_eq!(SqlServerFormat.join_operator("and"), " AND ");
        assert_eq!(SqlServerFormat.join_operator(" Or "), " OR ");
        assert_eq!(LinqFormat.join_operator("AND"), " && ");
        assert_eq!(LinqFormat.join_operator("OR"), " || ");
        assert_eq!(MySqlFormat.join_operator("XOR"), " XOR ");
    }

    #[test]
    fn test_parameter_sequences() {
        assert_eq!(
            SqlServerFormat.format_parameter_names(2, 3),
            vec!["@p2", "@p3", "@p4"]
        );
        assert_eq!(PostgresFormat.format_parameter_names(0, 2), vec!["$1", "$2"]);
        assert_eq!(MySqlFormat.format_parameter_names(5, 2), vec!["?", "?"]);
        assert!(SqlServerFormat.format_parameter_names(0, 0).is_empty());
    }

    #[test]
    fn test_positional_detection() {
        assert!(MySqlFormat.is_positional());
        assert!(!PostgresFormat.is_positional());
        assert!(!SqlServerFormat.is_positional());
        assert!(!LinqFormat.is_positional());
    }
}
