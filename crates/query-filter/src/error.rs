use thiserror::Error;

/// All errors raised while configuring the engine or compiling a filter tree.
///
/// Nothing is caught inside the engine: a failing rule aborts the whole compile
/// call and the error reaches the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Operator name was empty or whitespace-only.
    #[error("Operator name cannot be null or whitespace")]
    MissingOperator,

    /// No transformer is registered for the operator (name kept verbatim).
    #[error("Operator '{0}' is not implemented")]
    NotImplemented(String),

    #[error("{operator} operator requires a non-null value")]
    NullValue { operator: String },

    #[error("{operator} operator requires at least one value")]
    EmptyValue { operator: String },

    #[error("{operator} operator requires exactly 2 values")]
    ValueCount { operator: String },

    #[error("{operator} operator requires an array or collection with exactly 2 values")]
    NotACollection { operator: String },

    #[error("{operator} operator requires a numeric value")]
    NotNumeric { operator: String },

    #[error("Invalid interval type '{interval}'. Valid values are: {valid}")]
    InvalidIntervalType { interval: String, valid: String },

    #[error("Failed to convert value to '{type_tag}': {message}")]
    Conversion { type_tag: String, message: String },

    /// A transformer asked for a placeholder its parameter builder never produced.
    #[error("{operator} operator has no placeholder at position {position}")]
    MissingPlaceholder { operator: String, position: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Coarse classification of a [`FilterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised while wiring the engine, before any tree is compiled.
    Configuration,
    /// Operator could not be resolved to a transformer.
    Lookup,
    /// Rule value has the wrong shape for its operator.
    ValueShape,
    /// A type converter rejected the value.
    Conversion,
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidConfiguration(_)
            | FilterError::UnknownDialect(_)
            | FilterError::MissingPlaceholder { .. } => ErrorKind::Configuration,
            FilterError::MissingOperator | FilterError::NotImplemented(_) => ErrorKind::Lookup,
            FilterError::NullValue { .. }
            | FilterError::EmptyValue { .. }
            | FilterError::ValueCount { .. }
            | FilterError::NotACollection { .. }
            | FilterError::NotNumeric { .. }
            | FilterError::InvalidIntervalType { .. } => ErrorKind::ValueShape,
            FilterError::Conversion { .. } => ErrorKind::Conversion,
        }
    }

    /// True for the "missing value" family (null operator name or null rule value).
    pub fn is_null_argument(&self) -> bool {
        matches!(
            self,
            FilterError::MissingOperator | FilterError::NullValue { .. }
        )
    }

    pub(crate) fn conversion(type_tag: &str, message: impl Into<String>) -> Self {
        FilterError::Conversion {
            type_tag: type_tag.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_operator() {
        let err = FilterError::EmptyValue {
            operator: "CONTAINS".into(),
        };
        assert_eq!(err.to_string(), "CONTAINS operator requires at least one value");

        let err = FilterError::NotImplemented(" equal ".into());
        assert_eq!(err.to_string(), "Operator ' equal ' is not implemented");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(FilterError::MissingOperator.kind(), ErrorKind::Lookup);
        assert!(FilterError::MissingOperator.is_null_argument());
        assert_eq!(
            FilterError::ValueCount {
                operator: "BETWEEN".into()
            }
            .kind(),
            ErrorKind::ValueShape
        );
        assert_eq!(
            FilterError::conversion("date", "bad").kind(),
            ErrorKind::Conversion
        );
    }
}
