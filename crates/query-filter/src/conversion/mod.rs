pub mod converters;

use crate::error::Result;
use model::{RuleMetadata, Value};
use std::collections::HashMap;
use tracing::trace;

/// Type alias for converter implementations
pub type Converter = fn(Value, Option<&RuleMetadata>) -> Result<Value>;

/// Maps a declared value type tag onto the converter that normalizes raw values.
///
/// Lookup is case-insensitive. Tags without a converter leave the value as is.
#[derive(Clone)]
pub struct TypeConversionRegistry {
    converters: HashMap<String, Converter>,
}

impl TypeConversionRegistry {
    /// Create a new registry with all built-in converters
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("string", converters::to_string);
        registry.register("text", converters::to_string);
        registry.register("int", converters::to_int);
        registry.register("integer", converters::to_int);
        registry.register("long", converters::to_int);
        registry.register("double", converters::to_double);
        registry.register("float", converters::to_double);
        registry.register("number", converters::to_double);
        registry.register("decimal", converters::to_decimal);
        registry.register("bool", converters::to_bool);
        registry.register("boolean", converters::to_bool);
        registry.register("date", converters::to_timestamp);
        registry.register("datetime", converters::to_timestamp);
        registry.register("guid", converters::to_uuid);
        registry.register("uuid", converters::to_uuid);

        registry
    }

    /// A registry that converts nothing.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    pub fn register(&mut self, type_tag: &str, converter: Converter) {
        self.converters.insert(type_tag.to_lowercase(), converter);
    }

    /// Normalizes `value` according to `type_tag`.
    ///
    /// Absent values and unknown or empty tags pass through untouched.
    pub fn convert(
        &self,
        value: Option<Value>,
        type_tag: &str,
        metadata: Option<&RuleMetadata>,
    ) -> Result<Option<Value>> {
        let Some(value) = value else {
            return Ok(None);
        };
        if type_tag.trim().is_empty() {
            return Ok(Some(value));
        }

        match self.converters.get(&type_tag.to_lowercase()) {
            Some(converter) => {
                trace!("Converting {} value as '{}'", value.type_name(), type_tag);
                converter(value, metadata).map(Some)
            }
            None => Ok(Some(value)),
        }
    }

    pub fn has_converter(&self, type_tag: &str) -> bool {
        self.converters.contains_key(&type_tag.to_lowercase())
    }

    pub fn type_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for TypeConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use chrono::NaiveDate;

    #[test]
    fn test_registry_has_builtin_converters() {
        let registry = TypeConversionRegistry::new();
        assert!(registry.has_converter("date"));
        assert!(registry.has_converter("DECIMAL"));
        assert!(registry.has_converter("Guid"));
        assert!(!TypeConversionRegistry::empty().has_converter("date"));
    }

    #[test]
    fn test_unknown_or_empty_tag_is_identity() {
        let registry = TypeConversionRegistry::new();
        let value = Some(Value::from("2023-01-15"));

        assert_eq!(registry.convert(value.clone(), "", None).unwrap(), value);
        assert_eq!(registry.convert(value.clone(), "   ", None).unwrap(), value);
        assert_eq!(registry.convert(value.clone(), "color", None).unwrap(), value);
        assert_eq!(registry.convert(None, "date", None).unwrap(), None);
    }

    #[test]
    fn test_convert_date_case_insensitive() {
        let registry = TypeConversionRegistry::new();
        let converted = registry
            .convert(Some(Value::from("2023-01-15")), "Date", None)
            .unwrap();
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(converted, Some(Value::Timestamp(expected)));
    }

    #[test]
    fn test_custom_converter_overrides_default() {
        let mut registry = TypeConversionRegistry::new();

        fn shout(value: Value, _metadata: Option<&RuleMetadata>) -> Result<Value> {
            Ok(Value::String(value.as_string().unwrap_or_default().to_uppercase()))
        }

        registry.register("STRING", shout);
        let converted = registry
            .convert(Some(Value::from("abc")), "string", None)
            .unwrap();
        assert_eq!(converted, Some(Value::from("ABC")));
    }

    #[test]
    fn test_converter_errors_propagate() {
        let registry = TypeConversionRegistry::new();
        let result = registry.convert(Some(Value::from("x")), "int", None);
        assert!(matches!(result, Err(FilterError::Conversion { .. })));
    }
}
