pub mod core;
pub mod filter;
pub mod macros;

pub use crate::core::value::Value;
pub use filter::{group::FilterGroup, metadata::RuleMetadata, rule::FilterRule};
