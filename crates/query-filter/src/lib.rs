pub mod builder;
pub mod conversion;
pub mod dialect;
pub mod error;
pub mod format;
pub mod output;
pub mod transform;

pub use builder::{CompiledFilter, FilterBuilder};
pub use conversion::{Converter, TypeConversionRegistry};
pub use dialect::Dialect;
pub use error::{ErrorKind, FilterError, Result};
pub use format::FormatProvider;
pub use output::{named_parameters, renumber_placeholders};
pub use transform::{
    ComposedTransformer, QueryContext, RuleTransformer, RuleTransformerRegistry, TransformResult,
};
