use crate::{
    error::{FilterError, Result},
    transform::RuleTransformer,
};
use std::{collections::HashMap, sync::Arc};
use tracing::trace;

/// Case-insensitive operator name → transformer lookup.
///
/// Keys are lower-cased but never trimmed, so `" equal"` and `"equal"` are
/// different operators.
#[derive(Clone, Default)]
pub struct RuleTransformerRegistry {
    transformers: HashMap<String, Arc<dyn RuleTransformer>>,
}

impl RuleTransformerRegistry {
    /// An empty registry; dialects seed their defaults on top of it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `transformer` for `operator`. The last registration wins;
    /// references handed out earlier keep pointing at the old transformer.
    pub fn register(
        &mut self,
        operator: &str,
        transformer: impl RuleTransformer + 'static,
    ) -> Result<()> {
        self.register_shared(operator, Arc::new(transformer))
    }

    pub fn register_shared(
        &mut self,
        operator: &str,
        transformer: Arc<dyn RuleTransformer>,
    ) -> Result<()> {
        if operator.trim().is_empty() {
            return Err(FilterError::MissingOperator);
        }
        trace!("Registering transformer for operator '{}'", operator);
        self.transformers.insert(operator.to_lowercase(), transformer);
        Ok(())
    }

    pub fn get(&self, operator: &str) -> Result<Arc<dyn RuleTransformer>> {
        if operator.trim().is_empty() {
            return Err(FilterError::MissingOperator);
        }

        self.transformers
            .get(&operator.to_lowercase())
            .cloned()
            .ok_or_else(|| FilterError::NotImplemented(operator.to_string()))
    }

    pub fn has_transformer(&self, operator: &str) -> bool {
        self.transformers.contains_key(&operator.to_lowercase())
    }

    /// Registered operator keys, sorted.
    pub fn operators(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.transformers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }
}

impl std::fmt::Debug for RuleTransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTransformerRegistry")
            .field("operators", &self.operators())
            .finish()
    }
}
