//! Name-to-dialect mapping composed by the host.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::dialect::Dialect;
use crate::error::{DialectError, Result};

/// Dialects available to a host, keyed by registry name.
#[derive(Clone, Default)]
pub struct DialectRegistry {
    dialects: BTreeMap<String, Arc<dyn Dialect>>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dialect under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) {
        self.dialects.insert(name.into(), dialect);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) -> Self {
        self.register(name, dialect);
        self
    }

    /// Looks up a dialect.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::UnknownDialect` when `name` is not registered.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Dialect>> {
        self.dialects
            .get(name)
            .cloned()
            .ok_or_else(|| DialectError::UnknownDialect(name.to_string()))
    }

    /// Returns whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// Returns the registered names in order.
    #[must_use]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dialects.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("dialects", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::CommonDialect;

    #[test]
    fn test_register_and_get() {
        let registry = DialectRegistry::new().with("common", Arc::new(CommonDialect::new()));
        assert!(registry.contains("common"));
        assert_eq!(registry.get("common").unwrap().name(), "common");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["common"]);
    }

    #[test]
    fn test_unknown_dialect() {
        let registry = DialectRegistry::new();
        assert!(matches!(
            registry.get("oracle"),
            Err(DialectError::UnknownDialect(ref name)) if name == "oracle"
        ));
    }
}
