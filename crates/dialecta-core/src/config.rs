//! Dialect configuration.

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// Default ceiling for generated key names, in characters.
pub const DEFAULT_MAX_KEY_LENGTH: usize = 64;

/// Default number of readable characters kept when a key name is shortened.
pub const DEFAULT_KEY_PREFIX_LENGTH: usize = 24;

/// Hex characters of the SHA-1 digest appended to a shortened key name.
pub const KEY_DIGEST_LENGTH: usize = 40;

/// Settings shared by dialect adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Namespace reported by `current_database`. Queried when unset.
    pub tablespace: Option<String>,
    /// Longest key name accepted before it is shortened.
    pub max_key_length: usize,
    /// Readable prefix length of a shortened key name.
    pub key_prefix_length: usize,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            tablespace: None,
            max_key_length: DEFAULT_MAX_KEY_LENGTH,
            key_prefix_length: DEFAULT_KEY_PREFIX_LENGTH,
        }
    }
}

impl DialectConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed tablespace.
    #[must_use]
    pub fn tablespace(mut self, name: impl Into<String>) -> Self {
        self.tablespace = Some(name.into());
        self
    }

    /// Sets the key-name ceiling.
    #[must_use]
    pub fn max_key_length(mut self, len: usize) -> Self {
        self.max_key_length = len;
        self
    }

    /// Sets the readable prefix length of shortened key names.
    #[must_use]
    pub fn key_prefix_length(mut self, len: usize) -> Self {
        self.key_prefix_length = len;
        self
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::Serialization` for malformed JSON and
    /// `DialectError::Config` when [`validate`](Self::validate) fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values no dialect can work with.
    ///
    /// A shortened key name is the readable prefix plus the digest, so both
    /// must fit under `max_key_length`.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::Config` naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.tablespace.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(DialectError::Config(
                "tablespace must not be empty".to_string(),
            ));
        }
        if self.max_key_length < KEY_DIGEST_LENGTH {
            return Err(DialectError::Config(format!(
                "max_key_length must be at least {KEY_DIGEST_LENGTH}, got {}",
                self.max_key_length
            )));
        }
        if self.key_prefix_length.saturating_add(KEY_DIGEST_LENGTH) > self.max_key_length {
            return Err(DialectError::Config(format!(
                "key_prefix_length {} plus a {KEY_DIGEST_LENGTH}-character digest exceeds max_key_length {}",
                self.key_prefix_length, self.max_key_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DialectConfig::default();
        assert_eq!(config.tablespace, None);
        assert_eq!(config.max_key_length, 64);
        assert_eq!(config.key_prefix_length, 24);
    }

    #[test]
    fn test_from_json_partial() {
        let config = DialectConfig::from_json(r#"{"tablespace": "MAIN"}"#).unwrap();
        assert_eq!(config.tablespace.as_deref(), Some("MAIN"));
        assert_eq!(config.max_key_length, 64);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            DialectConfig::from_json(r#"{"tablespace": "  "}"#),
            Err(DialectError::Config(_))
        ));
        assert!(matches!(
            DialectConfig::from_json(r#"{"max_key_length": 0}"#),
            Err(DialectError::Config(_))
        ));
        assert!(matches!(
            DialectConfig::from_json("not json"),
            Err(DialectError::Serialization(_))
        ));
    }

    #[test]
    fn test_key_limits_must_leave_room_for_digest() {
        assert!(matches!(
            DialectConfig::from_json(r#"{"key_prefix_length": 30}"#),
            Err(DialectError::Config(_))
        ));
        assert!(matches!(
            DialectConfig::from_json(r#"{"max_key_length": 10}"#),
            Err(DialectError::Config(_))
        ));
        assert!(DialectConfig::new().max_key_length(39).validate().is_err());
        assert!(DialectConfig::new().max_key_length(50).validate().is_err());

        let fits = DialectConfig::new().max_key_length(50).key_prefix_length(10);
        assert!(fits.validate().is_ok());
        assert!(DialectConfig::new()
            .max_key_length(40)
            .key_prefix_length(0)
            .validate()
            .is_ok());
    }
}
