//! Error types for dialect operations.

/// Errors returned by dialect adapters.
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// Database error from the data-access handle.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A LIMIT or OFFSET value could not be read as an integer.
    #[error("Invalid integer value: {value:?}")]
    InvalidInteger {
        /// The rejected value as text.
        value: String,
    },

    /// No SQL type could be inferred for a field.
    ///
    /// This is a mapping bug, not a transient condition.
    #[error("invalid sql type {kind} in field {field} for {dialect}")]
    InvalidSqlType {
        /// Struct field name.
        field: String,
        /// Runtime kind of the field.
        kind: String,
        /// Dialect that rejected the field.
        dialect: String,
    },

    /// No dialect is registered under the requested name.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Invalid dialect configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
