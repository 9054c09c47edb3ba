//! # dialecta-dm
//!
//! DM (Dameng) dialect for `dialecta-core`.
//!
//! The adapter overrides column type inference, catalog checks against the
//! `USER_*` views, paging, key naming and a few syntax details. It defers
//! to [`CommonDialect`](dialecta_core::CommonDialect) for the rest.
//!
//! ## Example
//!
//! ```rust
//! use dialecta_core::{Dialect, DialectRegistry, FieldDescriptor};
//!
//! let mut registry = DialectRegistry::new();
//! dialecta_dm::register(&mut registry);
//!
//! let dialect = registry.get("dm").unwrap();
//! let mut id = FieldDescriptor::of::<i64>("ID").primary_key();
//! assert_eq!(dialect.data_type_of(&mut id).unwrap(), "bigint AUTO_INCREMENT");
//! assert_eq!(dialect.quote("users"), "`users`");
//! ```

mod dialect;
mod keys;
mod types;

use std::sync::Arc;

use dialecta_core::{DialectConfig, DialectRegistry};

pub use dialect::{DmDialect, REGISTRY_NAME};

/// Registers a default-configured DM dialect under [`REGISTRY_NAME`].
pub fn register(registry: &mut DialectRegistry) {
    register_with_config(registry, DialectConfig::default());
}

/// Registers a DM dialect with the given configuration.
pub fn register_with_config(registry: &mut DialectRegistry, config: DialectConfig) {
    registry.register(REGISTRY_NAME, Arc::new(DmDialect::with_config(config)));
}
