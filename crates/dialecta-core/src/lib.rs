//! # dialecta-core
//!
//! The contract between a mapping layer and the database dialects it targets.
//!
//! This crate provides:
//! - [`Dialect`], the capability trait every adapter implements
//! - [`CommonDialect`], generic SQL defaults adapters delegate to
//! - [`FieldDescriptor`] and tag-setting parsing for mapped fields
//! - [`SqlExecutor`], the data-access handle, implemented for sqlx pools
//! - [`DialectRegistry`], an explicit name-to-dialect mapping
//!
//! ## Example
//!
//! ```rust
//! use dialecta_core::{CommonDialect, Dialect, FieldDescriptor};
//!
//! let dialect = CommonDialect::new();
//! let mut field = FieldDescriptor::of::<String>("Email").tags("size:120;not null");
//! assert_eq!(dialect.data_type_of(&mut field).unwrap(), "VARCHAR(120) NOT NULL");
//! assert_eq!(dialect.build_key_name("idx", "users", &["email"]), "idx_users_email");
//! ```

pub mod common;
pub mod config;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod field;
pub mod paging;
pub mod registry;

pub use common::{CommonDialect, ParsedField};
pub use config::DialectConfig;
pub use dialect::Dialect;
pub use error::{DialectError, Result};
pub use executor::SqlExecutor;
pub use field::{parse_tag_settings, FieldDescriptor, FieldKind, FieldType, TagSettings};
pub use paging::PagingValue;
pub use registry::DialectRegistry;
