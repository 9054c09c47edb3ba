//! Default dialect behavior.
//!
//! [`CommonDialect`] targets `INFORMATION_SCHEMA` and generic SQL types. It
//! also carries the helpers adapters build on: field parsing, auto-increment
//! eligibility and the generic key naming rule.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::config::DialectConfig;
use crate::dialect::Dialect;
use crate::error::{DialectError, Result};
use crate::executor::SqlExecutor;
use crate::field::{FieldDescriptor, FieldKind};
use crate::paging::{parse_int, PagingValue};

lazy_static! {
    /// Runs of characters not allowed in a key name.
    pub static ref KEY_NAME_REGEX: Regex = Regex::new("[^a-zA-Z0-9]+").unwrap();
}

/// Size used for string and byte columns without a `SIZE` tag.
pub const DEFAULT_SIZE: i64 = 255;

/// Field facts extracted before a dialect picks a column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// Value kind with scanner wrappers removed.
    pub kind: FieldKind,
    /// Explicit SQL type from the `TYPE` tag, empty when absent.
    pub sql_type: String,
    /// Declared size.
    pub size: i64,
    /// Modifiers appended after the type (`NOT NULL`, `DEFAULT ...`).
    pub additional_type: String,
}

/// Dialect with generic SQL defaults.
#[derive(Debug, Clone, Default)]
pub struct CommonDialect {
    config: DialectConfig,
}

impl CommonDialect {
    /// Creates a common dialect with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a common dialect with the given configuration.
    #[must_use]
    pub fn with_config(config: DialectConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DialectConfig {
        &self.config
    }

    /// Extracts kind, explicit type, size and modifiers from a field.
    ///
    /// Scanner wrappers are only unwrapped when no explicit `TYPE` is set.
    #[must_use]
    pub fn parse_field_struct(&self, field: &FieldDescriptor) -> ParsedField {
        let sql_type = field.tag_settings.get("TYPE").unwrap_or_default().to_string();

        let kind = if sql_type.is_empty() {
            field.kind.unwrap_scanner().clone()
        } else {
            field.kind.clone()
        };

        let size = field
            .tag_settings
            .get("SIZE")
            .map_or(DEFAULT_SIZE, |num| num.trim().parse().unwrap_or(0));

        let not_null = field.tag_settings.get("NOT NULL").unwrap_or_default();
        let unique = field.tag_settings.get("UNIQUE").unwrap_or_default();
        let mut additional_type = format!("{not_null} {unique}");
        if let Some(value) = field.tag_settings.get("DEFAULT") {
            additional_type.push_str(" DEFAULT ");
            additional_type.push_str(value);
        }
        if let Some(value) = field.tag_settings.get("COMMENT") {
            additional_type.push_str(" COMMENT ");
            additional_type.push_str(value);
        }

        ParsedField {
            kind,
            sql_type,
            size,
            additional_type: additional_type.trim().to_string(),
        }
    }

    /// Returns whether a field may be generated as an auto-increment column.
    ///
    /// An `AUTO_INCREMENT` tag decides unless its value is `false`; without
    /// the tag only the primary key qualifies.
    #[must_use]
    pub fn field_can_auto_increment(&self, field: &FieldDescriptor) -> bool {
        field
            .tag_settings
            .get("AUTO_INCREMENT")
            .map_or(field.is_primary_key, |value| !value.eq_ignore_ascii_case("false"))
    }

    fn integer_type(&self, field: &mut FieldDescriptor, base: &str) -> String {
        if self.field_can_auto_increment(field) {
            field.tag_settings.set("AUTO_INCREMENT", "AUTO_INCREMENT");
            format!("{base} AUTO_INCREMENT")
        } else {
            base.to_string()
        }
    }
}

/// Appends trimmed modifiers to a column type.
#[must_use]
pub fn with_additional_type(sql_type: String, additional_type: &str) -> String {
    let additional_type = additional_type.trim();
    if additional_type.is_empty() {
        sql_type
    } else {
        format!("{sql_type} {additional_type}")
    }
}

/// Splits `schema.table` on the first dot, otherwise pairs the table with
/// the dialect's current namespace.
pub async fn current_database_and_table(
    dialect: &dyn Dialect,
    db: &dyn SqlExecutor,
    table: &str,
) -> (String, String) {
    if let Some((schema, name)) = table.split_once('.') {
        return (schema.to_string(), name.to_string());
    }
    (dialect.current_database(db).await, table.to_string())
}

/// Runs a count query and reports whether it found anything.
///
/// Query errors are logged and read as "not found".
pub async fn count_exists(db: &dyn SqlExecutor, sql: &str, args: &[&str]) -> bool {
    match db.query_count(sql, args).await {
        Ok(count) => count > 0,
        Err(e) => {
            warn!(sql = %sql, error = %e, "Catalog query failed, treating as not found");
            false
        }
    }
}

/// Builds the ` LIMIT n OFFSET m` clause shared by most dialects.
///
/// Negative values drop their clause; OFFSET is only read when LIMIT applies.
///
/// # Errors
///
/// Returns `DialectError::InvalidInteger` when a value does not parse.
pub fn limit_and_offset(
    limit: Option<&PagingValue>,
    offset: Option<&PagingValue>,
) -> Result<String> {
    let mut sql = String::new();
    let Some(limit) = limit else {
        return Ok(sql);
    };
    let parsed_limit = parse_int(limit)?;
    if parsed_limit >= 0 {
        sql.push_str(&format!(" LIMIT {parsed_limit}"));
        if let Some(offset) = offset {
            let parsed_offset = parse_int(offset)?;
            if parsed_offset >= 0 {
                sql.push_str(&format!(" OFFSET {parsed_offset}"));
            }
        }
    }
    Ok(sql)
}

#[async_trait]
impl Dialect for CommonDialect {
    fn name(&self) -> &'static str {
        "common"
    }

    fn bind_var(&self, _index: usize) -> String {
        "$$$".to_string()
    }

    fn quote(&self, key: &str) -> String {
        format!("\"{key}\"")
    }

    fn data_type_of(&self, field: &mut FieldDescriptor) -> Result<String> {
        let parsed = self.parse_field_struct(field);
        let size = parsed.size;
        let mut sql_type = parsed.sql_type.clone();

        if sql_type.is_empty() {
            sql_type = match &parsed.kind {
                FieldKind::Bool => "BOOLEAN".to_string(),
                FieldKind::Int
                | FieldKind::Int8
                | FieldKind::Int16
                | FieldKind::Int32
                | FieldKind::Uint
                | FieldKind::Uint8
                | FieldKind::Uint16
                | FieldKind::Uint32
                | FieldKind::Uintptr => self.integer_type(field, "INTEGER"),
                FieldKind::Int64 | FieldKind::Uint64 => self.integer_type(field, "BIGINT"),
                FieldKind::Float32 | FieldKind::Float64 => "FLOAT".to_string(),
                FieldKind::String if size > 0 && size < 65532 => format!("VARCHAR({size})"),
                FieldKind::String => "VARCHAR(65532)".to_string(),
                FieldKind::Time => "TIMESTAMP".to_string(),
                kind if kind.is_bytes() && size > 0 && size < 65532 => format!("BINARY({size})"),
                kind if kind.is_bytes() => "BINARY(65532)".to_string(),
                _ => String::new(),
            };
        }

        if sql_type.is_empty() {
            return Err(DialectError::InvalidSqlType {
                field: field.name.clone(),
                kind: parsed.kind.name(),
                dialect: self.name().to_string(),
            });
        }

        Ok(with_additional_type(sql_type, &parsed.additional_type))
    }

    async fn has_index(&self, db: &dyn SqlExecutor, table: &str, index: &str) -> bool {
        let (schema, table) = current_database_and_table(self, db, table).await;
        count_exists(
            db,
            "SELECT count(*) FROM INFORMATION_SCHEMA.STATISTICS \
             WHERE table_schema = ? AND table_name = ? AND index_name = ?",
            &[schema.as_str(), table.as_str(), index],
        )
        .await
    }

    async fn has_foreign_key(&self, _db: &dyn SqlExecutor, _table: &str, _name: &str) -> bool {
        false
    }

    async fn remove_index(&self, db: &dyn SqlExecutor, _table: &str, index: &str) -> Result<()> {
        db.execute(&format!("DROP INDEX {index}")).await?;
        Ok(())
    }

    async fn has_table(&self, db: &dyn SqlExecutor, table: &str) -> bool {
        let (schema, table) = current_database_and_table(self, db, table).await;
        count_exists(
            db,
            "SELECT count(*) FROM INFORMATION_SCHEMA.TABLES \
             WHERE table_schema = ? AND table_name = ?",
            &[schema.as_str(), table.as_str()],
        )
        .await
    }

    async fn has_column(&self, db: &dyn SqlExecutor, table: &str, column: &str) -> bool {
        let (schema, table) = current_database_and_table(self, db, table).await;
        count_exists(
            db,
            "SELECT count(*) FROM INFORMATION_SCHEMA.COLUMNS \
             WHERE table_schema = ? AND table_name = ? AND column_name = ?",
            &[schema.as_str(), table.as_str(), column],
        )
        .await
    }

    async fn modify_column(
        &self,
        db: &dyn SqlExecutor,
        table: &str,
        column: &str,
        typ: &str,
    ) -> Result<()> {
        db.execute(&format!("ALTER TABLE {table} ALTER COLUMN {column} TYPE {typ}"))
            .await?;
        Ok(())
    }

    fn limit_and_offset_sql(
        &self,
        limit: Option<&PagingValue>,
        offset: Option<&PagingValue>,
    ) -> Result<String> {
        limit_and_offset(limit, offset)
    }

    fn select_from_dummy_table(&self) -> &'static str {
        ""
    }

    fn last_insert_id_output_interstitial(
        &self,
        _table: &str,
        _key: &str,
        _columns: &[String],
    ) -> String {
        String::new()
    }

    fn last_insert_id_returning_suffix(&self, _table: &str, _key: &str) -> String {
        String::new()
    }

    fn default_value_str(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    fn build_key_name(&self, kind: &str, table: &str, fields: &[&str]) -> String {
        let key_name = format!("{kind}_{table}_{}", fields.join("_"));
        KEY_NAME_REGEX.replace_all(&key_name, "_").into_owned()
    }

    fn normalize_index_and_column(&self, index: &str, column: &str) -> (String, String) {
        (index.to_string(), column.to_string())
    }

    async fn current_database(&self, db: &dyn SqlExecutor) -> String {
        if let Some(ref tablespace) = self.config.tablespace {
            return tablespace.clone();
        }
        match db.query_string("SELECT DATABASE()").await {
            Ok(name) => name.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Could not read current database");
                String::new()
            }
        }
    }
}
