//! The DM dialect.
//!
//! DM reads schema metadata from its `USER_*` catalog views, quotes with
//! backticks, and limits identifiers to 64 characters. Everything else is
//! answered by the held [`CommonDialect`].

use async_trait::async_trait;
use dialecta_core::common::{count_exists, current_database_and_table};
use dialecta_core::{
    CommonDialect, Dialect, DialectConfig, FieldDescriptor, PagingValue, Result, SqlExecutor,
};
use tracing::{debug, warn};

use crate::keys;
use crate::types;

/// Name the dialect is registered under.
pub const REGISTRY_NAME: &str = "dm";

/// Query returning the schema of the current session.
const CURRENT_SCHEMA_SQL: &str = "SELECT SF_GET_SCHEMA_NAME_BY_ID(CURRENT_SCHID)";

/// Drops the namespace from `schema.table`.
///
/// The `USER_CONSTRAINTS` and `USER_TAB_COLUMNS` lookups match on the table
/// name alone, so no current schema is needed.
fn table_name(table: &str) -> &str {
    table.split_once('.').map_or(table, |(_, name)| name)
}

/// DM (Dameng) dialect.
#[derive(Debug, Clone, Default)]
pub struct DmDialect {
    common: CommonDialect,
}

impl DmDialect {
    /// Creates a DM dialect with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a DM dialect with the given configuration.
    #[must_use]
    pub fn with_config(config: DialectConfig) -> Self {
        Self {
            common: CommonDialect::with_config(config),
        }
    }

    /// Returns the dialect configuration.
    #[must_use]
    pub fn config(&self) -> &DialectConfig {
        self.common.config()
    }
}

#[async_trait]
impl Dialect for DmDialect {
    fn name(&self) -> &'static str {
        "dmsql"
    }

    fn bind_var(&self, index: usize) -> String {
        self.common.bind_var(index)
    }

    fn quote(&self, key: &str) -> String {
        format!("`{key}`")
    }

    fn data_type_of(&self, field: &mut FieldDescriptor) -> Result<String> {
        types::data_type_of(&self.common, field, self.name())
    }

    async fn has_index(&self, db: &dyn SqlExecutor, table: &str, index: &str) -> bool {
        let (tablespace, table) = current_database_and_table(self, db, table).await;
        count_exists(
            db,
            "SELECT count(*) FROM USER_INDEXS WHERE TABLESPACE = ? AND TABLE_NAME = ? AND INDEX_NAME = ?",
            &[tablespace.as_str(), table.as_str(), index],
        )
        .await
    }

    async fn has_foreign_key(
        &self,
        db: &dyn SqlExecutor,
        table: &str,
        foreign_key: &str,
    ) -> bool {
        count_exists(
            db,
            "SELECT count(*) FROM USER_CONSTRAINTS WHERE TABLE_NAME = ? AND CONSTRAINT_NAME = ? AND CONSTRAINT_TYPE = 'R'",
            &[table_name(table), foreign_key],
        )
        .await
    }

    async fn remove_index(&self, db: &dyn SqlExecutor, table: &str, index: &str) -> Result<()> {
        db.execute(&format!("DROP INDEX {index} ON {}", self.quote(table)))
            .await?;
        Ok(())
    }

    async fn has_table(&self, db: &dyn SqlExecutor, table: &str) -> bool {
        let (tablespace, table) = current_database_and_table(self, db, table).await;
        count_exists(
            db,
            "SELECT count(*) FROM USER_TABLES WHERE TABLESPACE = ? AND TABLE_NAME = ?",
            &[tablespace.as_str(), table.as_str()],
        )
        .await
    }

    async fn has_column(&self, db: &dyn SqlExecutor, table: &str, column: &str) -> bool {
        count_exists(
            db,
            "SELECT count(*) FROM USER_TAB_COLUMNS WHERE TABLE_NAME = ? AND COLUMN_NAME = ?",
            &[table_name(table), column],
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
        db.execute(&format!("ALTER TABLE {table} MODIFY COLUMN {column} {typ}"))
            .await?;
        Ok(())
    }

    fn limit_and_offset_sql(
        &self,
        limit: Option<&PagingValue>,
        offset: Option<&PagingValue>,
    ) -> Result<String> {
        dialecta_core::common::limit_and_offset(limit, offset)
    }

    fn select_from_dummy_table(&self) -> &'static str {
        "FROM DUAL"
    }

    fn last_insert_id_output_interstitial(
        &self,
        table: &str,
        key: &str,
        columns: &[String],
    ) -> String {
        self.common
            .last_insert_id_output_interstitial(table, key, columns)
    }

    fn last_insert_id_returning_suffix(&self, table: &str, key: &str) -> String {
        self.common.last_insert_id_returning_suffix(table, key)
    }

    fn default_value_str(&self) -> &'static str {
        "VALUES()"
    }

    fn build_key_name(&self, kind: &str, table: &str, fields: &[&str]) -> String {
        let config = self.config();
        keys::shorten_key_name(
            self.common.build_key_name(kind, table, fields),
            fields,
            config.max_key_length,
            config.key_prefix_length,
        )
    }

    fn normalize_index_and_column(&self, index: &str, column: &str) -> (String, String) {
        keys::normalize_index_and_column(index, column)
    }

    async fn current_database(&self, db: &dyn SqlExecutor) -> String {
        if let Some(ref tablespace) = self.config().tablespace {
            return tablespace.clone();
        }
        match db.query_string(CURRENT_SCHEMA_SQL).await {
            Ok(Some(name)) => {
                debug!(tablespace = %name, "Resolved current tablespace");
                name
            }
            Ok(None) => String::new(),
            Err(e) => {
                warn!(error = %e, "Could not read current tablespace");
                String::new()
            }
        }
    }
}
