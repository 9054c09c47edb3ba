//! The dialect capability trait.
//!
//! A dialect answers the schema and syntax questions the mapping layer asks
//! while it generates DDL and queries. [`CommonDialect`](crate::CommonDialect)
//! answers them with widely shared SQL; database adapters hold one and hand
//! every operation they do not override back to it.

use async_trait::async_trait;

use crate::error::Result;
use crate::executor::SqlExecutor;
use crate::field::FieldDescriptor;
use crate::paging::PagingValue;

/// Database-specific schema and syntax rules.
#[async_trait]
pub trait Dialect: Send + Sync {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// Returns the placeholder for the bind variable at `index` (1-based).
    fn bind_var(&self, index: usize) -> String;

    /// Quotes an identifier.
    fn quote(&self, key: &str) -> String;

    /// Returns the column type for a field.
    ///
    /// May add or remove the field's `AUTO_INCREMENT` tag setting.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::InvalidSqlType` when no column type exists for
    /// the field's kind.
    fn data_type_of(&self, field: &mut FieldDescriptor) -> Result<String>;

    /// Returns whether `table` has an index named `index`.
    async fn has_index(&self, db: &dyn SqlExecutor, table: &str, index: &str) -> bool;

    /// Returns whether `table` has a foreign key named `foreign_key`.
    async fn has_foreign_key(&self, db: &dyn SqlExecutor, table: &str, foreign_key: &str)
        -> bool;

    /// Drops an index from `table`.
    ///
    /// # Errors
    ///
    /// Returns the executor's error unchanged.
    async fn remove_index(&self, db: &dyn SqlExecutor, table: &str, index: &str) -> Result<()>;

    /// Returns whether `table` exists.
    async fn has_table(&self, db: &dyn SqlExecutor, table: &str) -> bool;

    /// Returns whether `table` has a column named `column`.
    async fn has_column(&self, db: &dyn SqlExecutor, table: &str, column: &str) -> bool;

    /// Changes the type of an existing column.
    ///
    /// # Errors
    ///
    /// Returns the executor's error unchanged.
    async fn modify_column(
        &self,
        db: &dyn SqlExecutor,
        table: &str,
        column: &str,
        typ: &str,
    ) -> Result<()>;

    /// Returns the trailing paging clause.
    ///
    /// # Errors
    ///
    /// Returns `DialectError::InvalidInteger` when a text value is not an
    /// integer.
    fn limit_and_offset_sql(
        &self,
        limit: Option<&PagingValue>,
        offset: Option<&PagingValue>,
    ) -> Result<String>;

    /// Returns the `FROM` fragment for a select without a table.
    fn select_from_dummy_table(&self) -> &'static str;

    /// Returns the SQL placed between `INSERT ... (columns)` and `VALUES`
    /// to read back the inserted key.
    fn last_insert_id_output_interstitial(
        &self,
        table: &str,
        key: &str,
        columns: &[String],
    ) -> String;

    /// Returns the suffix appended to an `INSERT` to read back the inserted key.
    fn last_insert_id_returning_suffix(&self, table: &str, key: &str) -> String;

    /// Returns the `INSERT` expression for "use column defaults".
    fn default_value_str(&self) -> &'static str;

    /// Builds an index, constraint or foreign key name.
    fn build_key_name(&self, kind: &str, table: &str, fields: &[&str]) -> String;

    /// Splits an inline prefix length out of an index name.
    fn normalize_index_and_column(&self, index: &str, column: &str) -> (String, String);

    /// Returns the current namespace.
    async fn current_database(&self, db: &dyn SqlExecutor) -> String;
}
