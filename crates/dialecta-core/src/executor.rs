//! Data-access handle used by dialects.
//!
//! Dialects never own a connection. The host passes a [`SqlExecutor`] into
//! every operation that needs to talk to the database.

use async_trait::async_trait;
use sqlx::{MySqlPool, SqlitePool};
use tracing::debug;

use crate::error::Result;

/// Statement execution and row-query primitives.
///
/// # Errors
///
/// Every method returns `DialectError::Database` when the driver fails.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Executes a statement, returning the number of affected rows.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Runs a count query and returns the first column of the first row.
    ///
    /// `args` are bound in order to the `?` placeholders of `sql`.
    async fn query_count(&self, sql: &str, args: &[&str]) -> Result<i64>;

    /// Runs a query returning a single text value.
    async fn query_string(&self, sql: &str) -> Result<Option<String>>;
}

macro_rules! impl_sql_executor {
    ($($pool:ty),*) => {
        $(
            #[async_trait]
            impl SqlExecutor for $pool {
                async fn execute(&self, sql: &str) -> Result<u64> {
                    debug!(sql = %sql, "Executing SQL");
                    let result = sqlx::query(sql).execute(self).await?;
                    Ok(result.rows_affected())
                }

                async fn query_count(&self, sql: &str, args: &[&str]) -> Result<i64> {
                    debug!(sql = %sql, args = ?args, "Querying count");
                    let mut query = sqlx::query_scalar::<_, i64>(sql);
                    for arg in args {
                        query = query.bind(*arg);
                    }
                    Ok(query.fetch_one(self).await?)
                }

                async fn query_string(&self, sql: &str) -> Result<Option<String>> {
                    debug!(sql = %sql, "Querying value");
                    let value: Option<Option<String>> = sqlx::query_scalar(sql)
                        .fetch_optional(self)
                        .await?;
                    Ok(value.flatten())
                }
            }
        )*
    };
}

impl_sql_executor!(SqlitePool, MySqlPool);

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .expect("Failed to create in-memory SQLite pool")
    }

    #[tokio::test]
    async fn test_execute_and_count() {
        let pool = create_test_pool().await;
        pool.execute("CREATE TABLE items (name TEXT NOT NULL)")
            .await
            .unwrap();
        let affected = pool
            .execute("INSERT INTO items (name) VALUES ('a'), ('b'), ('a')")
            .await
            .unwrap();
        assert_eq!(affected, 3);

        let count = pool
            .query_count("SELECT count(*) FROM items WHERE name = ?", &["a"])
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_query_string() {
        let pool = create_test_pool().await;
        let value = pool.query_string("SELECT 'main'").await.unwrap();
        assert_eq!(value.as_deref(), Some("main"));

        let value = pool.query_string("SELECT NULL").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let pool = create_test_pool().await;
        assert!(pool.execute("DROP TABLE missing").await.is_err());
        assert!(pool
            .query_count("SELECT count(*) FROM missing", &[])
            .await
            .is_err());
    }
}
