//! # Schema Management
//!
//! Versioned schema for the inventory database with a destructive fallback.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Check on Open                               │
//! │                                                                         │
//! │  PRAGMA user_version                                                   │
//! │       │                                                                 │
//! │       ├── == CURRENT        → nothing to do                            │
//! │       ├── == 0 (fresh file) → create tables                            │
//! │       ├── <  CURRENT        → DROP managed tables, create tables       │
//! │       │                        (existing rows are discarded)            │
//! │       └── >  CURRENT        → UnsupportedSchemaVersion (fatal)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PRAGMA user_version = CURRENT                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no upgrade path: any version change recreates the schema. All
//! steps run in one transaction so a failed setup leaves the file untouched.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};

/// Name of the only table managed by this crate.
pub const ITEMS_TABLE: &str = "items";

/// A schema definition: its version and the DDL that creates it.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Value stored in `PRAGMA user_version` once applied.
    pub version: i64,

    /// Tables dropped when an older version is found.
    pub tables: &'static [&'static str],

    /// Statements creating the tables, run in order.
    pub create: &'static [&'static str],
}

/// The schema this build of the application expects.
pub const CURRENT: Schema = Schema {
    version: 1,
    tables: &[ITEMS_TABLE],
    create: &[r#"
        CREATE TABLE IF NOT EXISTS items (
            id       INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
            name     TEXT    NOT NULL,
            price    REAL    NOT NULL,
            quantity INTEGER NOT NULL
        )
        "#],
};

/// Brings the database to the [`CURRENT`] schema.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    apply(pool, &CURRENT).await
}

/// Brings the database to `schema`, recreating it on a version mismatch.
///
/// ## Errors
/// - `UnsupportedSchemaVersion` if the file carries a newer version
/// - `MigrationFailed` if any DDL statement fails
pub async fn apply(pool: &SqlitePool, schema: &Schema) -> DbResult<()> {
    let mut tx = pool.begin().await?;

    let found: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *tx)
        .await?;

    if found > schema.version {
        return Err(DbError::UnsupportedSchemaVersion {
            found,
            supported: schema.version,
        });
    }

    if found == schema.version {
        info!(version = found, "Schema is up to date");
        return Ok(());
    }

    if found != 0 {
        warn!(
            found,
            expected = schema.version,
            "Schema version changed, discarding existing data"
        );
        for table in schema.tables {
            sqlx::query(&format!("DROP TABLE IF EXISTS {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| DbError::MigrationFailed(e.to_string()))?;
        }
    }

    for statement in schema.create {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::MigrationFailed(e.to_string()))?;
    }

    // PRAGMA does not accept bound parameters.
    sqlx::query(&format!("PRAGMA user_version = {}", schema.version))
        .execute(&mut *tx)
        .await
        .map_err(|e| DbError::MigrationFailed(e.to_string()))?;

    tx.commit().await?;

    info!(version = schema.version, "Schema created");
    Ok(())
}

/// Returns the schema version recorded in the database file.
pub async fn schema_version(pool: &SqlitePool) -> DbResult<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn row_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fresh_database_gets_current_version() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert_eq!(schema_version(db.pool()).await.unwrap(), CURRENT.version);
        assert_eq!(row_count(db.pool()).await, 0);
    }

    #[tokio::test]
    async fn test_reapplying_same_version_keeps_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO items (name, price, quantity) VALUES ('Widget', 9.99, 5)")
            .execute(db.pool())
            .await
            .unwrap();

        run_migrations(db.pool()).await.unwrap();
        assert_eq!(row_count(db.pool()).await, 1);
    }

    #[tokio::test]
    async fn test_version_change_discards_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO items (name, price, quantity) VALUES ('Widget', 9.99, 5)")
            .execute(db.pool())
            .await
            .unwrap();

        let next = Schema {
            version: CURRENT.version + 1,
            ..CURRENT
        };
        apply(db.pool(), &next).await.unwrap();

        assert_eq!(schema_version(db.pool()).await.unwrap(), next.version);
        assert_eq!(row_count(db.pool()).await, 0);
    }

    #[tokio::test]
    async fn test_newer_version_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("PRAGMA user_version = 99")
            .execute(db.pool())
            .await
            .unwrap();

        let err = run_migrations(db.pool()).await.unwrap_err();
        match err {
            DbError::UnsupportedSchemaVersion { found, supported } => {
                assert_eq!(found, 99);
                assert_eq!(supported, CURRENT.version);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_reopening_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        sqlx::query("INSERT INTO items (name, price, quantity) VALUES ('Widget', 9.99, 5)")
            .execute(db.pool())
            .await
            .unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(schema_version(db.pool()).await.unwrap(), CURRENT.version);
        assert_eq!(row_count(db.pool()).await, 1);
    }
}
