//! # Application Container
//!
//! Hands out the one shared [`ItemsRepository`] of the process.
//!
//! ## Lazy Construction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  caller A ─┐                                                            │
//! │  caller B ─┼──► items_repository()                                      │
//! │  caller C ─┘         │                                                  │
//! │                      ▼                                                  │
//! │            OnceCell<Database>  ── first caller opens the pool,          │
//! │                      │            the others wait on the same init      │
//! │                      ▼                                                  │
//! │            OnceCell<Arc<dyn ItemsRepository>>                           │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │            same Arc returned to A, B and C                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed open is returned to the caller and leaves the cell empty; nothing
//! is retried automatically.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::{Database, DbConfig};
use crate::repository::{ItemsRepository, OfflineItemsRepository};

/// Dependencies shared across the application.
#[async_trait]
pub trait AppContainer: Send + Sync {
    /// The shared item repository, constructed on first access.
    async fn items_repository(&self) -> DbResult<Arc<dyn ItemsRepository>>;
}

/// [`AppContainer`] backed by a local SQLite database.
#[derive(Debug)]
pub struct AppDataContainer {
    config: DbConfig,
    database: OnceCell<Database>,
    items_repository: OnceCell<Arc<dyn ItemsRepository>>,
}

impl AppDataContainer {
    /// Creates a container that opens `config` on first use.
    pub fn new(config: DbConfig) -> Self {
        AppDataContainer {
            config,
            database: OnceCell::new(),
            items_repository: OnceCell::new(),
        }
    }

    /// Creates a container around an already-open database.
    pub fn from_database(database: Database) -> Self {
        AppDataContainer {
            // Never read: the database cell is already filled.
            config: DbConfig::in_memory(),
            database: OnceCell::from(database),
            items_repository: OnceCell::new(),
        }
    }

    /// The shared database handle, opened on first access.
    pub async fn database(&self) -> DbResult<&Database> {
        self.database
            .get_or_try_init(|| async {
                info!(path = %self.config.database_path.display(), "Opening shared database");
                Database::new(self.config.clone()).await
            })
            .await
    }

    /// Whether the database has been opened yet.
    pub fn is_initialized(&self) -> bool {
        self.database.initialized()
    }
}

#[async_trait]
impl AppContainer for AppDataContainer {
    async fn items_repository(&self) -> DbResult<Arc<dyn ItemsRepository>> {
        let repository = self
            .items_repository
            .get_or_try_init(|| async {
                let db = self.database().await?;
                let repository: Arc<dyn ItemsRepository> =
                    Arc::new(OfflineItemsRepository::new(db.items()));
                Ok::<_, DbError>(repository)
            })
            .await?;

        Ok(Arc::clone(repository))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
