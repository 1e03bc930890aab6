//! # inventory-db: Database Layer for Inventory
//!
//! This crate provides database access for the inventory tracker.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventory Data Flow                              │
//! │                                                                         │
//! │  CLI command (inventory add Widget 9.99 5)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  inventory-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │  AppDataContainer ──► dyn ItemsRepository ──► ItemDao           │   │
//! │  │   (container.rs)       (repository/)          (dao.rs)          │   │
//! │  │                                                  │              │   │
//! │  │   ┌───────────────┐   ┌───────────────┐         │              │   │
//! │  │   │   Database    │   │ ChangeTracker │◄────────┘ notify       │   │
//! │  │   │   (pool.rs)   │   │ (changes.rs)  │──► live streams        │   │
//! │  │   └───────────────┘   └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/inventory/inventory.db (one table: items)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Versioned schema with destructive fallback
//! - [`changes`] - Per-table change versions for live queries
//! - [`dao`] - SQL for the `items` table
//! - [`repository`] - Storage-agnostic item API
//! - [`container`] - Lazily built shared repository
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{AppContainer, AppDataContainer, DbConfig};
//!
//! let container = AppDataContainer::new(DbConfig::new("path/to/inventory.db"));
//! let items = container.items_repository().await?;
//!
//! items.insert_item(&Item::new("Widget", 9.99, 5)).await?;
//! let mut list = items.get_all_items_stream();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod changes;
pub mod container;
pub mod dao;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use changes::ChangeTracker;
pub use container::{AppContainer, AppDataContainer};
pub use dao::ItemDao;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{ItemsRepository, OfflineItemsRepository};
