//! # Repository Module
//!
//! The storage-agnostic item API that callers depend on.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  repo.get_all_items_stream()                                    │
//! │       ▼                                                                 │
//! │  dyn ItemsRepository                                                   │
//! │  ├── get_all_items_stream()                                            │
//! │  ├── get_item_stream(id)                                               │
//! │  ├── insert_item(item)                                                 │
//! │  ├── update_item(item)                                                 │
//! │  └── delete_item(item)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OfflineItemsRepository ──► ItemDao ──► SQLite                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OfflineItemsRepository`] - Local SQLite storage

pub mod offline;

pub use offline::OfflineItemsRepository;

use async_trait::async_trait;
use futures::stream::BoxStream;

use inventory_core::{Item, ItemId};

use crate::error::DbResult;

/// Insert, update, delete and live retrieval of [`Item`]s from some store.
///
/// Streams start with the current state and re-emit after every change;
/// dropping a stream cancels it without touching stored data.
#[async_trait]
pub trait ItemsRepository: Send + Sync + std::fmt::Debug {
    /// Streams all items sorted by name ascending.
    fn get_all_items_stream(&self) -> BoxStream<'static, DbResult<Vec<Item>>>;

    /// Streams the item with `id`, `None` while it does not exist.
    fn get_item_stream(&self, id: ItemId) -> BoxStream<'static, DbResult<Option<Item>>>;

    /// Inserts an item; returns the new id, or `None` if ignored on conflict.
    async fn insert_item(&self, item: &Item) -> DbResult<Option<ItemId>>;

    /// Deletes the item with `item.id`; returns rows removed (0 = no-op).
    async fn delete_item(&self, item: &Item) -> DbResult<u64>;

    /// Updates the item with `item.id`; returns rows changed (0 = no-op).
    async fn update_item(&self, item: &Item) -> DbResult<u64>;
}
