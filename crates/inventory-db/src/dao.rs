//! # Item Data-Access Object
//!
//! SQL for the `items` table, plus live (re-emitting) reads.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          ItemDao                                        │
//! │                                                                         │
//! │  get_all_items()  SELECT ... ORDER BY name ASC   → live stream          │
//! │  get_item(id)     SELECT ... WHERE id = ?        → live stream          │
//! │  insert(item)     INSERT OR IGNORE               → Option<new id>       │
//! │  update(item)     UPDATE ... WHERE id = ?        → rows affected        │
//! │  delete(item)     DELETE ... WHERE id = ?        → rows affected        │
//! │                                                                         │
//! │  Writes that touch at least one row notify the "items" table,          │
//! │  which makes every open stream re-run its query.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use futures::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, trace};

use inventory_core::{Item, ItemId, UNASSIGNED_ID};

use crate::changes::ChangeTracker;
use crate::error::DbResult;
use crate::migrations::ITEMS_TABLE;

/// Data-access object for the `items` table.
///
/// ## Usage
/// ```rust,ignore
/// let dao = db.items();
///
/// let id = dao.insert(&Item::new("Widget", 9.99, 5)).await?;
/// let mut items = dao.get_all_items();
/// while let Some(list) = items.next().await { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ItemDao {
    pool: SqlitePool,
    changes: ChangeTracker,
}

impl ItemDao {
    /// Creates a new ItemDao over a shared pool and tracker.
    pub fn new(pool: SqlitePool, changes: ChangeTracker) -> Self {
        ItemDao { pool, changes }
    }

    // =========================================================================
    // Live Reads
    // =========================================================================

    /// Streams every item sorted by name, re-emitting after each change.
    ///
    /// The first element is the current list. The stream never ends on its
    /// own; drop it to unsubscribe.
    pub fn get_all_items(&self) -> BoxStream<'static, DbResult<Vec<Item>>> {
        let dao = self.clone();
        WatchStream::new(self.changes.subscribe(ITEMS_TABLE))
            .then(move |version| {
                let dao = dao.clone();
                async move {
                    trace!(version, "Re-running all-items query");
                    dao.fetch_all().await
                }
            })
            .boxed()
    }

    /// Streams the item with `id` (`None` while absent), re-emitting after
    /// each change to the table.
    pub fn get_item(&self, id: ItemId) -> BoxStream<'static, DbResult<Option<Item>>> {
        let dao = self.clone();
        WatchStream::new(self.changes.subscribe(ITEMS_TABLE))
            .then(move |version| {
                let dao = dao.clone();
                async move {
                    trace!(id, version, "Re-running item query");
                    dao.fetch_by_id(id).await
                }
            })
            .boxed()
    }

    // =========================================================================
    // One-shot Reads
    // =========================================================================

    /// Lists every item sorted by name ascending.
    pub async fn fetch_all(&self) -> DbResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, quantity
            FROM items
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn fetch_by_id(&self, id: ItemId) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, name, price, quantity
            FROM items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Counts stored items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new item.
    ///
    /// An item with `id == 0` gets a fresh id from the store. A primary-key
    /// conflict is ignored rather than reported.
    ///
    /// ## Returns
    /// * `Ok(Some(id))` - Row written with this id
    /// * `Ok(None)` - Conflict, nothing written
    pub async fn insert(&self, item: &Item) -> DbResult<Option<ItemId>> {
        debug!(name = %item.name, "Inserting item");

        let id = (item.id != UNASSIGNED_ID).then_some(item.id);

        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO items (id, name, price, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = item.id, "Insert ignored on conflict");
            return Ok(None);
        }

        let new_id = result.last_insert_rowid();
        self.changes.notify(ITEMS_TABLE);

        Ok(Some(new_id))
    }

    /// Overwrites the row matching `item.id` with the item's fields.
    ///
    /// ## Returns
    /// Number of rows updated; `0` when no row has that id.
    pub async fn update(&self, item: &Item) -> DbResult<u64> {
        debug!(id = item.id, "Updating item");

        let result = sqlx::query(
            r#"
            UPDATE items SET
                name = ?2,
                price = ?3,
                quantity = ?4
            WHERE id = ?1
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&self.pool)
        .await?;

        let affected = result.rows_affected();
        if affected > 0 {
            self.changes.notify(ITEMS_TABLE);
        }

        Ok(affected)
    }

    /// Removes the row matching `item.id`.
    ///
    /// ## Returns
    /// Number of rows deleted; `0` when no row has that id.
    pub async fn delete(&self, item: &Item) -> DbResult<u64> {
        debug!(id = item.id, "Deleting item");

        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(item.id)
            .execute(&self.pool)
            .await?;

        let affected = result.rows_affected();
        if affected > 0 {
            self.changes.notify(ITEMS_TABLE);
        }

        Ok(affected)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::time::Duration;
    use tokio::time::timeout;

    async fn dao() -> ItemDao {
        Database::new(DbConfig::in_memory()).await.unwrap().items()
    }

    fn assert_same_fields(stored: &Item, expected: &Item) {
        assert_eq!(stored.name, expected.name);
        assert_eq!(stored.price, expected.price);
        assert_eq!(stored.quantity, expected.quantity);
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let dao = dao().await;
        let widget = Item::new("Widget", 9.99, 5);
        let anvil = Item::new("Anvil", 49.99, 2);

        let first = dao.insert(&widget).await.unwrap().unwrap();
        let second = dao.insert(&anvil).await.unwrap().unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let all = dao.fetch_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let stored = all.iter().find(|item| item.id == first).unwrap();
        assert_same_fields(stored, &widget);
    }

    #[tokio::test]
    async fn test_insert_conflict_is_ignored() {
        let dao = dao().await;
        let id = dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap().unwrap();

        let clash = Item::new("Impostor", 1.0, 1).with_id(id);
        assert_eq!(dao.insert(&clash).await.unwrap(), None);

        let stored = dao.fetch_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(dao.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let dao = dao().await;
        for name in ["Widget", "anvil", "Anvil", "Bolt"] {
            dao.insert(&Item::new(name, 1.0, 1)).await.unwrap();
        }

        let names: Vec<String> = dao
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        // SQLite's default BINARY collation orders uppercase first.
        assert_eq!(names, vec!["Anvil", "Bolt", "Widget", "anvil"]);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let dao = dao().await;
        let id = dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap().unwrap();

        let edited = Item::new("Widget", 9.99, 3).with_id(id);
        assert_eq!(dao.update(&edited).await.unwrap(), 1);
        assert_eq!(dao.fetch_by_id(id).await.unwrap(), Some(edited));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_noops() {
        let dao = dao().await;
        dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap();
        let before = dao.fetch_all().await.unwrap();

        let ghost = Item::new("Ghost", 0.0, 0).with_id(42);
        assert_eq!(dao.update(&ghost).await.unwrap(), 0);
        assert_eq!(dao.delete(&ghost).await.unwrap(), 0);
        assert_eq!(dao.fetch_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let dao = dao().await;
        let id = dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap().unwrap();
        let item = dao.fetch_by_id(id).await.unwrap().unwrap();

        assert_eq!(dao.delete(&item).await.unwrap(), 1);
        assert_eq!(dao.fetch_by_id(id).await.unwrap(), None);
        assert!(dao.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_items_stream_reemits_on_change() {
        let dao = dao().await;
        let mut stream = dao.get_all_items();

        let initial = stream.next().await.unwrap().unwrap();
        assert!(initial.is_empty());

        dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap();
        let after_insert = timeout(Duration::from_secs(5), stream.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(after_insert.len(), 1);
        assert_eq!(after_insert[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_item_stream_waits_for_insert() {
        let dao = dao().await;
        let mut stream = dao.get_item(1);

        assert_eq!(stream.next().await.unwrap().unwrap(), None);

        dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap();
        let item = timeout(Duration::from_secs(5), stream.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(item, Item::new("Widget", 9.99, 5).with_id(1));
    }

    #[tokio::test]
    async fn test_noop_write_does_not_wake_streams() {
        let dao = dao().await;
        let mut stream = dao.get_all_items();
        stream.next().await.unwrap().unwrap();

        dao.delete(&Item::new("Ghost", 0.0, 0).with_id(7)).await.unwrap();
        let woke = timeout(Duration::from_millis(100), stream.next()).await;
        assert!(woke.is_err(), "stream emitted without a change");
    }

    #[tokio::test]
    async fn test_subscribers_are_independent() {
        let dao = dao().await;
        let mut first = dao.get_all_items();
        let second = dao.get_all_items();

        first.next().await.unwrap().unwrap();
        drop(second);

        dao.insert(&Item::new("Widget", 9.99, 5)).await.unwrap();
        let list = timeout(Duration::from_secs(5), first.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert_eq!(list.len(), 1);
    }
}
