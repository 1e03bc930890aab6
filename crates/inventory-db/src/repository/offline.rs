//! # Offline Items Repository
//!
//! [`ItemsRepository`] backed by the local SQLite database.

use async_trait::async_trait;
use futures::stream::BoxStream;

use inventory_core::{Item, ItemId};

use crate::dao::ItemDao;
use crate::error::DbResult;
use crate::repository::ItemsRepository;

/// Forwards every call to an [`ItemDao`]; adds no caching or validation.
#[derive(Debug, Clone)]
pub struct OfflineItemsRepository {
    item_dao: ItemDao,
}

impl OfflineItemsRepository {
    /// Creates a new OfflineItemsRepository.
    pub fn new(item_dao: ItemDao) -> Self {
        OfflineItemsRepository { item_dao }
    }
}

#[async_trait]
impl ItemsRepository for OfflineItemsRepository {
    fn get_all_items_stream(&self) -> BoxStream<'static, DbResult<Vec<Item>>> {
        self.item_dao.get_all_items()
    }

    fn get_item_stream(&self, id: ItemId) -> BoxStream<'static, DbResult<Option<Item>>> {
        self.item_dao.get_item(id)
    }

    async fn insert_item(&self, item: &Item) -> DbResult<Option<ItemId>> {
        self.item_dao.insert(item).await
    }

    async fn delete_item(&self, item: &Item) -> DbResult<u64> {
        self.item_dao.delete(item).await
    }

    async fn update_item(&self, item: &Item) -> DbResult<u64> {
        self.item_dao.update(item).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use futures::StreamExt;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn repository() -> OfflineItemsRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        OfflineItemsRepository::new(db.items())
    }

    async fn next<T>(stream: &mut BoxStream<'static, DbResult<T>>) -> T {
        timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("stream did not emit")
            .expect("stream ended")
            .expect("query failed")
    }

    /// Walks the Widget/Anvil scenario end to end through the trait object.
    #[tokio::test]
    async fn test_widget_anvil_scenario() {
        let repo: Box<dyn ItemsRepository> = Box::new(repository().await);
        let mut all = repo.get_all_items_stream();
        assert!(next(&mut all).await.is_empty());

        repo.insert_item(&Item::new("Widget", 9.99, 5)).await.unwrap();
        assert_eq!(
            next(&mut all).await,
            vec![Item::new("Widget", 9.99, 5).with_id(1)]
        );

        repo.insert_item(&Item::new("Anvil", 49.99, 2)).await.unwrap();
        assert_eq!(
            next(&mut all).await,
            vec![
                Item::new("Anvil", 49.99, 2).with_id(2),
                Item::new("Widget", 9.99, 5).with_id(1),
            ]
        );

        repo.update_item(&Item::new("Widget", 9.99, 3).with_id(1))
            .await
            .unwrap();
        let mut widget = repo.get_item_stream(1);
        assert_eq!(
            next(&mut widget).await,
            Some(Item::new("Widget", 9.99, 3).with_id(1))
        );

        let anvil = Item::new("Anvil", 49.99, 2).with_id(2);
        assert_eq!(repo.delete_item(&anvil).await.unwrap(), 1);

        // Drain to the latest emission.
        let mut latest = next(&mut all).await;
        while latest.len() != 1 {
            latest = next(&mut all).await;
        }
        assert_eq!(latest, vec![Item::new("Widget", 9.99, 3).with_id(1)]);
    }

    #[tokio::test]
    async fn test_item_stream_reports_deletion() {
        let repo = repository().await;
        let id = repo
            .insert_item(&Item::new("Widget", 9.99, 5))
            .await
            .unwrap()
            .unwrap();

        let mut stream = repo.get_item_stream(id);
        let stored = next(&mut stream).await.unwrap();

        repo.delete_item(&stored).await.unwrap();
        assert_eq!(next(&mut stream).await, None);
    }

    #[tokio::test]
    async fn test_deleting_missing_item_leaves_list_unchanged() {
        let repo = repository().await;
        repo.insert_item(&Item::new("Widget", 9.99, 5)).await.unwrap();

        let ghost = Item::new("Ghost", 1.0, 1).with_id(99);
        assert_eq!(repo.delete_item(&ghost).await.unwrap(), 0);

        let mut all = repo.get_all_items_stream();
        assert_eq!(next(&mut all).await.len(), 1);
    }
}
