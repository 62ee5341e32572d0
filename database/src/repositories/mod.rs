// Repository pattern for database operations

pub mod subscription;

pub use subscription::{PgSubscriptionRepository, SubscriptionRepository};

use anyhow::Result;
use async_trait::async_trait;

use subhub_models::Entity;

/// Base repository trait with common CRUD operations.
///
/// `insert` always assigns a fresh identifier, `update` requires an existing
/// one and replaces the full record, and lookups return empty results rather
/// than errors when nothing matches.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + Send + Sync,
    T::Id: Send,
{
    /// List all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>>;

    /// Create a new entity, returning it with its assigned ID
    async fn insert(&self, entity: &T) -> Result<T>;

    /// Update an existing entity, replacing the stored record
    async fn update(&self, entity: &T) -> Result<T>;

    /// Delete an entity by ID, reporting whether a record was removed
    async fn delete(&self, id: T::Id) -> Result<bool>;

    /// Insert when the entity has no identifier yet, update otherwise.
    async fn upsert(&self, entity: &T) -> Result<T> {
        if entity.id().is_some() {
            self.update(entity).await
        } else {
            self.insert(entity).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct Widget {
        id: Option<i32>,
    }

    impl Entity for Widget {
        type Id = i32;

        fn id(&self) -> Option<i32> {
            self.id
        }
    }

    #[derive(Default)]
    struct RecordingWidgetRepository {
        inserts: AtomicUsize,
        updates: AtomicUsize,
    }

    #[async_trait]
    impl Repository<Widget> for RecordingWidgetRepository {
        async fn find_all(&self) -> Result<Vec<Widget>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Widget>> {
            Ok(None)
        }

        async fn insert(&self, _entity: &Widget) -> Result<Widget> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            Ok(Widget { id: Some(1) })
        }

        async fn update(&self, entity: &Widget) -> Result<Widget> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(entity.clone())
        }

        async fn delete(&self, _id: i32) -> Result<bool> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn upsert_inserts_when_id_is_absent() {
        let repository = RecordingWidgetRepository::default();

        let stored = repository.upsert(&Widget { id: None }).await.unwrap();

        assert_eq!(stored.id, Some(1));
        assert_eq!(repository.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(repository.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn upsert_updates_when_id_is_present() {
        let repository = RecordingWidgetRepository::default();

        let stored = repository.upsert(&Widget { id: Some(42) }).await.unwrap();

        assert_eq!(stored.id, Some(42));
        assert_eq!(repository.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(repository.updates.load(Ordering::SeqCst), 1);
    }
}
