use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::{query, query_as, PgPool};
use tracing::error;

use subhub_models::{Entity, Subscription};

use super::Repository;

/// Storage contract the subscription service depends on: generic CRUD plus
/// the lookup feeding upsert resolution.
#[async_trait]
pub trait SubscriptionRepository: Repository<Subscription> {
    /// All subscriptions recorded for a user; empty when there are none.
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Subscription>>;
}

/// PostgreSQL-backed subscription repository over a `subscriptions` table
/// (`id SERIAL PRIMARY KEY`, `user_id INT`, `name TEXT`, `provider TEXT`,
/// `expiration_date TIMESTAMPTZ`, `status TEXT`).
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Subscription> for PgSubscriptionRepository {
    async fn find_all(&self) -> Result<Vec<Subscription>> {
        query_as::<_, Subscription>(
            "SELECT id, user_id, name, provider, expiration_date, status FROM subscriptions ORDER BY id"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list subscriptions: {}", e);
            e
        })
        .context("Failed to list subscriptions")
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Subscription>> {
        query_as::<_, Subscription>(
            "SELECT id, user_id, name, provider, expiration_date, status FROM subscriptions WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to find subscription {}: {}", id, e);
            e
        })
        .context("Failed to find subscription")
    }

    async fn insert(&self, entity: &Subscription) -> Result<Subscription> {
        query_as::<_, Subscription>(
            "INSERT INTO subscriptions (user_id, name, provider, expiration_date, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, user_id, name, provider, expiration_date, status"
        )
        .bind(entity.user_id)
        .bind(&entity.name)
        .bind(entity.provider)
        .bind(entity.expiration_date)
        .bind(entity.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert subscription for user {}: {}", entity.user_id, e);
            e
        })
        .context("Failed to insert subscription")
    }

    async fn update(&self, entity: &Subscription) -> Result<Subscription> {
        let id = entity
            .id()
            .ok_or_else(|| anyhow!("update requires a persisted subscription id"))?;

        query_as::<_, Subscription>(
            "UPDATE subscriptions SET user_id = $1, name = $2, provider = $3, \
             expiration_date = $4, status = $5 WHERE id = $6 \
             RETURNING id, user_id, name, provider, expiration_date, status"
        )
        .bind(entity.user_id)
        .bind(&entity.name)
        .bind(entity.provider)
        .bind(entity.expiration_date)
        .bind(entity.status)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update subscription {}: {}", id, e);
            e
        })
        .context("Failed to update subscription")
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete subscription {}: {}", id, e);
                e
            })
            .context("Failed to delete subscription")?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Vec<Subscription>> {
        query_as::<_, Subscription>(
            "SELECT id, user_id, name, provider, expiration_date, status \
             FROM subscriptions WHERE user_id = $1 ORDER BY id"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get subscriptions for user {}: {}", user_id, e);
            e
        })
        .context("Failed to get subscriptions for user")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subhub_models::{Provider, SubscriptionStatus};

    #[tokio::test]
    async fn update_rejects_an_entity_without_an_id() {
        let pool = PgPool::connect_lazy("postgres://localhost/subhub").unwrap();
        let repository = PgSubscriptionRepository::new(pool);
        let subscription = Subscription {
            id: None,
            user_id: 1,
            name: "Ivan".to_string(),
            provider: Provider::Google,
            expiration_date: "2024-12-03T10:15:30Z".parse().unwrap(),
            status: SubscriptionStatus::Active,
        };

        let err = repository.update(&subscription).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "update requires a persisted subscription id"
        );
    }
}
