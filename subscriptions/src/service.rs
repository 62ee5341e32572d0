use tracing::info;

use subhub_database::SubscriptionRepository;
use subhub_models::{CreateSubscriptionRequest, Subscription, SubscriptionStatus};

use crate::clock::Clock;
use crate::errors::ServiceError;
use crate::mapper::CreateSubscriptionMapper;
use crate::validator::CreateSubscriptionValidator;

/// Orchestrates validation, mapping, upsert resolution, and the cancel/expire
/// state machine over an abstract subscription store.
///
/// Stateless apart from its injected collaborators; every operation issues at
/// most one repository call per logical step.
pub struct SubscriptionService<R, C> {
    repository: R,
    validator: CreateSubscriptionValidator<C>,
    mapper: CreateSubscriptionMapper,
    clock: C,
}

impl<R, C> SubscriptionService<R, C>
where
    R: SubscriptionRepository,
    C: Clock,
{
    pub fn new(
        repository: R,
        validator: CreateSubscriptionValidator<C>,
        mapper: CreateSubscriptionMapper,
        clock: C,
    ) -> Self {
        Self {
            repository,
            validator,
            mapper,
            clock,
        }
    }

    /// Validates and persists a creation request.
    ///
    /// When the user already holds a subscription with the same provider, the
    /// candidate inherits its identifier and the store performs an update
    /// instead of inserting a duplicate row. A request that fails validation
    /// never reaches the repository.
    pub async fn upsert(
        &self,
        request: &CreateSubscriptionRequest,
    ) -> Result<Subscription, ServiceError> {
        let validation = self.validator.validate(request);
        if validation.has_errors() {
            return Err(ServiceError::Validation(validation));
        }

        let mut candidate = self.mapper.map(request);

        let existing = self.repository.find_by_user_id(candidate.user_id).await?;
        if let Some(current) = existing
            .into_iter()
            .find(|subscription| subscription.provider == candidate.provider)
        {
            candidate.id = current.id;
        }

        info!(
            "Upserting {} subscription for user {}",
            candidate.provider, candidate.user_id
        );
        let stored = self.repository.upsert(&candidate).await?;
        Ok(stored)
    }

    /// Cancels an active subscription. Only `Active` subscriptions can be
    /// canceled; any other state fails without touching the store.
    pub async fn cancel(&self, id: i32) -> Result<(), ServiceError> {
        let mut subscription = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { id })?;

        if subscription.status != SubscriptionStatus::Active {
            return Err(ServiceError::NotCancelable {
                id,
                status: subscription.status,
            });
        }

        subscription.status = SubscriptionStatus::Canceled;
        info!("Canceling subscription {}", id);
        self.repository.update(&subscription).await?;
        Ok(())
    }

    /// Expires an active or canceled subscription, stamping the expiration
    /// instant from the injected clock. Expiring twice fails without touching
    /// the store.
    pub async fn expire(&self, id: i32) -> Result<(), ServiceError> {
        let mut subscription = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound { id })?;

        if subscription.status == SubscriptionStatus::Expired {
            return Err(ServiceError::AlreadyExpired { id });
        }

        subscription.status = SubscriptionStatus::Expired;
        subscription.expiration_date = self.clock.now();
        info!("Expiring subscription {}", id);
        self.repository.update(&subscription).await?;
        Ok(())
    }
}
