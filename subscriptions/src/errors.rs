use thiserror::Error;

use subhub_models::SubscriptionStatus;

use crate::validator::ValidationResult;

/// Failures surfaced by the subscription service.
///
/// Storage failures pass through unmodified; nothing is retried or swallowed
/// here, and no partial mutation occurs on any failure path.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The creation request failed field validation; carries every
    /// accumulated error, not just the first.
    #[error("invalid subscription request: {0}")]
    Validation(ValidationResult),

    #[error("subscription {id} not found")]
    NotFound { id: i32 },

    #[error("only active subscription {id} can be canceled, current status is {status}")]
    NotCancelable {
        id: i32,
        status: SubscriptionStatus,
    },

    #[error("subscription {id} has already expired")]
    AlreadyExpired { id: i32 },

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
