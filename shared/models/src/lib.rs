// Shared domain models for SubHub

pub mod subscription;

pub use subscription::{
    CreateSubscriptionRequest, Provider, Subscription, SubscriptionStatus,
};

/// Persisted entity with a storage-assigned identifier.
///
/// The identifier is absent until the store has inserted the entity and is
/// never reassigned afterwards.
pub trait Entity {
    type Id;

    fn id(&self) -> Option<Self::Id>;
}
