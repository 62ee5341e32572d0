use subhub_models::{CreateSubscriptionRequest, Provider, Subscription, SubscriptionStatus};

/// Maps a validated creation request into a fresh subscription candidate.
///
/// Deterministic and side-effect free.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSubscriptionMapper;

impl CreateSubscriptionMapper {
    pub fn new() -> Self {
        Self
    }

    /// Builds the candidate with no identifier and status forced to `Active`.
    ///
    /// # Panics
    ///
    /// Panics when the request is missing a field that
    /// [`CreateSubscriptionValidator`](crate::validator::CreateSubscriptionValidator)
    /// would reject; callers must validate first.
    pub fn map(&self, request: &CreateSubscriptionRequest) -> Subscription {
        let provider = request
            .provider
            .as_deref()
            .and_then(Provider::find_by_name)
            .expect("provider must pass validation before mapping");

        Subscription {
            id: None,
            user_id: request
                .user_id
                .expect("userId must pass validation before mapping"),
            name: request
                .name
                .clone()
                .expect("name must pass validation before mapping"),
            provider,
            expiration_date: request
                .expiration_date
                .expect("expirationDate must pass validation before mapping"),
            status: SubscriptionStatus::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn maps_request_into_active_subscription_without_id() {
        let expiration: DateTime<Utc> = "2024-12-03T10:15:30Z".parse().unwrap();
        let request = CreateSubscriptionRequest {
            user_id: Some(1),
            name: Some("Ivan".to_string()),
            provider: Some("GOOGLE".to_string()),
            expiration_date: Some(expiration),
        };

        let subscription = CreateSubscriptionMapper::new().map(&request);

        assert_eq!(
            subscription,
            Subscription {
                id: None,
                user_id: 1,
                name: "Ivan".to_string(),
                provider: Provider::Google,
                expiration_date: expiration,
                status: SubscriptionStatus::Active,
            }
        );
    }

    #[test]
    fn parses_provider_name_case_insensitively() {
        let request = CreateSubscriptionRequest {
            user_id: Some(2),
            name: Some("Sveta".to_string()),
            provider: Some("apple".to_string()),
            expiration_date: Some("2024-12-03T10:15:30Z".parse().unwrap()),
        };

        let subscription = CreateSubscriptionMapper::new().map(&request);

        assert_eq!(subscription.provider, Provider::Apple);
    }
}
