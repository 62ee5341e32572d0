use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::Entity;

/// Lifecycle state of a subscription.
///
/// Transitions are monotonic: `Active -> Canceled` (cancel),
/// `Active | Canceled -> Expired` (expire). `Expired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Expired,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// Payment provider a subscription is billed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    /// Canonical provider name as exposed to callers and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "GOOGLE",
            Provider::Apple => "APPLE",
        }
    }

    /// Case-insensitive lookup; `None` for unknown names.
    pub fn find_by_name(name: &str) -> Option<Provider> {
        [Provider::Google, Provider::Apple]
            .into_iter()
            .find(|provider| provider.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's subscription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    /// Assigned by storage on insert; `None` until persisted.
    pub id: Option<i32>,
    pub user_id: i32,
    pub name: String,
    pub provider: Provider,
    pub expiration_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl Entity for Subscription {
    type Id = i32;

    fn id(&self) -> Option<i32> {
        self.id
    }
}

/// Incoming creation payload. Every field is optional so that presence is a
/// validation concern rather than a deserialization failure; the provider
/// arrives as raw text and is parsed to [`Provider`] during mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub provider: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
}
