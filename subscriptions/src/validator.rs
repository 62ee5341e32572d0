use serde::Serialize;
use std::fmt;

use subhub_models::{CreateSubscriptionRequest, Provider};

use crate::clock::Clock;

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub code: u32,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Ordered accumulation of validation failures; empty means the request is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

/// Checks an incoming creation request field by field, accumulating one error
/// per violated rule rather than stopping at the first.
///
/// Pure function of the request and the injected clock; no side effects.
pub struct CreateSubscriptionValidator<C> {
    clock: C,
}

impl<C: Clock> CreateSubscriptionValidator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn validate(&self, request: &CreateSubscriptionRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if request.user_id.is_none() {
            result.add(ValidationError::new(100, "userId is invalid"));
        }

        if request.name.as_deref().map_or(true, str::is_empty) {
            result.add(ValidationError::new(101, "name is invalid"));
        }

        if request
            .provider
            .as_deref()
            .and_then(Provider::find_by_name)
            .is_none()
        {
            result.add(ValidationError::new(102, "provider is invalid"));
        }

        // Expiration must lie strictly in the future.
        match request.expiration_date {
            Some(date) if date > self.clock.now() => {}
            _ => result.add(ValidationError::new(103, "expirationDate is invalid")),
        }

        result
    }
}
