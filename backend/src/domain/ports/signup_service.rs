//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account.
    ///
    /// Fails with `invalid_request` and `details.code = "duplicate_username"`
    /// when the username is taken, ignoring case.
    async fn register(&self, credentials: &Credentials) -> Result<User, Error>;
}
