//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so HTTP handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    ///
    /// Unknown usernames and wrong passwords both yield `unauthorized`.
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error>;
}
