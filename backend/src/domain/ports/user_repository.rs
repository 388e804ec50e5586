//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{User, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The backing document could not be read.
        Load { message: String } => "user repository load failed: {message}",
        /// The backing document could not be written.
        Save { message: String } => "user repository save failed: {message}",
    }
}

/// Driven port for registered accounts.
///
/// Accounts are never deleted. Updates only replace stored password material.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every registered account in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch the account whose username equals `username` exactly.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Append a new account.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Replace the account with the same id. Returns `false` when absent.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;
}
