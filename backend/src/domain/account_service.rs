//! Account registration and login.
//!
//! Passwords are stored as Argon2 hashes. Login requires an exact username
//! match; signup rejects usernames already taken in any letter case.
//! Hashing and verification run on Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::spawn_blocking;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{LoginService, SignupService, UserRepository};
use crate::domain::{
    Credentials, Error, PasswordHash, StoredPassword, User, UserId, Username, ValidationCode,
};

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn hashing_failed(err: &dyn std::fmt::Display) -> Error {
    warn!(error = %err, "password hashing failed");
    Error::internal("internal server error")
}

async fn hash_password(password: Zeroizing<String>) -> Result<PasswordHash, Error> {
    spawn_blocking(move || PasswordHash::create(&password))
        .await
        .map_err(|err| hashing_failed(&err))?
        .map_err(|err| hashing_failed(&err))
}

async fn verify_password(
    stored: StoredPassword,
    attempt: Zeroizing<String>,
) -> Result<bool, Error> {
    spawn_blocking(move || stored.verify(&attempt))
        .await
        .map_err(|err| hashing_failed(&err))
}

/// Account service implementing the signup and login driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    user_repo: Arc<R>,
    write_lock: Arc<Mutex<()>>,
}

impl<R> AccountService<R> {
    /// Create a new account service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl<R> SignupService for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let username = Username::new(credentials.username()).map_err(|err| {
            Error::validation(ValidationCode::MissingField, "username", err.to_string())
        })?;
        let password_hash =
            hash_password(Zeroizing::new(credentials.password().to_owned())).await?;
        let _guard = self.write_lock.lock().await;

        let taken = self
            .user_repo
            .list()
            .await?
            .iter()
            .any(|user| user.username().matches_ignoring_case(username.as_ref()));
        if taken {
            return Err(Error::validation(
                ValidationCode::DuplicateUsername,
                "username",
                "username already exists",
            ));
        }

        let user = User::new(UserId::random(), username, password_hash);
        self.user_repo.insert(&user).await?;
        info!(user_id = %user.id(), "account registered");
        Ok(user)
    }
}

#[async_trait]
impl<R> LoginService for AccountService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let username = Username::new(credentials.username()).map_err(|_| invalid_credentials())?;
        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            return Err(invalid_credentials());
        };
        let attempt = Zeroizing::new(credentials.password().to_owned());
        if !verify_password(user.password().clone(), attempt.clone()).await? {
            return Err(invalid_credentials());
        }
        if user.password().is_legacy() {
            return Ok(self.upgrade_legacy_password(user, attempt).await);
        }
        Ok(user)
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    /// Replace a verified plaintext password with a hash.
    ///
    /// Failures are logged and the caller keeps the legacy record; the login
    /// itself has already succeeded.
    async fn upgrade_legacy_password(&self, user: User, password: Zeroizing<String>) -> User {
        let Ok(hash) = hash_password(password).await else {
            return user;
        };
        let upgraded = user.clone().with_password_hash(hash);
        match self.user_repo.update(&upgraded).await {
            Ok(true) => {
                info!(user_id = %upgraded.id(), "legacy password upgraded to a hash");
                upgraded
            }
            Ok(false) => user,
            Err(err) => {
                warn!(user_id = %user.id(), error = %err, "legacy password upgrade not saved");
                user
            }
        }
    }
}
