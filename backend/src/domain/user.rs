//! User account model.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::password::{PasswordHash, StoredPassword};

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was blank once trimmed.
    #[error("user id must not be empty")]
    EmptyId,
    /// The username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// A persisted account carries neither a hash nor a legacy password.
    #[error("account {id} has no stored password")]
    MissingPassword { id: String },
}

/// Opaque user identifier.
///
/// Accounts created through signup receive a UUID v4, but shipments accept
/// any non-blank owner identifier supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Login name chosen at signup.
///
/// Stored trimmed. Uniqueness across accounts is case-insensitive; use
/// [`Username::matches_ignoring_case`] for that comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive comparison used for the uniqueness check.
    #[must_use]
    pub fn matches_ignoring_case(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.trim().to_lowercase()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` is non-empty once trimmed.
/// - Accounts created here store an Argon2 PHC string under `passwordHash`.
///   Older records with a plaintext `password` still load and keep that
///   shape until upgraded.
///
/// Serialised camelCase as part of the persisted collection root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord", into = "UserRecord")]
pub struct User {
    id: UserId,
    username: Username,
    password: StoredPassword,
}

/// Persisted account shape covering both hashed and legacy records.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: UserId,
    username: Username,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password_hash: Option<PasswordHash>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

impl TryFrom<UserRecord> for User {
    type Error = UserValidationError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let password = match (record.password_hash, record.password) {
            (Some(hash), _) => StoredPassword::Hashed(hash),
            (None, Some(plaintext)) if !plaintext.is_empty() => {
                StoredPassword::Legacy(Zeroizing::new(plaintext))
            }
            (None, _) => {
                return Err(UserValidationError::MissingPassword {
                    id: record.id.to_string(),
                });
            }
        };
        Ok(Self {
            id: record.id,
            username: record.username,
            password,
        })
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        let (password_hash, password) = match user.password {
            StoredPassword::Hashed(hash) => (Some(hash), None),
            StoredPassword::Legacy(plaintext) => (None, Some(plaintext.as_str().to_owned())),
        };
        Self {
            id: user.id,
            username: user.username,
            password_hash,
            password,
        }
    }
}

impl User {
    /// Build a user from validated components.
    #[must_use]
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password: StoredPassword::Hashed(password_hash),
        }
    }

    /// Replace the stored password material with `hash`.
    #[must_use]
    pub fn with_password_hash(mut self, hash: PasswordHash) -> Self {
        self.password = StoredPassword::Hashed(hash);
        self
    }

    /// Stable user identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login name.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password material.
    #[must_use]
    pub fn password(&self) -> &StoredPassword {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn user_id_rejects_blank(#[case] raw: &str) {
        assert_eq!(UserId::new(raw), Err(UserValidationError::EmptyId));
    }

    #[rstest]
    fn user_id_accepts_opaque_values() {
        let id = UserId::new(" u1 ").expect("non-blank id");
        assert_eq!(id.as_ref(), "u1");
    }

    #[rstest]
    #[case("Bob", "bob", true)]
    #[case("Bob", " BOB ", true)]
    #[case("Bob", "Bobby", false)]
    fn username_comparison_ignores_case(
        #[case] stored: &str,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let username = Username::new(stored).expect("valid username");
        assert_eq!(username.matches_ignoring_case(candidate), expected);
    }

    #[rstest]
    fn user_id_deserialisation_validates() {
        let result: Result<UserId, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }

    #[rstest]
    fn plaintext_record_loads_as_legacy_and_keeps_its_shape() {
        let raw = r#"{"id":"u1","username":"bob","password":"pw"}"#;

        let user: User = serde_json::from_str(raw).expect("legacy record loads");

        assert!(user.password().is_legacy());
        assert!(user.password().verify("pw"));
        let value = serde_json::to_value(&user).expect("serialise");
        assert_eq!(value["password"], "pw");
        assert!(value.get("passwordHash").is_none());
    }

    #[rstest]
    fn upgraded_record_drops_the_plaintext() {
        let raw = r#"{"id":"u1","username":"bob","password":"pw"}"#;
        let user: User = serde_json::from_str(raw).expect("legacy record loads");

        let upgraded = user.with_password_hash(PasswordHash::create("pw").expect("hash"));

        let value = serde_json::to_value(&upgraded).expect("serialise");
        assert!(value.get("password").is_none());
        assert!(value["passwordHash"].as_str().is_some_and(|hash| hash.starts_with("$argon2")));
    }

    #[rstest]
    #[case(r#"{"id":"u1","username":"bob"}"#)]
    #[case(r#"{"id":"u1","username":"bob","password":""}"#)]
    fn record_without_password_is_rejected(#[case] raw: &str) {
        let result: Result<User, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }
}
