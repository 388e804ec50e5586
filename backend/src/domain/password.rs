//! Salted password hashes stored in place of plaintext credentials.
//!
//! Data files written before hashing was introduced hold plaintext passwords.
//! Those load as [`StoredPassword::Legacy`] and are replaced by a hash on the
//! owner's next successful login.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{self, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroizing;

const SALT_LEN: usize = 16;

/// Errors raised while hashing or parsing password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hasher rejected the input or salt.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// A stored value is not a PHC hash string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Argon2id PHC string, e.g. `$argon2id$v=19$m=19456,t=2,p=1$...`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a fresh random salt.
    pub fn create(password: &str) -> Result<Self, PasswordHashError> {
        let mut salt_bytes = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|err| PasswordHashError::Hash {
            message: err.to_string(),
        })?;
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Check `password` against the stored hash.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        match password_hash::PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(error) => {
                warn!(%error, "stored password hash could not be parsed");
                false
            }
        }
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        value.0
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = PasswordHashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        password_hash::PasswordHash::new(&value).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(value))
    }
}

/// Password material persisted for an account.
#[derive(Clone, PartialEq, Eq)]
pub enum StoredPassword {
    /// Argon2 hash written by this service.
    Hashed(PasswordHash),
    /// Plaintext inherited from an older data file.
    Legacy(Zeroizing<String>),
}

impl StoredPassword {
    /// Check `password` against the stored material.
    ///
    /// Argon2 verification is CPU bound; async callers should run it on a
    /// blocking thread.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        match self {
            Self::Hashed(hash) => hash.verify(password),
            Self::Legacy(plaintext) => plaintext.as_str() == password,
        }
    }

    /// Whether the material is plaintext awaiting an upgrade.
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// The hash, when one is stored.
    #[must_use]
    pub fn hash(&self) -> Option<&PasswordHash> {
        match self {
            Self::Hashed(hash) => Some(hash),
            Self::Legacy(_) => None,
        }
    }
}

impl fmt::Debug for StoredPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hashed(hash) => f.debug_tuple("Hashed").field(hash).finish(),
            Self::Legacy(_) => f.write_str("Legacy(<redacted>)"),
        }
    }
}

impl From<PasswordHash> for StoredPassword {
    fn from(value: PasswordHash) -> Self {
        Self::Hashed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn verify_accepts_original_password_only() {
        let hash = PasswordHash::create("hunter2").expect("hashing succeeds");
        assert!(hash.verify("hunter2"));
        assert!(!hash.verify("Hunter2"));
        assert!(!hash.verify(""));
    }

    #[rstest]
    fn hashes_are_salted() {
        let first = PasswordHash::create("same").expect("hash");
        let second = PasswordHash::create("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn plaintext_is_rejected_on_deserialise() {
        let result: Result<PasswordHash, _> = serde_json::from_str("\"password\"");
        assert!(result.is_err());
    }

    #[rstest]
    fn debug_output_redacts_hash() {
        let hash = PasswordHash::create("secret").expect("hash");
        assert_eq!(format!("{hash:?}"), "PasswordHash(<redacted>)");
    }

    #[rstest]
    #[case("pw", true)]
    #[case("PW", false)]
    #[case("", false)]
    fn legacy_plaintext_verifies_by_exact_match(#[case] attempt: &str, #[case] expected: bool) {
        let stored = StoredPassword::Legacy(Zeroizing::new("pw".to_owned()));
        assert_eq!(stored.verify(attempt), expected);
        assert!(stored.is_legacy());
        assert!(stored.hash().is_none());
    }

    #[rstest]
    fn legacy_debug_output_redacts_plaintext() {
        let stored = StoredPassword::Legacy(Zeroizing::new("pw".to_owned()));
        assert_eq!(format!("{stored:?}"), "Legacy(<redacted>)");
    }
}
