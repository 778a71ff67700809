//! Secure credential handling using the secrecy crate
//!
//! The Notion integration token is kept in a `Secret` so it is zeroed on drop
//! and redacted from `Debug` output (and therefore from `tracing` fields).
//!
//! # Example
//!
//! ```rust
//! use n2md::config::{SecretString, SecretValue};
//! use secrecy::{Secret, ExposeSecret};
//!
//! let token: SecretString = Secret::new(SecretValue::from("secret_abc".to_string()));
//! assert_eq!(token.expose_secret().as_ref(), "secret_abc");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("secret_abc"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl std::fmt::Display for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if the secret value starts with a prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
///
/// Requires an explicit `expose_secret()` to read the value.
pub type SecretString = Secret<SecretValue>;

/// Wraps a String into a SecretString
///
/// ```rust
/// use n2md::config::secret_string;
///
/// let token = secret_string("secret_abc".to_string());
/// ```
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
