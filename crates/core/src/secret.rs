//! Redacting wrapper for held secrets.
//!
//! Project tokens and storage keys travel through configuration, request
//! payloads, and error paths. [`SecretString`] keeps them out of `Debug`
//! output while still serializing to the real value for wire payloads.

use serde::{Deserialize, Serialize};

/// Placeholder printed in place of secret material.
pub const REDACTED: &str = "[REDACTED]";

/// A string that must never appear in logs.
///
/// `Debug` prints a fixed placeholder. There is no `Display` impl, so the
/// value cannot be formatted by accident; code that needs the raw secret
/// calls [`expose`](Self::expose).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for request headers and wire payloads only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretString({REDACTED})")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
