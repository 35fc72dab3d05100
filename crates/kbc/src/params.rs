//! Job parameter payloads.
//!
//! Parameters are free-form JSON objects. Keys prefixed with `#` carry
//! secret values by platform convention; [`Parameters`] masks those in its
//! `Debug` output so payloads can be logged without leaking credentials,
//! while serializing to the real values for the wire.

use serde::Serialize;
use takeout_core::secret::REDACTED;

/// Parameter payload for a sync action or job submission.
///
/// Normally built with `serde_json::json!` and handed to a
/// [`JobRunner`](crate::runner::JobRunner) method.
#[derive(Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Parameters(serde_json::Value);

impl Parameters {
    /// Wrap a JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The underlying JSON value, secrets included.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Parameters {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl std::fmt::Debug for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parameters({})", masked(&self.0))
    }
}

/// Copy of `value` with every value under a `#`-prefixed key replaced by
/// the redaction placeholder, recursively.
fn masked(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, val) in map {
                if key.starts_with('#') {
                    out.insert(key.clone(), serde_json::Value::String(REDACTED.into()));
                } else {
                    out.insert(key.clone(), masked(val));
                }
            }
            serde_json::Value::Object(out)
        }
        serde_json::Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(masked).collect())
        }
        other => other.clone(),
    }
}
