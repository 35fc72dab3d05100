//! Credential hand-off between the backup and restore steps.
//!
//! The `generate-read-credentials` sync action returns a backup id plus a
//! time-scoped storage access grant. The backup step consumes the id, the
//! restore step consumes the uri and the three credential fields, and the
//! whole value is dropped when the run ends. Nothing is ever persisted.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use takeout_core::SecretString;

/// Response of the backup component's `generate-read-credentials` action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreCredentials {
    /// Server-assigned identifier of the backup about to be created.
    pub backup_id: String,
    /// Opaque storage location the snapshot will be written to.
    pub backup_uri: String,
    /// Storage region the snapshot lives in; informational.
    #[serde(default)]
    pub region: Option<String>,
    /// Time-scoped storage access grant for reading the snapshot.
    pub credentials: StorageCredentials,
}

/// The storage access grant inside [`RestoreCredentials`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCredentials {
    /// Access key id; not secret by itself.
    pub access_key_id: String,
    /// Secret key half of the grant.
    pub secret_access_key: SecretString,
    /// Session token bound to the grant.
    pub session_token: SecretString,
    /// When the grant stops working.
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
}
