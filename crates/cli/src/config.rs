//! Runtime configuration of the `takeout` binary.
//!
//! Everything comes from environment variables (see the table on
//! [`MigrateConfig::from_env`]); `.env` files are loaded by the binary
//! before this runs.

use std::time::Duration;

use takeout_core::SecretString;
use takeout_kbc::PollConfig;

/// Errors loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{name} environment variable is required")]
    Missing {
        /// Name of the missing variable.
        name: &'static str,
    },

    /// An environment variable holds a value that does not parse.
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        /// Name of the offending variable.
        name: &'static str,
        /// What the variable must contain.
        expected: &'static str,
        /// The value found instead.
        value: String,
    },
}

/// Configuration of one migration run.
#[derive(Debug, Clone)]
pub struct MigrateConfig {
    /// Base URL of the source project's platform.
    pub source_url: String,
    /// Read-scoped token for the source project.
    pub source_token: SecretString,
    /// Base URL of the destination project's platform.
    pub dest_url: String,
    /// Admin token for the destination project.
    pub dest_token: SecretString,
    /// Polling schedule for submitted jobs.
    pub poll: PollConfig,
}

impl MigrateConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable                  | Required | Default | Description                                    |
    /// |---------------------------|----------|---------|------------------------------------------------|
    /// | `SOURCE_KBC_URL`          | yes      | --      | Base URL of the source project's platform      |
    /// | `SOURCE_KBC_TOKEN`        | yes      | --      | Read-scoped token for the source project       |
    /// | `DEST_KBC_URL`            | yes      | --      | Base URL of the destination project's platform |
    /// | `DEST_KBC_TOKEN`          | yes      | --      | Admin token for the destination project        |
    /// | `JOB_WAIT_TIMEOUT_SECS`   | no       | `7200`  | Max seconds to wait for one job to finish      |
    /// | `JOB_POLL_MAX_DELAY_SECS` | no       | `20`    | Cap on the delay between job status polls      |
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut poll = PollConfig::default();
        if let Some(secs) = optional_u64("JOB_WAIT_TIMEOUT_SECS")? {
            poll.wait_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = optional_u64("JOB_POLL_MAX_DELAY_SECS")? {
            poll.max_delay = Duration::from_secs(secs);
        }

        Ok(Self {
            source_url: required("SOURCE_KBC_URL")?,
            source_token: SecretString::new(required("SOURCE_KBC_TOKEN")?),
            dest_url: required("DEST_KBC_URL")?,
            dest_token: SecretString::new(required("DEST_KBC_TOKEN")?),
            poll,
        })
    }
}

/// Read a required environment variable.
fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing { name })
}

/// Read an optional `u64` environment variable.
fn optional_u64(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            name,
            expected: "a whole number of seconds",
            value,
        }),
        Err(_) => Ok(None),
    }
}
