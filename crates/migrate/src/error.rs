//! Error taxonomy of a migration run.
//!
//! Step failures are user-actionable: the remote job finished with a
//! non-success status and its message tells the operator what to fix.
//! Everything raised by the job-runner capability itself is a collaborator
//! fault and passes through unchanged.

use takeout_kbc::RunnerError;

/// Error returned by [`Migrate::run`](crate::migrate::Migrate::run).
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// A migration step's job finished with a non-success status.
    #[error("{prefix}: {message}")]
    Step {
        /// Step-specific prefix, e.g. `Project restore error`.
        prefix: &'static str,
        /// Message supplied by the failed job, possibly empty.
        message: String,
    },

    /// The job-runner collaborator itself failed.
    #[error(transparent)]
    Runner(#[from] RunnerError),

    /// The `generate-read-credentials` action answered with a body that
    /// does not decode into restore credentials.
    #[error("Unexpected generate-read-credentials response: {0}")]
    InvalidCredentials(#[source] serde_json::Error),
}

impl MigrateError {
    /// Whether the error is user-actionable, as opposed to an internal or
    /// collaborator fault the operator cannot fix from the outside.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MigrateError::Step { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_concatenates_prefix_and_message() {
        let err = MigrateError::Step {
            prefix: "Project snapshot create error",
            message: "Cannot snapshot project".into(),
        };
        assert_eq!(
            err.to_string(),
            "Project snapshot create error: Cannot snapshot project"
        );
    }

    #[test]
    fn step_failure_with_empty_message_keeps_the_prefix() {
        let err = MigrateError::Step {
            prefix: "Project restore error",
            message: String::new(),
        };
        assert_eq!(err.to_string(), "Project restore error: ");
    }

    #[test]
    fn runner_fault_displays_unchanged() {
        let err = MigrateError::Runner(RunnerError::Api {
            status: 503,
            body: "Service Unavailable".into(),
        });
        assert_eq!(err.to_string(), "API error (503): Service Unavailable");
    }

    #[test]
    fn only_step_failures_are_user_errors() {
        let step = MigrateError::Step {
            prefix: "Orchestrations migration error",
            message: "boom".into(),
        };
        assert!(step.is_user_error());

        let runner = MigrateError::Runner(RunnerError::Api {
            status: 500,
            body: String::new(),
        });
        assert!(!runner.is_user_error());

        let decode =
            serde_json::from_value::<crate::credentials::RestoreCredentials>(serde_json::json!({}))
                .unwrap_err();
        assert!(!MigrateError::InvalidCredentials(decode).is_user_error());
    }
}
