//! The job-runner capability and its HTTP implementation.
//!
//! [`JobRunner`] is the narrow seam consumers program against: invoke a
//! sync action, or run a job to completion. [`QueueClient`] implements it
//! over [`QueueApi`], polling submitted jobs until a terminal status with
//! the backoff schedule from [`PollConfig`].

use async_trait::async_trait;
use tokio::time::Instant;

use takeout_core::SecretString;

use crate::api::QueueApi;
use crate::job::Job;
use crate::params::Parameters;
use crate::poll::{next_delay, PollConfig};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors raised by the job-runner capability.
///
/// All of these mean the remote platform (or the path to it) misbehaved,
/// as opposed to a job finishing with a non-success status, which the
/// caller reads off the returned [`Job`].
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response body did not decode into the expected shape.
    #[error("Undecodable API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The job did not reach a terminal status within the configured wait.
    #[error("Job {job_id} still not finished after {waited_secs}s, giving up")]
    WaitTimeout {
        /// The job being waited on.
        job_id: String,
        /// Total seconds waited before giving up.
        waited_secs: u64,
    },
}

// ---------------------------------------------------------------------------
// JobRunner
// ---------------------------------------------------------------------------

/// Capability to execute remote component work on one project.
///
/// Implemented by [`QueueClient`] for the real platform and by scripted
/// doubles in tests. One instance is bound to one project.
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Invoke a component's sync action and return the parsed response body.
    async fn run_sync_action(
        &self,
        component_id: &str,
        action: &str,
        parameters: Parameters,
    ) -> Result<serde_json::Value, RunnerError>;

    /// Submit a component job and wait until it reaches a terminal status.
    ///
    /// The returned [`Job`] is always terminal; callers decide what a
    /// non-`success` status means for them.
    async fn run_job(
        &self,
        component_id: &str,
        parameters: Parameters,
    ) -> Result<Job, RunnerError>;
}

// ---------------------------------------------------------------------------
// QueueClient
// ---------------------------------------------------------------------------

/// [`JobRunner`] over the platform's HTTP API.
pub struct QueueClient {
    api: QueueApi,
    poll: PollConfig,
}

impl QueueClient {
    /// Create a client for one project with the default polling schedule.
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self::with_poll_config(base_url, token, PollConfig::default())
    }

    /// Create a client with a custom polling schedule.
    pub fn with_poll_config(
        base_url: impl Into<String>,
        token: SecretString,
        poll: PollConfig,
    ) -> Self {
        Self {
            api: QueueApi::new(base_url, token),
            poll,
        }
    }

    /// Poll a submitted job until it reaches a terminal status.
    ///
    /// Gives up with [`RunnerError::WaitTimeout`] once the total wait
    /// exceeds [`PollConfig::wait_timeout`].
    async fn wait_for_job(&self, submitted: Job) -> Result<Job, RunnerError> {
        let started = Instant::now();
        let mut delay = self.poll.initial_delay;
        let mut job = submitted;

        while !job.status.is_terminal() {
            if started.elapsed() >= self.poll.wait_timeout {
                return Err(RunnerError::WaitTimeout {
                    job_id: job.id,
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            tokio::time::sleep(delay).await;
            delay = next_delay(delay, &self.poll);

            job = self.api.get_job(&job.id).await?;
            tracing::debug!(job_id = %job.id, status = ?job.status, "Polled job");
        }

        Ok(job)
    }
}

#[async_trait]
impl JobRunner for QueueClient {
    async fn run_sync_action(
        &self,
        component_id: &str,
        action: &str,
        parameters: Parameters,
    ) -> Result<serde_json::Value, RunnerError> {
        tracing::debug!(component_id, action, parameters = ?parameters, "Running sync action");
        self.api
            .run_sync_action(component_id, action, &parameters)
            .await
    }

    async fn run_job(
        &self,
        component_id: &str,
        parameters: Parameters,
    ) -> Result<Job, RunnerError> {
        tracing::debug!(component_id, parameters = ?parameters, "Submitting job");
        let submitted = self.api.create_job(component_id, &parameters).await?;
        tracing::info!(job_id = %submitted.id, component_id, "Job submitted");

        let finished = self.wait_for_job(submitted).await?;
        tracing::info!(job_id = %finished.id, status = ?finished.status, "Job finished");
        Ok(finished)
    }
}
