//! Wire types for the platform's job API.
//!
//! A submitted job is identified by `id` and moves through a lifecycle of
//! statuses until it reaches a terminal one. Failed jobs carry a
//! human-readable message under `result.message`.

use serde::{Deserialize, Deserializer};

/// Lifecycle status of a remote job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Queued, not yet picked up by a worker.
    Waiting,
    /// Currently executing.
    Processing,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Error,
    /// Cancelled before it could finish.
    Cancelled,
    /// Killed by the platform.
    Terminated,
    /// A status this client does not know.
    Other,
}

impl JobStatus {
    /// Map a wire status string to a status.
    ///
    /// Unknown strings map to [`JobStatus::Other`], which is non-terminal,
    /// so new platform states keep the poll loop waiting instead of being
    /// misread as an outcome.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "waiting" => JobStatus::Waiting,
            "processing" => JobStatus::Processing,
            "success" => JobStatus::Success,
            "error" => JobStatus::Error,
            "cancelled" => JobStatus::Cancelled,
            "terminated" => JobStatus::Terminated,
            _ => JobStatus::Other,
        }
    }

    /// Whether the job has stopped moving (no further polling useful).
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Success | JobStatus::Error | JobStatus::Cancelled | JobStatus::Terminated
        )
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(JobStatus::from_wire(&name))
    }
}

/// Result block of a finished job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResult {
    /// Human-readable outcome message; set on failures, often absent on
    /// success.
    #[serde(default)]
    pub message: Option<String>,
}

/// A job record as returned by the submission and status endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Platform-assigned job identifier.
    pub id: String,
    /// Current lifecycle status.
    pub status: JobStatus,
    /// Result block; present once the job has finished.
    #[serde(default)]
    pub result: Option<JobResult>,
}

impl Job {
    /// Whether the job finished with status `success`.
    pub fn is_success(&self) -> bool {
        self.status == JobStatus::Success
    }

    /// Failure message of a finished job.
    ///
    /// Degrades to `""` when the platform supplied no message, so callers
    /// can always concatenate it into an operator-facing error.
    pub fn failure_message(&self) -> &str {
        self.result
            .as_ref()
            .and_then(|r| r.message.as_deref())
            .unwrap_or("")
    }
}
