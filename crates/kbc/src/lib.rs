//! Client for the data platform's component-job API.
//!
//! This crate provides everything needed to execute remote component work
//! on one project:
//!
//! - [`JobRunner`] — the capability trait consumers program against: invoke
//!   a sync action, or run a job to completion.
//! - [`QueueClient`] — the HTTP implementation of [`JobRunner`], polling
//!   submitted jobs until a terminal status.
//! - [`QueueApi`] — the raw endpoint layer (sync actions, job submission,
//!   job status reads).
//! - [`Parameters`] — payload newtype whose `Debug` masks secret-bearing
//!   `#`-prefixed keys.

pub mod api;
pub mod job;
pub mod params;
pub mod poll;
pub mod runner;

pub use api::QueueApi;
pub use job::{Job, JobResult, JobStatus};
pub use params::Parameters;
pub use poll::PollConfig;
pub use runner::{JobRunner, QueueClient, RunnerError};
