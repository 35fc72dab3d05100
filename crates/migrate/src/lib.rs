//! Project migration orchestrator.
//!
//! Migrates one data-platform project into another by driving a fixed
//! pipeline of remote component jobs: snapshot the source project, restore
//! the snapshot into the destination, then migrate the Snowflake writers,
//! GoodData writers, and orchestrations that depend on project-local state.
//!
//! - [`Migrate`] — the six-step pipeline, fail-fast, no retries.
//! - [`RestoreCredentials`] — the credential hand-off between the first
//!   three steps.
//! - [`MigrateError`] — user-actionable step failures vs collaborator
//!   faults.

pub mod credentials;
pub mod error;
pub mod migrate;

pub use credentials::{RestoreCredentials, StorageCredentials};
pub use error::MigrateError;
pub use migrate::Migrate;
