//! The six-step migration pipeline.
//!
//! Strictly sequential, fail-fast: generate backup credentials on the
//! source project, snapshot it, restore the snapshot into the destination
//! project, then migrate the Snowflake writers, GoodData writers, and
//! orchestrations. The first non-success job stops the run; nothing is
//! retried and nothing already done is rolled back.

use std::sync::Arc;

use serde_json::json;

use takeout_core::SecretString;
use takeout_kbc::{JobRunner, Parameters};

use crate::credentials::RestoreCredentials;
use crate::error::MigrateError;

// ---------------------------------------------------------------------------
// Component ids
// ---------------------------------------------------------------------------

/// Component creating project snapshots and read credentials for them.
pub const PROJECT_BACKUP_COMPONENT: &str = "keboola.project-backup";
/// Component restoring a snapshot into the current project.
pub const PROJECT_RESTORE_COMPONENT: &str = "keboola.project-restore";
/// Component migrating orchestration definitions.
pub const ORCHESTRATOR_MIGRATE_COMPONENT: &str = "keboola.app-orchestrator-migrate";
/// Component migrating GoodData writer configurations.
pub const GOOD_DATA_WRITER_MIGRATE_COMPONENT: &str = "keboola.app-gooddata-writer-migrate";
/// Component migrating Snowflake writer configurations.
pub const SNOWFLAKE_WRITER_MIGRATE_COMPONENT: &str = "keboola.app-snowflake-writer-migrate";

/// Sync action producing a backup id plus read credentials for it.
const GENERATE_READ_CREDENTIALS_ACTION: &str = "generate-read-credentials";

// ---------------------------------------------------------------------------
// Step descriptors
// ---------------------------------------------------------------------------

/// Which of the two projects a step's job runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// The project being migrated away from.
    Source,
    /// The project being migrated into.
    Dest,
}

/// One asynchronous job of the pipeline.
struct JobStep {
    target: Target,
    component_id: &'static str,
    parameters: Parameters,
    running_msg: &'static str,
    done_msg: &'static str,
    error_prefix: &'static str,
}

// ---------------------------------------------------------------------------
// Migrate
// ---------------------------------------------------------------------------

/// The migration orchestrator.
///
/// Holds one [`JobRunner`] per project plus the two source-project facts
/// the writer and orchestration steps need. [`run`](Self::run) executes
/// the whole pipeline.
pub struct Migrate {
    source: Arc<dyn JobRunner>,
    dest: Arc<dyn JobRunner>,
    source_project_url: String,
    source_project_token: SecretString,
}

impl Migrate {
    /// Create an orchestrator for one source/destination project pair.
    pub fn new(
        source: Arc<dyn JobRunner>,
        dest: Arc<dyn JobRunner>,
        source_project_url: impl Into<String>,
        source_project_token: SecretString,
    ) -> Self {
        Self {
            source,
            dest,
            source_project_url: source_project_url.into(),
            source_project_token,
        }
    }

    /// Run the whole migration.
    ///
    /// Returns `Ok(())` only if every step finished with status `success`.
    /// The first failing step stops the run: a non-success job becomes a
    /// user-actionable [`MigrateError::Step`], while faults raised by the
    /// job-runner capability pass through unchanged. Already-completed
    /// steps are never rolled back.
    pub async fn run(&self) -> Result<(), MigrateError> {
        let credentials = self.generate_backup_credentials().await?;

        for step in self.job_steps(&credentials) {
            self.execute(step).await?;
        }

        Ok(())
    }

    /// Ask the source project's backup component for a backup id and read
    /// credentials for the snapshot it is about to create.
    async fn generate_backup_credentials(&self) -> Result<RestoreCredentials, MigrateError> {
        tracing::info!("Creating backup credentials");
        let response = self
            .source
            .run_sync_action(
                PROJECT_BACKUP_COMPONENT,
                GENERATE_READ_CREDENTIALS_ACTION,
                Parameters::new(json!({ "backupId": null })),
            )
            .await?;

        serde_json::from_value(response).map_err(MigrateError::InvalidCredentials)
    }

    /// The five jobs of the pipeline, in execution order.
    fn job_steps(&self, credentials: &RestoreCredentials) -> [JobStep; 5] {
        let migrate_params = json!({
            "sourceKbcUrl": self.source_project_url,
            "#sourceKbcToken": self.source_project_token,
        });

        [
            JobStep {
                target: Target::Source,
                component_id: PROJECT_BACKUP_COMPONENT,
                parameters: Parameters::new(json!({
                    "backupId": credentials.backup_id,
                })),
                running_msg: "Creating source project snapshot",
                done_msg: "Source project snapshot created",
                error_prefix: "Project snapshot create error",
            },
            JobStep {
                target: Target::Dest,
                component_id: PROJECT_RESTORE_COMPONENT,
                parameters: Parameters::new(json!({
                    "backupUri": credentials.backup_uri,
                    "accessKeyId": credentials.credentials.access_key_id,
                    "#secretAccessKey": credentials.credentials.secret_access_key,
                    "#sessionToken": credentials.credentials.session_token,
                    "useDefaultBackend": true,
                })),
                running_msg: "Restoring current project from snapshot",
                done_msg: "Current project restored",
                error_prefix: "Project restore error",
            },
            JobStep {
                target: Target::Dest,
                component_id: SNOWFLAKE_WRITER_MIGRATE_COMPONENT,
                parameters: Parameters::new(migrate_params.clone()),
                running_msg: "Migrating Snowflake writers",
                done_msg: "Snowflake writers migrated",
                error_prefix: "Snowflake writers migration error",
            },
            JobStep {
                target: Target::Dest,
                component_id: GOOD_DATA_WRITER_MIGRATE_COMPONENT,
                parameters: Parameters::new(migrate_params.clone()),
                running_msg: "Migrating GoodData writers",
                done_msg: "GoodData writers migrated",
                error_prefix: "GoodData writers migration error",
            },
            JobStep {
                target: Target::Dest,
                component_id: ORCHESTRATOR_MIGRATE_COMPONENT,
                parameters: Parameters::new(migrate_params),
                running_msg: "Migrating orchestrations",
                done_msg: "Orchestrations migrated",
                error_prefix: "Orchestrations migration error",
            },
        ]
    }

    /// Run one job step and interpret its terminal status.
    async fn execute(&self, step: JobStep) -> Result<(), MigrateError> {
        tracing::info!("{}", step.running_msg);

        let runner = match step.target {
            Target::Source => &self.source,
            Target::Dest => &self.dest,
        };
        let job = runner.run_job(step.component_id, step.parameters).await?;

        if !job.is_success() {
            return Err(MigrateError::Step {
                prefix: step.error_prefix,
                message: job.failure_message().to_string(),
            });
        }

        tracing::info!("{}", step.done_msg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use takeout_kbc::{Job, JobStatus, RunnerError};

    /// Runner that answers every call with success; only `job_steps` is
    /// under test here, the runner is never reached.
    struct NoopRunner;

    #[async_trait::async_trait]
    impl JobRunner for NoopRunner {
        async fn run_sync_action(
            &self,
            _component_id: &str,
            _action: &str,
            _parameters: Parameters,
        ) -> Result<serde_json::Value, RunnerError> {
            Ok(json!({}))
        }

        async fn run_job(
            &self,
            _component_id: &str,
            _parameters: Parameters,
        ) -> Result<Job, RunnerError> {
            Ok(Job {
                id: "0".into(),
                status: JobStatus::Success,
                result: None,
            })
        }
    }

    fn migrate() -> Migrate {
        Migrate::new(
            Arc::new(NoopRunner),
            Arc::new(NoopRunner),
            "https://connection.keboola.com",
            SecretString::new("xyz"),
        )
    }

    fn credentials() -> RestoreCredentials {
        serde_json::from_value(json!({
            "backupId": "123",
            "backupUri": "U",
            "credentials": {
                "accessKeyId": "A",
                "secretAccessKey": "B",
                "sessionToken": "C",
            },
        }))
        .unwrap()
    }

    #[test]
    fn steps_are_ordered_and_addressed() {
        let steps = migrate().job_steps(&credentials());
        let order: Vec<_> = steps.iter().map(|s| (s.target, s.component_id)).collect();
        assert_eq!(
            order,
            vec![
                (Target::Source, PROJECT_BACKUP_COMPONENT),
                (Target::Dest, PROJECT_RESTORE_COMPONENT),
                (Target::Dest, SNOWFLAKE_WRITER_MIGRATE_COMPONENT),
                (Target::Dest, GOOD_DATA_WRITER_MIGRATE_COMPONENT),
                (Target::Dest, ORCHESTRATOR_MIGRATE_COMPONENT),
            ]
        );
    }

    #[test]
    fn backup_step_carries_the_generated_backup_id() {
        let steps = migrate().job_steps(&credentials());
        assert_eq!(steps[0].parameters.as_value(), &json!({"backupId": "123"}));
    }

    #[test]
    fn restore_step_carries_the_credentials_verbatim() {
        let steps = migrate().job_steps(&credentials());
        assert_eq!(
            steps[1].parameters.as_value(),
            &json!({
                "backupUri": "U",
                "accessKeyId": "A",
                "#secretAccessKey": "B",
                "#sessionToken": "C",
                "useDefaultBackend": true,
            })
        );
    }

    #[test]
    fn migration_steps_share_the_source_project_facts() {
        let steps = migrate().job_steps(&credentials());
        let expected = json!({
            "sourceKbcUrl": "https://connection.keboola.com",
            "#sourceKbcToken": "xyz",
        });
        for step in &steps[2..] {
            assert_eq!(step.parameters.as_value(), &expected);
        }
    }

    #[test]
    fn step_wording_matches_the_operator_log_lines() {
        let steps = migrate().job_steps(&credentials());
        let wording: Vec<_> = steps
            .iter()
            .map(|s| (s.running_msg, s.done_msg, s.error_prefix))
            .collect();
        assert_eq!(
            wording,
            vec![
                (
                    "Creating source project snapshot",
                    "Source project snapshot created",
                    "Project snapshot create error",
                ),
                (
                    "Restoring current project from snapshot",
                    "Current project restored",
                    "Project restore error",
                ),
                (
                    "Migrating Snowflake writers",
                    "Snowflake writers migrated",
                    "Snowflake writers migration error",
                ),
                (
                    "Migrating GoodData writers",
                    "GoodData writers migrated",
                    "GoodData writers migration error",
                ),
                (
                    "Migrating orchestrations",
                    "Orchestrations migrated",
                    "Orchestrations migration error",
                ),
            ]
        );
    }
}
