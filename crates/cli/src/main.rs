//! `takeout` -- one-shot project migration.
//!
//! Snapshots a source data-platform project and rebuilds it inside a
//! destination project: storage restore first, then the Snowflake writers,
//! GoodData writers, and orchestrations that depend on project-local state.
//!
//! # Environment variables
//!
//! | Variable                  | Required | Default | Description                                    |
//! |---------------------------|----------|---------|------------------------------------------------|
//! | `SOURCE_KBC_URL`          | yes      | --      | Base URL of the source project's platform      |
//! | `SOURCE_KBC_TOKEN`        | yes      | --      | Read-scoped token for the source project       |
//! | `DEST_KBC_URL`            | yes      | --      | Base URL of the destination project's platform |
//! | `DEST_KBC_TOKEN`          | yes      | --      | Admin token for the destination project        |
//! | `JOB_WAIT_TIMEOUT_SECS`   | no       | `7200`  | Max seconds to wait for one job to finish      |
//! | `JOB_POLL_MAX_DELAY_SECS` | no       | `20`    | Cap on the delay between job status polls      |
//! | `LOG_FORMAT`              | no       | plain   | `json` switches to JSON log output             |
//!
//! Exit codes: `0` on success, `1` for user-actionable failures (bad
//! configuration, a failed migration step), `2` for internal faults.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use takeout_cli::config::MigrateConfig;
use takeout_kbc::QueueClient;
use takeout_migrate::Migrate;

/// Exit code for user-actionable failures.
const EXIT_USER_ERROR: i32 = 1;
/// Exit code for internal and collaborator faults.
const EXIT_INTERNAL_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = MigrateConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(EXIT_USER_ERROR);
    });

    let source = QueueClient::with_poll_config(
        config.source_url.clone(),
        config.source_token.clone(),
        config.poll.clone(),
    );
    let dest = QueueClient::with_poll_config(config.dest_url, config.dest_token, config.poll);

    let migrate = Migrate::new(
        Arc::new(source),
        Arc::new(dest),
        config.source_url,
        config.source_token,
    );

    tracing::info!("Starting project migration");
    match migrate.run().await {
        Ok(()) => tracing::info!("Project migration finished"),
        Err(e) if e.is_user_error() => {
            tracing::error!(error = %e, "Project migration failed");
            std::process::exit(EXIT_USER_ERROR);
        }
        Err(e) => {
            tracing::error!(error = ?e, "Project migration failed");
            std::process::exit(EXIT_INTERNAL_ERROR);
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter; `LOG_FORMAT=json` switches the
/// fmt layer to JSON output for machine-readable operator logs.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "takeout_cli=info,takeout_kbc=info,takeout_migrate=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    if matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
