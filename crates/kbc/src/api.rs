//! Raw HTTP layer for the platform's component-job endpoints.
//!
//! [`QueueApi`] issues the actual requests: sync action invocation, job
//! submission, job status reads. It owns the request envelopes; callers
//! hand over bare parameter payloads. Authentication is a project token
//! sent as the `X-StorageApi-Token` header on every request.

use std::time::Duration;

use takeout_core::SecretString;

use crate::job::Job;
use crate::params::Parameters;
use crate::runner::RunnerError;

/// Header carrying the project token.
const TOKEN_HEADER: &str = "X-StorageApi-Token";

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client for one project on the platform.
pub struct QueueApi {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl QueueApi {
    /// Create a new API client for one project.
    ///
    /// * `base_url` - platform base URL, e.g. `https://connection.keboola.com`.
    ///   A trailing slash is tolerated.
    /// * `token`    - project token sent with every request.
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Base URL this client talks to (normalized, no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Invoke a component's sync action and return the parsed response body.
    ///
    /// Sends a `POST /docker/{component_id}/action/{action}` request with
    /// the parameters under a top-level `parameters` key.
    pub async fn run_sync_action(
        &self,
        component_id: &str,
        action: &str,
        parameters: &Parameters,
    ) -> Result<serde_json::Value, RunnerError> {
        let response = self
            .client
            .post(self.action_url(component_id, action))
            .header(TOKEN_HEADER, self.token.expose())
            .json(&sync_action_body(parameters))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a job for a component and return the created job record.
    ///
    /// Sends a `POST /docker/{component_id}/run` request with the parameters
    /// wrapped in the platform's `configData` envelope.
    pub async fn create_job(
        &self,
        component_id: &str,
        parameters: &Parameters,
    ) -> Result<Job, RunnerError> {
        let response = self
            .client
            .post(self.run_url(component_id))
            .header(TOKEN_HEADER, self.token.expose())
            .json(&job_body(parameters))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current state of a job.
    ///
    /// Sends a `GET /queue/jobs/{id}` request.
    pub async fn get_job(&self, job_id: &str) -> Result<Job, RunnerError> {
        let response = self
            .client
            .get(self.job_url(job_id))
            .header(TOKEN_HEADER, self.token.expose())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- URL building ----

    fn action_url(&self, component_id: &str, action: &str) -> String {
        format!("{}/docker/{}/action/{}", self.base_url, component_id, action)
    }

    fn run_url(&self, component_id: &str) -> String {
        format!("{}/docker/{}/run", self.base_url, component_id)
    }

    fn job_url(&self, job_id: &str) -> String {
        format!("{}/queue/jobs/{}", self.base_url, job_id)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`RunnerError::Api`] containing the status
    /// and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RunnerError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RunnerError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RunnerError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(RunnerError::Decode)
    }
}

/// Request body for a sync action invocation.
fn sync_action_body(parameters: &Parameters) -> serde_json::Value {
    serde_json::json!({
        "parameters": parameters,
    })
}

/// Request body for a job submission (the `configData` envelope).
fn job_body(parameters: &Parameters) -> serde_json::Value {
    serde_json::json!({
        "configData": {
            "parameters": parameters,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api(base_url: &str) -> QueueApi {
        QueueApi::new(base_url, SecretString::new("token"))
    }

    // -- URL building --

    #[test]
    fn action_url_builds_the_docker_path() {
        let api = api("https://connection.keboola.com");
        assert_eq!(
            api.action_url("keboola.project-backup", "generate-read-credentials"),
            "https://connection.keboola.com/docker/keboola.project-backup/action/generate-read-credentials"
        );
    }

    #[test]
    fn run_url_builds_the_docker_path() {
        let api = api("https://connection.keboola.com");
        assert_eq!(
            api.run_url("keboola.project-restore"),
            "https://connection.keboola.com/docker/keboola.project-restore/run"
        );
    }

    #[test]
    fn job_url_builds_the_queue_path() {
        let api = api("https://connection.keboola.com");
        assert_eq!(api.job_url("8841"), "https://connection.keboola.com/queue/jobs/8841");
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let api = api("https://connection.keboola.com/");
        assert_eq!(api.base_url(), "https://connection.keboola.com");
        assert_eq!(
            api.run_url("keboola.project-backup"),
            "https://connection.keboola.com/docker/keboola.project-backup/run"
        );
    }

    // -- Request envelopes --

    #[test]
    fn sync_action_body_wraps_parameters() {
        let params = Parameters::new(json!({"backupId": null}));
        assert_eq!(
            sync_action_body(&params),
            json!({"parameters": {"backupId": null}})
        );
    }

    #[test]
    fn job_body_wraps_parameters_in_config_data() {
        let params = Parameters::new(json!({"backupId": "123"}));
        assert_eq!(
            job_body(&params),
            json!({"configData": {"parameters": {"backupId": "123"}}})
        );
    }
}
