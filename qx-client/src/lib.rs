//! QX HTTP Client
//!
//! A type-safe HTTP client for the QX platform web API: authentication, job
//! and experiment submission, result polling, and backend inspection.
//!
//! The client owns the session lifecycle. It exchanges the caller's API
//! token for a short-lived access credential on first use, attaches that
//! credential to every request, and transparently re-authenticates once when
//! the platform reports the credential expired.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use qx_client::{Experiment, QuantumExperienceClient, RunOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), qx_client::ClientError> {
//!     let client = QuantumExperienceClient::new("MY_API_TOKEN")?;
//!
//!     let experiment = Experiment::new("OPENQASM 2.0; ...", "simulator", 1024);
//!     match client.run_experiment(&experiment, Duration::from_secs(60)).await? {
//!         RunOutcome::Completed(result) => println!("measured: {:?}", result.measure),
//!         RunOutcome::Pending(handle) => println!("still running, resume with {}", handle),
//!     }
//!     Ok(())
//! }
//! ```

mod account;
mod backends;
mod codes;
pub mod error;
mod executions;
mod jobs;
pub mod poller;
mod session;

#[cfg(test)]
pub(crate) mod stub;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use executions::{Experiment, Fetched, RunOutcome, SubmittedExperiment};
pub use jobs::{JobOutcome, JobSubmission};
pub use poller::{PollMachine, PollOptions, PollState};
pub use qx_core::domain::{StatusMap, WorkStatus};
pub use qx_core::dto::execution::{ExecutionId, ExecutionResult};
pub use qx_core::dto::job::JobId;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use qx_core::domain::BackendResolver;

use crate::session::Session;

/// Production API endpoint of the QX platform
pub const DEFAULT_BASE_URL: &str = "https://quantumexperience.ng.bluemix.net/api";

/// Header naming the client application on every request
pub(crate) const CLIENT_APPLICATION_HEADER: &str = "x-qx-client-application";

/// Client configuration, fixed at construction
///
/// There is no process-wide default: every client instance carries its own
/// configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform API
    pub base_url: String,

    /// Verify TLS certificates (on by default)
    pub verify_tls: bool,

    /// Value of the client application header
    pub client_application: String,

    /// Fixed sleep between status polls
    pub poll_interval: Duration,

    /// Client-side ceiling on requested shots per submission
    pub max_shots: u32,

    /// Mapping of raw remote status strings onto the closed status set
    pub status_map: StatusMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            verify_tls: true,
            client_application: "qx-client-rs".to_string(),
            poll_interval: Duration::from_secs(2),
            max_shots: 8192,
            status_map: StatusMap::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for a non-default endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config(
                "poll_interval must be greater than 0".into(),
            ));
        }
        if self.max_shots == 0 {
            return Err(ClientError::Config("max_shots must be greater than 0".into()));
        }
        Ok(())
    }
}

/// HTTP client for the QX platform API
///
/// Methods are organized into endpoint groups:
/// - Experiments and executions (submit, poll, fetch results)
/// - Jobs (batched program submission)
/// - Backends (listing, queue status, calibration, parameters)
/// - Codes and account information
#[derive(Debug)]
pub struct QuantumExperienceClient {
    config: ClientConfig,
    http: Client,
    session: Session,
    resolver: BackendResolver,
}

impl QuantumExperienceClient {
    /// Create a client against the production endpoint
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_config(api_token, ClientConfig::default())
    }

    /// Create a client with explicit configuration
    pub fn with_config(api_token: impl Into<String>, mut config: ClientConfig) -> Result<Self> {
        config.validate()?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let mut builder = Client::builder().timeout(Duration::from_secs(30));
        if !config.verify_tls {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            session: Session::new(api_token.into()),
            resolver: BackendResolver::default(),
            config,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL of the platform API
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub(crate) fn resolver(&self) -> &BackendResolver {
        &self.resolver
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    // =============================================================================
    // Request plumbing
    // =============================================================================

    /// Authenticated GET returning decoded JSON
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let url = self.endpoint(path);
        self.authed_request(|token| {
            self.http
                .get(&url)
                .query(&[("access_token", token)])
                .query(query)
                .header(CLIENT_APPLICATION_HEADER, &self.config.client_application)
        })
        .await
    }

    /// Authenticated POST with a JSON body, returning decoded JSON
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        query: &[(String, String)],
        body: &B,
    ) -> Result<T> {
        let url = self.endpoint(path);
        self.authed_request(|token| {
            self.http
                .post(&url)
                .query(&[("access_token", token)])
                .query(query)
                .header(CLIENT_APPLICATION_HEADER, &self.config.client_application)
                .json(body)
        })
        .await
    }

    /// Unauthenticated GET (queue status is public)
    pub(crate) async fn public_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.endpoint(path))
            .header(CLIENT_APPLICATION_HEADER, &self.config.client_application)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Send an authenticated request, re-authenticating at most once.
    ///
    /// A 401 invalidates the held credential and repeats the request with a
    /// fresh one; a second 401 is surfaced as a fatal authentication error.
    async fn authed_request<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&str) -> reqwest::RequestBuilder,
    {
        let mut refreshed = false;
        loop {
            let credential = self.session.credential(&self.http, &self.config).await?;
            let response = build(credential.access_token()).send().await?;

            if response.status() == StatusCode::UNAUTHORIZED {
                if refreshed {
                    return Err(ClientError::Authentication(
                        "access rejected after re-authentication".into(),
                    ));
                }
                debug!("access credential rejected, re-authenticating once");
                self.session.invalidate().await;
                refreshed = true;
                continue;
            }

            return self.handle_response(response).await;
        }
    }

    /// Check the status code and decode the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown resource".to_string());
            return Err(ClientError::NotFound(message));
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("failed to decode JSON response: {}", e)))
    }

    // =============================================================================
    // Shared submission validation
    // =============================================================================

    pub(crate) fn validate_shots(&self, shots: u32) -> Result<()> {
        if shots == 0 {
            return Err(ClientError::Submission("shots must be at least 1".into()));
        }
        if shots > self.config.max_shots {
            return Err(ClientError::Submission(format!(
                "requested {} shots exceeds the limit of {}",
                shots, self.config.max_shots
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_seed(&self, seed: Option<u64>, backend: &str) -> Result<()> {
        let Some(seed) = seed else { return Ok(()) };
        if !self.resolver.is_simulator(backend) {
            return Err(ClientError::Submission(format!(
                "seed is only supported on simulator backends, not \"{}\"",
                backend
            )));
        }
        if seed.to_string().len() > 10 {
            return Err(ClientError::Submission(
                "seed may have at most 10 digits".into(),
            ));
        }
        Ok(())
    }
}
