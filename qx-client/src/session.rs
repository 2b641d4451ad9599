//! Session management
//!
//! Owns the access credential and its refresh lifecycle. The credential is
//! acquired lazily on the first authenticated request and replaced wholesale
//! when the platform reports it expired. Refresh is guarded by a mutex so
//! concurrent callers cannot race each other into duplicate logins.
//!
//! The API token and the access token never appear in log output or error
//! messages.

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::debug;

use qx_core::domain::Credential;
use qx_core::dto::auth::{LoginRequest, LoginResponse};

use crate::error::{ClientError, Result};
use crate::{CLIENT_APPLICATION_HEADER, ClientConfig};

#[derive(Debug)]
pub(crate) struct Session {
    api_token: String,
    credential: Mutex<Option<Credential>>,
}

impl Session {
    pub fn new(api_token: String) -> Self {
        Self {
            api_token,
            credential: Mutex::new(None),
        }
    }

    /// Return the held credential, acquiring one if none is held.
    pub async fn credential(&self, http: &Client, config: &ClientConfig) -> Result<Credential> {
        let mut guard = self.credential.lock().await;
        if let Some(credential) = guard.as_ref() {
            return Ok(credential.clone());
        }
        let credential = self.login(http, config).await?;
        *guard = Some(credential.clone());
        Ok(credential)
    }

    /// Drop the held credential; the next request acquires a fresh one.
    pub async fn invalidate(&self) {
        *self.credential.lock().await = None;
    }

    /// User id the platform bound to the session
    pub async fn user_id(&self, http: &Client, config: &ClientConfig) -> Result<String> {
        let credential = self.credential(http, config).await?;
        credential
            .user_id()
            .map(str::to_string)
            .ok_or_else(|| ClientError::Authentication("session has no associated user id".into()))
    }

    /// Exchange the API token for an access credential
    async fn login(&self, http: &Client, config: &ClientConfig) -> Result<Credential> {
        if self.api_token.is_empty() {
            return Err(ClientError::Authentication("no API token configured".into()));
        }

        debug!("exchanging API token for a session credential");
        let response = http
            .post(format!("{}/users/loginWithToken", config.base_url))
            .header(CLIENT_APPLICATION_HEADER, &config.client_application)
            .json(&LoginRequest {
                api_token: self.api_token.clone(),
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            // The body may quote the submitted token; do not echo it.
            return Err(ClientError::Authentication(
                "API token rejected by the platform".into(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("failed to decode login response: {}", e)))?;

        debug!(user_id = ?login.user_id, ttl = ?login.ttl, "session credential acquired");
        Ok(Credential::new(login.id, login.user_id))
    }
}
