//! Backend endpoints

use tracing::debug;

use qx_core::domain::EndpointKind;
use qx_core::dto::backend::{
    BackendCalibration, BackendInfo, BackendParameters, BackendQueueStatus, RawQueueStatus,
};

use crate::QuantumExperienceClient;
use crate::error::{ClientError, Result};

impl QuantumExperienceClient {
    // =============================================================================
    // Backends
    // =============================================================================

    /// List backends currently accepting work
    pub async fn available_backends(&self) -> Result<Vec<BackendInfo>> {
        let backends: Vec<BackendInfo> = self.get_json("/Backends", &[]).await?;
        Ok(backends.into_iter().filter(|b| b.is_on()).collect())
    }

    /// List simulators currently accepting work
    pub async fn available_simulators(&self) -> Result<Vec<BackendInfo>> {
        let backends = self.available_backends().await?;
        Ok(backends.into_iter().filter(|b| b.simulator).collect())
    }

    /// Queue status of a backend; does not require authentication
    pub async fn backend_status(&self, backend: &str) -> Result<BackendQueueStatus> {
        let name = self.resolve_backend(backend, EndpointKind::Status).await?;
        let raw: RawQueueStatus = self
            .public_get(&format!("/Backends/{}/queue/status", name))
            .await?;
        Ok(raw.into())
    }

    /// Calibration report of a physical backend.
    ///
    /// Simulators have no calibration; for them an empty report is returned
    /// without asking the platform.
    pub async fn backend_calibration(&self, backend: &str) -> Result<BackendCalibration> {
        let name = self
            .resolve_backend(backend, EndpointKind::Calibration)
            .await?;
        if self.resolver().is_simulator(&name) {
            return Ok(BackendCalibration::empty(name));
        }
        let mut calibration: BackendCalibration = self
            .get_json(&format!("/Backends/{}/calibration", name), &[])
            .await?;
        calibration.backend = name;
        Ok(calibration)
    }

    /// Device parameter report of a physical backend
    pub async fn backend_parameters(&self, backend: &str) -> Result<BackendParameters> {
        let name = self
            .resolve_backend(backend, EndpointKind::Calibration)
            .await?;
        if self.resolver().is_simulator(&name) {
            return Ok(BackendParameters::empty(name));
        }
        let mut parameters: BackendParameters = self
            .get_json(&format!("/Backends/{}/parameters", name), &[])
            .await?;
        parameters.backend = name;
        Ok(parameters)
    }

    /// Resolve a backend alias to its canonical name for an endpoint family.
    ///
    /// Legacy aliases resolve locally; anything else is checked against the
    /// live backend list. A name the platform does not know fails with
    /// [`ClientError::Submission`] before any submission happens.
    pub(crate) async fn resolve_backend(
        &self,
        alias: &str,
        endpoint: EndpointKind,
    ) -> Result<String> {
        if let Some(name) = self.resolver().resolve(alias, endpoint) {
            return Ok(name);
        }

        let backends = self.available_backends().await?;
        for backend in backends {
            if backend.name == alias {
                debug!(backend = alias, "resolved via live backend list");
                return Ok(if backend.simulator {
                    "chip_simulator".to_string()
                } else {
                    alias.to_string()
                });
            }
        }

        Err(ClientError::Submission(format!(
            "backend \"{}\" is not available on the platform",
            alias
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executions::Experiment;
    use crate::stub::{StubResponse, StubServer};
    use crate::{ClientConfig, QuantumExperienceClient};

    fn stub_client(server: &StubServer) -> QuantumExperienceClient {
        QuantumExperienceClient::with_config("token", ClientConfig::new(server.base_url())).unwrap()
    }

    fn login_ok() -> StubResponse {
        StubResponse::json(200, r#"{"id":"tok-1","userId":"user-1"}"#)
    }

    #[tokio::test]
    async fn test_unknown_backend_fails_before_any_submission() {
        let server = StubServer::start(vec![
            login_ok(),
            StubResponse::json(200, r#"[{"name":"ibmqx2","status":"on","simulator":false}]"#),
        ])
        .await;
        let client = stub_client(&server);

        let err = client
            .submit_experiment(&Experiment::new("qreg q[2];", "ibm_brisbane", 16))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission(_)));

        // The login is the only POST the platform ever saw
        for request in server.requests() {
            if request.method == "POST" {
                assert!(request.target.starts_with("/users/loginWithToken"));
            }
        }
    }

    #[tokio::test]
    async fn test_live_backend_list_resolves_current_names() {
        let server = StubServer::start(vec![
            login_ok(),
            StubResponse::json(
                200,
                r#"[{"name":"ibmqx4","status":"on","simulator":false}]"#,
            ),
        ])
        .await;
        let client = stub_client(&server);

        let name = client
            .resolve_backend("ibmqx4", EndpointKind::Job)
            .await
            .unwrap();
        assert_eq!(name, "ibmqx4");
    }
}
