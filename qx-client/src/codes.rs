//! Code endpoints

use qx_core::dto::code::{Code, CodesPage};
use qx_core::dto::execution::Execution;

use crate::QuantumExperienceClient;
use crate::error::Result;

impl QuantumExperienceClient {
    // =============================================================================
    // Codes
    // =============================================================================

    /// Get a stored code by id, with its three most recent executions
    pub async fn get_code(&self, id: &str) -> Result<Code> {
        let mut code: Code = self.get_json(&format!("/Codes/{}", id), &[]).await?;
        let executions: Vec<Execution> = self
            .get_json(
                &format!("/Codes/{}/executions", id),
                &[("filter".to_string(), "{\"limit\":3}".to_string())],
            )
            .await?;
        code.executions = executions;
        Ok(code)
    }

    /// Get the most recent codes of the account
    pub async fn get_last_codes(&self) -> Result<Vec<Code>> {
        let user_id = self.session().user_id(self.http(), self.config()).await?;
        let page: CodesPage = self
            .get_json(
                &format!("/users/{}/codes/lastest", user_id),
                &[("includeExecutions".to_string(), "true".to_string())],
            )
            .await?;
        Ok(page.codes)
    }
}
