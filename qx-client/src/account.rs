//! Account endpoints

use qx_core::dto::user::{AccountCredits, UserInfo};

use crate::QuantumExperienceClient;
use crate::error::Result;

impl QuantumExperienceClient {
    // =============================================================================
    // Account
    // =============================================================================

    /// Credit balance of the account
    pub async fn get_my_credits(&self) -> Result<AccountCredits> {
        let user_id = self.session().user_id(self.http(), self.config()).await?;
        let user: UserInfo = self.get_json(&format!("/users/{}", user_id), &[]).await?;
        Ok(user.credit.unwrap_or_default())
    }
}
