//! Account payloads

use serde::{Deserialize, Serialize};

/// User record from `GET /users/{user_id}`; only the parts the client needs
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub credit: Option<AccountCredits>,
}

/// Credit balance of the account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountCredits {
    #[serde(default)]
    pub remaining: Option<i64>,

    #[serde(default, rename = "maxUserType")]
    pub max_user_type: Option<i64>,

    #[serde(default)]
    pub promotional: Option<i64>,
}
