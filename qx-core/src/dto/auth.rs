//! Login endpoint payloads

use serde::{Deserialize, Serialize};

/// Body for `POST /users/loginWithToken`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "apiToken")]
    pub api_token: String,
}

/// Response of a successful login.
///
/// The platform calls the access token `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Access token for subsequent requests
    pub id: String,

    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,

    /// Token lifetime in seconds
    #[serde(default)]
    pub ttl: Option<i64>,

    #[serde(default)]
    pub created: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_field_name() {
        let req = LoginRequest {
            api_token: "secret".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["apiToken"], "secret");
    }

    #[test]
    fn test_login_response_tolerates_extras() {
        let json = serde_json::json!({
            "id": "access-123",
            "userId": "user-9",
            "ttl": 1209600,
            "created": "2017-05-01T00:00:00.000Z",
            "somethingNew": true
        });
        let resp: LoginResponse = serde_json::from_value(json).unwrap();
        assert_eq!(resp.id, "access-123");
        assert_eq!(resp.user_id.as_deref(), Some("user-9"));
        assert_eq!(resp.ttl, Some(1209600));
    }
}
