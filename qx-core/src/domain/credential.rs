//! Session credential

use chrono::{DateTime, Utc};

/// A session credential obtained by exchanging the long-lived API token.
///
/// Replaced wholesale when the platform reports it expired; never partially
/// mutated. The access token is deliberately excluded from `Debug` output so
/// it cannot leak through logs or error chains.
#[derive(Clone)]
pub struct Credential {
    access_token: String,
    user_id: Option<String>,
    acquired_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential from a freshly issued access token
    pub fn new(access_token: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id,
            acquired_at: Utc::now(),
        }
    }

    /// The access token attached to authenticated requests
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The user id the platform associated with this session, if any
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// When this credential was acquired
    pub fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}
