//! Configuration module
//!
//! Handles CLI configuration including the API endpoint and credentials.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API token used to authenticate against the platform
    pub api_token: String,
    /// Base URL of the platform API
    pub api_url: String,
    /// Verify TLS certificates
    pub verify_tls: bool,
}
