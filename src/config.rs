use crate::error::{CrateError, Result};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("bactery-catalog/", env!("CARGO_PKG_VERSION"));

/// Settings for talking to the catalog backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(api_url.trim())
            .map_err(|e| CrateError::ConfigError(format!("invalid API URL '{}': {}", api_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(CrateError::ConfigError(format!(
                "API URL must use http or https, got '{}'",
                base_url.scheme()
            )));
        }
        if timeout_secs == 0 {
            return Err(CrateError::ConfigError(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(ClientConfig {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: USER_AGENT.to_string(),
        })
    }

    /// Absolute URL of an API path such as `/taxa/get`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
