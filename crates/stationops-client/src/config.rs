//! Client configuration.
//!
//! The remote endpoint address and the upload destination folder come from
//! deployment configuration. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;

/// Configuration for connecting to the remote action-dispatch endpoint.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// The single HTTP(S) endpoint all read queries and write commands go to.
    pub endpoint_url: Url,
    /// Destination-folder identifier included in attachment-bearing writes.
    pub upload_folder_id: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STATIONOPS_ENDPOINT_URL` (required)
    /// - `STATIONOPS_UPLOAD_FOLDER_ID` (default: empty)
    /// - `STATIONOPS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("STATIONOPS_ENDPOINT_URL")
            .map_err(|_| ConfigError::MissingEndpoint)?;
        let endpoint_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("STATIONOPS_ENDPOINT_URL".into(), e.to_string()))?;

        Ok(Self {
            endpoint_url,
            upload_folder_id: std::env::var("STATIONOPS_UPLOAD_FOLDER_ID").unwrap_or_default(),
            timeout_secs: std::env::var("STATIONOPS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `endpoint` cannot be parsed.
    pub fn local_mock(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint_url: Url::parse(endpoint)
                .map_err(|e| ConfigError::InvalidUrl("endpoint".into(), e.to_string()))?,
            upload_folder_id: "test-folder".into(),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("STATIONOPS_ENDPOINT_URL environment variable is required")]
    MissingEndpoint,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ClientConfig::local_mock("http://127.0.0.1:9000").unwrap();
        assert_eq!(cfg.endpoint_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.upload_folder_id, "test-folder");
        assert_eq!(cfg.timeout_secs, 5);
    }

    #[test]
    fn local_mock_rejects_invalid_url() {
        assert!(ClientConfig::local_mock("not a url").is_err());
    }
}
