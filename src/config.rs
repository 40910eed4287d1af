use crate::constants::{DEFAULT_ENDPOINT_URL, ENDPOINT_URL_VAR};
use crate::errors::{ParleyError, ParleyResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Client configuration. The endpoint URL is injected into the backend at
/// construction time rather than read from a global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    pub endpoint_url: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn new(endpoint_url: impl Into<String>) -> ParleyResult<Self> {
        let config = Self {
            endpoint_url: endpoint_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads `PARLEY_ENDPOINT_URL` (dotenv is loaded by the binary before
    /// this runs), falling back to the default local backend.
    pub fn from_env() -> ParleyResult<Self> {
        let endpoint_url =
            env::var(ENDPOINT_URL_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT_URL.to_string());
        Self::new(endpoint_url)
    }

    fn validate(&self) -> ParleyResult<()> {
        if self.endpoint_url.is_empty() {
            return Err(ParleyError::config_error("endpoint URL is required"));
        }

        let url = reqwest::Url::parse(&self.endpoint_url)
            .map_err(|e| ParleyError::config_error(format!("invalid endpoint URL: {}", e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ParleyError::config_error(format!(
                "unsupported endpoint scheme: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(ChatConfig::new("").is_err());
    }

    #[test]
    fn test_unparseable_endpoint_rejected() {
        assert!(ChatConfig::new("not a url").is_err());
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(ChatConfig::new("ftp://localhost/chat").is_err());
    }

    #[test]
    fn test_https_endpoint_accepted() {
        let config = ChatConfig::new("https://chat.example.com/chat").unwrap();
        assert_eq!(config.endpoint_url, "https://chat.example.com/chat");
    }
}
