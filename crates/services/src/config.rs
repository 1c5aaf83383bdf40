//! Environment-driven configuration for the provider and the admin gate.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SENSEI_PIN: &str = "2005";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid provider base url {value:?}: {reason}")]
    BaseUrl { value: String, reason: String },
    #[error("invalid provider timeout {0:?}")]
    Timeout(String),
    #[error("sensei PIN must be exactly 4 digits")]
    Pin,
}

/// Where quiz questions come from and the academy-wide fallback key.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: String,
    pub shared_api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            shared_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Build a config pointing at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BaseUrl` unless `base_url` is an absolute http(s) URL.
    pub fn new(
        base_url: impl Into<String>,
        shared_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let parsed = Url::parse(&base_url).map_err(|err| ConfigError::BaseUrl {
            value: base_url.clone(),
            reason: err.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::BaseUrl {
                value: base_url,
                reason: "scheme must be http or https".into(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            shared_api_key: shared_api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `DOJO_AI_API_KEY`, `DOJO_AI_BASE_URL` and `DOJO_AI_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL or timeout is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("DOJO_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let shared_api_key = env::var("DOJO_AI_API_KEY").ok();
        let config = Self::new(base_url, shared_api_key)?;

        match env::var("DOJO_AI_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or(ConfigError::Timeout(raw))?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            Err(_) => Ok(config),
        }
    }
}

/// Static code guarding the admin portal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminConfig {
    pin: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            pin: DEFAULT_SENSEI_PIN.to_string(),
        }
    }
}

impl AdminConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Pin` unless `pin` is exactly four ASCII digits.
    pub fn new(pin: impl Into<String>) -> Result<Self, ConfigError> {
        let pin = pin.into();
        if pin.len() != 4 || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Pin);
        }
        Ok(Self { pin })
    }

    /// Read `DOJO_SENSEI_PIN`, falling back to the academy default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Pin` if the variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("DOJO_SENSEI_PIN") {
            Ok(pin) => Self::new(pin.trim()),
            Err(_) => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn pin(&self) -> &str {
        &self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_config_normalizes_inputs() {
        let config =
            ProviderConfig::new("http://localhost:8080/", Some("  key  ".into())).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.shared_api_key.as_deref(), Some("key"));

        let config = ProviderConfig::new(DEFAULT_BASE_URL, Some("   ".into())).unwrap();
        assert!(config.shared_api_key.is_none());
    }

    #[test]
    fn provider_config_rejects_bad_urls() {
        assert!(matches!(
            ProviderConfig::new("not a url", None),
            Err(ConfigError::BaseUrl { .. })
        ));
        assert!(matches!(
            ProviderConfig::new("ftp://example.com", None),
            Err(ConfigError::BaseUrl { .. })
        ));
    }

    #[test]
    fn admin_pin_must_be_four_digits() {
        assert_eq!(AdminConfig::default().pin(), "2005");
        assert!(AdminConfig::new("1234").is_ok());
        assert_eq!(AdminConfig::new("123"), Err(ConfigError::Pin));
        assert_eq!(AdminConfig::new("12a4"), Err(ConfigError::Pin));
        assert_eq!(AdminConfig::new("12345"), Err(ConfigError::Pin));
    }
}
