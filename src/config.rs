//! Client configuration.
//!
//! The base request target is read once at startup and injected into the
//! HTTP adapter. Nothing else reads the environment per call.

use reqwest::Url;

use crate::MediblockError;

/// Environment variable holding the service base address.
pub const API_URL_ENV: &str = "MEDIBLOCK_API_URL";

/// Base address used when `MEDIBLOCK_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Read-only client configuration shared by all panels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Build a configuration from an explicit base address.
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended directly.
    ///
    /// # Errors
    /// Returns `MediblockError::Config` if the address is not an http(s) URL.
    pub fn new(base_url: impl AsRef<str>) -> crate::Result<Self> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed)
            .map_err(|e| MediblockError::Config(format!("{API_URL_ENV}={trimmed:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MediblockError::Config(format!(
                "{API_URL_ENV} must use http or https, got {:?}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Resolve the configuration from the environment, falling back to
    /// [`DEFAULT_API_URL`] when the variable is unset or blank.
    ///
    /// # Errors
    /// Returns error if the configured address is invalid.
    pub fn from_env() -> crate::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> crate::Result<Self> {
        let raw = lookup(API_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(raw)
    }

    /// Base address without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an endpoint path onto the base address.
    ///
    /// The path is appended verbatim; callers are responsible for any escaping.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
