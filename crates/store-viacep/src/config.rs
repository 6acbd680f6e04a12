//! # ViaCEP Configuration
//!
//! Configuration for the ViaCEP lookup client. ViaCEP is a public API
//! with no credentials; the config only carries the base URL (swappable
//! for tests) and the request timeout.

use std::env;
use std::time::Duration;
use store_core::StoreError;

/// Default public ViaCEP endpoint
pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// Default bounded timeout per lookup. A timed-out lookup is treated
/// the same as a failed one, so this stays short.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// ViaCEP client configuration
#[derive(Debug, Clone)]
pub struct ViaCepConfig {
    /// API base URL (overridable for testing/mocking)
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ViaCepConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `VIACEP_BASE_URL` (default: the public endpoint)
    /// - `VIACEP_TIMEOUT_SECS` (default: 5)
    pub fn from_env() -> Result<Self, StoreError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url =
            env::var("VIACEP_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match env::var("VIACEP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                StoreError::Configuration(format!(
                    "VIACEP_TIMEOUT_SECS must be an integer, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Builder: set a custom base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set a custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ViaCepConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
