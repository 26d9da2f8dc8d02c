use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub wait: WaitConfig,
}

/// Remote FFmpeg API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Service base URL (e.g., "https://api.example.com")
    pub base_url: String,
    /// Token sent in the X-API-Token header
    pub api_token: String,
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

/// Wait loop configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WaitConfig {
    /// Delay between status polls in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Overall wait budget in milliseconds
    #[serde(default = "default_wait_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_ms: default_wait_timeout_ms(),
        }
    }
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_wait_timeout_ms() -> u64 {
    300_000 // 5 minutes
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub api: SanitizedApiConfig,
    pub wait: WaitConfig,
}

/// Sanitized API config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedApiConfig {
    pub base_url: String,
    pub api_token_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            api: SanitizedApiConfig {
                base_url: config.api.base_url.clone(),
                api_token_configured: !config.api.api_token.is_empty(),
                timeout_secs: config.api.timeout_secs,
            },
            wait: config.wait.clone(),
        }
    }
}
