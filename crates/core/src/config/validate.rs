use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - API base URL is an http(s) URL
/// - API token is not empty
/// - Poll interval and wait timeout are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "api.base_url cannot be empty".to_string(),
        ));
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must start with http:// or https://, got {}",
            base_url
        )));
    }

    if config.api.api_token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "api.api_token cannot be empty".to_string(),
        ));
    }

    if config.wait.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "wait.poll_interval_ms cannot be 0".to_string(),
        ));
    }
    if config.wait.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "wait.timeout_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}
