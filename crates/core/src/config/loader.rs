use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "FFAPI_";

/// Load configuration from file with environment variable overrides
///
/// Nested keys are separated by a double underscore, e.g.
/// `FFAPI_API__API_TOKEN` overrides `api.api_token`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[api]
base_url = "http://localhost:8000"
api_token = "token"

[wait]
poll_interval_ms = 500
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.wait.poll_interval_ms, 500);
    }

    #[test]
    fn test_load_config_from_str_missing_token() {
        let toml = r#"
[api]
base_url = "http://localhost:8000"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/ffapi.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[api]
base_url = "https://ffmpeg.example.com/"
api_token = "file-token"
timeout_secs = 15
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://ffmpeg.example.com/");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.wait.timeout_ms, 300_000);
    }

    #[test]
    fn test_load_config_env_override() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "ffapi.toml",
                r#"
[api]
base_url = "https://ffmpeg.example.com"
api_token = "file-token"
"#,
            )?;
            jail.set_env("FFAPI_API__API_TOKEN", "env-token");
            jail.set_env("FFAPI_WAIT__POLL_INTERVAL_MS", "250");

            let config = load_config(Path::new("ffapi.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.api.api_token, "env-token");
            assert_eq!(config.wait.poll_interval_ms, 250);
            Ok(())
        });
    }
}
