use crate::alerts::source::{DEFAULT_USER_AGENT, NWS_ACTIVE_ALERTS_URL};
use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration against the public NWS endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub handler: HandlerConfig,
    pub output: OutputConfig,
}

/// `[api]` section: where and how alerts are requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Active alerts endpoint, without query string
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Overall request timeout; unset means no timeout
    pub request_timeout_seconds: Option<u64>,
}

/// `[handler]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Drop results of queries that were superseded by a newer trigger
    pub sequence_responses: bool,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How the display region is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: NWS_ACTIVE_ALERTS_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            sequence_responses: true,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read, a TOML
    /// error if it does not parse, and `ConfigError::ValidationError` if a
    /// value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::ValidationError(format!(
                "api.base_url '{}' is not a valid URL: {}",
                self.api.base_url, e
            ))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.query().is_some() {
            return Err(ConfigError::ValidationError(
                "api.base_url must not contain a query string".to_string(),
            ));
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.user_agent must not be empty".to_string(),
            ));
        }

        if self.api.request_timeout_seconds == Some(0) {
            return Err(ConfigError::ValidationError(
                "api.request_timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.weather.gov/alerts/active");
        assert!(config.api.user_agent.starts_with("wxalerts/"));
        assert_eq!(config.api.request_timeout_seconds, None);
        assert!(config.handler.sequence_responses);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = Config::from_toml_str(
            r#"
            [api]
            user_agent = "(example.com, ops@example.com)"
            request_timeout_seconds = 15

            [handler]
            sequence_responses = false

            [output]
            format = "html"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, NWS_ACTIVE_ALERTS_URL);
        assert_eq!(config.api.user_agent, "(example.com, ops@example.com)");
        assert_eq!(config.api.request_timeout_seconds, Some(15));
        assert!(!config.handler.sequence_responses);
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = Config::from_toml_str("[api\nbase_url = ");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            "[api]\nbase_url = \"not a url\"",
            "[api]\nbase_url = \"ftp://example.com/alerts\"",
            "[api]\nbase_url = \"https://example.com/alerts?area=CA\"",
            "[api]\nuser_agent = \"   \"",
            "[api]\nrequest_timeout_seconds = 0",
        ];

        for case in cases {
            let result = Config::from_toml_str(case);
            assert!(
                matches!(result, Err(ConfigError::ValidationError(_))),
                "expected validation error for {:?}, got {:?}",
                case,
                result
            );
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8080/alerts/active\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/alerts/active");
    }

    #[test]
    fn test_from_missing_file_is_read_error() {
        let result = Config::from_file(Path::new("/nonexistent/wxalerts.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
