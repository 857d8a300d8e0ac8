use crate::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is empty")]
    EmptyBaseUrl,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Runtime configuration for the embedding application: a single `API_BASE_URL` parameter
/// selecting the metadata endpoint. The core itself only consumes an
/// [`crate::fetch::InstanceFetcher`]; this struct exists for applications that want to build
/// one from a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: String,
}

impl RuntimeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: RuntimeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl Validate<Result<()>> for RuntimeConfig {
    fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_toml() {
        let config = RuntimeConfig::from_toml_str("api_base_url = \"https://pacs.example/api\"")
            .unwrap();
        assert_eq!(config.api_base_url, "https://pacs.example/api");
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = RuntimeConfig::from_toml_str("api_base_url = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyBaseUrl));
    }
}
