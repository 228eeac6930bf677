use crate::config::logging_config::LoggingConfig;
use crate::config::mapping_config::MappingConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid system URI for '{name}': '{value}'")]
    InvalidSystemUri { name: String, value: String },
    #[error("Delimiter '{0}' must not be empty")]
    EmptyDelimiter(String),
    #[error("Organization unit for code '{code}' has a blank id")]
    InvalidOrganizationUnit { code: String },
    #[error("log_to_file is enabled but log_file_path is empty")]
    MissingLogFilePath,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub mapping: MappingConfig,
    /// Organization code (including any configured prefix) to organization unit id
    #[serde(default)]
    pub organization_units: BTreeMap<String, String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_system_uri("organization_system", &self.mapping.organization_system)?;
        validate_system_uri("identifier_system", &self.mapping.identifier_system)?;

        if self.mapping.given_delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter("given_delimiter".to_string()));
        }
        if self.mapping.line_delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter("line_delimiter".to_string()));
        }

        for (code, id) in &self.organization_units {
            if id.trim().is_empty() {
                return Err(ConfigError::InvalidOrganizationUnit { code: code.clone() });
            }
        }

        if self.logging.log_to_file && self.logging.log_file_path.trim().is_empty() {
            return Err(ConfigError::MissingLogFilePath);
        }
        Ok(())
    }
}

/// System URIs are compared verbatim, so surrounding whitespace is rejected too.
fn validate_system_uri(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() || value.trim() != value || !value.contains(':') {
        return Err(ConfigError::InvalidSystemUri {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}
