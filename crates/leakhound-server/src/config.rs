//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, corpus database,
//! model endpoint, and triage tuning.

use leakhound_store::DEFAULT_HUNT_QUERY;
use leakhound_triage::TriageConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Invalid field value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    pub bind_port: u16,

    /// Corpus database settings
    pub database: DatabaseConfig,

    /// Classification model settings
    pub model: ModelConfig,

    /// Triage pipeline tuning
    #[serde(default)]
    pub triage: TriageConfig,
}

/// Corpus database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,

    /// Hunt query run against the staging table
    #[serde(default = "default_hunt_query")]
    pub hunt_query: String,
}

/// Classification model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Ollama API endpoint (e.g., "http://localhost:11434")
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,

    /// Model to use (e.g., "llama3")
    pub name: String,

    /// Retry attempts for a single generate request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_hunt_query() -> String {
    DEFAULT_HUNT_QUERY.to_string()
}

fn default_model_endpoint() -> String {
    leakhound_llm::ollama::DEFAULT_ENDPOINT.to_string()
}

fn default_max_retries() -> u32 {
    leakhound_llm::ollama::DEFAULT_MAX_RETRIES
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate required fields and the triage tuning
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.is_empty() {
            return Err(ConfigError::MissingField("database.path".to_string()));
        }
        if self.model.name.is_empty() {
            return Err(ConfigError::MissingField("model.name".to_string()));
        }
        self.triage.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            database: DatabaseConfig {
                path: ":memory:".to_string(),
                hunt_query: default_hunt_query(),
            },
            model: ModelConfig {
                endpoint: default_model_endpoint(),
                name: "llama3".to_string(),
                max_retries: default_max_retries(),
            },
            triage: TriageConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
