//! Configuration for the triage pipeline

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the triage pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Characters of context kept on each side of a match
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Maximum time for a single classification call (seconds)
    #[serde(default = "default_classify_timeout_secs")]
    pub classify_timeout_secs: u64,

    /// Maximum candidates classified concurrently (1 = sequential)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Optional run deadline (seconds); when it passes mid-run, no new
    /// classification calls are issued but accumulated findings are still
    /// persisted
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

fn default_context_window() -> usize {
    crate::context::DEFAULT_CONTEXT_WINDOW
}

fn default_classify_timeout_secs() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            classify_timeout_secs: default_classify_timeout_secs(),
            max_concurrency: default_max_concurrency(),
            deadline_secs: None,
        }
    }
}

impl TriageConfig {
    /// Get the classification timeout as a Duration
    pub fn classify_timeout(&self) -> Duration {
        Duration::from_secs(self.classify_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.classify_timeout_secs == 0 {
            return Err("classify_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TriageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.context_window, 150);
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.classify_timeout(), Duration::from_secs(30));
        assert_eq!(config.deadline_secs, None);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TriageConfig {
            classify_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = TriageConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
