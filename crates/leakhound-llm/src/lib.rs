//! Leakhound LLM Provider Layer
//!
//! Pluggable LLM provider implementations for leak classification.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `leakhound-domain`. The classifier treats providers as unreliable: every
//! error variant here is converted into a degraded verdict downstream, never
//! a crash.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use leakhound_llm::MockProvider;
//! use leakhound_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("CONFIDENCE: None\nREASONING: Mock.");
//! let result = provider.generate("any prompt").unwrap();
//! assert!(result.starts_with("CONFIDENCE:"));
//! ```

#![warn(missing_docs)]

pub mod ollama;

use leakhound_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Behavior a [`MockProvider`] returns for a given prompt
#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(String),
    Fail,
    RateLimit,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls, and can
/// inject communication or rate-limit failures to exercise the classifier's
/// degradation paths.
///
/// # Examples
///
/// ```
/// use leakhound_llm::MockProvider;
/// use leakhound_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("CONFIDENCE: Low\nREASONING: Default.");
/// provider.add_response("prompt1", "CONFIDENCE: High\nREASONING: Live key.");
/// assert!(provider.generate("prompt1").unwrap().contains("High"));
/// assert!(provider.generate("other").unwrap().contains("Low"));
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    behaviors: Arc<Mutex<HashMap<String, MockBehavior>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            behaviors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(prompt.into(), MockBehavior::Respond(response.into()));
    }

    /// Configure a communication failure for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(prompt.into(), MockBehavior::Fail);
    }

    /// Configure a rate-limit failure for a specific prompt
    pub fn add_rate_limit(&mut self, prompt: impl Into<String>) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(prompt.into(), MockBehavior::RateLimit);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("CONFIDENCE: None\nREASONING: Default mock response.")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let behaviors = self.behaviors.lock().unwrap();
        match behaviors.get(prompt) {
            Some(MockBehavior::Respond(response)) => Ok(response.clone()),
            Some(MockBehavior::Fail) => Err(LlmError::Other("Mock error".to_string())),
            Some(MockBehavior::RateLimit) => Err(LlmError::RateLimitExceeded),
            None => Ok(self.default_response.clone()),
        }
    }
}
