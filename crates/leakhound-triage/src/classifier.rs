//! Classifier - asks the model whether a candidate is a real credential
//!
//! Owns the boundary with the LLM provider: every failure on that boundary is
//! converted into degraded two-line text so downstream parsing is uniform.
//! The classifier never raises.

use crate::prompt::PromptBuilder;
use leakhound_domain::traits::LlmProvider;
use leakhound_llm::LlmError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Degraded response when the provider reports quota exhaustion
const QUOTA_DEGRADED: &str = "CONFIDENCE: None\nREASONING: Model quota exceeded during analysis.";

/// Degraded response for any other provider failure
const COMMUNICATION_DEGRADED: &str =
    "CONFIDENCE: None\nREASONING: Error during model analysis communication.";

/// Sends candidates to the LLM provider and normalizes its failures
pub struct Classifier<L> {
    provider: Arc<L>,
    timeout: Duration,
}

impl<L> Classifier<L>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
{
    /// Create a new classifier around a provider
    pub fn new(provider: L, timeout: Duration) -> Self {
        Self {
            provider: Arc::new(provider),
            timeout,
        }
    }

    /// Classify one candidate, returning the raw model text
    ///
    /// The provider call is blocking, so it runs off the async executor and
    /// under a timeout. Rate-limit errors degrade to a quota message, every
    /// other failure (transport, join, timeout) to a communication message;
    /// the returned text always parses through the verdict parser.
    pub async fn classify(&self, context: &str, secret_value: &str) -> String {
        let prompt = PromptBuilder::new(context, secret_value).build();
        debug!("Classification prompt length: {} chars", prompt.len());

        let provider = Arc::clone(&self.provider);
        let call = tokio::task::spawn_blocking(move || provider.generate(&prompt));

        match timeout(self.timeout, call).await {
            Ok(Ok(Ok(raw))) => raw,
            Ok(Ok(Err(LlmError::RateLimitExceeded))) => {
                warn!("Model quota exceeded during analysis");
                QUOTA_DEGRADED.to_string()
            }
            Ok(Ok(Err(e))) => {
                warn!("Error communicating with model: {}", e);
                COMMUNICATION_DEGRADED.to_string()
            }
            Ok(Err(join_err)) => {
                warn!("Classification task failed: {}", join_err);
                COMMUNICATION_DEGRADED.to_string()
            }
            Err(_) => {
                warn!("Classification timed out after {:?}", self.timeout);
                COMMUNICATION_DEGRADED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_verdict;
    use leakhound_domain::Confidence;
    use leakhound_llm::MockProvider;

    fn classifier(provider: MockProvider) -> Classifier<MockProvider> {
        Classifier::new(provider, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_classify_returns_provider_text() {
        let provider = MockProvider::new("CONFIDENCE: High\nREASONING: Live key prefix.");
        let raw = classifier(provider).classify("ctx", "sk_live_abc").await;
        assert_eq!(raw, "CONFIDENCE: High\nREASONING: Live key prefix.");
    }

    #[tokio::test]
    async fn test_classify_degrades_rate_limit_to_quota_text() {
        let provider = MockProvider::new("unused");
        let classifier = classifier(provider.clone());

        // Every prompt for this context hits the rate limit
        let prompt = PromptBuilder::new("ctx", "value").build();
        let mut provider = provider;
        provider.add_rate_limit(prompt);

        let raw = classifier.classify("ctx", "value").await;
        assert_eq!(raw, QUOTA_DEGRADED);

        let verdict = parse_verdict(&raw);
        assert_eq!(verdict.confidence(), Some(Confidence::None));
        assert!(verdict.reasoning.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_classify_degrades_generic_failure_to_communication_text() {
        let provider = MockProvider::new("unused");
        let classifier = classifier(provider.clone());

        let prompt = PromptBuilder::new("ctx", "value").build();
        let mut provider = provider;
        provider.add_error(prompt);

        let raw = classifier.classify("ctx", "value").await;
        assert_eq!(raw, COMMUNICATION_DEGRADED);

        let verdict = parse_verdict(&raw);
        assert_eq!(verdict.confidence(), Some(Confidence::None));
    }

    #[tokio::test]
    async fn test_degraded_texts_always_parse() {
        for degraded in [QUOTA_DEGRADED, COMMUNICATION_DEGRADED] {
            let verdict = parse_verdict(degraded);
            assert_eq!(verdict.confidence(), Some(Confidence::None));
            assert!(!verdict.is_reportable());
        }
    }
}
