//! Pipeline orchestrator
//!
//! Drives filter → window → classify → parse → gate for every candidate the
//! hunt yields, with per-candidate failure isolation, then hands the accepted
//! findings to the sink in one batch.

use crate::classifier::Classifier;
use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::{context, filter, gate, parser};
use leakhound_domain::traits::{CandidateSource, FindingSink, LlmProvider};
use leakhound_domain::{Candidate, Confidence, Finding, HuntError, Verdict};
use leakhound_llm::LlmError;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Candidates that reached the triage loop, whatever their outcome
    pub processed_count: usize,

    /// Verdicts that passed the confidence gate
    pub accepted_count: usize,
}

impl ScanSummary {
    /// Human-readable summary for the invocation surface
    pub fn message(&self) -> String {
        format!(
            "Scan complete. Processed {} candidates. Found and logged {} high/medium-confidence leaks.",
            self.processed_count, self.accepted_count
        )
    }
}

/// The triage pipeline, wired with its three collaborators at construction
///
/// Candidates are independent units of work: they are classified on a bounded
/// task set (`max_concurrency`) and accumulated at a single aggregation point
/// that restores source-stream order. Hunt failures abort the run before any
/// candidate is touched; everything after that degrades per candidate.
pub struct Pipeline<Q, L, S>
where
    Q: CandidateSource,
    L: LlmProvider<Error = LlmError>,
    S: FindingSink,
{
    source: Arc<Mutex<Q>>,
    classifier: Arc<Classifier<L>>,
    sink: Arc<Mutex<S>>,
    config: TriageConfig,
}

impl<Q, L, S> Pipeline<Q, L, S>
where
    Q: CandidateSource + Send + 'static,
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
    S: FindingSink + Send + 'static,
    S::Error: std::fmt::Display,
{
    /// Create a new pipeline
    pub fn new(source: Q, classifier: Classifier<L>, sink: S, config: TriageConfig) -> Self {
        Self {
            source: Arc::new(Mutex::new(source)),
            classifier: Arc::new(classifier),
            sink: Arc::new(Mutex::new(sink)),
            config,
        }
    }

    /// Run the full hunt-triage-persist cycle once
    ///
    /// # Errors
    ///
    /// Only hunt failures are fatal; they abort before any candidate is
    /// processed and before the sink is touched. Persistence failures are
    /// logged and do not change the run's outcome.
    pub async fn run(&self) -> Result<ScanSummary, TriageError> {
        info!("Starting corpus hunt");

        let candidates = {
            let source = self
                .source
                .lock()
                .map_err(|e| TriageError::Hunt(format!("Source lock error: {}", e)))?;
            source.fetch_candidates().map_err(|e| {
                if let HuntError::MalformedQuery { query, message } = &e {
                    error!(
                        "Hunt query rejected: {}\nFailing query:\n---\n{}\n---",
                        message, query
                    );
                } else {
                    error!("Corpus hunt failed: {}", e);
                }
                TriageError::from(e)
            })?
        };

        info!("Hunt complete. Found {} potential candidates", candidates.len());

        let deadline = self
            .config
            .deadline_secs
            .map(|secs| Instant::now() + Duration::from_secs(secs));
        let max_concurrency = self.config.max_concurrency.max(1);

        let mut join_set: JoinSet<(usize, Option<Finding>)> = JoinSet::new();
        let mut processed_count = 0usize;
        let mut accepted: Vec<(usize, Finding)> = Vec::new();

        for (idx, candidate) in candidates.into_iter().enumerate() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!("Run deadline reached, not issuing further classification calls");
                break;
            }

            while join_set.len() >= max_concurrency {
                if let Some(result) = join_set.join_next().await {
                    record_outcome(result, &mut processed_count, &mut accepted);
                }
            }

            let classifier = Arc::clone(&self.classifier);
            let window = self.config.context_window;
            join_set.spawn(async move {
                let finding = triage_candidate(&classifier, window, &candidate).await;
                (idx, finding)
            });
        }

        while let Some(result) = join_set.join_next().await {
            record_outcome(result, &mut processed_count, &mut accepted);
        }

        // Single aggregation point: restore source-stream order
        accepted.sort_by_key(|(idx, _)| *idx);
        let findings: Vec<Finding> = accepted.into_iter().map(|(_, f)| f).collect();

        self.persist(&findings);

        let summary = ScanSummary {
            processed_count,
            accepted_count: findings.len(),
        };
        info!("{}", summary.message());
        Ok(summary)
    }

    /// Hand the batch to the sink; failures are logged, never escalated
    ///
    /// The classification work already completed, so a persistence failure
    /// does not flip the run to failure. The workload is re-runnable.
    fn persist(&self, findings: &[Finding]) {
        if findings.is_empty() {
            info!("No high/medium confidence leaks to persist");
            return;
        }

        let result = match self.sink.lock() {
            Ok(mut sink) => sink.insert_findings(findings),
            Err(e) => {
                error!("Sink lock error, batch not persisted: {}", e);
                return;
            }
        };

        match result {
            Ok(failures) if failures.is_empty() => {
                info!("Persisted {} findings", findings.len());
            }
            Ok(failures) => {
                for failure in &failures {
                    error!(
                        "Sink insert error: index {}, {}",
                        failure.index, failure.message
                    );
                }
                info!(
                    "Persisted {} of {} findings",
                    findings.len() - failures.len(),
                    findings.len()
                );
            }
            Err(e) => error!("Failed to persist findings batch: {}", e),
        }
    }
}

/// Process one candidate through filter, window, classify, parse, and gate
///
/// Total per candidate: classification and parsing failures have already been
/// degraded to verdicts by the time they reach the gate, so this never errors
/// and never stops the loop.
async fn triage_candidate<L>(
    classifier: &Classifier<L>,
    window: usize,
    candidate: &Candidate,
) -> Option<Finding>
where
    L: LlmProvider<Error = LlmError> + Send + Sync + 'static,
{
    let verdict = if filter::is_placeholder(&candidate.secret_value) {
        debug!(
            "Skipping classification for likely placeholder in {}",
            candidate.location()
        );
        Verdict::new(Confidence::None.as_str(), filter::PLACEHOLDER_REASONING)
    } else {
        let excerpt = context::build_context(&candidate.content, &candidate.secret_value, window);
        let raw = classifier.classify(&excerpt, &candidate.secret_value).await;
        parser::parse_verdict(&raw)
    };

    debug!(
        "Verdict for {}: {} - {}",
        candidate.location(),
        verdict.label,
        verdict.reasoning
    );

    gate::evaluate(candidate, &verdict)
}

fn record_outcome(
    result: Result<(usize, Option<Finding>), tokio::task::JoinError>,
    processed_count: &mut usize,
    accepted: &mut Vec<(usize, Finding)>,
) {
    // Every issued candidate counts as processed, even when its task failed
    *processed_count += 1;
    match result {
        Ok((idx, Some(finding))) => accepted.push((idx, finding)),
        Ok((_, None)) => {}
        Err(e) => error!("Candidate task failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_message() {
        let summary = ScanSummary {
            processed_count: 25,
            accepted_count: 3,
        };
        assert_eq!(
            summary.message(),
            "Scan complete. Processed 25 candidates. Found and logged 3 high/medium-confidence leaks."
        );
    }
}
