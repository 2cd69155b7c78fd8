//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Candidate, Finding};
use std::fmt;

/// Fatal errors from the corpus hunt
///
/// Any of these aborts the whole run before a single candidate is processed.
/// The sub-kinds are distinct so callers can report them distinctly; a
/// malformed query carries the failing query text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuntError {
    /// The corpus refused access
    PermissionDenied(String),

    /// The hunt query itself was rejected
    MalformedQuery {
        /// The query text that failed to prepare
        query: String,
        /// The underlying rejection message
        message: String,
    },

    /// Any other corpus-access failure
    Source(String),
}

impl fmt::Display for HuntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuntError::PermissionDenied(msg) => write!(f, "Permission error: {}", msg),
            HuntError::MalformedQuery { message, .. } => write!(f, "Bad query error: {}", message),
            HuntError::Source(msg) => write!(f, "Corpus access error: {}", msg),
        }
    }
}

impl std::error::Error for HuntError {}

/// Trait for discovering candidate leaks in a corpus
///
/// Implemented by the infrastructure layer (leakhound-store). Sources drop
/// rows without a usable secret value; every candidate they hand over has a
/// non-empty `secret_value`.
pub trait CandidateSource {
    /// Run the hunt and return all candidates it discovered
    fn fetch_candidates(&self) -> Result<Vec<Candidate>, HuntError>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (leakhound-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// A single record that failed to insert during a batch write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertFailure {
    /// Index of the failing finding within the batch
    pub index: usize,

    /// Why the insert failed
    pub message: String,
}

/// Trait for persisting accepted findings
///
/// Implemented by the infrastructure layer (leakhound-store). The batch is
/// atomic from the caller's point of view in the sense that it is handed over
/// once; individual records may still fail, and those failures are returned
/// rather than raised.
pub trait FindingSink {
    /// Error type for sink operations
    type Error;

    /// Insert a batch of findings, returning per-record failures
    fn insert_findings(&mut self, findings: &[Finding]) -> Result<Vec<InsertFailure>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunt_error_display_names_the_sub_kind() {
        let permission = HuntError::PermissionDenied("role lacks corpus access".to_string());
        assert!(permission.to_string().contains("Permission error"));

        let malformed = HuntError::MalformedQuery {
            query: "SELECT nope".to_string(),
            message: "no such column: nope".to_string(),
        };
        assert!(malformed.to_string().contains("Bad query error"));
        assert!(malformed.to_string().contains("no such column"));

        let generic = HuntError::Source("disk io".to_string());
        assert!(generic.to_string().contains("Corpus access error"));
    }

    #[test]
    fn test_malformed_query_keeps_query_text() {
        let err = HuntError::MalformedQuery {
            query: "SELECT * FROM missing".to_string(),
            message: "no such table".to_string(),
        };
        match err {
            HuntError::MalformedQuery { query, .. } => {
                assert_eq!(query, "SELECT * FROM missing");
            }
            _ => panic!("expected MalformedQuery"),
        }
    }
}
