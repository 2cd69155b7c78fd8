//! Error types for the triage pipeline
//!
//! Only hunt failures are fatal to a run. Classification, context extraction,
//! and parsing failures degrade to verdicts inside the loop, and persistence
//! failures are logged without flipping the run's outcome, so none of them
//! appear here.

use leakhound_domain::HuntError;
use thiserror::Error;

/// Errors that can abort a triage run
#[derive(Error, Debug)]
pub enum TriageError {
    /// The corpus refused access to the hunt
    #[error("Permission error: {0}")]
    PermissionDenied(String),

    /// The hunt query was rejected
    #[error("Bad query error: {0}")]
    BadQuery(String),

    /// Any other corpus-access failure
    #[error("Corpus hunt failed: {0}")]
    Hunt(String),
}

impl From<HuntError> for TriageError {
    fn from(e: HuntError) -> Self {
        match e {
            HuntError::PermissionDenied(msg) => TriageError::PermissionDenied(msg),
            HuntError::MalformedQuery { message, .. } => TriageError::BadQuery(message),
            HuntError::Source(msg) => TriageError::Hunt(msg),
        }
    }
}
