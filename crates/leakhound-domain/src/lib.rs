//! Leakhound Domain Layer
//!
//! This crate contains the core domain model for Leakhound, a pipeline that
//! triages potential credential leaks found in a text corpus. It has no
//! external dependencies beyond `uuid` and defines the fundamental value
//! objects and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Candidate**: a matched substring plus its surrounding text, discovered
//!   by the corpus hunt
//! - **Verdict**: the structured confidence judgment produced for a candidate
//! - **Confidence**: the High/Medium/Low/None level a verdict carries
//! - **Finding**: a persistable record for an accepted (High/Medium) verdict
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod finding;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use candidate::Candidate;
pub use finding::{Finding, FindingId, MAX_FIELD_CHARS};
pub use traits::{CandidateSource, FindingSink, HuntError, InsertFailure, LlmProvider};
pub use verdict::{Confidence, Verdict};
