//! Leakhound Triage
//!
//! The candidate-to-verdict pipeline: turns a raw matched substring plus its
//! surrounding text into a bounded-confidence, structured finding.
//!
//! # Architecture
//!
//! ```text
//! Candidates → Filter → ContextWindow → Classifier → Parser → Gate → Findings → Sink
//! ```
//!
//! # Key Properties
//!
//! - **Cheap rejection first**: obvious placeholders never reach the model
//! - **Tolerant parsing**: malformed classifier output degrades to a verdict,
//!   it never crashes the pipeline or drops a candidate
//! - **Failure isolation**: no single candidate's failure stops the rest
//! - **Bounded concurrency**: candidates are independent units of work,
//!   processed on a bounded task set with a single aggregation point
//!
//! # Example Usage
//!
//! ```no_run
//! use leakhound_triage::{Classifier, Pipeline, TriageConfig};
//! use leakhound_llm::MockProvider;
//! use leakhound_store::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TriageConfig::default();
//! let provider = MockProvider::new("CONFIDENCE: None\nREASONING: Mock.");
//! let classifier = Classifier::new(provider, config.classify_timeout());
//! let source = SqliteStore::open("corpus.db")?;
//! let sink = SqliteStore::open("corpus.db")?;
//!
//! let pipeline = Pipeline::new(source, classifier, sink, config);
//! let summary = pipeline.run().await?;
//!
//! println!("{}", summary.message());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod context;
mod error;
mod filter;
mod gate;
mod parser;
mod pipeline;
mod prompt;


pub use classifier::Classifier;
pub use config::TriageConfig;
pub use context::{build_context, DEFAULT_CONTEXT_WINDOW};
pub use error::TriageError;
pub use filter::{is_placeholder, PLACEHOLDER_REASONING};
pub use gate::{evaluate, scan_timestamp};
pub use parser::{parse_verdict, FORMAT_ERROR_REASONING, MISSING_REASONING, UNPARSED_REASONING};
pub use pipeline::{Pipeline, ScanSummary};
