//! # Analyzer Library
//!
//! Core logic for analyzing student coding submissions pulled from the
//! assessment platform. It scores a submission from heterogeneous question
//! metadata, distributes the score over the question's test cases, runs static
//! code heuristics, obtains a narrative critique through a pluggable insight
//! strategy, and renders everything as one plain-text report that the display
//! layer splits back into sections.
//!
//! ## Key Concepts
//! - **AnalysisJob**: the per-submission pipeline, built around one [`types::Submission`].
//! - **ScoreRule**: the prioritized scoring fallback chain, first match wins.
//! - **Insight**: pluggable narrative strategies (Azure OpenAI, or offline).
//! - **Report**: fixed-layout text artifact; `format_report` and `parse_report`
//!   are two halves of one contract.

pub mod error;
pub mod heuristics;
pub mod insight;
pub mod job;
pub mod report;
pub mod requirements;
pub mod scorer;
pub mod testcases;
pub mod types;

pub use error::AnalyzerError;
pub use job::AnalysisJob;
