//! Analyzer Error Types
//!
//! This module defines the [`AnalyzerError`] enum, which encapsulates all error types that can occur
//! while extracting, scoring, and reporting on student submissions.
//! Each variant carries a descriptive message for robust error handling and debugging.
//!
//! # Usage
//!
//! Use [`AnalyzerError`] as the error type in functions that may fail due to input, upstream,
//! decoding, or I/O issues. Each variant is tailored to a specific failure stage in the pipeline.

use std::fmt;

/// Represents all error types that can occur in the analysis pipeline.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Caller input is unusable (malformed URL, missing token). Raised before any network call.
    InvalidInput(String),
    /// The upstream assessment API returned a non-success response. Aborts the run.
    Upstream(String),
    /// JSON is malformed or does not match the expected schema at a named decode stage.
    InvalidJson(String),
    /// A required field is missing from a payload.
    MissingField(String),
    /// AI narrative generation failed.
    Insight(String),
    /// I/O error (file not writable, unreadable, etc.).
    Io(String),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AnalyzerError::Upstream(msg) => write!(f, "upstream error: {msg}"),
            AnalyzerError::InvalidJson(msg) => write!(f, "invalid JSON: {msg}"),
            AnalyzerError::MissingField(msg) => write!(f, "missing field: {msg}"),
            AnalyzerError::Insight(msg) => write!(f, "insight generation failed: {msg}"),
            AnalyzerError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for AnalyzerError {}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        AnalyzerError::Io(err.to_string())
    }
}
