//! # Types Module
//!
//! This module defines the core data structures used throughout the analysis pipeline.
//! Everything here is transient: records are built for one analysis run and dropped afterwards.

use serde::Serialize;
use serde_json::Value;

/// One coding submission extracted from the upstream payload.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The source language name exactly as the platform reported it.
    pub language: String,
    /// Filename derived from the language via the fixed lookup table.
    pub filename: String,
    /// The submitted code text.
    pub content: String,
    /// The full per-question metadata, kept opaque for the scoring and
    /// requirements stages to project out of.
    pub question: Value,
}

/// Question requirements projected out of the per-question metadata.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    pub question_text: String,
    pub input_format: String,
    pub output_format: String,
    pub constraints: String,
    /// Code elements a correct submission must contain verbatim.
    pub whitelist: Vec<String>,
}

/// Whether a test case is a decorative sample or a weighted hidden case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TestCaseKind {
    Sample,
    Hidden,
}

impl TestCaseKind {
    /// The label used in the rendered report.
    pub fn label(self) -> &'static str {
        match self {
            TestCaseKind::Sample => "Sample",
            TestCaseKind::Hidden => "Test Case",
        }
    }
}

/// A single test case from the question metadata.
///
/// Sample cases always carry weightage 0; hidden cases default to 25 when the
/// payload does not assign a score.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub input: String,
    pub output: String,
    pub kind: TestCaseKind,
    pub difficulty: Option<String>,
    pub weightage: f64,
}

/// A scored test case: one [`TestCase`] plus its 1-based position in the
/// merged sequence and the score distributed to it from the overall percentage.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub case_number: usize,
    pub kind: TestCaseKind,
    pub difficulty: Option<String>,
    pub input: String,
    pub expected_output: String,
    pub score: f64,
    pub weightage: f64,
    pub passed: bool,
}

/// Per-case results plus the overall percentage envelope.
#[derive(Debug, Serialize)]
pub struct ScoreBreakdown {
    pub results: Vec<CaseResult>,
    /// Overall percentage score in `[0, 100]`.
    pub total_score: f64,
    /// Always 100.
    pub max_score: f64,
}

/// Findings of the static code heuristics pass.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CodeAnalysis {
    pub missing_requirements: Vec<String>,
    pub potential_issues: Vec<String>,
    pub whitelist_violations: Vec<String>,
}

impl CodeAnalysis {
    /// True when no heuristic rule fired.
    pub fn is_clean(&self) -> bool {
        self.missing_requirements.is_empty()
            && self.potential_issues.is_empty()
            && self.whitelist_violations.is_empty()
    }
}
