//! # Insight Strategies
//!
//! This module defines the [`Insight`] trait, the pluggable seam for generating
//! the narrative critique that closes an analysis report. The pipeline treats a
//! strategy as a black box: it receives the submitted code, the requirements,
//! the analysis-focus prompt, and the computed score, and returns text.
//!
//! Strategies:
//! - [`azure::AzureInsight`]: Azure OpenAI chat completions (the default).
//! - [`offline::OfflineInsight`]: deterministic, network-free fallback used by
//!   tests and the CLI's `--no-ai` mode.

use crate::error::AnalyzerError;
use crate::types::Requirements;
use async_trait::async_trait;

pub mod azure;
pub mod offline;

/// Everything a strategy gets to work with.
pub struct InsightRequest<'a> {
    pub code: &'a str,
    pub requirements: &'a Requirements,
    /// The analysis-focus selection. Only mined for a requested line count;
    /// the prompt text itself is not forwarded to the model.
    pub focus_prompt: &'a str,
    /// Overall percentage score in `[0, 100]`.
    pub score: f64,
}

/// A pluggable narrative-generation strategy.
#[async_trait]
pub trait Insight {
    async fn generate(&self, request: &InsightRequest<'_>) -> Result<String, AnalyzerError>;
}

#[async_trait]
impl<T: Insight + Sync + ?Sized> Insight for &T {
    async fn generate(&self, request: &InsightRequest<'_>) -> Result<String, AnalyzerError> {
        (**self).generate(request).await
    }
}

/// Fixed response when every test case passed; no model call is worth making.
pub(crate) const ALL_PASSED_MESSAGE: &str =
    "All test cases passed successfully. The code meets all requirements.";

/// Fixed degraded-mode text substituted when narrative generation fails.
pub(crate) const GENERATION_FAILED_MESSAGE: &str =
    "Error generating analysis. Please try again.";

/// Extracts a requested output line count from the analysis-focus string.
///
/// A count is requested when the focus contains both "in" and "line"
/// (case-insensitive); the count is all digits in the string, concatenated.
/// "give in 3 lines" requests 3; a focus with no digits requests nothing.
pub(crate) fn requested_line_count(focus_prompt: &str) -> Option<usize> {
    let lower = focus_prompt.to_lowercase();
    if !(lower.contains("in") && lower.contains("line")) {
        return None;
    }
    let digits: String = focus_prompt.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Truncates or pads `text` with empty lines to exactly `count` lines.
pub(crate) fn clamp_to_line_count(text: &str, count: usize) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.truncate(count);
    while lines.len() < count {
        lines.push("");
    }
    lines.join("\n")
}
