//! Offline insight strategy.
//!
//! Deterministic, network-free [`Insight`] implementation. Used by the CLI's
//! `--no-ai` mode and by tests that exercise the full pipeline without a model.

use crate::error::AnalyzerError;
use crate::insight::{
    ALL_PASSED_MESSAGE, Insight, InsightRequest, clamp_to_line_count, requested_line_count,
};
use async_trait::async_trait;

/// Renders a fixed summary from the score and the requirements, honoring a
/// requested line count the same way the AI strategy does.
pub struct OfflineInsight;

#[async_trait]
impl Insight for OfflineInsight {
    async fn generate(&self, request: &InsightRequest<'_>) -> Result<String, AnalyzerError> {
        if request.score == 100.0 {
            return Ok(ALL_PASSED_MESSAGE.to_string());
        }

        let mut lines = vec![
            format!(
                "- The submission scored {:.0}% on the weighted test cases.",
                request.score
            ),
            "- Re-check the failing cases against the stated input and output formats.".to_string(),
        ];
        if !request.requirements.whitelist.is_empty() {
            lines.push(format!(
                "- Confirm the required elements are present: {}.",
                request.requirements.whitelist.join(", ")
            ));
        }
        lines.push(
            "- Compare the implementation against the question requirements before resubmitting."
                .to_string(),
        );

        let summary = lines.join("\n");
        Ok(match requested_line_count(request.focus_prompt) {
            Some(count) => clamp_to_line_count(&summary, count),
            None => summary,
        })
    }
}
