//! # Analysis Job
//!
//! Orchestrates the per-submission pipeline: score the question, merge and
//! distribute over the test cases, run the code heuristics, generate the
//! narrative, and render the final report text.
//!
//! Degradation rules: a scoring miss becomes a 0 score and an insight failure
//! becomes the fixed retry message; neither aborts the run.

use crate::heuristics;
use crate::insight::azure::AzureInsight;
use crate::insight::{GENERATION_FAILED_MESSAGE, Insight, InsightRequest};
use crate::report;
use crate::requirements;
use crate::scorer;
use crate::testcases;
use crate::types::Submission;

/// An analysis job for a single submission.
///
/// Built with [`AnalysisJob::new`] and an optional insight strategy override,
/// then executed with [`AnalysisJob::run`].
pub struct AnalysisJob<'a> {
    submission: &'a Submission,
    focus_prompt: String,
    insight: Box<dyn Insight + Send + Sync + 'a>,
}

impl<'a> AnalysisJob<'a> {
    /// Creates a job with the default [`AzureInsight`] strategy.
    pub fn new(submission: &'a Submission, focus_prompt: impl Into<String>) -> Self {
        Self {
            submission,
            focus_prompt: focus_prompt.into(),
            insight: Box::new(AzureInsight),
        }
    }

    /// Overrides the narrative strategy for this job.
    pub fn with_insight<I: Insight + Send + Sync + 'a>(mut self, insight: I) -> Self {
        self.insight = Box::new(insight);
        self
    }

    /// Runs the pipeline and returns the rendered report text.
    pub async fn run(&self) -> String {
        let question = &self.submission.question;

        let score = scorer::question_score(question);
        let cases = testcases::extract_test_cases(question);
        let breakdown = scorer::distribute(score, &cases);

        let reqs = requirements::extract_requirements(question);
        let analysis = heuristics::analyze_code(&self.submission.content, &reqs);

        let request = InsightRequest {
            code: &self.submission.content,
            requirements: &reqs,
            focus_prompt: &self.focus_prompt,
            score,
        };
        let insights = match self.insight.generate(&request).await {
            Ok(text) => text,
            Err(err) => {
                log::warn!("insight generation failed: {err}");
                GENERATION_FAILED_MESSAGE.to_string()
            }
        };

        report::format_report(&breakdown, &analysis, &insights)
    }
}
