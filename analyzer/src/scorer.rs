//! # Scorer Module
//!
//! This module computes the canonical percentage score for a question and
//! distributes it across the merged test-case sequence.
//!
//! The score comes from a prioritized fallback chain over heterogeneous
//! question metadata, expressed as an explicit ordered list of [`ScoreRule`]
//! variants so that each rule is independently testable and the first-match-wins
//! contract is visible in the code shape.
//!
//! The final rule, [`ScoreRule::AssumeFullMarks`], converts "no scoring signal
//! at all" into full credit. That is a deliberate, documented upstream policy
//! ("no evidence of failure, assume full pass"), pinned by an explicit test;
//! do not change it without confirming intent with the platform owners.

use crate::types::{CaseResult, ScoreBreakdown, TestCase, TestCaseKind};
use serde_json::Value;

/// One rule in the scoring fallback chain.
///
/// Each rule inspects the per-question metadata independently and yields a
/// percentage when it applies. The chain order in [`SCORE_RULES`] is the
/// business logic; do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRule {
    /// `student_questions.testcase_percentage`, used verbatim.
    TestcasePercentage,
    /// `student_questions.marks / marks * 100`, when both are present and the
    /// total is positive.
    MarksRatio,
    /// Pass ratio over a non-empty `student_questions.l_event_data.testcase_results`.
    TestcaseResults,
    /// `student_questions.l_event_data.program_score`, used verbatim.
    ProgramScore,
    /// Always applies: no scoring signal means full credit.
    AssumeFullMarks,
}

/// The fallback chain, in priority order. First applicable rule wins.
pub const SCORE_RULES: [ScoreRule; 5] = [
    ScoreRule::TestcasePercentage,
    ScoreRule::MarksRatio,
    ScoreRule::TestcaseResults,
    ScoreRule::ProgramScore,
    ScoreRule::AssumeFullMarks,
];

impl ScoreRule {
    /// Applies this rule to the question metadata, returning a percentage when
    /// the rule's inputs are present and usable.
    pub fn apply(self, question: &Value) -> Option<f64> {
        let student = &question["student_questions"];
        match self {
            ScoreRule::TestcasePercentage => numeric(&student["testcase_percentage"]),
            ScoreRule::MarksRatio => {
                let marks = numeric(&student["marks"])?;
                let total = numeric(&question["marks"])?;
                if total > 0.0 {
                    Some(marks / total * 100.0)
                } else {
                    None
                }
            }
            ScoreRule::TestcaseResults => {
                let results = student["l_event_data"]["testcase_results"].as_array()?;
                if results.is_empty() {
                    return None;
                }
                let passed = results
                    .iter()
                    .filter(|r| r["status"].as_str() == Some("pass"))
                    .count();
                Some(passed as f64 / results.len() as f64 * 100.0)
            }
            ScoreRule::ProgramScore => numeric(&student["l_event_data"]["program_score"]),
            ScoreRule::AssumeFullMarks => Some(100.0),
        }
    }
}

/// The upstream sometimes sends numbers as JSON strings; accept both.
fn numeric(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Computes the overall percentage score for one question.
///
/// Walks [`SCORE_RULES`] in order and takes the first rule that applies.
/// Scoring must never abort the pipeline: a rule producing a non-finite or
/// negative value collapses to `0.0` instead of propagating an error.
pub fn question_score(question: &Value) -> f64 {
    let score = SCORE_RULES
        .iter()
        .find_map(|rule| rule.apply(question))
        .unwrap_or(0.0);
    if score.is_finite() && score >= 0.0 { score } else { 0.0 }
}

/// Distributes an overall percentage across the merged test-case sequence.
///
/// Per-case score is `percentage / 100 * weightage` for hidden cases and 0 for
/// sample cases; `passed` is simply `score > 0`. Cases are numbered 1..N in
/// merge order. The envelope's `max_score` is always 100.
pub fn distribute(percentage: f64, cases: &[TestCase]) -> ScoreBreakdown {
    let results = cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let score = match case.kind {
                TestCaseKind::Sample => 0.0,
                TestCaseKind::Hidden => percentage / 100.0 * case.weightage,
            };
            CaseResult {
                case_number: i + 1,
                kind: case.kind,
                difficulty: case.difficulty.clone(),
                input: case.input.clone(),
                expected_output: case.output.clone(),
                score,
                weightage: case.weightage,
                passed: score > 0.0,
            }
        })
        .collect();

    ScoreBreakdown {
        results,
        total_score: percentage,
        max_score: 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// `testcase_percentage` wins even when every other signal is present.
    #[test]
    fn testcase_percentage_takes_priority() {
        let question = json!({
            "marks": 20,
            "student_questions": {
                "testcase_percentage": 73,
                "marks": 18,
                "l_event_data": {
                    "testcase_results": [{"status": "fail"}],
                    "program_score": 10
                }
            }
        });
        assert_eq!(question_score(&question), 73.0);
    }

    #[test]
    fn marks_ratio_when_percentage_absent() {
        let question = json!({
            "marks": 20,
            "student_questions": {"marks": 18}
        });
        assert_eq!(question_score(&question), 90.0);
    }

    #[test]
    fn marks_ratio_skipped_when_total_is_zero() {
        // A zero total falls through to the next rule, not a division by zero.
        let question = json!({
            "marks": 0,
            "student_questions": {
                "marks": 5,
                "l_event_data": {"program_score": 40}
            }
        });
        assert_eq!(question_score(&question), 40.0);
    }

    #[test]
    fn pass_ratio_over_testcase_results() {
        let question = json!({
            "student_questions": {
                "l_event_data": {
                    "testcase_results": [
                        {"status": "pass"},
                        {"status": "pass"},
                        {"status": "pass"},
                        {"status": "fail"}
                    ]
                }
            }
        });
        assert_eq!(question_score(&question), 75.0);
    }

    #[test]
    fn empty_testcase_results_fall_through_to_program_score() {
        let question = json!({
            "student_questions": {
                "l_event_data": {"testcase_results": [], "program_score": 55}
            }
        });
        assert_eq!(question_score(&question), 55.0);
    }

    /// The documented default: no scoring signal at all means full credit.
    #[test]
    fn no_signal_defaults_to_full_marks() {
        assert_eq!(question_score(&json!({})), 100.0);
        assert_eq!(question_score(&json!({"student_questions": {}})), 100.0);
    }

    /// The upstream occasionally stringifies numbers.
    #[test]
    fn string_encoded_percentage_is_accepted() {
        let question = json!({
            "student_questions": {"testcase_percentage": "62.5"}
        });
        assert_eq!(question_score(&question), 62.5);
    }

    #[test]
    fn negative_score_collapses_to_zero() {
        let question = json!({
            "student_questions": {"testcase_percentage": -10}
        });
        assert_eq!(question_score(&question), 0.0);
    }

    #[test]
    fn each_rule_applies_independently() {
        let question = json!({
            "marks": 10,
            "student_questions": {
                "marks": 5,
                "l_event_data": {
                    "testcase_results": [{"status": "pass"}, {"status": "fail"}],
                    "program_score": 30
                }
            }
        });
        assert_eq!(ScoreRule::TestcasePercentage.apply(&question), None);
        assert_eq!(ScoreRule::MarksRatio.apply(&question), Some(50.0));
        assert_eq!(ScoreRule::TestcaseResults.apply(&question), Some(50.0));
        assert_eq!(ScoreRule::ProgramScore.apply(&question), Some(30.0));
        assert_eq!(ScoreRule::AssumeFullMarks.apply(&question), Some(100.0));
    }

    fn hidden_case(weightage: f64) -> TestCase {
        TestCase {
            input: "in".to_string(),
            output: "out".to_string(),
            kind: TestCaseKind::Hidden,
            difficulty: None,
            weightage,
        }
    }

    fn sample_case() -> TestCase {
        TestCase {
            input: "in".to_string(),
            output: "out".to_string(),
            kind: TestCaseKind::Sample,
            difficulty: None,
            weightage: 0.0,
        }
    }

    #[test]
    fn distribution_is_proportional_to_weightage() {
        let breakdown = distribute(80.0, &[hidden_case(25.0)]);
        assert_eq!(breakdown.results[0].score, 20.0);
        assert!(breakdown.results[0].passed);
        assert_eq!(breakdown.total_score, 80.0);
        assert_eq!(breakdown.max_score, 100.0);
    }

    #[test]
    fn sample_cases_always_score_zero() {
        let breakdown = distribute(100.0, &[sample_case()]);
        assert_eq!(breakdown.results[0].score, 0.0);
        assert!(!breakdown.results[0].passed);
    }

    #[test]
    fn cases_are_numbered_in_merge_order() {
        let breakdown = distribute(50.0, &[sample_case(), hidden_case(25.0), hidden_case(40.0)]);
        let numbers: Vec<usize> = breakdown.results.iter().map(|r| r.case_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(breakdown.results[1].score, 12.5);
        assert_eq!(breakdown.results[2].score, 20.0);
    }

    #[test]
    fn zero_percentage_fails_every_hidden_case() {
        let breakdown = distribute(0.0, &[hidden_case(25.0)]);
        assert_eq!(breakdown.results[0].score, 0.0);
        assert!(!breakdown.results[0].passed);
    }
}
