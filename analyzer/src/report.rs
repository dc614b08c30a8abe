//! # Report Module
//!
//! Assembles the plain-text analysis report and parses it back into sections.
//!
//! The report layout is a contract: [`parse_report`] (used by the display
//! layer) recognizes exactly the four literal headers that [`format_report`]
//! emits. Any change to a header literal must be mirrored in both halves of
//! this module.

use crate::types::{CodeAnalysis, ScoreBreakdown};

/// The four section headers, in report order.
pub const SECTION_HEADERS: [&str; 4] = [
    "Final Score:",
    "Test Case Analysis:",
    "Code Structure Analysis:",
    "AI Analysis Insights:",
];

/// Renders the full analysis report for one submission.
///
/// Layout: preamble, score line, per-case block (difficulty annotation only
/// when known, absent fields render empty), the two conditional code-structure
/// sub-lists, then the narrative text. All headers and dividers are literals.
pub fn format_report(
    breakdown: &ScoreBreakdown,
    analysis: &CodeAnalysis,
    insights: &str,
) -> String {
    let mut report = String::new();
    report.push_str("Code Analysis Report\n");
    report.push_str("===================\n\n");

    report.push_str(&format!(
        "Final Score: {:.0}/{:.0}\n",
        breakdown.total_score, breakdown.max_score
    ));
    report.push_str(&"=".repeat(20));
    report.push_str("\n\n");

    report.push_str("Test Case Analysis:\n");
    report.push_str("-----------------\n");
    for result in &breakdown.results {
        report.push_str(&format!("\nTest Case {}", result.case_number));
        match &result.difficulty {
            Some(difficulty) => report.push_str(&format!(" ({difficulty})\n")),
            None => report.push('\n'),
        }
        report.push_str(&format!("Type: {}\n", result.kind.label()));
        report.push_str(&format!("Score: {:.2} points\n", result.score));
        report.push_str(&format!("Input:\n{}\n", result.input));
        report.push_str(&format!("Expected Output:\n{}\n", result.expected_output));
    }
    report.push_str(&format!(
        "\nTotal Score: {:.0}/{:.0} points\n\n",
        breakdown.total_score, breakdown.max_score
    ));

    report.push_str("Code Structure Analysis:\n");
    report.push_str("----------------------\n");
    if !analysis.whitelist_violations.is_empty() {
        report.push_str("Missing Required Elements:\n");
        for violation in &analysis.whitelist_violations {
            report.push_str(&format!("- {violation}\n"));
        }
    }
    if !analysis.potential_issues.is_empty() {
        report.push_str("\nPotential Issues:\n");
        for issue in &analysis.potential_issues {
            report.push_str(&format!("- {issue}\n"));
        }
    }

    report.push_str("\nAI Analysis Insights:\n");
    report.push_str("-------------------\n");
    report.push_str(insights);
    report.push('\n');

    report
}

/// The report split back into its four sections.
///
/// Every section is always present; one the report lacked is simply empty.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportSections {
    pub final_score: String,
    pub test_case_analysis: String,
    pub code_structure_analysis: String,
    pub ai_analysis_insights: String,
}

impl ReportSections {
    /// Sections paired with their header names, in report order.
    pub fn iter(&self) -> [(&'static str, &str); 4] {
        [
            (SECTION_HEADERS[0], &self.final_score),
            (SECTION_HEADERS[1], &self.test_case_analysis),
            (SECTION_HEADERS[2], &self.code_structure_analysis),
            (SECTION_HEADERS[3], &self.ai_analysis_insights),
        ]
    }
}

/// Splits a report into its four sections by header keyword.
///
/// Single forward line scan: a line containing one of the four header literals
/// switches the current section and is itself appended to it; every other line
/// appends to whichever section is active. Lines before the first recognized
/// header are dropped. Only these four sections ever exist.
pub fn parse_report(text: &str) -> ReportSections {
    let mut sections = ReportSections::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        if let Some(idx) = SECTION_HEADERS.iter().position(|h| line.contains(h)) {
            current = Some(idx);
        }
        if let Some(idx) = current {
            let buffer = match idx {
                0 => &mut sections.final_score,
                1 => &mut sections.test_case_analysis,
                2 => &mut sections.code_structure_analysis,
                _ => &mut sections.ai_analysis_insights,
            };
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaseResult, TestCaseKind};

    fn breakdown() -> ScoreBreakdown {
        ScoreBreakdown {
            results: vec![
                CaseResult {
                    case_number: 1,
                    kind: TestCaseKind::Sample,
                    difficulty: None,
                    input: "1 2".to_string(),
                    expected_output: "3".to_string(),
                    score: 0.0,
                    weightage: 0.0,
                    passed: false,
                },
                CaseResult {
                    case_number: 2,
                    kind: TestCaseKind::Hidden,
                    difficulty: Some("Hard".to_string()),
                    input: "5 5".to_string(),
                    expected_output: "10".to_string(),
                    score: 20.0,
                    weightage: 25.0,
                    passed: true,
                },
            ],
            total_score: 80.0,
            max_score: 100.0,
        }
    }

    #[test]
    fn report_contains_all_four_headers_in_order() {
        let report = format_report(&breakdown(), &CodeAnalysis::default(), "Looks fine.");
        let mut last = 0;
        for header in SECTION_HEADERS {
            let pos = report.find(header).expect("header missing");
            assert!(pos >= last, "{header} out of order");
            last = pos;
        }
    }

    #[test]
    fn difficulty_annotation_only_when_known() {
        let report = format_report(&breakdown(), &CodeAnalysis::default(), "");
        assert!(report.contains("Test Case 1\nType: Sample\n"));
        assert!(report.contains("Test Case 2 (Hard)\nType: Test Case\n"));
    }

    #[test]
    fn scores_render_with_two_decimals() {
        let report = format_report(&breakdown(), &CodeAnalysis::default(), "");
        assert!(report.contains("Score: 0.00 points"));
        assert!(report.contains("Score: 20.00 points"));
        assert!(report.contains("Final Score: 80/100\n"));
        assert!(report.contains("Total Score: 80/100 points"));
    }

    #[test]
    fn structure_sub_lists_are_conditional() {
        let empty = format_report(&breakdown(), &CodeAnalysis::default(), "");
        assert!(!empty.contains("Missing Required Elements:"));
        assert!(!empty.contains("Potential Issues:"));

        let analysis = CodeAnalysis {
            whitelist_violations: vec!["Missing required element: addStudent".to_string()],
            potential_issues: vec!["Count variable initialized locally".to_string()],
            ..CodeAnalysis::default()
        };
        let full = format_report(&breakdown(), &analysis, "");
        assert!(full.contains("Missing Required Elements:\n- Missing required element: addStudent\n"));
        assert!(full.contains("Potential Issues:\n- Count variable initialized locally\n"));
    }

    #[test]
    fn parse_report_recovers_the_four_sections() {
        let report = format_report(
            &breakdown(),
            &CodeAnalysis::default(),
            "The loop bound is off by one.",
        );
        let sections = parse_report(&report);
        assert!(sections.final_score.starts_with("Final Score:"));
        assert!(sections.test_case_analysis.starts_with("Test Case Analysis:"));
        assert!(
            sections
                .code_structure_analysis
                .starts_with("Code Structure Analysis:")
        );
        assert!(sections.ai_analysis_insights.starts_with("AI Analysis Insights:"));
        assert!(sections.ai_analysis_insights.contains("off by one"));
    }

    /// Each section starts with its own header line regardless of header order
    /// or repetition in the input.
    #[test]
    fn sections_start_with_their_own_header_after_a_switch() {
        let text = "AI Analysis Insights:\nhint one\nFinal Score: 50/100\ndetail\nAI Analysis Insights:\nhint two\n";
        let sections = parse_report(text);
        assert!(sections.ai_analysis_insights.starts_with("AI Analysis Insights:"));
        assert!(sections.ai_analysis_insights.contains("hint one"));
        assert!(sections.ai_analysis_insights.contains("hint two"));
        assert!(sections.final_score.starts_with("Final Score:"));
        assert!(sections.final_score.contains("detail"));
        // A section never starts with another section's header line.
        assert!(!sections.final_score.starts_with("AI Analysis Insights:"));
    }

    #[test]
    fn lines_before_the_first_header_are_dropped() {
        let sections = parse_report("preamble\nmore preamble\nFinal Score: 10/100\n");
        assert!(!sections.final_score.contains("preamble"));
        assert_eq!(sections.test_case_analysis, "");
    }

    #[test]
    fn empty_input_yields_four_empty_sections() {
        let sections = parse_report("");
        for (_, body) in sections.iter() {
            assert_eq!(body, "");
        }
    }
}
