//! End-to-end pipeline tests: a realistic question payload through scoring,
//! heuristics, insight, formatting, and back through the sectionizer.

use analyzer::AnalysisJob;
use analyzer::insight::offline::OfflineInsight;
use analyzer::report::{SECTION_HEADERS, parse_report};
use analyzer::types::Submission;
use serde_json::json;

fn question_payload() -> serde_json::Value {
    json!({
        "question_data": "<p>Implement a student register with addStudent and displayInfo.</p>",
        "marks": 20,
        "student_questions": {
            "marks": 15,
            "l_event_data": {}
        },
        "programming_question": {
            "input_format": "Commands, one per line",
            "output_format": "Register contents",
            "code_constraints": "",
            "sample_io": "[{\"input\": \"add Alice\", \"output\": \"Alice\"}]",
            "testcases": "[{\"input\": \"add Bob\\nshow\", \"output\": \"Bob\", \"score\": 50, \"difficulty\": \"Medium\"}, {\"input\": \"show\", \"output\": \"\"}]",
            "solution": [{
                "whitelist": [{"list": ["addStudent", "displayInfo"]}]
            }]
        }
    })
}

fn submission() -> Submission {
    Submission {
        language: "Java".to_string(),
        filename: "main.java".to_string(),
        content: "public class Register { void addStudent() {} }".to_string(),
        question: question_payload(),
    }
}

#[tokio::test]
async fn full_pipeline_produces_a_parseable_report() {
    let submission = submission();
    let report = AnalysisJob::new(&submission, "Check if the code has logical errors and syntax issues only")
        .with_insight(OfflineInsight)
        .run()
        .await;

    // marks ratio: 15/20 -> 75%
    assert!(report.contains("Final Score: 75/100"));

    // Merge order: sample first (zero score), then the two hidden cases.
    assert!(report.contains("Test Case 1\nType: Sample\nScore: 0.00 points"));
    assert!(report.contains("Test Case 2 (Medium)\nType: Test Case\nScore: 37.50 points"));
    // Default weightage 25 at 75% -> 18.75.
    assert!(report.contains("Test Case 3\nType: Test Case\nScore: 18.75 points"));

    // displayInfo is whitelisted but absent from the code.
    assert!(report.contains("Missing Required Elements:"));
    assert!(report.contains("- Missing required element: displayInfo"));
    assert!(!report.contains("- Missing required element: addStudent"));

    let sections = parse_report(&report);
    for (header, body) in sections.iter() {
        assert!(
            body.starts_with(header),
            "section for {header} does not start with its own header"
        );
    }
}

#[tokio::test]
async fn sectionizer_tolerates_shuffled_and_repeated_headers() {
    let mut text = String::from("ignored preamble\n");
    // Headers out of order, one repeated.
    for header in [
        SECTION_HEADERS[3],
        SECTION_HEADERS[0],
        SECTION_HEADERS[2],
        SECTION_HEADERS[0],
        SECTION_HEADERS[1],
    ] {
        text.push_str(header);
        text.push_str("\nbody line\n");
    }

    let sections = parse_report(&text);
    for (header, body) in sections.iter() {
        assert!(body.starts_with(header));
        assert!(body.contains("body line"));
    }
    // The repeated header accumulated both of its bodies.
    assert_eq!(sections.final_score.matches("body line").count(), 2);
    assert!(!sections.ai_analysis_insights.contains("preamble"));
}
