//! Extraction pipeline for coding submissions.
//!
//! Pulls the frozen result-analysis payload for one test attempt from the
//! assessment platform, decodes the coding-question submissions out of it, runs
//! each through the analyzer, and persists the combined report document.
//!
//! Failure semantics follow the pipeline contract: bad caller input and non-200
//! upstream responses abort the run; a single question that fails to decode is
//! skipped with a warning and never takes the batch down with it.

use analyzer::error::AnalyzerError;
use analyzer::insight::Insight;
use analyzer::types::Submission;
use analyzer::{AnalysisJob, report};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use util::config::AppConfig;
use util::languages::Language;

/// The canned analysis-focus prompts offered by the front end, in menu order.
pub const FOCUS_PROMPTS: [&str; 5] = [
    "Check why the testcase failed, give in 3 lines",
    "Check if the code has logical errors and syntax issues only",
    "Verify if the code meets the basic requirements and handles edge cases",
    "Identify any missing critical functionality",
    "Check for proper error handling and validation",
];

/// Section tag the platform uses for coding questions.
const CODING_SECTION: &str = "COD";

/// Extracts the test identifier from a result URL.
///
/// The identifier is everything after the literal `testId=`. A URL without the
/// marker, or with nothing after it, is rejected before any network call.
pub fn parse_test_id(url: &str) -> Result<String, AnalyzerError> {
    match url.split_once("testId=") {
        Some((_, id)) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(AnalyzerError::InvalidInput(format!(
            "no testId= parameter in URL: {url}"
        ))),
    }
}

/// Fetches the frozen result-analysis payload for a test attempt.
///
/// One POST, no retry; any non-success status aborts the run with the status
/// code surfaced verbatim.
pub async fn fetch_result_analysis(
    client: &reqwest::Client,
    auth_token: &str,
    test_id: &str,
) -> Result<Value> {
    let api_url = AppConfig::global().examly_api_url.clone();

    let response = client
        .post(&api_url)
        .header("accept", "application/json, text/plain, */*")
        .header("authorization", auth_token)
        .json(&json!({ "id": test_id }))
        .send()
        .await
        .with_context(|| format!("POST {api_url}"))?;

    let status = response.status();
    if !status.is_success() {
        return Err(
            AnalyzerError::Upstream(format!("Error: Status code {}", status.as_u16())).into(),
        );
    }

    response
        .json::<Value>()
        .await
        .context("decoding result-analysis payload")
}

/// Walks the payload and collects one [`Submission`] per decodable coding question.
///
/// Sections are filtered on the `"COD"` tag; a question whose answer is absent
/// or fails the second-stage decode is skipped, not an error for the batch.
pub fn collect_submissions(payload: &Value) -> Vec<Submission> {
    let mut submissions = Vec::new();

    let Some(sections) = payload["frozen_test_data"].as_array() else {
        log::warn!("payload has no frozen_test_data array");
        return submissions;
    };

    for section in sections {
        if section["name"].as_str() != Some(CODING_SECTION) {
            continue;
        }
        let questions = section["questions"].as_array().map_or(&[][..], Vec::as_slice);
        log::debug!("coding section with {} question(s)", questions.len());

        for (i, question) in questions.iter().enumerate() {
            match decode_submission(question) {
                Some(submission) => submissions.push(submission),
                None => log::warn!("skipping coding question {} (no decodable answer)", i + 1),
            }
        }
    }

    log::info!("extracted {} coding submission(s)", submissions.len());
    submissions
}

/// Two-stage decode of one question's answer.
///
/// Stage one picks the raw answer string (`student_questions.answer`, falling
/// back to `student_questions.l_event_data.answer` when empty). Stage two
/// parses that string, which is itself JSON, for the language name and code.
fn decode_submission(question: &Value) -> Option<Submission> {
    let student = &question["student_questions"];
    let raw = non_empty_str(&student["answer"])
        .or_else(|| non_empty_str(&student["l_event_data"]["answer"]))?;

    let decoded: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("answer payload is not valid JSON: {err}");
            return None;
        }
    };

    let language = decoded["language_name"]
        .as_str()
        .unwrap_or("Unknown")
        .to_string();
    let filename = Language::from_name(&language)
        .submission_filename()
        .to_string();
    let content = decoded["answer"].as_str().unwrap_or("").to_string();

    Some(Submission {
        language,
        filename,
        content,
        question: question.clone(),
    })
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Analyzes every submission and assembles the combined report document.
///
/// Per-submission block: question number, language, filename, the submitted
/// code, then the analyzer's report, closed by a 50-character divider.
pub async fn analyze_submissions(
    submissions: &[Submission],
    focus_prompt: &str,
    insight: &(dyn Insight + Send + Sync),
) -> String {
    let mut document = String::new();

    for (i, submission) in submissions.iter().enumerate() {
        document.push_str(&format!("\nQuestion {}:\n", i + 1));
        document.push_str(&format!("Language: {}\n", submission.language));
        document.push_str(&format!("File: {}\n", submission.filename));
        document.push_str("\nStudent's Code:\n");
        document.push_str("-------------\n");
        document.push_str(&submission.content);
        document.push_str("\n\nAnalysis Report:\n");
        document.push_str("---------------\n");

        let report = AnalysisJob::new(submission, focus_prompt)
            .with_insight(insight)
            .run()
            .await;
        document.push_str(&report);
        document.push('\n');
        document.push_str(&"=".repeat(50));
        document.push('\n');
    }

    document
}

/// End-to-end run: fetch, decode, analyze, persist, return.
///
/// The report document is written to `AppConfig.report_output_path` as one
/// whole-file overwrite before this returns, so repeated runs are idempotent
/// at the file level.
pub async fn run(
    url: &str,
    auth_token: &str,
    focus_prompt: &str,
    insight: &(dyn Insight + Send + Sync),
) -> Result<(Vec<Submission>, String)> {
    if auth_token.trim().is_empty() {
        return Err(AnalyzerError::InvalidInput("authorization token is empty".to_string()).into());
    }
    let test_id = parse_test_id(url)?;
    log::info!("extracted test id {test_id}");

    let client = reqwest::Client::new();
    let payload = fetch_result_analysis(&client, auth_token, &test_id).await?;
    let submissions = collect_submissions(&payload);

    let document = analyze_submissions(&submissions, focus_prompt, insight).await;

    let out_path = AppConfig::global().report_output_path.clone();
    fs::write(&out_path, &document)
        .map_err(AnalyzerError::from)
        .with_context(|| format!("writing report to {out_path}"))?;
    log::info!("analysis report written to {out_path}");

    Ok((submissions, document))
}

/// Renders the four report sections for terminal display.
pub fn render_sections(document: &str) -> String {
    let sections = report::parse_report(document);
    let mut out = String::new();
    for (header, body) in sections.iter() {
        out.push_str(&format!("--- {header}\n"));
        out.push_str(body);
        out.push('\n');
    }
    out
}
