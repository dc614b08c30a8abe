//! MCQ question-bank converter.
//!
//! Converts a plain-text question bank into the quiz system's structured JSON
//! import format. The source text is a sequence of question blocks separated by
//! a bare `---` line; each block carries a `Q<n>.` question, an optional fenced
//! code snippet, four numbered options, a `Correct answer:` line, and optional
//! `Difficulty:` and `Tags:` lines.
//!
//! Blocks are converted independently with no mutual fallback: a block missing
//! any required field is logged and dropped, never defaulted, and never affects
//! its siblings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Separator token the quiz system uses between question HTML and a code snippet.
const CODE_SEPARATOR: &str = "$$$examly";

/// One option of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqOption {
    pub text: String,
    pub media: String,
}

/// The correct answer, referenced by option text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqAnswer {
    pub args: Vec<String>,
    pub partial: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerExplanation {
    pub args: Vec<String>,
}

/// One question in the quiz system's import format.
///
/// Field set and constants mirror the import schema exactly; the many
/// always-null taxonomy fields are part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McqQuestion {
    pub question_type: String,
    pub question_data: String,
    pub options: Vec<McqOption>,
    pub answer: McqAnswer,
    pub subject_id: Option<String>,
    pub topic_id: Option<String>,
    pub sub_topic_id: Option<String>,
    pub blooms_taxonomy: Option<String>,
    pub course_outcome: Option<String>,
    pub program_outcome: Option<String>,
    pub hint: Vec<String>,
    pub answer_explanation: AnswerExplanation,
    pub manual_difficulty: String,
    pub question_editor_type: u8,
    pub linked_concepts: String,
    pub tags: Vec<String>,
    pub question_media: Vec<String>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qb_id: Option<String>,
}

static QUESTION_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q\d+\.\s*").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:java|javascript|html|typescript|cpp|csharp|js|css|sql|yaml|bash)\n(.*?)```")
        .unwrap()
});
static OPTION_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*\d+\)[ \t]*").unwrap());
static CORRECT_ANSWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Correct answer:\s*(\d+)").unwrap());
static DIFFICULTY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Difficulty:\s*(\w+)").unwrap());
static TAGS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Tags:\s*(.*)").unwrap());

/// Why a block was dropped. Logged, never raised.
#[derive(Debug, PartialEq, Eq)]
enum SkipReason {
    NoQuestionText,
    WrongOptionCount(usize),
    NoCorrectAnswer,
    AnswerOutOfRange(usize),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoQuestionText => write!(f, "no question text marker"),
            SkipReason::WrongOptionCount(n) => write!(f, "expected 4 options, found {n}"),
            SkipReason::NoCorrectAnswer => write!(f, "no correct answer line"),
            SkipReason::AnswerOutOfRange(i) => {
                write!(f, "correct answer index {} out of range", i + 1)
            }
        }
    }
}

/// Converts a question-bank text blob into import records.
///
/// Blocks are split on a bare `---` line and converted independently; a
/// malformed block is skipped with a warning and its siblings are unaffected.
/// Surviving records preserve block order.
pub fn convert(source: &str, qb_id: Option<&str>, created_by: &str) -> Vec<McqQuestion> {
    let blocks: Vec<&str> = source.split("\n---\n").collect();
    log::info!("total question blocks: {}", blocks.len());

    let mut questions = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        match convert_block(block, qb_id, created_by) {
            Ok(question) => questions.push(question),
            Err(reason) => log::warn!("question {}: {reason}; skipping", i + 1),
        }
    }

    log::info!("questions successfully processed: {}", questions.len());
    questions
}

fn convert_block(
    block: &str,
    qb_id: Option<&str>,
    created_by: &str,
) -> Result<McqQuestion, SkipReason> {
    let question_text = extract_question_text(block).ok_or(SkipReason::NoQuestionText)?;
    let code_block = extract_code_block(block);

    let mut question_data = format!("<p>{question_text}</p>");
    if let Some(code) = &code_block {
        question_data.push_str(CODE_SEPARATOR);
        question_data.push_str(code);
    }

    let mut options = extract_options(block);
    // Named policy: when more than four options are found, the first is
    // assumed to be leading noise (e.g. a numbered list inside the question
    // text) and discarded. Unverified upstream assumption; do not generalize.
    if options.len() > 4 {
        log::warn!("more than 4 options found; dropping the first");
        options.remove(0);
    }
    if options.len() != 4 {
        return Err(SkipReason::WrongOptionCount(options.len()));
    }

    let correct_index = extract_correct_index(block).ok_or(SkipReason::NoCorrectAnswer)?;
    if correct_index >= options.len() {
        return Err(SkipReason::AnswerOutOfRange(correct_index));
    }

    let difficulty = DIFFICULTY_RE
        .captures(block)
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| "Easy".to_string());

    let tags = TAGS_RE
        .captures(block)
        .map(|c| {
            c[1].split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(McqQuestion {
        question_type: "mcq_single_correct".to_string(),
        question_data,
        answer: McqAnswer {
            args: vec![options[correct_index].clone()],
            partial: Vec::new(),
        },
        options: options
            .into_iter()
            .map(|text| McqOption {
                text,
                media: String::new(),
            })
            .collect(),
        subject_id: None,
        topic_id: None,
        sub_topic_id: None,
        blooms_taxonomy: None,
        course_outcome: None,
        program_outcome: None,
        hint: Vec::new(),
        answer_explanation: AnswerExplanation { args: Vec::new() },
        manual_difficulty: difficulty,
        question_editor_type: if code_block.is_some() { 3 } else { 1 },
        linked_concepts: String::new(),
        tags,
        question_media: Vec::new(),
        created_by: created_by.to_string(),
        qb_id: qb_id.map(str::to_string),
    })
}

/// The question text runs from the `Q<n>.` marker to the first fenced code
/// block or the first `1)` option line, whichever comes first. A trailing
/// `**` emphasis marker is stripped.
fn extract_question_text(block: &str) -> Option<String> {
    let marker = QUESTION_MARKER_RE.find(block)?;
    let rest = &block[marker.end()..];

    let mut end = rest.len();
    if let Some(pos) = rest.find("\n```") {
        end = end.min(pos);
    }
    if let Some(pos) = rest.find("\n1)") {
        end = end.min(pos);
    }

    let text = rest[..end].trim();
    let text = text.strip_suffix("**").unwrap_or(text).trim_end();
    Some(text.to_string())
}

fn extract_code_block(block: &str) -> Option<String> {
    CODE_RE.captures(block).map(|c| c[1].trim().to_string())
}

/// Each option runs from its `N)` marker to the next marker, the correct-answer
/// line, or the end of the block. Empty options are discarded.
fn extract_options(block: &str) -> Vec<String> {
    let stop = CORRECT_ANSWER_RE
        .find(block)
        .map(|m| m.start())
        .unwrap_or(block.len());

    let markers: Vec<(usize, usize)> = OPTION_MARKER_RE
        .find_iter(block)
        .filter(|m| m.start() < stop)
        .map(|m| (m.start(), m.end()))
        .collect();

    markers
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, text_start))| {
            let text_end = markers.get(i + 1).map(|&(start, _)| start).unwrap_or(stop);
            let text = block[text_start..text_end].trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect()
}

/// 1-based numeral after `Correct answer:`, converted to a 0-based index.
fn extract_correct_index(block: &str) -> Option<usize> {
    CORRECT_ANSWER_RE
        .captures(block)?[1]
        .parse::<usize>()
        .ok()?
        .checked_sub(1)
}

/// Persists the records as one pretty-printed UTF-8 JSON array.
///
/// Whole-file overwrite; non-ASCII characters are written verbatim, not escaped.
pub fn save_questions(path: &Path, questions: &[McqQuestion]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(questions)?;
    fs::write(path, json)?;
    log::info!("wrote {} question(s) to {}", questions.len(), path.display());
    Ok(())
}

/// Loads previously saved records.
pub fn load_questions(path: &Path) -> anyhow::Result<Vec<McqQuestion>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
