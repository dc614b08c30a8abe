//! Requirements projection.
//!
//! Projects a [`Requirements`] record out of the opaque per-question metadata
//! using fixed JSON paths. The projection is infallible: any missing or
//! mistyped path yields an empty string or list rather than an error, since a
//! question with sparse metadata must still be analyzable.

use crate::types::Requirements;
use serde_json::Value;

/// Builds the [`Requirements`] for a question.
///
/// Paths, per the upstream schema:
/// - `question_data` (the question statement, HTML)
/// - `programming_question.input_format`
/// - `programming_question.output_format`
/// - `programming_question.code_constraints`
/// - `programming_question.solution[0].whitelist[0].list` (required code elements)
pub fn extract_requirements(question: &Value) -> Requirements {
    let prog = &question["programming_question"];
    Requirements {
        question_text: str_at(&question["question_data"]),
        input_format: str_at(&prog["input_format"]),
        output_format: str_at(&prog["output_format"]),
        constraints: str_at(&prog["code_constraints"]),
        whitelist: extract_whitelist(prog),
    }
}

fn str_at(value: &Value) -> String {
    value.as_str().unwrap_or("").to_string()
}

/// Whitelist terms live one level inside the first solution entry.
fn extract_whitelist(prog: &Value) -> Vec<String> {
    prog["solution"][0]["whitelist"][0]["list"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projects_all_fixed_paths() {
        let question = json!({
            "question_data": "<p>Implement a queue.</p>",
            "programming_question": {
                "input_format": "One integer per line",
                "output_format": "The queue contents",
                "code_constraints": "No recursion",
                "solution": [{
                    "whitelist": [{"list": ["enqueue", "dequeue"]}]
                }]
            }
        });

        let req = extract_requirements(&question);
        assert_eq!(req.question_text, "<p>Implement a queue.</p>");
        assert_eq!(req.input_format, "One integer per line");
        assert_eq!(req.output_format, "The queue contents");
        assert_eq!(req.constraints, "No recursion");
        assert_eq!(req.whitelist, vec!["enqueue", "dequeue"]);
    }

    #[test]
    fn missing_paths_project_to_empty() {
        let req = extract_requirements(&json!({}));
        assert_eq!(req.question_text, "");
        assert_eq!(req.input_format, "");
        assert!(req.whitelist.is_empty());
    }

    #[test]
    fn non_string_whitelist_entries_are_dropped() {
        let question = json!({
            "programming_question": {
                "solution": [{"whitelist": [{"list": ["addStudent", 42, null]}]}]
            }
        });
        assert_eq!(extract_requirements(&question).whitelist, vec!["addStudent"]);
    }
}
