//! Test case extraction.
//!
//! Both test-case populations arrive double-encoded: `programming_question.sample_io`
//! and `programming_question.testcases` are JSON-encoded strings nested inside the
//! JSON payload. Each population goes through an explicit two-stage decode (read the
//! string field, then parse it), and a decode failure drops only that population;
//! the merged sequence is whatever survived, samples first.

use crate::types::{TestCase, TestCaseKind};
use serde_json::Value;

/// Default weightage for a hidden case when the payload assigns no score.
const DEFAULT_WEIGHTAGE: f64 = 25.0;

/// Extracts the merged test-case sequence for a question.
///
/// Order is sample cases first, then hidden cases, preserving source order
/// within each group. Sample cases always carry weightage 0.
pub fn extract_test_cases(question: &Value) -> Vec<TestCase> {
    let prog = &question["programming_question"];
    let mut cases = Vec::new();

    for item in decode_population(&prog["sample_io"], "sample_io") {
        cases.push(TestCase {
            input: str_field(&item, "input"),
            output: str_field(&item, "output"),
            kind: TestCaseKind::Sample,
            difficulty: None,
            weightage: 0.0,
        });
    }

    for item in decode_population(&prog["testcases"], "testcases") {
        cases.push(TestCase {
            input: str_field(&item, "input"),
            output: str_field(&item, "output"),
            kind: TestCaseKind::Hidden,
            difficulty: item["difficulty"]
                .as_str()
                .filter(|d| !d.is_empty() && *d != "Unknown")
                .map(str::to_string),
            weightage: item["score"].as_f64().unwrap_or(DEFAULT_WEIGHTAGE),
        });
    }

    cases
}

/// Stage one reads the string field; stage two parses the JSON array inside it.
/// Either stage failing yields an empty population, not an error.
fn decode_population(field: &Value, name: &str) -> Vec<Value> {
    let Some(raw) = field.as_str() else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            log::warn!("{name} decoded to a non-array value; dropping population");
            Vec::new()
        }
        Err(err) => {
            log::warn!("{name} is not valid JSON ({err}); dropping population");
            Vec::new()
        }
    }
}

fn str_field(item: &Value, key: &str) -> String {
    item[key].as_str().unwrap_or("").to_string()
}
