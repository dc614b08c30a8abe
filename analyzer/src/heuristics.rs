//! Code heuristics checker.
//!
//! Scans submitted code text for a small fixed set of hard-coded anti-patterns
//! and checks that every whitelist term appears verbatim. This is deliberate,
//! simple substring matching, not static analysis; no syntax tree of the target
//! language is ever built. Rules are independent and order-insensitive, so new
//! ones can be appended without touching existing behavior.

use crate::types::{CodeAnalysis, Requirements};

/// A literal anti-pattern rule: when `matches` fires on the code text, `issue`
/// is reported.
struct AntiPattern {
    matches: fn(&str) -> bool,
    issue: &'static str,
}

const ANTI_PATTERNS: [AntiPattern; 2] = [
    AntiPattern {
        matches: |code| code.contains("Student[] students = new Student"),
        issue: "Constructor creates local variables instead of initializing instance variables",
    },
    AntiPattern {
        matches: |code| code.contains("int count = 0") && !code.contains("this.count = 0"),
        issue: "Count variable initialized locally instead of as instance variable",
    },
];

/// Runs all heuristic checks against the submitted code.
///
/// Pure function: same code and requirements always produce the same findings.
pub fn analyze_code(code: &str, requirements: &Requirements) -> CodeAnalysis {
    let mut analysis = CodeAnalysis::default();

    for rule in &ANTI_PATTERNS {
        if (rule.matches)(code) {
            analysis.potential_issues.push(rule.issue.to_string());
        }
    }

    for term in &requirements.whitelist {
        if !code.contains(term.as_str()) {
            analysis
                .whitelist_violations
                .push(format!("Missing required element: {term}"));
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_code_produces_no_findings() {
        let analysis = analyze_code("public class Main {}", &Requirements::default());
        assert!(analysis.is_clean());
    }

    #[test]
    fn local_student_array_is_flagged() {
        let code = "Student[] students = new Student[10];";
        let analysis = analyze_code(code, &Requirements::default());
        assert_eq!(
            analysis.potential_issues,
            vec!["Constructor creates local variables instead of initializing instance variables"]
        );
    }

    #[test]
    fn local_count_is_flagged_unless_assigned_to_instance() {
        let local = analyze_code("int count = 0;", &Requirements::default());
        assert_eq!(local.potential_issues.len(), 1);

        let instance = analyze_code("int count = 0; this.count = 0;", &Requirements::default());
        assert!(instance.potential_issues.is_empty());
    }

    #[test]
    fn missing_whitelist_terms_are_reported_verbatim() {
        let requirements = Requirements {
            whitelist: vec!["addStudent".to_string(), "displayInfo".to_string()],
            ..Requirements::default()
        };
        let analysis = analyze_code("void addStudent() {}", &requirements);
        assert_eq!(
            analysis.whitelist_violations,
            vec!["Missing required element: displayInfo"]
        );
    }

    #[test]
    fn whitelist_match_is_exact_substring() {
        let requirements = Requirements {
            whitelist: vec!["displayInfo".to_string()],
            ..Requirements::default()
        };
        // Case differs, so the term is missing.
        let analysis = analyze_code("void displayinfo() {}", &requirements);
        assert_eq!(analysis.whitelist_violations.len(), 1);
    }
}
