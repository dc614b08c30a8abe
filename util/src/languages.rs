use serde::{Deserialize, Serialize};

/// Source languages the upstream platform reports for coding answers.
/// Serialized/deserialized in `lowercase` for config and payload JSON.
/// Common aliases are accepted (e.g., "js", "c#").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,       // "java"
    Python,     // "python"
    #[serde(alias = "c#")]
    CSharp,     // "csharp"
    #[serde(alias = "js")]
    JavaScript, // "javascript"
    Sql,        // "sql"
    /// Anything the platform reports that we do not recognize.
    Unknown,
}

impl Language {
    /// Resolves the upstream `language_name` string to a [`Language`].
    ///
    /// The match is exact on the names the platform actually sends; anything
    /// else becomes [`Language::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Java" => Language::Java,
            "Python" => Language::Python,
            "C#" => Language::CSharp,
            "JavaScript" => Language::JavaScript,
            "SQL" => Language::Sql,
            _ => Language::Unknown,
        }
    }

    /// The filename a submission in this language is saved under.
    ///
    /// Fixed table; unrecognized languages fall back to `main.txt`.
    pub fn submission_filename(self) -> &'static str {
        match self {
            Language::Java => "main.java",
            Language::Python => "main.py",
            Language::CSharp => "main.cs",
            Language::JavaScript => "main.js",
            Language::Sql => "query.sql",
            Language::Unknown => "main.txt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_languages_map_to_fixed_filenames() {
        assert_eq!(Language::from_name("Java").submission_filename(), "main.java");
        assert_eq!(Language::from_name("Python").submission_filename(), "main.py");
        assert_eq!(Language::from_name("C#").submission_filename(), "main.cs");
        assert_eq!(
            Language::from_name("JavaScript").submission_filename(),
            "main.js"
        );
        assert_eq!(Language::from_name("SQL").submission_filename(), "query.sql");
    }

    #[test]
    fn unknown_language_falls_back_to_main_txt() {
        assert_eq!(Language::from_name("COBOL"), Language::Unknown);
        assert_eq!(Language::from_name("COBOL").submission_filename(), "main.txt");
        assert_eq!(Language::from_name("").submission_filename(), "main.txt");
    }

    #[test]
    fn lookup_is_case_sensitive_like_the_platform() {
        // The platform sends exact names; "java" is not a recognized spelling.
        assert_eq!(Language::from_name("java"), Language::Unknown);
    }
}
