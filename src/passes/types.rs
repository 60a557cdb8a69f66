use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Candidate violation reported by the scan pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    pub file: String,
    /// Single line ("42") or range ("20-45").
    #[serde(deserialize_with = "line_ref")]
    pub line: String,
    pub severity: Severity,
    pub rule: String,
    pub description: String,
}

/// Violation the review pass confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIssue {
    pub severity: Severity,
    pub file: String,
    #[serde(deserialize_with = "line_ref")]
    pub line: String,
    pub rule: String,
    pub explanation: String,
}

impl VerifiedIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Agents sometimes answer `"line": 42` instead of `"line": "42"`.
fn line_ref<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LineRef {
        Text(String),
        Number(u64),
    }

    Ok(match LineRef::deserialize(deserializer)? {
        LineRef::Text(text) => text.trim().to_string(),
        LineRef::Number(number) => number.to_string(),
    })
}
