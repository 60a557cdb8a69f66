use super::types::RawIssue;

pub fn build_first_pass_prompt(rules_content: &str) -> String {
    format!(
        r#"You are an AI linter. Your task is to check the code in the current directory against the rules described below.

RULES:
---
{rules_content}
---

Instructions:
1. Examine files in the current directory and subdirectories
2. Check the code against each rule
3. For each violation, determine the severity:
   - "error" — explicit violation of a prohibition or mandatory requirement
   - "warning" — violation of a recommendation or potential issue

Return ONLY valid JSON (no markdown):
{{
  "issues": [
    {{
      "file": "path/to/file.ts",
      "line": "42",
      "severity": "error",
      "rule": "short rule name",
      "description": "what is wrong (1 sentence)"
    }}
  ]
}}

The "line" field can be a single line ("42") or a range ("20-45").

If there are no violations, return: {{"issues": []}}"#
    )
}

pub fn build_second_pass_prompt(issue: &RawIssue, rules_content: &str) -> String {
    format!(
        r#"You are an experienced code reviewer. Your task is to verify the rule violation found in the code against the rules described below.
Rules that have "Must" or "Have to" in it considered mandatory.
Rules with "Should" are recommendations.

RULES:
---
{rules_content}
---

REPORTED ISSUE:
---
- File: {file}
- Line: {line}
- Severity: {severity}
- Rule: {rule}
- Description: {description}
---

Instructions:
1. Read the file mentioned in the reported issue
2. Analyze whether the described violation actually exists

Return ONLY valid JSON (no markdown).

If the violation IS confirmed:
{{
  "confirmed": true,
  "severity": "error",
  "file": "path/to/file.ts",
  "line": "42",
  "rule": "short rule name",
  "explanation": "detailed explanation of the violation and how to fix it (2-3 sentences)"
}}

The "severity" field is "error" or "warning". The "line" field can be a single line ("42") or a range ("20-45").

If the violation is NOT confirmed (false positive), return: {{"confirmed": false}}"#,
        file = issue.file,
        line = issue.line,
        severity = issue.severity,
        rule = issue.rule,
        description = issue.description,
    )
}
