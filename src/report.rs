use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::passes::{Severity, VerifiedIssue};

pub fn generate_report(issues: &[VerifiedIssue], project_path: &Path) -> String {
    render_report(issues, project_path, Local::now())
}

pub fn render_report(
    issues: &[VerifiedIssue],
    project_path: &Path,
    generated_at: DateTime<Local>,
) -> String {
    let errors = count(issues, Severity::Error);
    let warnings = count(issues, Severity::Warning);

    let mut lines = vec![
        "# AI Linter Report".to_string(),
        String::new(),
        format!("**Project:** `{}`", project_path.display()),
        format!("**Date:** {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        format!(
            "**Found:** {} {}, {} {}",
            errors,
            plural(errors, "error"),
            warnings,
            plural(warnings, "warning")
        ),
        String::new(),
    ];

    for (severity, heading) in [(Severity::Error, "Errors"), (Severity::Warning, "Warnings")] {
        let section: Vec<&VerifiedIssue> =
            issues.iter().filter(|i| i.severity == severity).collect();
        if section.is_empty() {
            continue;
        }

        lines.push(format!("## {heading}"));
        lines.push(String::new());

        let mut by_file: BTreeMap<&str, Vec<&VerifiedIssue>> = BTreeMap::new();
        for issue in section {
            by_file.entry(issue.file.as_str()).or_default().push(issue);
        }

        for (file, file_issues) in by_file {
            lines.push(format!("### `{file}`"));
            lines.push(String::new());
            for issue in file_issues {
                lines.push(format!(
                    "- {} [{}] {}",
                    format_line_ref(&issue.line),
                    issue.rule,
                    issue.explanation
                ));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn count(issues: &[VerifiedIssue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

fn format_line_ref(line: &str) -> String {
    if line.contains('-') {
        format!("**Lines {line}**")
    } else {
        format!("**Line {line}**")
    }
}
