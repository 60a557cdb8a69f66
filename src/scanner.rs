use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::{DirEntry, WalkDir};

pub const RULE_FILE_NAME: &str = ".ai-linter.md";

const SKIPPED_DIRS: &[&str] = &["node_modules"];

/// A rules file and the directory its rules apply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFile {
    pub path: PathBuf,
    pub dir: PathBuf,
    pub content: String,
}

/// Finds every rules file under `project_path`, sorted by path.
pub fn scan_for_rule_files(project_path: &Path) -> Result<Vec<RuleFile>> {
    let root = project_path
        .canonicalize()
        .with_context(|| format!("Project path {} does not exist", project_path.display()))?;

    let mut rule_files = Vec::new();
    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed walking {}", root.display()))?;
        if !entry.file_type().is_file() || entry.file_name() != RULE_FILE_NAME {
            continue;
        }

        let path = entry.into_path();
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed reading rules from {}", path.display()))?;
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.clone());

        rule_files.push(RuleFile { path, dir, content });
    }

    rule_files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(rule_files)
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}
