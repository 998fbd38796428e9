use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::{ExistingComments, Issue};
use crate::errors::{io_error, AppError, InputError};

/// 单个扫描轮次的结果（例如某一个解释器版本的 lint 结果）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanPass {
    /// Pass label, e.g. the interpreter version `"7.4"`
    pub label: String,
    pub file: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl ScanPass {
    /// Groups the pass's issues by line, keeping report order within a line.
    pub fn by_line(&self) -> BTreeMap<u32, Vec<Issue>> {
        let mut lines: BTreeMap<u32, Vec<Issue>> = BTreeMap::new();
        for issue in &self.issues {
            lines.entry(issue.line).or_default().push(issue.clone());
        }
        lines
    }
}

/// 一次 CI 运行的完整输入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanRun {
    /// Versioned scan passes, merged per file before filtering
    #[serde(default)]
    pub passes: Vec<ScanPass>,
    /// Issues from tools that run once per file, keyed by file path
    #[serde(default)]
    pub issues: BTreeMap<String, Vec<Issue>>,
    #[serde(default)]
    pub existing_comments: ExistingComments,
    /// Bodies of all general pull request comments, oldest first
    #[serde(default)]
    pub pr_comment_bodies: Vec<String>,
    /// Files skipped in this run for exceeding the line limit
    #[serde(default)]
    pub skipped_files: Vec<String>,
}

impl ScanRun {
    /// Reads and validates a JSON run description.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| io_error(format!("reading '{}'", display), e))?;
        Self::from_json(&display, &content)
    }

    pub fn from_json(name: &str, content: &str) -> Result<Self, AppError> {
        let run: ScanRun = serde_json::from_str(content)
            .map_err(|e| InputError::JsonParse(name.to_string(), e))?;
        run.validate()?;
        Ok(run)
    }

    /// Rejects issues whose severity is outside 1..=10.
    pub fn validate(&self) -> Result<(), InputError> {
        let versioned = self
            .passes
            .iter()
            .flat_map(|pass| pass.issues.iter().map(move |issue| (&pass.file, issue)));
        let flat = self
            .issues
            .iter()
            .flat_map(|(file, issues)| issues.iter().map(move |issue| (file, issue)));

        for (file, issue) in versioned.chain(flat) {
            if !issue.has_valid_severity() {
                return Err(InputError::SeverityOutOfRange {
                    file: file.clone(),
                    line: issue.line,
                    severity: issue.severity,
                });
            }
        }
        Ok(())
    }

    /// All files mentioned by either passes or flat issues, sorted.
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .passes
            .iter()
            .map(|p| p.file.clone())
            .chain(self.issues.keys().cloned())
            .collect();
        files.sort();
        files.dedup();
        files
    }
}
