// 多版本扫描结果合并
// 同一行上、除版本外完全相同的问题合并为一条，消息中列出所有触发该问题的版本

use std::collections::BTreeMap;

use crate::types::Issue;
use crate::utils::escape_html;

/// Content hash of an issue, excluding anything pass-specific.
pub fn fingerprint(issue: &Issue) -> String {
    let payload = serde_json::json!({
        "message": issue.message,
        "level": issue.level,
        "severity": issue.severity,
    });
    format!("{:x}", md5::compute(payload.to_string().as_bytes()))
}

/// Issues identical apart from the pass that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedIssueGroup {
    pub fingerprint: String,
    /// Pass labels in accumulation order, without repeats
    pub versions: Vec<String>,
    pub item: Issue,
}

/// Groups per line, each line's groups in creation order.
pub type MergeGroups = BTreeMap<u32, Vec<VersionedIssueGroup>>;

/// Folds one pass's issues into `groups`.
pub fn accumulate(groups: &mut MergeGroups, version_label: &str, issues_for_pass: &BTreeMap<u32, Vec<Issue>>) {
    for (line, issues) in issues_for_pass {
        let line_groups = groups.entry(*line).or_default();

        for issue in issues {
            let fp = fingerprint(issue);
            match line_groups.iter_mut().find(|g| g.fingerprint == fp) {
                Some(group) => {
                    if !group.versions.iter().any(|v| v == version_label) {
                        group.versions.push(version_label.to_string());
                    }
                }
                None => line_groups.push(VersionedIssueGroup {
                    fingerprint: fp,
                    versions: vec![version_label.to_string()],
                    item: issue.clone(),
                }),
            }
        }
    }
}

/// Renders every group into one issue naming the versions that produced it.
pub fn finalize(groups: MergeGroups, tool: &str) -> BTreeMap<u32, Vec<Issue>> {
    groups
        .into_iter()
        .filter(|(_, line_groups)| !line_groups.is_empty())
        .map(|(line, line_groups)| {
            let rendered = line_groups
                .into_iter()
                .map(|group| {
                    let mut issue = group.item;
                    issue.message = format!(
                        "Issue {} with {} turned up: <code>{}</code>",
                        tool,
                        group.versions.join(", "),
                        escape_html(&issue.message)
                    );
                    issue.line = line;
                    issue
                })
                .collect();
            (line, rendered)
        })
        .collect()
}

/// Owns the groups of one scan target across all of its passes.
#[derive(Debug, Clone)]
pub struct VersionMerger {
    tool: String,
    groups: MergeGroups,
    passes: usize,
}

impl VersionMerger {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            groups: MergeGroups::new(),
            passes: 0,
        }
    }

    pub fn accumulate(&mut self, version_label: &str, issues_for_pass: &BTreeMap<u32, Vec<Issue>>) {
        accumulate(&mut self.groups, version_label, issues_for_pass);
        self.passes += 1;
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn group_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn finalize(self) -> BTreeMap<u32, Vec<Issue>> {
        finalize(self.groups, &self.tool)
    }
}
