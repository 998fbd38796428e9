// 报告引擎
// 扫描结果 → 多版本合并 → 忽略列表过滤 → 去重 → 与已有评论对账 → 待发布评论

use serde::Serialize;
use std::collections::BTreeMap;

use crate::alerts::AlertQueue;
use crate::config::AppConfig;
use crate::errors::ConfigError;
use crate::issues::{filter_ignorable, suppress_duplicates, IgnoreList, VersionMerger};
use crate::logging::OperationTimer;
use crate::reconcile::{format_comment_body, was_already_reported_with, CommentMatcher, CommentStyle, SubstringMatcher};
use crate::skipped::{combine, MarkdownSkipCodec, SkipStateCodec, SkippedFilesReport};
use crate::types::{Issue, PendingComment, ScanRun};

/// Counters describing what happened to the issues of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    /// Issues left after merging versioned passes and adding flat issues
    pub merged: usize,
    pub ignored: usize,
    pub duplicates: usize,
    pub already_reported: usize,
    pub to_post: usize,
}

/// 本次运行的发布计划
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportPlan {
    pub comments: Vec<PendingComment>,
    /// New skipped-files comment, only when this run skipped new files
    pub skipped_files_comment: Option<String>,
    /// Previous report combined with this run's. `total` counts skip events
    /// across runs, so a file skipped again is counted again while its path
    /// is listed once.
    pub skipped_files: SkippedFilesReport,
    pub stats: PlanStats,
}

impl ReportPlan {
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.skipped_files_comment.is_none()
    }
}

/// Turns a scan run into the comments that still need posting.
pub struct ReportingEngine<M = SubstringMatcher> {
    merge_tool: String,
    ignore_list: IgnoreList,
    style: CommentStyle,
    codec: MarkdownSkipCodec,
    matcher: M,
}

impl ReportingEngine<SubstringMatcher> {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            merge_tool: config.review.merge_tool.clone(),
            ignore_list: config.review.ignore_list()?,
            style: config.review.comment_style(),
            codec: config.skipped_files.codec(),
            matcher: SubstringMatcher,
        })
    }
}

impl<M: CommentMatcher> ReportingEngine<M> {
    /// Swaps the comment matcher used for reconciliation.
    pub fn with_matcher<N: CommentMatcher>(self, matcher: N) -> ReportingEngine<N> {
        ReportingEngine {
            merge_tool: self.merge_tool,
            ignore_list: self.ignore_list,
            style: self.style,
            codec: self.codec,
            matcher,
        }
    }

    pub fn codec(&self) -> &MarkdownSkipCodec {
        &self.codec
    }

    pub fn plan(&self, run: &ScanRun, alerts: &mut AlertQueue) -> ReportPlan {
        let timer = OperationTimer::new("plan");
        let mut plan = ReportPlan::default();

        for file in run.files() {
            let issues = self.collect_file_issues(run, &file);
            plan.stats.merged += issues.len();

            let before_ignore = issues.len();
            let issues = filter_ignorable(issues, &self.ignore_list);
            plan.stats.ignored += before_ignore - issues.len();

            let before_dedup = issues.len();
            let issues = suppress_duplicates(issues);
            plan.stats.duplicates += before_dedup - issues.len();

            for issue in issues {
                if was_already_reported_with(&self.matcher, &file, issue.line, &issue.message, &run.existing_comments) {
                    tracing::debug!(file = %file, line = issue.line, "Issue already reported, skipping");
                    plan.stats.already_reported += 1;
                    continue;
                }
                plan.comments.push(PendingComment {
                    file: file.clone(),
                    line: issue.line,
                    body: format_comment_body(&issue, self.style),
                });
            }
        }
        plan.stats.to_post = plan.comments.len();

        self.plan_skipped_files(run, &mut plan, alerts);

        tracing::info!(
            merged = plan.stats.merged,
            ignored = plan.stats.ignored,
            duplicates = plan.stats.duplicates,
            already_reported = plan.stats.already_reported,
            to_post = plan.stats.to_post,
            "评论发布计划已生成"
        );
        if plan.stats.to_post > 0 {
            alerts.enqueue(format!("Posting {} new review comment(s)", plan.stats.to_post));
        }

        timer.finish();
        plan
    }

    /// Merged versioned issues of `file` followed by its flat issues.
    fn collect_file_issues(&self, run: &ScanRun, file: &str) -> Vec<Issue> {
        let mut merger = VersionMerger::new(self.merge_tool.clone());
        for pass in run.passes.iter().filter(|p| p.file == file) {
            merger.accumulate(&pass.label, &pass.by_line());
        }

        let mut issues: Vec<Issue> = Vec::new();
        if merger.passes() > 0 {
            tracing::debug!(
                file = %file,
                passes = merger.passes(),
                groups = merger.group_count(),
                "Versioned passes merged"
            );
            let merged: BTreeMap<u32, Vec<Issue>> = merger.finalize();
            issues.extend(merged.into_values().flatten());
        }
        if let Some(flat) = run.issues.get(file) {
            issues.extend(flat.iter().cloned());
        }
        issues
    }

    fn plan_skipped_files(&self, run: &ScanRun, plan: &mut ReportPlan, alerts: &mut AlertQueue) {
        let previous = self
            .codec
            .recover_from_comments(&run.pr_comment_bodies)
            .unwrap_or_default();
        let current = SkippedFilesReport::from_files(self.codec.category(), run.skipped_files.iter().cloned());

        let new_files: Vec<String> = current
            .files()
            .into_iter()
            .filter(|f| !previous.contains(f))
            .collect();

        plan.skipped_files = combine(&previous, &current);

        if new_files.is_empty() {
            return;
        }

        tracing::info!(count = new_files.len(), "New files skipped due to their length");
        alerts.enqueue(format!(
            "Skipped {} file(s) due to their length: {}",
            new_files.len(),
            new_files.join(", ")
        ));
        plan.skipped_files_comment = Some(self.codec.encode(&plan.skipped_files));
    }
}
