// skipped 模块
// 因超长而跳过分析的文件列表：渲染到 PR 评论中，并在下一次运行时从历史评论中恢复

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Heading that marks a skipped-files section inside a comment body.
pub const SKIPPED_FILES_MARKER: &str = "**skipped-files**";

/// Closing sentence of every rendered skipped-files section.
pub const SKIPPED_FILES_NOTE: &str =
    "Note that the above file(s) were not analyzed due to their length.";

/// The only category currently produced: files over the line limit.
pub const MAX_LINES_CATEGORY: &str = "max-lines";

const LIST_ITEM_PREFIX: &str = " - ";

/// Header line listing the files over `max_lines`.
pub fn max_lines_prefix(max_lines: usize) -> String {
    format!("Maximum number of lines exceeded ({}):", max_lines)
}

/// 被跳过文件的累计记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFilesReport {
    pub total: usize,
    /// Files per category, first-seen order, no repeats
    pub issues: BTreeMap<String, Vec<String>>,
}

impl SkippedFilesReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single-category report from a list of paths.
    pub fn from_files<I, S>(category: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = Self::new();
        for file in files {
            report.record(category, file);
        }
        report
    }

    /// Adds one skipped file. Returns false when it was already recorded.
    pub fn record(&mut self, category: &str, file: impl Into<String>) -> bool {
        let file = file.into();
        let files = self.issues.entry(category.to_string()).or_default();
        if files.contains(&file) {
            return false;
        }
        files.push(file);
        self.total += 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.issues.values().all(Vec::is_empty)
    }

    /// All files, category by category, without repeats.
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        for file in self.issues.values().flatten() {
            if !files.contains(file) {
                files.push(file.clone());
            }
        }
        files
    }

    pub fn contains(&self, file: &str) -> bool {
        self.issues.values().any(|files| files.iter().any(|f| f == file))
    }
}

/// Merges two reports: totals add up, file lists are unioned per category
/// with `incoming` files appended after `current` ones.
pub fn combine(current: &SkippedFilesReport, incoming: &SkippedFilesReport) -> SkippedFilesReport {
    let mut combined = current.clone();
    combined.total = current.total + incoming.total;

    for (category, files) in &incoming.issues {
        let target = combined.issues.entry(category.clone()).or_default();
        for file in files {
            if !target.contains(file) {
                target.push(file.clone());
            }
        }
    }

    combined
}

/// Renders the fixed Markdown block posted as a pull request comment.
pub fn render(report: &SkippedFilesReport, issue_prefix: &str) -> String {
    let mut body = format!("\n{}\n\n{}\n", SKIPPED_FILES_MARKER, issue_prefix);
    for file in report.files() {
        body.push_str(LIST_ITEM_PREFIX);
        body.push_str(&file);
        body.push('\n');
    }
    body.push('\n');
    body.push_str(SKIPPED_FILES_NOTE);
    body
}

/// Returns the file-list lines following `issue_prefix` inside the
/// skipped-files section, or an empty string when there is none.
pub fn extract_message_section(comment_body: &str, issue_prefix: &str) -> String {
    let Some(marker_at) = comment_body.find(SKIPPED_FILES_MARKER) else {
        return String::new();
    };
    let after_marker = &comment_body[marker_at + SKIPPED_FILES_MARKER.len()..];

    let mut lines = after_marker.lines().map(|l| l.trim_end_matches('\r'));
    if !lines.by_ref().any(|l| l.trim() == issue_prefix.trim()) {
        return String::new();
    }

    lines
        .take_while(|l| !l.trim().is_empty())
        .filter(|l| l.starts_with(LIST_ITEM_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recovers the file paths listed in a rendered skipped-files section.
pub fn parse(comment_body: &str, issue_prefix: &str) -> Vec<String> {
    extract_message_section(comment_body, issue_prefix)
        .lines()
        .filter_map(|l| l.strip_prefix(LIST_ITEM_PREFIX))
        .map(str::to_string)
        .filter(|path| !path.is_empty())
        .collect()
}

/// Encodes skipped-file state into comment text and back.
pub trait SkipStateCodec {
    fn encode(&self, report: &SkippedFilesReport) -> String;

    /// `None` when `body` carries no skipped-files state.
    fn decode(&self, body: &str) -> Option<SkippedFilesReport>;

    /// Decodes the most recent comment carrying state. `bodies` is oldest first.
    fn recover_from_comments(&self, bodies: &[String]) -> Option<SkippedFilesReport> {
        bodies.iter().rev().find_map(|body| self.decode(body))
    }
}

/// Markdown template codec used for pull request comments.
#[derive(Debug, Clone)]
pub struct MarkdownSkipCodec {
    issue_prefix: String,
    category: String,
}

impl MarkdownSkipCodec {
    pub fn new(issue_prefix: impl Into<String>) -> Self {
        Self {
            issue_prefix: issue_prefix.into(),
            category: MAX_LINES_CATEGORY.to_string(),
        }
    }

    pub fn for_max_lines(max_lines: usize) -> Self {
        Self::new(max_lines_prefix(max_lines))
    }

    pub fn issue_prefix(&self) -> &str {
        &self.issue_prefix
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl SkipStateCodec for MarkdownSkipCodec {
    fn encode(&self, report: &SkippedFilesReport) -> String {
        render(report, &self.issue_prefix)
    }

    fn decode(&self, body: &str) -> Option<SkippedFilesReport> {
        let files = parse(body, &self.issue_prefix);
        if files.is_empty() {
            return None;
        }
        Some(SkippedFilesReport::from_files(&self.category, files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "Maximum number of lines exceeded (15000):";

    #[test]
    fn test_render_exact_template() {
        let report = SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["a.php", "b/c.php"]);
        assert_eq!(
            render(&report, PREFIX),
            "\n**skipped-files**\n\nMaximum number of lines exceeded (15000):\n - a.php\n - b/c.php\n\nNote that the above file(s) were not analyzed due to their length."
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let report = SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["z.php", "a.php", "m/n.php"]);
        assert_eq!(parse(&render(&report, PREFIX), PREFIX), report.files());
    }

    #[test]
    fn test_parse_keeps_trailing_whitespace_in_paths() {
        let report = SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["docs/notes.php ", "a.php"]);
        assert_eq!(
            parse(&render(&report, PREFIX), PREFIX),
            vec!["docs/notes.php ".to_string(), "a.php".to_string()]
        );
    }

    #[test]
    fn test_parse_absent_marker() {
        assert!(parse("Just a regular comment", PREFIX).is_empty());
        assert!(parse("**skipped-files**\n\nSomething else:\n - a.php\n", PREFIX).is_empty());
        assert_eq!(extract_message_section("nothing here", PREFIX), "");
    }

    #[test]
    fn test_parse_stops_at_blank_line() {
        let body = "intro\n**skipped-files**\n\nMaximum number of lines exceeded (15000):\n - a.php\n - b.php\n\n - not-a-file.php\n";
        assert_eq!(parse(body, PREFIX), vec!["a.php".to_string(), "b.php".to_string()]);
        assert_eq!(extract_message_section(body, PREFIX), " - a.php\n - b.php");
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let body = "\r\n**skipped-files**\r\n\r\nMaximum number of lines exceeded (15000):\r\n - a.php\r\n\r\nNote";
        assert_eq!(parse(body, PREFIX), vec!["a.php".to_string()]);
    }

    #[test]
    fn test_combine_unions_and_sums() {
        let current = SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["a.php", "b.php"]);
        let incoming = SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["b.php", "c.php"]);
        let combined = combine(&current, &incoming);
        assert_eq!(combined.total, 4);
        assert_eq!(
            combined.issues[MAX_LINES_CATEGORY],
            vec!["a.php".to_string(), "b.php".to_string(), "c.php".to_string()]
        );
    }

    #[test]
    fn test_combine_keeps_categories_apart() {
        let current = SkippedFilesReport::from_files("max-lines", ["a.php"]);
        let incoming = SkippedFilesReport::from_files("binary", ["a.php"]);
        let combined = combine(&current, &incoming);
        assert_eq!(combined.issues.len(), 2);
        assert_eq!(combined.files(), vec!["a.php".to_string()]);
    }

    #[test]
    fn test_record_reports_new_files() {
        let mut report = SkippedFilesReport::new();
        assert!(report.record(MAX_LINES_CATEGORY, "a.php"));
        assert!(!report.record(MAX_LINES_CATEGORY, "a.php"));
        assert_eq!(report.total, 1);
        assert!(report.contains("a.php"));
    }

    #[test]
    fn test_codec_recovers_latest_comment() {
        let codec = MarkdownSkipCodec::for_max_lines(15000);
        let older = codec.encode(&SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["a.php"]));
        let newer = codec.encode(&SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["a.php", "b.php"]));
        let bodies = vec![older, "LGTM".to_string(), newer, "thanks!".to_string()];

        let recovered = codec.recover_from_comments(&bodies).unwrap();
        assert_eq!(recovered.files(), vec!["a.php".to_string(), "b.php".to_string()]);
        assert_eq!(recovered.total, 2);
        assert!(codec.recover_from_comments(&["LGTM".to_string()]).is_none());
    }

    #[test]
    fn test_codec_ignores_other_thresholds() {
        let codec = MarkdownSkipCodec::for_max_lines(15000);
        let body = render(&SkippedFilesReport::from_files(MAX_LINES_CATEGORY, ["a.php"]), &max_lines_prefix(500));
        assert!(codec.decode(&body).is_none());
    }
}
