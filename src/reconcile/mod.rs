// reconcile 模块
// 通过重读平台上已有的评论判断某个问题是否已经报告过

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{comment_key, ExistingComments, Issue};

/// Icons the bot prefixes its review comments with.
pub const COMMENT_ICONS: [&str; 3] = [":no_entry_sign:", ":warning:", ":information_source:"];

lazy_static! {
    // **Error**: / **Warning( severity 5 )**:
    static ref RE_LEVEL_LABEL: Regex =
        Regex::new(r"^\*\*(?:Error|Warning|Info)(?:\( severity \d+ \))?\*\*:?[ \t]*").unwrap();
}

/// Decides whether a candidate message matches a previously posted comment.
pub trait CommentMatcher {
    fn matches(&self, candidate: &str, existing_body: &str) -> bool;
}

/// Matches when the candidate equals or is contained in the posted message
/// once its decorations are stripped. Case-sensitive, no length floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl CommentMatcher for SubstringMatcher {
    fn matches(&self, candidate: &str, existing_body: &str) -> bool {
        let residual = strip_comment_decorations(existing_body);
        residual == candidate || residual.contains(candidate)
    }
}

/// Removes a leading bot icon and bold level label from a comment body.
///
/// Labels that do not follow the expected grammar are left in place.
pub fn strip_comment_decorations(body: &str) -> &str {
    let mut rest = body.trim_start();

    if let Some(icon) = COMMENT_ICONS.iter().find(|icon| rest.starts_with(*icon)) {
        rest = rest[icon.len()..].trim_start();
    }

    match RE_LEVEL_LABEL.find(rest) {
        Some(label) => &rest[label.end()..],
        None => rest,
    }
}

/// Looks for `candidate_message` among the comments posted on `file:line`.
pub fn was_already_reported(
    file: &str,
    line: u32,
    candidate_message: &str,
    existing_comments: &ExistingComments,
) -> bool {
    was_already_reported_with(&SubstringMatcher, file, line, candidate_message, existing_comments)
}

pub fn was_already_reported_with<M: CommentMatcher + ?Sized>(
    matcher: &M,
    file: &str,
    line: u32,
    candidate_message: &str,
    existing_comments: &ExistingComments,
) -> bool {
    let Some(comments) = existing_comments.get(&comment_key(file, line)) else {
        return false;
    };

    comments
        .iter()
        .any(|comment| matcher.matches(candidate_message, &comment.body))
}

/// Formatting of the review comments the bot posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentStyle {
    pub show_severity: bool,
}

/// Renders the body of a review comment for `issue`.
pub fn format_comment_body(issue: &Issue, style: CommentStyle) -> String {
    let label = if style.show_severity {
        format!("**{}( severity {} )**", issue.level.label(), issue.severity)
    } else {
        format!("**{}**", issue.level.label())
    };
    format!("{} {}: {}", issue.level.icon(), label, issue.message)
}
