use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 平台上已存在的评论（只读）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingComment {
    pub body: String,
}

impl ExistingComment {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Existing review comments keyed by `"file:line"`.
pub type ExistingComments = HashMap<String, Vec<ExistingComment>>;

/// Builds the `"file:line"` key existing comments are grouped under.
pub fn comment_key(file: &str, line: u32) -> String {
    format!("{}:{}", file, line)
}

/// 待发布的评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingComment {
    pub file: String,
    pub line: u32,
    pub body: String,
}
