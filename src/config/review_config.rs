use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::ConfigError;
use crate::issues::IgnoreList;
use crate::reconcile::CommentStyle;

/// Configuration for how issues are merged, filtered and posted
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// Label naming the versioned scan tool in merged messages
    pub merge_tool: String,
    /// Raw ignore list entries as configured
    pub ignore: Vec<String>,
    /// Whether posted comments include `( severity N )`
    pub show_severity: bool,
}

/// Partial Review Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialReviewConfig {
    pub merge_tool: Option<String>,
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
    pub show_severity: Option<bool>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            merge_tool: default_merge_tool(),
            ignore: Vec::new(),
            show_severity: default_show_severity(),
        }
    }
}

impl ReviewConfig {
    /// Create ReviewConfig from partial config with defaults
    pub fn from_partial(partial: Option<PartialReviewConfig>) -> Self {
        let partial = partial.unwrap_or_default();

        Self {
            merge_tool: partial.merge_tool.unwrap_or_else(default_merge_tool),
            ignore: partial.ignore.unwrap_or_default(),
            show_severity: partial.show_severity.unwrap_or_else(default_show_severity),
        }
    }

    /// 从环境变量合并配置
    pub fn merge_with_env(mut self, env_map: &HashMap<String, String>) -> Self {
        if let Some(tool) = env_map.get("PRSCAN_MERGE_TOOL") {
            self.merge_tool = tool.clone();
        }
        if let Some(extra) = env_map.get("PRSCAN_IGNORE_LIST") {
            self.ignore.extend(
                extra
                    .split(',')
                    .map(str::trim)
                    .filter(|entry| !entry.is_empty())
                    .map(String::from),
            );
        }
        self
    }

    pub fn ignore_list(&self) -> Result<IgnoreList, ConfigError> {
        IgnoreList::new(&self.ignore)
    }

    pub fn comment_style(&self) -> CommentStyle {
        CommentStyle {
            show_severity: self.show_severity,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.merge_tool.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                field: "review.merge_tool".to_string(),
                value: self.merge_tool.clone(),
            });
        }
        self.ignore_list().map(|_| ())
    }
}

fn default_merge_tool() -> String {
    "PHP linting".to_string()
}

fn default_show_severity() -> bool {
    false
}
