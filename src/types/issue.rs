use serde::{Deserialize, Serialize};

/// 问题级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueLevel {
    Error,
    Warning,
    Info,
}

impl IssueLevel {
    /// Label used in posted comment bodies, e.g. `**Warning**`
    pub fn label(&self) -> &'static str {
        match self {
            IssueLevel::Error => "Error",
            IssueLevel::Warning => "Warning",
            IssueLevel::Info => "Info",
        }
    }

    /// Emoji shortcode the bot prefixes its comments with
    pub fn icon(&self) -> &'static str {
        match self {
            IssueLevel::Error => ":no_entry_sign:",
            IssueLevel::Warning => ":warning:",
            IssueLevel::Info => ":information_source:",
        }
    }
}

impl std::str::FromStr for IssueLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(IssueLevel::Error),
            "warning" => Ok(IssueLevel::Warning),
            "info" => Ok(IssueLevel::Info),
            _ => Err(format!("Invalid issue level: {}", s)),
        }
    }
}

impl std::fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueLevel::Error => write!(f, "ERROR"),
            IssueLevel::Warning => write!(f, "WARNING"),
            IssueLevel::Info => write!(f, "INFO"),
        }
    }
}

/// 扫描发现的问题
///
/// Compared field by field for exact-duplicate detection, so every field
/// takes part in `PartialEq` and `Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// 问题描述
    pub message: String,
    /// 级别
    pub level: IssueLevel,
    /// 严重程度 (1..=10)
    pub severity: u8,
    /// 产生该问题的规则或工具
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// 是否可自动修复
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixable: Option<bool>,
    /// 行号
    pub line: u32,
    /// 列号
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

pub const MIN_SEVERITY: u8 = 1;
pub const MAX_SEVERITY: u8 = 10;

impl Issue {
    pub fn new(message: impl Into<String>, level: IssueLevel, severity: u8, line: u32) -> Self {
        Self {
            message: message.into(),
            level,
            severity,
            source: None,
            fixable: None,
            line,
            column: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }

    pub fn with_fixable(mut self, fixable: bool) -> Self {
        self.fixable = Some(fixable);
        self
    }

    pub fn has_valid_severity(&self) -> bool {
        (MIN_SEVERITY..=MAX_SEVERITY).contains(&self.severity)
    }
}
