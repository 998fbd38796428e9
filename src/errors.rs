use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Ignore list entry #{0} is empty after canonicalization")]
    EmptyIgnoreEntry(usize),
    #[error("Invalid alert ignore markers: {0}")]
    InvalidMarkers(String),
    #[error("Configuration field '{field}' has invalid value '{value}'")]
    InvalidField { field: String, value: String },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to parse run description '{0}': {1}")]
    JsonParse(String, #[source] serde_json::Error),
    #[error("Issue on {file}:{line} has severity {severity}, expected 1..=10")]
    SeverityOutOfRange { file: String, line: u32, severity: u8 },
}

/// 创建输入错误（读取文件失败时附带路径上下文）
pub fn io_error(context: impl Into<String>, err: std::io::Error) -> AppError {
    AppError::IO(context.into(), err)
}
