use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::ConfigError;
use crate::skipped::MarkdownSkipCodec;

/// Configuration for files skipped because of their length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFilesConfig {
    /// Files longer than this are not analyzed
    pub max_lines: usize,
}

#[derive(Deserialize, Debug, Default)]
pub struct PartialSkippedFilesConfig {
    pub max_lines: Option<usize>,
}

impl Default for SkippedFilesConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
        }
    }
}

impl SkippedFilesConfig {
    pub fn from_partial(partial: Option<PartialSkippedFilesConfig>) -> Self {
        let partial = partial.unwrap_or_default();
        Self {
            max_lines: partial.max_lines.unwrap_or_else(default_max_lines),
        }
    }

    pub fn merge_with_env(mut self, env_map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        if let Some(raw) = env_map.get("PRSCAN_SKIP_MAX_LINES") {
            self.max_lines = raw.trim().parse().map_err(|_| ConfigError::InvalidField {
                field: "PRSCAN_SKIP_MAX_LINES".to_string(),
                value: raw.clone(),
            })?;
        }
        Ok(self)
    }

    pub fn codec(&self) -> MarkdownSkipCodec {
        MarkdownSkipCodec::for_max_lines(self.max_lines)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::InvalidField {
                field: "skipped_files.max_lines".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn default_max_lines() -> usize {
    15000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skipped::SkipStateCodec;

    #[test]
    fn test_default_prefix() {
        let config = SkippedFilesConfig::default();
        assert_eq!(
            config.codec().issue_prefix(),
            "Maximum number of lines exceeded (15000):"
        );
    }

    #[test]
    fn test_env_override() {
        let mut env_map = HashMap::new();
        env_map.insert("PRSCAN_SKIP_MAX_LINES".to_string(), "500".to_string());
        let config = SkippedFilesConfig::default().merge_with_env(&env_map).unwrap();
        assert_eq!(config.max_lines, 500);
        assert!(config.codec().decode("nothing").is_none());

        env_map.insert("PRSCAN_SKIP_MAX_LINES".to_string(), "many".to_string());
        assert!(SkippedFilesConfig::default().merge_with_env(&env_map).is_err());
    }

    #[test]
    fn test_zero_rejected() {
        let config = SkippedFilesConfig::from_partial(Some(PartialSkippedFilesConfig {
            max_lines: Some(0),
        }));
        assert!(config.validate().is_err());
    }
}
