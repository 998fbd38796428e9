use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

use crate::errors::ConfigError;

use super::{
    alert_config::{AlertConfig, PartialAlertConfig},
    loader::ConfigLoader,
    review_config::{PartialReviewConfig, ReviewConfig},
    skipped_config::{PartialSkippedFilesConfig, SkippedFilesConfig},
};

// Configuration location constants
pub const USER_CONFIG_PATH: &str = "~/.config/prscan";

// Configuration file names
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variables are only read when they carry this prefix
pub const ENV_PREFIX: &str = "PRSCAN_";

/// Main Application Configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub review: ReviewConfig,
    pub skipped_files: SkippedFilesConfig,
    pub alerts: AlertConfig,
}

/// Partial Application Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    review: Option<PartialReviewConfig>,
    skipped_files: Option<PartialSkippedFilesConfig>,
    alerts: Option<PartialAlertConfig>,
}

impl AppConfig {
    /// Load configuration from the default location and environment
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load_config()
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        ConfigLoader::with_config_file(path).load_config()
    }

    /// Create AppConfig from partial config and environment
    pub fn from_partial_and_env(
        partial: Option<PartialAppConfig>,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let review = ReviewConfig::from_partial(partial.review).merge_with_env(&env_map);
        let skipped_files =
            SkippedFilesConfig::from_partial(partial.skipped_files).merge_with_env(&env_map)?;
        let alerts = AlertConfig::from_partial(partial.alerts);

        let config = AppConfig {
            review,
            skipped_files,
            alerts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.review.validate()?;
        self.skipped_files.validate()?;
        self.alerts.validate()?;
        Ok(())
    }
}
