pub mod alert_config;
pub mod app_config;
pub mod loader;
pub mod review_config;
pub mod skipped_config;

// Re-export commonly used types
pub use alert_config::AlertConfig;
pub use app_config::AppConfig;
pub use loader::ConfigLoader;
pub use review_config::ReviewConfig;
pub use skipped_config::SkippedFilesConfig;

// Re-export constants
pub use app_config::{CONFIG_FILE_NAME, ENV_PREFIX, USER_CONFIG_PATH};
