use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::errors::ConfigError;

use super::app_config::{AppConfig, PartialAppConfig, CONFIG_FILE_NAME, ENV_PREFIX, USER_CONFIG_PATH};

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    base_path: Option<PathBuf>,
    config_file: Option<PathBuf>,
    env_override: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Create a new config loader with default paths
    pub fn new() -> Self {
        Self {
            base_path: None,
            config_file: None,
            env_override: None,
        }
    }

    /// Create a config loader with custom base path (for testing)
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
            ..Self::new()
        }
    }

    /// Create a config loader reading one explicit file
    pub fn with_config_file(path: PathBuf) -> Self {
        Self {
            config_file: Some(path),
            ..Self::new()
        }
    }

    /// Use `env_map` instead of the process environment
    pub fn with_env(mut self, env_map: HashMap<String, String>) -> Self {
        self.env_override = Some(env_map);
        self
    }

    /// Load complete application configuration
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let config_path = self.config_path();

        // Load partial config from file
        let partial_config = self.load_partial_config(&config_path)?;

        // Collect environment variables
        let env_map = self.collect_env_vars();

        AppConfig::from_partial_and_env(partial_config, env_map)
    }

    /// Resolve the config file path with tilde expansion and base path override
    pub fn config_path(&self) -> PathBuf {
        if let Some(file) = &self.config_file {
            return file.clone();
        }

        let base = if let Some(base_path) = &self.base_path {
            // For testing: use custom base path
            base_path.join(USER_CONFIG_PATH.trim_start_matches("~/"))
        } else {
            let expanded = shellexpand::tilde(USER_CONFIG_PATH);
            PathBuf::from(expanded.as_ref())
        };

        base.join(CONFIG_FILE_NAME)
    }

    /// Load the partial config; a missing file means defaults
    fn load_partial_config(&self, config_path: &PathBuf) -> Result<Option<PartialAppConfig>, ConfigError> {
        if !config_path.exists() {
            tracing::info!("未发现配置文件 {}，使用默认配置", config_path.display());
            return Ok(None);
        }

        let path_str = config_path.display().to_string();
        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::FileRead(path_str.clone(), e))?;
        let partial = toml::from_str::<PartialAppConfig>(&content)
            .map_err(|e| ConfigError::TomlParse(path_str.clone(), e))?;

        tracing::debug!(path = %path_str, "已加载配置文件");
        Ok(Some(partial))
    }

    /// Collect the `PRSCAN_` environment variables
    fn collect_env_vars(&self) -> HashMap<String, String> {
        if let Some(env_map) = &self.env_override {
            return env_map.clone();
        }
        env::vars().filter(|(key, _)| key.starts_with(ENV_PREFIX)).collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_base_path(temp_dir.path().to_path_buf()).with_env(HashMap::new());
        assert_eq!(
            loader.config_path(),
            temp_dir.path().join(".config/prscan/config.toml")
        );
        let config = loader.load_config().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_loads_file_and_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prscan.toml");
        fs::write(&path, "[review]\nignore = [\"Foo.\"]\n").unwrap();

        let mut env_map = HashMap::new();
        env_map.insert("PRSCAN_IGNORE_LIST".to_string(), "Bar".to_string());

        let config = ConfigLoader::with_config_file(path)
            .with_env(env_map)
            .load_config()
            .unwrap();
        assert_eq!(config.review.ignore, vec!["Foo.", "Bar"]);
    }

    #[test]
    fn test_bad_toml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[review\n").unwrap();

        let err = ConfigLoader::with_config_file(path)
            .with_env(HashMap::new())
            .load_config()
            .unwrap_err();
        match err {
            ConfigError::TomlParse(file, _) => assert!(file.ends_with("broken.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
