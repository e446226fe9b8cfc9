use std::path::Path;

use tracing::warn;

use crate::ai::AgentConfig;
use crate::error::ConfigError;
use crate::persistence::PersistenceConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub persistence: PersistenceConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let agent = &self.agent;
        if agent.learning_rate <= 0.0 {
            return Err(ConfigError::Validation(
                "agent.learning_rate must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&agent.discount_factor) {
            return Err(ConfigError::Validation(
                "agent.discount_factor must be in [0, 1]".into(),
            ));
        }
        if agent.min_epsilon <= 0.0 || agent.min_epsilon > 1.0 {
            return Err(ConfigError::Validation(
                "agent.min_epsilon must be in (0, 1]".into(),
            ));
        }
        if agent.epsilon < agent.min_epsilon || agent.epsilon > 1.0 {
            return Err(ConfigError::Validation(
                "agent.epsilon must be in [min_epsilon, 1]".into(),
            ));
        }
        if agent.epsilon_decay <= 0.0 || agent.epsilon_decay > 1.0 {
            return Err(ConfigError::Validation(
                "agent.epsilon_decay must be in (0, 1]".into(),
            ));
        }

        if self.persistence.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "persistence.path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[agent]
epsilon = 0.25
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert!((config.agent.epsilon - 0.25).abs() < 1e-9);
        assert!((config.agent.epsilon_decay - 0.995).abs() < 1e-9);
        assert_eq!(
            config.persistence.path,
            std::path::PathBuf::from("rps_learning.json")
        );
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!((config.agent.epsilon - 0.1).abs() < 1e-9);
        assert!((config.agent.min_epsilon - 0.01).abs() < 1e-9);
        assert!((config.agent.discount_factor - 0.95).abs() < 1e-9);
        assert!(config.persistence.reset_on_corrupt);
        assert!(config.agent.seed.is_none());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_rps_config.toml")).unwrap();
        assert!((config.agent.epsilon - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rps.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[agent]
seed = 42

[persistence]
path = "saves/learning.json"
reset_on_corrupt = false
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.agent.seed, Some(42));
        assert!(!config.persistence.reset_on_corrupt);
        assert_eq!(
            config.persistence.path,
            std::path::PathBuf::from("saves/learning.json")
        );
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rps.toml");
        std::fs::write(&path, "[agent]\nepsilon_decay = 1.5\n").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "got {err}");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rps.toml");
        std::fs::write(&path, "[agent\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path).unwrap_err(),
            ConfigError::TomlParse(_)
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_validation_rejects_epsilon_below_floor() {
        let mut config = AppConfig::default();
        config.agent.epsilon = 0.005;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_epsilon_above_one() {
        let mut config = AppConfig::default();
        config.agent.epsilon = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_min_epsilon() {
        let mut config = AppConfig::default();
        config.agent.min_epsilon = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_invalid_discount() {
        let mut config = AppConfig::default();
        config.agent.discount_factor = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_lr() {
        let mut config = AppConfig::default();
        config.agent.learning_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let mut config = AppConfig::default();
        config.persistence.path = std::path::PathBuf::new();
        assert!(config.validate().is_err());
    }
}
