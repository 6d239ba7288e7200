use crate::core::db::ConnectionDescriptor;
use crate::core::{DataError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: ConnectionDescriptor,
    pub logging: Option<LoggingConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Config {
    /// Maximum log level, `INFO` unless configured.
    pub fn log_level(&self) -> Result<Level> {
        match self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            None => Ok(Level::INFO),
            Some(level) => level
                .parse()
                .map_err(|_| DataError::Config(format!("unknown log level `{}`", level))),
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Example
///
/// ```no_run
/// let config = customer_access::config::load_config("config.toml").expect("Failed to load config");
/// println!("{}", config.store.catalog());
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content).map_err(|e| DataError::Config(e.to_string()))?;
    config.log_level()?;
    Ok(config)
}

/// Per-user configuration file location, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("customer_access").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CONFIG: &str = r#"
[store]
host = "/srv/northwind"
catalog = "NorthWindAzure"

[logging]
level = "debug"
"#;

    #[test]
    fn test_load_config_from_str() {
        let config: Config = toml::from_str(SAMPLE_CONFIG).expect("Failed to parse sample config");
        assert_eq!(config.store.host(), "/srv/northwind");
        assert_eq!(config.store.catalog(), "NorthWindAzure");
        assert_eq!(config.log_level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.store, ConnectionDescriptor::default());
        assert_eq!(config.log_level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_load_config_rejects_unknown_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

        match load_config(&path) {
            Err(DataError::Config(msg)) => assert!(msg.contains("loud")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_config(dir.path().join("nope.toml")), Err(DataError::Io(_))));
    }

    #[test]
    fn test_incomplete_store_section() {
        let result: std::result::Result<Config, _> = toml::from_str("[store]\nhost = \"x\"\n");
        assert!(result.is_err());
    }
}
