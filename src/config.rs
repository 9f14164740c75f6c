//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/fmea-service/config.toml` by
//! default; override the location with the `FMEA_CONFIG` environment
//! variable). Every section falls back to sensible defaults, so a
//! missing or partial file still yields a runnable configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Path of the SQLite file
    pub path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./fmea.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path)
    }
}

/// Token signing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter, overridable via RUST_LOG
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Seed accounts created when the user table is empty
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub admin_username: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_password: String,
    /// Also insert a handful of demo FMEA entries on first start
    pub demo_entries: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            user_username: "user".to_string(),
            user_password: "user123".to_string(),
            demo_entries: false,
        }
    }
}

/// Default config file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fmea-service")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.connection_url(), "sqlite://./fmea.db?mode=rwc");
        assert_eq!(cfg.seed.admin_username, "admin");
        assert!(!cfg.seed.demo_entries);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9090

            [seed]
            admin_password = "s3cret"
            demo_entries = true
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.seed.admin_password, "s3cret");
        assert!(cfg.seed.demo_entries);
        assert_eq!(cfg.security.jwt_expiration_hours, 24);
    }
}
