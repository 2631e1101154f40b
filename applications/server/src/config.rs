/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Lowest and highest bcrypt work factors the `bcrypt` crate accepts
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    /// HS256 signing secret for session tokens
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Also write logs to daily-rotated files in this directory
    #[serde(default)]
    pub directory: Option<PathBuf>,

    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,

    /// Rotated files kept before the oldest is deleted
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: default_log_file_prefix(),
            max_files: default_log_max_files(),
        }
    }
}

impl LoggingSettings {
    /// Daily-rotated appender for `directory`, or `None` when file logging
    /// is off. The directory is created if missing.
    pub fn file_appender(&self) -> Result<Option<RollingFileAppender>> {
        let Some(directory) = &self.directory else {
            return Ok(None);
        };

        std::fs::create_dir_all(directory)?;

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(&self.file_prefix)
            .max_log_files(self.max_files)
            .build(directory)
            .map_err(|e| {
                ServerError::Config(format!(
                    "cannot open log directory {}: {e}",
                    directory.display()
                ))
            })?;

        Ok(Some(appender))
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// `path` defaults to `config.toml` in the working directory; a missing
    /// file is not an error. Environment variables prefixed with `FREIGHT`
    /// override file values, with `__` separating sections, e.g.
    /// `FREIGHT__AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("FREIGHT")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set FREIGHT__AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.logging.directory.is_some() && self.logging.max_files == 0 {
            return Err(ServerError::Config(
                "logging.max_files must be at least 1".to_string(),
            ));
        }

        if !BCRYPT_COST_RANGE.contains(&self.auth.bcrypt_cost) {
            return Err(ServerError::Config(format!(
                "bcrypt_cost must be between {} and {}, got {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                self.auth.bcrypt_cost
            )));
        }

        Ok(())
    }

    /// `host:port` to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/freight.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        bcrypt_cost: default_bcrypt_cost(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_log_file_prefix() -> String {
    "freight.log".to_string()
}

fn default_log_max_files() -> usize {
    14
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            logging: LoggingSettings::default(),
        }
    }
}
