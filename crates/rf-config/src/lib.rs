//! # rf-config
//!
//! Layered settings for the rusty-feed binary:
//! built-in defaults, then an optional TOML file, then `RUSTY_FEED_*`
//! environment variables (nested keys joined with `__`).

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use rf_core::time::DisplayZone;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Config file read from the working directory when `RUSTY_FEED_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "rusty-feed.toml";
pub const ENV_PREFIX: &str = "RUSTY_FEED";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid display.utc_offset {0:?} (expected e.g. \"+03:00\")")]
    InvalidOffset(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `storage.root`.
    File,
    /// Lost on restart.
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub root: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplaySettings {
    /// Unset means the server's local zone.
    pub utc_offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    /// Reads `.env`, then the config file, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        let file = std::env::var(format!("{ENV_PREFIX}_CONFIG"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::layered(Some(&file), env_source())
    }

    /// Defaults overlaid with `file` (if it exists) and `env`.
    pub fn layered(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = defaults()?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(false));
        }
        finish(builder.add_source(env))
    }

    /// Defaults overlaid with an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        finish(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl DisplaySettings {
    pub fn zone(&self) -> Result<DisplayZone, ConfigError> {
        match &self.utc_offset {
            None => Ok(DisplayZone::Local),
            Some(raw) => raw
                .parse::<FixedOffset>()
                .map(DisplayZone::Fixed)
                .map_err(|_| ConfigError::InvalidOffset(raw.clone())),
        }
    }
}

/// `RUSTY_FEED_SERVER__PORT=9000` sets `server.port`.
pub fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Deserializes and checks what serde alone cannot.
fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.display.zone()?;
    Ok(settings)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("storage.backend", "file")?
        .set_default("storage.root", "./data")?
        .set_default("log.level", "info")?
        .set_default("log.format", "pretty")
}
