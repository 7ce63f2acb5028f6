//! Configuration Management
//!
//! Loads service configuration from TOML files.
//! Configuration includes:
//! - Server settings (bind host and port)
//! - History settings (ring capacity)
//! - Clock settings (fallback timezone)
//! - Logging settings (filter and output format)
//!
//! Every field can be overridden through `TICKRING_*` environment variables.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::DEFAULT_TIMEZONE;
use crate::errors::{RingError, TickringError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// File the settings were read from, if any
    #[serde(skip)]
    source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of records kept; must be positive
    #[serde(default = "default_capacity", skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    /// Ignore `capacity` and keep everything
    #[serde(default)]
    pub unbounded: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            unbounded: false,
        }
    }
}

fn default_capacity() -> Option<i64> {
    Some(100)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// IANA name used when a request names no timezone or an unknown one
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            default_timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Read settings from `path` (or the default locations) and apply
    /// environment overrides. Call [`validate`](Self::validate) once any
    /// command-line overrides are in place.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config from {}", p))?;
                Self::from_toml(&content)?.with_source(p)
            }
            None => {
                let home_config = dirs::home_dir()
                    .map(|h| h.join(".config/tickring/config.toml"))
                    .and_then(|p| p.to_str().map(String::from));

                let mut default_paths: Vec<String> = vec!["tickring.toml".to_string()];
                if let Some(hc) = home_config {
                    default_paths.push(hc);
                }

                let mut loaded = None;
                for p in &default_paths {
                    if let Ok(content) = std::fs::read_to_string(p) {
                        loaded = Some(Self::from_toml(&content)?.with_source(p));
                        break;
                    }
                }
                loaded.unwrap_or_default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn with_source(mut self, path: &str) -> Self {
        self.source = Some(path.to_string());
        self
    }

    /// Path of the file this config came from; `None` means built-in defaults.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Apply `TICKRING_*` overrides. A value that does not parse is an error
    /// rather than being skipped.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> std::result::Result<(), TickringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("TICKRING_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TICKRING_PORT") {
            self.server.port = port.trim().parse::<u16>().map_err(|_| {
                TickringError::Config(format!("TICKRING_PORT must be a port number, got '{}'", port))
            })?;
        }
        if let Some(capacity) = lookup("TICKRING_CAPACITY") {
            let capacity = capacity.trim();
            if capacity.eq_ignore_ascii_case("unbounded") {
                self.history.unbounded = true;
            } else {
                let c = capacity.parse::<i64>().map_err(|_| {
                    RingError::InvalidConfiguration(format!(
                        "history capacity must be a positive integer or 'unbounded', got '{}'",
                        capacity
                    ))
                })?;
                self.history.capacity = Some(c);
                self.history.unbounded = false;
            }
        }
        if let Some(tz) = lookup("TICKRING_DEFAULT_TZ") {
            self.clock.default_timezone = tz;
        }
        if let Some(format) = lookup("TICKRING_LOG_FORMAT") {
            self.logging.format = match format.trim().to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "compact" => LogFormat::Compact,
                _ => {
                    return Err(TickringError::Config(format!(
                        "TICKRING_LOG_FORMAT must be 'compact' or 'json', got '{}'",
                        format
                    )))
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> std::result::Result<(), TickringError> {
        if !self.history.unbounded {
            if let Some(capacity) = self.history.capacity {
                if capacity <= 0 {
                    return Err(RingError::InvalidConfiguration(format!(
                        "history capacity must be a positive integer, got {}",
                        capacity
                    ))
                    .into());
                }
            }
        }
        if self.server.port == 0 {
            return Err(TickringError::Config("server port must not be 0".to_string()));
        }
        self.default_tz()?;
        Ok(())
    }

    /// Ring capacity, `None` when unbounded.
    pub fn history_capacity(&self) -> Option<usize> {
        if self.history.unbounded {
            return None;
        }
        self.history
            .capacity
            .and_then(|c| usize::try_from(c).ok())
    }

    pub fn default_tz(&self) -> std::result::Result<Tz, TickringError> {
        self.clock.default_timezone.parse::<Tz>().map_err(|_| {
            TickringError::Config(format!(
                "unknown default timezone '{}'",
                self.clock.default_timezone
            ))
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
