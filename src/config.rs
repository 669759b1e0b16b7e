//! Configuration for the host bridge binary

use std::env;
use std::sync::Arc;
use tracing::Level;

use crate::errors::{Result, SelectorError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Runtime settings for the bridge process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Log level directive (default: warn)
    pub log_level: String,
    /// Colored log output; off by default since logs share a terminal with the transport
    pub log_ansi: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_ansi: false,
        }
    }
}

impl ServerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("VIDEO_RES_LOG_LEVEL") {
            config.log_level = level.trim().to_lowercase();
        }

        if let Some(ansi) = lookup("VIDEO_RES_LOG_ANSI") {
            config.log_ansi = match ansi.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    let message = format!("VIDEO_RES_LOG_ANSI must be a boolean, got {other}");
                    return Err(SelectorError::Configuration(Arc::new(message)));
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            let level = &self.log_level;
            let expected = LOG_LEVELS.join(", ");
            let message = format!("Unknown log level '{level}', expected one of {expected}");
            return Err(SelectorError::Configuration(Arc::new(message)));
        }
        Ok(())
    }

    /// The configured level as a tracing level
    pub fn level(&self) -> Result<Level> {
        let message = format!("Unknown log level '{}'", self.log_level);
        let error = SelectorError::Configuration(Arc::new(message));
        self.log_level.parse().map_err(|_| error)
    }

    pub fn with_log_level(mut self, level: &str) -> Self {
        self.log_level = level.to_string();
        self
    }
}
