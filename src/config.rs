//! Runtime configuration read from the environment (and `.env`).

use chrono::Duration;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::submission::toast::DEFAULT_TOAST_SECONDS;

pub const DEFAULT_GENERATOR_URL: &str = "http://127.0.0.1:5001/generate-pdf";
pub const DEFAULT_DOWNLOAD_DIR: &str = "./ALL_AGREEMENTS";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
/// Longest a message may stay on screen: one day.
pub const MAX_TOAST_SECONDS: i64 = 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Full URL of the document generation endpoint.
    pub generator_url: String,
    pub download_dir: PathBuf,
    pub toast_seconds: i64,
    /// Refuse a second submission while one is in flight.
    pub submit_guard: bool,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            generator_url: DEFAULT_GENERATOR_URL.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            toast_seconds: DEFAULT_TOAST_SECONDS,
            submit_guard: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![
                "http://localhost:5001".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl FormConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("GENERATOR_URL") {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty {
                    key: "GENERATOR_URL",
                });
            }
            config.generator_url = url.to_string();
        }
        if let Some(dir) = lookup("DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("TOAST_SECONDS") {
            config.toast_seconds = value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|s| (1..=MAX_TOAST_SECONDS).contains(s))
                .ok_or(ConfigError::InvalidNumber {
                    key: "TOAST_SECONDS",
                    value,
                })?;
        }
        if let Some(value) = lookup("SUBMIT_GUARD") {
            config.submit_guard = parse_bool("SUBMIT_GUARD", value)?;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            config.host = host;
        }
        if let Some(value) = lookup("SERVER_PORT") {
            config.port = value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "SERVER_PORT",
                    value: value.clone(),
                })?;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(config)
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::seconds(self.toast_seconds.clamp(1, MAX_TOAST_SECONDS))
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value }),
    }
}
