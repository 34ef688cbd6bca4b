//! Application configuration read from `QRGEN_*` environment variables.

use chrono::TimeDelta;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::export::{DEFAULT_COPY_FEEDBACK, DEFAULT_DOWNLOAD_FILENAME};
use crate::render::{DEFAULT_QR_SIZE, RenderOptions};

pub const ENV_PREFIX: &str = "QRGEN_";

/// Smallest accepted edge length; fits a short URL at high error correction.
pub const MIN_QR_SIZE: u32 = 64;
pub const MAX_QR_SIZE: u32 = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] serde_env::Error),
    #[error("QRGEN_SIZE must be between {MIN_QR_SIZE} and {MAX_QR_SIZE}, got {0}")]
    Size(u32),
    #[error("QRGEN_DOWNLOAD_FILENAME must not be empty")]
    EmptyFilename,
}

/// Values as they appear in the environment, all optional.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    size: Option<u32>,
    download_filename: Option<String>,
    copy_feedback_ms: Option<u32>,
    default_url: Option<String>,
    default_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub size: u32,
    pub download_filename: String,
    pub copy_feedback: TimeDelta,
    pub default_url: String,
    pub default_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_QR_SIZE,
            download_filename: DEFAULT_DOWNLOAD_FILENAME.to_owned(),
            copy_feedback: DEFAULT_COPY_FEEDBACK,
            default_url: String::new(),
            default_title: String::new(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    /// Reads `QRGEN_*` pairs out of `vars`; other keys are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(k, v)| {
                k.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), v.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let size = raw.size.unwrap_or(defaults.size);
        if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&size) {
            return Err(ConfigError::Size(size));
        }

        let download_filename = match raw.download_filename {
            Some(name) if name.trim().is_empty() => return Err(ConfigError::EmptyFilename),
            Some(name) => name,
            None => defaults.download_filename,
        };

        let copy_feedback = raw
            .copy_feedback_ms
            .map(|ms| TimeDelta::milliseconds(i64::from(ms)))
            .unwrap_or(defaults.copy_feedback);

        info!("Loaded config: size={size} filename={download_filename}");

        Ok(Self {
            size,
            download_filename,
            copy_feedback,
            default_url: raw.default_url.unwrap_or_default(),
            default_title: raw.default_title.unwrap_or_default(),
        })
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::with_size(self.size)
    }
}
