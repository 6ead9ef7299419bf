use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const API_URL_VAR: &str = "LYRICALLY_API_URL";
pub const TIMEOUT_VAR: &str = "LYRICALLY_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:8001";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the search backend; `/search` is resolved against it.
    pub api_url: Url,
    /// Applied to the whole request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.api_url = parse_origin(raw.trim()).ok_or(ConfigError::InvalidUrl {
                var: API_URL_VAR,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_origin(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return None;
    }
    // Url::join drops the last path segment unless it ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Some(url)
}
