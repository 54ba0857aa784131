use std::{fs, path::Path, time::Duration};

use catalog_core::DEFAULT_API_BASE_URL;
use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "browser.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    /// `0` disables the per-request timeout.
    pub request_timeout_secs: u64,
    pub start_page: u32,
    pub column_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 30,
            start_page: 1,
            column_width: 28,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    start_page: Option<u32>,
    column_width: Option<usize>,
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_with_env(path, |key| std::env::var(key).ok())
}

/// Defaults, then the settings file if present, then environment overrides.
pub fn load_settings_with_env(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_base_url {
                    settings.api_base_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
                if let Some(v) = file_cfg.start_page {
                    settings.start_page = v;
                }
                if let Some(v) = file_cfg.column_width {
                    settings.column_width = v;
                }
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "ignoring unreadable settings file");
            }
        }
    }

    if let Some(v) = env("ARTWORKS_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = env("APP__START_PAGE") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.start_page = parsed;
        }
    }

    if let Some(v) = env("APP__COLUMN_WIDTH") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.column_width = parsed;
        }
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
