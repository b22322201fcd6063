use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::checkout::DEFAULT_CLEAR_DELAY;

pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub checkout_clear_delay_ms: u64,
    pub catalog_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            checkout_clear_delay_ms: DEFAULT_CLEAR_DELAY.as_millis() as u64,
            catalog_path: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_clear_delay_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    checkout_clear_delay_ms: Option<u64>,
    catalog_path: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Defaults, then `storefront.toml` in the working directory, then `APP__*`
/// environment variables.
pub fn load_settings() -> Settings {
    load_settings_with(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    settings_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(settings_path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.checkout_clear_delay_ms {
                    settings.checkout_clear_delay_ms = v;
                }
                if let Some(v) = file_cfg.catalog_path {
                    settings.catalog_path = Some(v);
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
            }
            Err(err) => tracing::warn!(
                path = %settings_path.display(),
                error = %err,
                "ignoring unreadable settings file"
            ),
        }
    }

    if let Some(v) = env("APP__CHECKOUT_CLEAR_DELAY_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.checkout_clear_delay_ms = parsed,
            Err(_) => tracing::warn!(
                value = %v,
                "ignoring non-numeric APP__CHECKOUT_CLEAR_DELAY_MS"
            ),
        }
    }
    if let Some(v) = env("APP__CATALOG_PATH").filter(|v| !v.trim().is_empty()) {
        settings.catalog_path = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__LOG_FILTER").filter(|v| !v.trim().is_empty()) {
        settings.log_filter = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
