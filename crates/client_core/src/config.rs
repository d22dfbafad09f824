use std::{fs, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "auditor.toml";
pub const CONFIG_PATH_ENV: &str = "AUDITOR_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditorSettings {
    pub endpoint_url: String,
    pub request_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for AuditorSettings {
    fn default() -> Self {
        Self {
            endpoint_url: "http://127.0.0.1:8000/summarize".into(),
            request_timeout_secs: 120,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    endpoint_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid audit endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("audit endpoint '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Defaults, then `auditor.toml` (or `$AUDITOR_CONFIG`), then environment.
pub fn load_settings() -> AuditorSettings {
    let mut settings = AuditorSettings::default();

    let path = std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SETTINGS_FILE));
    if let Ok(raw) = fs::read_to_string(&path) {
        settings.merge_toml(&raw);
    }

    settings.apply_overrides(|name| std::env::var(name).ok());
    settings
}

impl AuditorSettings {
    pub fn merge_toml(&mut self, raw: &str) {
        let file_cfg = match toml::from_str::<FileSettings>(raw) {
            Ok(file_cfg) => file_cfg,
            Err(err) => {
                warn!("ignoring malformed settings file: {err}");
                return;
            }
        };
        if let Some(v) = file_cfg.endpoint_url {
            self.endpoint_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.request_timeout_secs = v;
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
    }

    /// Later names win: `APP__*` overrides the short aliases.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("AUDITOR_ENDPOINT") {
            self.endpoint_url = v;
        }
        if let Some(v) = lookup("APP__ENDPOINT_URL") {
            self.endpoint_url = v;
        }

        if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.request_timeout_secs = parsed,
                Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(v) = lookup("RUST_LOG") {
            self.log_filter = v;
        }
        if let Some(v) = lookup("APP__LOG_FILTER") {
            self.log_filter = v;
        }
    }

    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self.endpoint_url.trim();
        let url = Url::parse(raw).map_err(|source| SettingsError::InvalidEndpoint {
            url: raw.to_string(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(SettingsError::UnsupportedScheme(raw.to_string())),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
