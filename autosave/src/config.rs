use std::{fs, path::Path, time::Duration};

use autosave_protocol::{
    field::{SelectorScope, DEFAULT_FORM_NAME},
    messages::{ResponseFormat, SAVE_OPTION_PATH},
    stylesheet::IndicatorStyle,
};
use kv_log_macro as log;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, tls_config::ClientTlsConfig};

/// Delay before an outcome indicator is cleared
pub const DEFAULT_REVERT_AFTER_MS: u64 = 3000;

pub const ENV_BASE_URL: &str = "AUTOSAVE_BASE_URL";
pub const ENV_ENDPOINT: &str = "AUTOSAVE_ENDPOINT";

/// What a new edit of a field does to saves of that field still in progress
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    /// The new edit cancels the earlier save's visual effect and its reversion timer
    #[default]
    Supersede,
    /// Every save applies its own outcome and runs its own reversion timer;
    /// the last response to arrive wins
    Independent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    pub base_url: String,
    pub endpoint_path: String,
    pub form_name: String,
    pub scope: SelectorScope,
    /// `None` leaves indicators in place until the next outcome
    pub revert_after_ms: Option<u64>,
    pub table: Option<String>,
    pub indicator: IndicatorStyle,
    pub alert_on_error: bool,
    pub policy: ConcurrencyPolicy,
    pub response_format: ResponseFormat,
    pub request_timeout_ms: Option<u64>,
    pub tls: ClientTlsConfig,
}

impl Default for BinderConfig {
    fn default() -> Self {
        BinderConfig {
            base_url: "http://127.0.0.1:8080".to_string(),
            endpoint_path: SAVE_OPTION_PATH.to_string(),
            form_name: DEFAULT_FORM_NAME.to_string(),
            scope: SelectorScope::default(),
            revert_after_ms: Some(DEFAULT_REVERT_AFTER_MS),
            table: None,
            indicator: IndicatorStyle::default(),
            alert_on_error: false,
            policy: ConcurrencyPolicy::default(),
            response_format: ResponseFormat::default(),
            request_timeout_ms: None,
            tls: ClientTlsConfig::default(),
        }
    }
}

impl BinderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let config = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        log::debug!("Loaded binder config", { path: path.display().to_string().as_str() });
        Ok(config)
    }

    /// Override the endpoint location from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    pub fn apply_env_from(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        match var(ENV_BASE_URL) {
            Some(base_url) => self.base_url = base_url,
            None => {
                log::info!("{} not set, using {}", ENV_BASE_URL, self.base_url);
            }
        }

        match var(ENV_ENDPOINT) {
            Some(endpoint_path) => self.endpoint_path = endpoint_path,
            None => {
                log::info!("{} not set, using {}", ENV_ENDPOINT, self.endpoint_path);
            }
        }

        self
    }

    pub fn save_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint_path.starts_with('/') {
            format!("{}{}", base, self.endpoint_path)
        } else {
            format!("{}/{}", base, self.endpoint_path)
        }
    }

    pub fn revert_after(&self) -> Option<Duration> {
        self.revert_after_ms.map(Duration::from_millis)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
