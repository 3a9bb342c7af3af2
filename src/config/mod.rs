mod source;

pub use source::{resolve, ConfigSource, EnvSource, FixedSource, LayeredSource, SettingsFileSource};

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::constants::*;

/// Client configuration with sensible defaults.
///
/// Can be overridden via ~/.config/tickerdesk/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Resolved service base URL (never empty, no trailing slash)
    pub api_base: String,
    /// Ticker pre-filled in the form
    pub default_ticker: String,
    /// Prompt pre-filled in the form
    pub default_prompt: String,
    /// Theme name (built-in or custom)
    pub theme: String,
    /// UI language (en, pt)
    pub lang: String,
    /// Render reports as markdown when the terminal allows it
    pub markdown: bool,
    /// Analysis request timeout in seconds (0 = none)
    pub request_timeout_secs: u64,
    /// Health probe timeout in seconds
    pub health_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            default_prompt: DEFAULT_PROMPT.to_string(),
            theme: "default".to_string(),
            lang: "en".to_string(),
            markdown: true,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS,
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional; missing fields use defaults. The `API_BASE`
/// key is read separately by [`SettingsFileSource`].
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    default_ticker: Option<String>,
    default_prompt: Option<String>,
    theme: Option<String>,
    lang: Option<String>,
    markdown: Option<bool>,
    request_timeout_secs: Option<u64>,
    health_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/tickerdesk/config.toml, falling back to
    /// defaults for any missing fields.
    ///
    /// The base URL comes from `API_BASE` in the environment (an optional
    /// `.env` in the config directory is loaded first), then the same key in
    /// the config file, then the built-in default.
    pub fn load() -> Self {
        let _ = dotenvy::from_path(env_file_path());
        let path = config_file_path();
        let base_source = LayeredSource::new()
            .with(EnvSource)
            .with(SettingsFileSource::new(&path));
        Self::load_from(&path, &base_source)
    }

    /// Load from an explicit file, resolving the base URL from `base_source`.
    pub fn load_from(path: &Path, base_source: &dyn ConfigSource) -> Self {
        let mut config = Config {
            api_base: resolve(base_source),
            ..Config::default()
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return config, // No config file, use defaults
        };

        let file_config: FileConfig = match toml::from_str(&content) {
            Ok(fc) => fc,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                return config;
            }
        };

        if let Some(v) = file_config.default_ticker {
            if !v.trim().is_empty() {
                config.default_ticker = v.trim().to_string();
            }
        }
        if let Some(v) = file_config.default_prompt {
            if !v.trim().is_empty() {
                config.default_prompt = v;
            }
        }
        if let Some(v) = file_config.theme {
            if !v.is_empty() {
                config.theme = v;
            }
        }
        if let Some(v) = file_config.lang {
            if !v.is_empty() {
                config.lang = v;
            }
        }
        if let Some(v) = file_config.markdown {
            config.markdown = v;
        }
        if let Some(v) = file_config.request_timeout_secs {
            config.request_timeout_secs = v.min(MAX_TIMEOUT_SECS); // 0 = no timeout
        }
        if let Some(v) = file_config.health_timeout_secs {
            config.health_timeout_secs = v.clamp(1, MAX_TIMEOUT_SECS);
        }

        config
    }
}
