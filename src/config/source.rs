//! Base-URL override sources and the resolver that reads them.
//!
//! A source either yields an override or it doesn't; it never errors. Read
//! failures (missing file, bad TOML, unset variable) all collapse to `None`
//! so [`resolve`] can always fall back to [`DEFAULT_API_BASE`].

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::constants::{API_BASE_KEY, DEFAULT_API_BASE};

/// Somewhere a persisted base-URL override may live.
pub trait ConfigSource {
    /// The raw override, if this source has one.
    fn read(&self) -> Option<String>;
}

/// Reads the `API_BASE` key from the TOML settings file.
#[derive(Debug, Clone)]
pub struct SettingsFileSource {
    path: PathBuf,
}

impl SettingsFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for SettingsFileSource {
    fn read(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        // Bare table: other keys may fail FileConfig without hiding this one.
        let table: toml::Table = match toml::from_str(&content) {
            Ok(t) => t,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable settings file, ignoring API_BASE override");
                return None;
            }
        };
        table
            .get(API_BASE_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// Reads `API_BASE` from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn read(&self) -> Option<String> {
        std::env::var(API_BASE_KEY).ok()
    }
}

/// A value known up front (a CLI flag, or a test double).
#[derive(Debug, Clone)]
pub struct FixedSource(Option<String>);

impl FixedSource {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// A source that never has an override.
    pub fn empty() -> Self {
        Self(None)
    }
}

impl ConfigSource for FixedSource {
    fn read(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Tries each source in order; the first non-blank value wins.
pub struct LayeredSource {
    layers: Vec<Box<dyn ConfigSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn with(mut self, source: impl ConfigSource + 'static) -> Self {
        self.layers.push(Box::new(source));
        self
    }
}

impl Default for LayeredSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for LayeredSource {
    fn read(&self) -> Option<String> {
        self.layers
            .iter()
            .filter_map(|layer| layer.read())
            .find(|v| !v.trim().is_empty())
    }
}

/// Resolve the service base URL from `source`, falling back to the default.
///
/// Surrounding whitespace and trailing slashes are removed so that
/// `format!("{base}{path}")` never produces `//`. The result is never empty.
pub fn resolve(source: &dyn ConfigSource) -> String {
    match source.read().map(|v| normalize_base(&v)) {
        Some(base) if !base.is_empty() => {
            debug!(%base, "using API base override");
            base
        }
        _ => DEFAULT_API_BASE.to_string(),
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
