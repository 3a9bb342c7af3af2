//! Application-wide constants.
//!
//! Centralizes endpoint paths, defaults, timing and layout numbers so the
//! rest of the codebase never carries magic values.

use std::path::PathBuf;

// ── Service ───────────────────────────────────────────────────────
/// Base URL used when no override is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8787";
/// Key of the persisted base-URL override (settings file and environment).
pub const API_BASE_KEY: &str = "API_BASE";
/// Health probe path, relative to the base URL.
pub const HEALTH_PATH: &str = "/v1/health";
/// Analysis path, relative to the base URL.
pub const ANALYZE_PATH: &str = "/v1/analyze";
/// Content shown when the service answered successfully but with nothing.
pub const NO_CONTENT_PLACEHOLDER: &str = "(no content)";

// ── Form defaults ─────────────────────────────────────────────────
/// Ticker pre-filled in the form.
pub const DEFAULT_TICKER: &str = "BBAS3.SA";
/// Prompt pre-filled in the form.
pub const DEFAULT_PROMPT: &str = "Full deep-dive with catalysts, risks and valuation hooks.";

// ── Timing ────────────────────────────────────────────────────────
/// Event poll timeout (ms) -- how often the UI checks for input.
pub const EVENT_POLL_MS: u64 = 50;
/// Default analysis request timeout (seconds, 0 = none).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
/// Default health probe timeout (seconds).
pub const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;
/// Upper bound accepted for either timeout (seconds).
pub const MAX_TIMEOUT_SECS: u64 = 3600;
/// Status message display duration (seconds).
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 5;

// ── UI Layout ─────────────────────────────────────────────────────
/// Height of the header block (title, API base, health).
pub const HEADER_HEIGHT: u16 = 5;
/// Height of the single-line ticker input including borders.
pub const TICKER_INPUT_HEIGHT: u16 = 3;
/// Height of the prompt input including borders (4 text rows, like the web textarea).
pub const PROMPT_INPUT_HEIGHT: u16 = 6;
/// Scroll step for PageUp/PageDown in the report pane.
pub const REPORT_PAGE_STEP: usize = 10;
/// Smallest terminal that can host the form and report.
pub const MIN_TERMINAL_WIDTH: u16 = 40;
/// Smallest terminal that can host the form and report.
pub const MIN_TERMINAL_HEIGHT: u16 = 16;

// ── Spinner Animation ─────────────────────────────────────────────
/// Spinner character sequence for loading indicators.
pub const SPINNER_CHARS: &[&str] = &["◐", "◓", "◑", "◒"];

// ── Supported Languages ───────────────────────────────────────────
/// Available UI languages.
pub const LANGUAGES: &[&str] = &["en", "pt"];

// ── Paths ─────────────────────────────────────────────────────────

/// Returns the user's home directory, falling back to /tmp.
pub fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string()))
}

/// Returns `~/.config/tickerdesk/`.
pub fn config_dir() -> PathBuf {
    home_dir().join(".config").join("tickerdesk")
}

/// Returns `~/.config/tickerdesk/config.toml`.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns `~/.config/tickerdesk/.env` (optional `API_BASE=...`).
pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}

/// Returns `~/.local/share/tickerdesk/`.
pub fn data_dir() -> PathBuf {
    home_dir().join(".local").join("share").join("tickerdesk")
}

/// Returns `~/.local/share/tickerdesk/tickerdesk.log`.
pub fn log_file_path() -> PathBuf {
    data_dir().join("tickerdesk.log")
}

/// Returns `~/.config/tickerdesk/themes/<name>.toml`.
pub fn custom_theme_path(name: &str) -> PathBuf {
    config_dir().join("themes").join(format!("{}.toml", name))
}
