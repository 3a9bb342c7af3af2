use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// All available built-in theme names.
pub const BUILTIN_THEME_NAMES: &[&str] = &[
    "default",
    "gruvbox",
    "nord",
    "catppuccin",
    "dracula",
    "solarized",
];

/// Data-driven theme: every color in one struct.
/// Constructed from built-in presets or loaded from TOML files.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ── Brand / Primary ──────────────────────────────────────
    pub accent: Color,
    pub accent_secondary: Color,
    pub bg_dark: Color,

    // ── Text ─────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub report_text: Color,

    // ── Semantic ─────────────────────────────────────────────
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    // ── Borders ──────────────────────────────────────────────
    pub border: Color,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────

    /// Default dark theme.
    pub fn default_dark() -> Self {
        Self {
            name: "default".to_string(),
            accent: Color::Rgb(99, 179, 237),
            accent_secondary: Color::Rgb(129, 230, 217),
            bg_dark: Color::Rgb(22, 22, 30),
            text_primary: Color::Rgb(220, 220, 235),
            text_dim: Color::Rgb(120, 120, 145),
            text_muted: Color::Rgb(80, 80, 100),
            report_text: Color::Rgb(200, 210, 230),
            success: Color::Rgb(72, 199, 142),
            warning: Color::Rgb(255, 193, 69),
            danger: Color::Rgb(255, 85, 85),
            info: Color::Rgb(99, 179, 237),
            border: Color::Rgb(55, 55, 75),
        }
    }

    /// Gruvbox dark palette.
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            accent: Color::Rgb(215, 153, 33),            // yellow
            accent_secondary: Color::Rgb(142, 192, 124), // green
            bg_dark: Color::Rgb(40, 40, 40),             // bg0
            text_primary: Color::Rgb(235, 219, 178),     // fg
            text_dim: Color::Rgb(168, 153, 132),         // fg4
            text_muted: Color::Rgb(102, 92, 84),         // bg4
            report_text: Color::Rgb(235, 219, 178),
            success: Color::Rgb(142, 192, 124), // green
            warning: Color::Rgb(250, 189, 47),  // yellow bright
            danger: Color::Rgb(251, 73, 52),    // red
            info: Color::Rgb(131, 165, 152),    // blue
            border: Color::Rgb(80, 73, 69),
        }
    }

    /// Nord palette.
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            accent: Color::Rgb(136, 192, 208),           // nord8 frost
            accent_secondary: Color::Rgb(143, 188, 187), // nord7
            bg_dark: Color::Rgb(46, 52, 64),             // nord0
            text_primary: Color::Rgb(229, 233, 240),     // nord5
            text_dim: Color::Rgb(182, 191, 204),
            text_muted: Color::Rgb(107, 112, 127),
            report_text: Color::Rgb(216, 222, 233), // nord4
            success: Color::Rgb(163, 190, 140),     // nord14 green
            warning: Color::Rgb(235, 203, 139),     // nord13 yellow
            danger: Color::Rgb(191, 97, 106),       // nord11 red
            info: Color::Rgb(129, 161, 193),        // nord9
            border: Color::Rgb(76, 86, 106),        // nord3
        }
    }

    /// Catppuccin Mocha palette.
    pub fn catppuccin() -> Self {
        Self {
            name: "catppuccin".to_string(),
            accent: Color::Rgb(137, 180, 250),           // blue
            accent_secondary: Color::Rgb(148, 226, 213), // teal
            bg_dark: Color::Rgb(30, 30, 46),             // base
            text_primary: Color::Rgb(205, 214, 244),     // text
            text_dim: Color::Rgb(166, 173, 200),         // subtext0
            text_muted: Color::Rgb(108, 112, 134),       // overlay0
            report_text: Color::Rgb(186, 194, 222),      // subtext1
            success: Color::Rgb(166, 227, 161),          // green
            warning: Color::Rgb(249, 226, 175),          // yellow
            danger: Color::Rgb(243, 139, 168),           // red
            info: Color::Rgb(137, 180, 250),             // blue
            border: Color::Rgb(69, 71, 90),              // surface1
        }
    }

    /// Dracula palette.
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            accent: Color::Rgb(139, 233, 253),          // cyan
            accent_secondary: Color::Rgb(80, 250, 123), // green
            bg_dark: Color::Rgb(40, 42, 54),            // background
            text_primary: Color::Rgb(248, 248, 242),    // foreground
            text_dim: Color::Rgb(188, 188, 172),
            text_muted: Color::Rgb(98, 114, 164), // comment
            report_text: Color::Rgb(248, 248, 242),
            success: Color::Rgb(80, 250, 123),  // green
            warning: Color::Rgb(241, 250, 140), // yellow
            danger: Color::Rgb(255, 85, 85),    // red
            info: Color::Rgb(189, 147, 249),    // purple
            border: Color::Rgb(98, 114, 164),
        }
    }

    /// Solarized dark palette.
    pub fn solarized() -> Self {
        Self {
            name: "solarized".to_string(),
            accent: Color::Rgb(38, 139, 210),           // blue
            accent_secondary: Color::Rgb(42, 161, 152), // cyan
            bg_dark: Color::Rgb(0, 43, 54),             // base03
            text_primary: Color::Rgb(147, 161, 161),    // base1
            text_dim: Color::Rgb(101, 123, 131),        // base00
            text_muted: Color::Rgb(88, 110, 117),       // base01
            report_text: Color::Rgb(147, 161, 161),
            success: Color::Rgb(133, 153, 0),  // green
            warning: Color::Rgb(181, 137, 0),  // yellow
            danger: Color::Rgb(220, 50, 47),   // red
            info: Color::Rgb(108, 113, 196),   // violet
            border: Color::Rgb(88, 110, 117),
        }
    }

    /// Look up a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default_dark()),
            "gruvbox" => Some(Self::gruvbox()),
            "nord" => Some(Self::nord()),
            "catppuccin" => Some(Self::catppuccin()),
            "dracula" => Some(Self::dracula()),
            "solarized" => Some(Self::solarized()),
            _ => None,
        }
    }

    /// Built-in theme, then `~/.config/tickerdesk/themes/<name>.toml`, then default.
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name)
            .or_else(|| Self::from_toml_file(&crate::constants::custom_theme_path(name)))
            .unwrap_or_else(|| {
                tracing::warn!(
                    theme = name,
                    builtin = ?BUILTIN_THEME_NAMES,
                    "unknown theme, using default"
                );
                Self::default()
            })
    }

    /// Load a custom theme from a TOML file, falling back to default for missing fields.
    pub fn from_toml_file(path: &std::path::Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let file: ThemeFile = toml::from_str(&content).ok()?;
        Some(
            file.into_theme(
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("custom"),
            ),
        )
    }

    // ── Computed Styles ──────────────────────────────────────

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_highlight_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.bg_dark)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_muted).bg(self.border)
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// ── TOML deserialization for custom themes ──────────────────

/// Intermediate struct for parsing theme TOML files.
/// All fields are optional; missing fields inherit from the default theme.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    accent: Option<String>,
    accent_secondary: Option<String>,
    bg_dark: Option<String>,
    text_primary: Option<String>,
    text_dim: Option<String>,
    text_muted: Option<String>,
    report_text: Option<String>,
    success: Option<String>,
    warning: Option<String>,
    danger: Option<String>,
    info: Option<String>,
    border: Option<String>,
}

impl ThemeFile {
    fn into_theme(self, name: &str) -> Theme {
        let base = Theme::default_dark();
        Theme {
            name: name.to_string(),
            accent: parse_color(&self.accent).unwrap_or(base.accent),
            accent_secondary: parse_color(&self.accent_secondary).unwrap_or(base.accent_secondary),
            bg_dark: parse_color(&self.bg_dark).unwrap_or(base.bg_dark),
            text_primary: parse_color(&self.text_primary).unwrap_or(base.text_primary),
            text_dim: parse_color(&self.text_dim).unwrap_or(base.text_dim),
            text_muted: parse_color(&self.text_muted).unwrap_or(base.text_muted),
            report_text: parse_color(&self.report_text).unwrap_or(base.report_text),
            success: parse_color(&self.success).unwrap_or(base.success),
            warning: parse_color(&self.warning).unwrap_or(base.warning),
            danger: parse_color(&self.danger).unwrap_or(base.danger),
            info: parse_color(&self.info).unwrap_or(base.info),
            border: parse_color(&self.border).unwrap_or(base.border),
        }
    }
}

/// Parse a hex color string like "#FF8800" or "FF8800" into a ratatui Color.
fn parse_color(opt: &Option<String>) -> Option<Color> {
    let s = opt.as_ref()?;
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
