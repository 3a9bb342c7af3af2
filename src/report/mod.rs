//! Report rendering: markdown when the environment supports it, literal
//! text otherwise.
//!
//! The capability is decided once at startup and injected into
//! [`ReportRenderer`]; rendering itself is a pure function of the content.

pub mod markdown;

use ratatui::text::Text;

use crate::ui::Theme;
pub use markdown::MarkdownPalette;

/// Whether reports are interpreted as markdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownCapability {
    Available,
    Unavailable,
}

impl MarkdownCapability {
    /// Resolve from settings and the process environment.
    pub fn detect(enabled_in_config: bool, plain_flag: bool) -> Self {
        Self::resolve(
            enabled_in_config && !plain_flag,
            std::env::var("TERM").ok().as_deref(),
            std::env::var_os("NO_MARKDOWN").is_some(),
        )
    }

    /// `TERM=dumb` and a set `NO_MARKDOWN` both switch markdown off.
    pub fn resolve(enabled: bool, term: Option<&str>, no_markdown: bool) -> Self {
        if !enabled || no_markdown || term == Some("dumb") {
            MarkdownCapability::Unavailable
        } else {
            MarkdownCapability::Available
        }
    }
}

/// HTML produced from service-supplied markdown.
///
/// The analysis service is the only source of report content, so its HTML
/// is trusted as-is and never mixed with user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A report ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedReport {
    /// Interpreted markdown: HTML for export, styled text for the terminal.
    Markdown {
        html: TrustedHtml,
        text: Text<'static>,
    },
    /// Literal text, shown exactly as received.
    Preformatted(String),
}

impl RenderedReport {
    /// Lines for the report pane.
    pub fn to_text(&self) -> Text<'static> {
        match self {
            RenderedReport::Markdown { text, .. } => text.clone(),
            RenderedReport::Preformatted(content) => Text::raw(content.clone()),
        }
    }

    pub fn html(&self) -> Option<&TrustedHtml> {
        match self {
            RenderedReport::Markdown { html, .. } => Some(html),
            RenderedReport::Preformatted(_) => None,
        }
    }

    pub fn is_markdown(&self) -> bool {
        matches!(self, RenderedReport::Markdown { .. })
    }
}

/// Turns report content into a [`RenderedReport`].
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    capability: MarkdownCapability,
    palette: MarkdownPalette,
}

impl ReportRenderer {
    pub fn new(capability: MarkdownCapability, theme: &Theme) -> Self {
        Self {
            capability,
            palette: MarkdownPalette {
                text: theme.report_text,
                heading: theme.accent,
                code: theme.accent_secondary,
                quote: theme.text_dim,
                link: theme.info,
                rule: theme.text_muted,
            },
        }
    }

    pub fn render(&self, content: &str) -> RenderedReport {
        match self.capability {
            MarkdownCapability::Available => RenderedReport::Markdown {
                html: TrustedHtml(markdown::to_html(content)),
                text: markdown::to_text(content, &self.palette),
            },
            MarkdownCapability::Unavailable => RenderedReport::Preformatted(content.to_string()),
        }
    }
}
