//! Markdown to HTML and to styled terminal text.
//!
//! Both conversions walk the same pulldown-cmark event stream, so a report
//! exported as HTML and the one shown in the report pane always agree.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

/// Colors the styled conversion uses; everything else is modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPalette {
    pub text: Color,
    pub heading: Color,
    pub code: Color,
    pub quote: Color,
    pub link: Color,
    pub rule: Color,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Convert markdown to an HTML fragment.
pub fn to_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(content, options()));
    out
}

/// Convert markdown to styled lines for the report pane.
pub fn to_text(content: &str, palette: &MarkdownPalette) -> Text<'static> {
    let mut writer = TextWriter::new(palette);
    for event in Parser::new_ext(content, options()) {
        writer.handle(event);
    }
    writer.finish()
}

struct TextWriter<'p> {
    palette: &'p MarkdownPalette,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// `None` = bullet list, `Some(n)` = next ordered number.
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    link_target: Option<String>,
}

impl<'p> TextWriter<'p> {
    fn new(palette: &'p MarkdownPalette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![Style::default().fg(palette.text)],
            lists: Vec::new(),
            quote_depth: 0,
            in_code_block: false,
            link_target: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, patch: Style) {
        let next = self.style().patch(patch);
        self.styles.push(next);
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn quote_prefix(&self) -> Option<Span<'static>> {
        (self.quote_depth > 0).then(|| {
            Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(self.palette.quote),
            )
        })
    }

    fn flush_line(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        if let Some(prefix) = self.quote_prefix() {
            spans.push(prefix);
        }
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        self.flush_line();
        if self.lines.last().is_some_and(|l| l.spans.is_empty()) || self.lines.is_empty() {
            return;
        }
        self.lines.push(Line::default());
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => {
                let style = Style::default().fg(self.palette.code);
                for line in text.lines() {
                    self.spans.push(Span::styled(format!("    {}", line), style));
                    self.flush_line();
                }
            }
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let style = self.style().fg(self.palette.code);
                self.spans.push(Span::styled(code.to_string(), style));
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(self.palette.rule),
                )));
                self.blank_line();
            }
            Event::TaskListMarker(done) => self.push_text(if done { "[x] " } else { "[ ] " }),
            Event::Html(raw) | Event::InlineHtml(raw) => self.push_text(&raw),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_line();
                let mut style = Style::default()
                    .fg(self.palette.heading)
                    .add_modifier(Modifier::BOLD);
                if level == pulldown_cmark::HeadingLevel::H1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                self.push_style(style);
            }
            Tag::Paragraph => self.flush_line(),
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::BlockQuote { .. } => {
                self.flush_line();
                self.quote_depth += 1;
                self.push_style(Style::default().fg(self.palette.quote));
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        self.spans.push(Span::styled(
                            format!("  [{}]", lang),
                            Style::default().fg(self.palette.rule),
                        ));
                        self.flush_line();
                    }
                }
            }
            Tag::List(start) => {
                self.flush_line();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{}. ", n);
                        *n += 1;
                        m
                    }
                    _ => "• ".to_string(),
                };
                self.spans.push(Span::styled(
                    format!("{}{}", "  ".repeat(depth), marker),
                    Style::default().fg(self.palette.heading),
                ));
            }
            Tag::Link { dest_url, .. } => {
                self.link_target = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(self.palette.link)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            Tag::TableHead => {
                self.flush_line();
                self.push_style(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::TableRow => self.flush_line(),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading { .. } => {
                self.pop_style();
                self.blank_line();
            }
            TagEnd::Paragraph => self.blank_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::BlockQuote { .. } => {
                self.flush_line();
                self.pop_style();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank_line();
            }
            TagEnd::CodeBlock { .. } => {
                self.in_code_block = false;
                self.blank_line();
            }
            TagEnd::List { .. } => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_target.take() {
                    self.spans.push(Span::styled(
                        format!(" <{}>", url),
                        Style::default().fg(self.palette.rule),
                    ));
                }
            }
            TagEnd::TableCell => self.push_text(" │ "),
            TagEnd::TableHead => {
                self.pop_style();
                self.flush_line();
            }
            TagEnd::TableRow => self.flush_line(),
            TagEnd::Table => self.blank_line(),
            _ => {}
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> MarkdownPalette {
        MarkdownPalette {
            text: Color::White,
            heading: Color::Cyan,
            code: Color::Yellow,
            quote: Color::Gray,
            link: Color::Blue,
            rule: Color::DarkGray,
        }
    }

    fn plain_lines(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn html_heading_and_table() {
        let html = to_html("# Report\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Report</h1>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn heading_is_bold_without_hashes() {
        let text = to_text("# Report\n\nBody text.", &palette());
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["Report", "", "Body text."]);
        let heading = &text.lines[0].spans[0];
        assert!(heading.style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(heading.style.fg, Some(Color::Cyan));
    }

    #[test]
    fn lists_get_markers() {
        let text = to_text("- risk one\n- risk two\n\n1. first\n2. second\n", &palette());
        let lines = plain_lines(&text);
        assert!(lines.contains(&"• risk one".to_string()));
        assert!(lines.contains(&"• risk two".to_string()));
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
    }

    #[test]
    fn code_block_is_indented_literal() {
        let text = to_text("```\nP/E = 4.2\n# not a heading\n```\n", &palette());
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["    P/E = 4.2", "    # not a heading"]);
    }

    #[test]
    fn inline_emphasis_is_styled() {
        let text = to_text("plain **bold** _it_", &palette());
        let spans = &text.lines[0].spans;
        let bold = spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));
        let it = spans.iter().find(|s| s.content == "it").unwrap();
        assert!(it.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn quote_lines_are_prefixed() {
        let text = to_text("> guidance cut", &palette());
        let lines = plain_lines(&text);
        assert_eq!(lines, vec!["│ guidance cut"]);
    }

    #[test]
    fn empty_input_is_empty_text() {
        assert!(to_text("", &palette()).lines.is_empty());
    }
}
