//! Status bar at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::ui::state::DeskState;

pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &DeskState) {
    let t = &state.theme;

    // Helper to create a keybind badge
    let badge = |key: &str, color: ratatui::style::Color| -> Span {
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(t.bg_dark)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )
    };
    let dim =
        |text: &str| -> Span { Span::styled(text.to_string(), Style::default().fg(t.text_dim)) };

    let mut spans = vec![
        Span::styled(" ", Style::default()),
        badge("Esc", t.accent),
        dim(&t!("status.quit")),
        badge("Enter", t.accent),
        dim(&t!("status.run")),
        badge("Tab", t.accent),
        dim(&t!("status.field")),
        badge("Alt+Enter", t.accent),
        dim(&t!("status.newline")),
        badge("PgUp/PgDn", t.accent),
        dim(&t!("status.scroll")),
    ];

    // Auto-expiring status message
    if let Some((msg, when)) = &state.status_message {
        if when.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS {
            spans.push(Span::styled(
                format!("  {} ", msg),
                Style::default().fg(t.warning).add_modifier(Modifier::BOLD),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
