//! Header: title, API base and how to change it, health line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::HealthStatus;
use crate::ui::state::DeskState;
use crate::utils::spinner_char;

pub fn render_header(frame: &mut Frame, area: Rect, state: &DeskState) {
    let t = &state.theme;

    let pulse = if state.tick_count % 2 == 0 { "●" } else { "○" };
    let title = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(pulse, Style::default().fg(t.success)),
        Span::styled(t!("app.name").to_string(), t.header_style()),
        Span::styled(
            t!("app.version", version = env!("CARGO_PKG_VERSION")).to_string(),
            Style::default().fg(t.text_muted),
        ),
    ]);

    let subtitle = Line::from(Span::styled(
        format!(" {}", t!("app.tagline")),
        Style::default().fg(t.text_dim),
    ));

    let api_line = Line::from(vec![
        Span::styled(
            format!(" {}", t!("header.api_base")),
            Style::default().fg(t.text_muted),
        ),
        Span::styled(
            state.api_base.clone(),
            Style::default()
                .fg(t.accent_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            t!("header.change_hint").to_string(),
            Style::default().fg(t.text_muted),
        ),
    ]);

    let (health_text, health_color) = match state.health {
        Some(status @ HealthStatus::Reachable) => (status.message(), t.success),
        Some(status) => (status.message(), t.warning),
        None => (
            t!("header.health_pending", spinner = spinner_char(state.tick_count)).to_string(),
            t.text_dim,
        ),
    };
    let health_line = Line::from(vec![
        Span::styled(
            format!(" {}", t!("header.health")),
            Style::default().fg(t.text_muted),
        ),
        Span::styled(health_text, Style::default().fg(health_color)),
    ]);

    let header = Paragraph::new(vec![subtitle, api_line, health_line]).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(t.border_style()),
    );
    frame.render_widget(header, area);
}
