//! Report pane: the rendered report, the error card, or a waiting hint.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::state::DeskState;
use crate::ui::{Outcome, Phase};
use crate::utils::{loading_dots, spinner_char};

use super::helpers::render_scrollbar_bordered;

pub fn render_report(frame: &mut Frame, area: Rect, state: &DeskState) {
    let report = match (state.phase(), &state.report) {
        (Phase::Settled(Outcome::Failure), _) => {
            state.record_report_max_scroll(0);
            render_error(frame, area, state);
            return;
        }
        (Phase::Settled(Outcome::Success), Some(report)) => report,
        _ => {
            state.record_report_max_scroll(0);
            render_placeholder(frame, area, state);
            return;
        }
    };

    let t = &state.theme;

    let mut title = vec![Span::styled(
        format!(" {} ", t!("report.title")),
        Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = state.settled_at {
        title.push(Span::styled(
            format!("· {} ", at.format("%H:%M:%S")),
            Style::default().fg(t.text_muted),
        ));
    }
    if let Some(session) = &state.session_id {
        title.push(Span::styled(
            format!("· {} ", t!("report.session", id = session)),
            Style::default().fg(t.text_muted),
        ));
    }
    let mode = if report.is_markdown() {
        t!("report.markdown")
    } else {
        t!("report.plain")
    };
    title.push(Span::styled(
        format!("[{}] ", mode),
        Style::default().fg(t.text_dim),
    ));

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(t.border_style());
    let inner = block.inner(area);

    let paragraph = Paragraph::new(report.to_text())
        .style(Style::default().fg(t.report_text))
        .wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width);
    let max_scroll = total.saturating_sub(inner.height as usize);
    state.record_report_max_scroll(max_scroll);
    let scroll = state.report_scroll.min(max_scroll);

    let paragraph = paragraph
        .scroll((scroll.min(u16::MAX as usize) as u16, 0))
        .block(block);
    frame.render_widget(paragraph, area);
    render_scrollbar_bordered(frame, area, total, scroll);
}

fn render_error(frame: &mut Frame, area: Rect, state: &DeskState) {
    let t = &state.theme;
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", t!("report.error_title")),
            Style::default().fg(t.danger).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.danger));

    let wrap_width = (block.inner(area).width as usize).saturating_sub(3).max(10);
    let mut lines: Vec<Line> = Vec::new();
    for (i, wrapped) in textwrap::wrap(&state.error, wrap_width).into_iter().enumerate() {
        let marker = if i == 0 { "⚠️ " } else { "   " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(t.danger)),
            Span::styled(wrapped.into_owned(), Style::default().fg(t.text_primary)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, state: &DeskState) {
    let t = &state.theme;
    let line = if state.loading {
        Line::from(vec![
            Span::styled(
                format!(" {} ", spinner_char(state.tick_count)),
                Style::default().fg(t.accent),
            ),
            Span::styled(
                format!("{}{}", t!("report.waiting"), loading_dots(state.tick_count)),
                Style::default().fg(t.text_dim),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!(" {}", t!("report.empty")),
            Style::default().fg(t.text_muted),
        ))
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", t!("report.title")),
            Style::default().fg(t.text_dim),
        ))
        .borders(Borders::ALL)
        .border_style(t.border_style());
    frame.render_widget(Paragraph::new(line).block(block), area);
}
