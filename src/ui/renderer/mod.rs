//! Renderer module: split into focused submodules.
//!
//! - `header`: Title, API base, health line
//! - `form`: Ticker and prompt inputs, run button
//! - `report`: Rendered report, error card, waiting hint
//! - `status_bar`: Bottom status bar with keybinds and status message
//! - `helpers`: Shared rendering utilities

mod form;
mod header;
pub mod helpers;
mod report;
mod status_bar;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::constants::{
    HEADER_HEIGHT, MIN_TERMINAL_HEIGHT, MIN_TERMINAL_WIDTH, PROMPT_INPUT_HEIGHT,
    TICKER_INPUT_HEIGHT,
};

use super::state::DeskState;

/// Top-level render function. Delegates to sub-renderers per region.
pub fn render(frame: &mut Frame, state: &DeskState) {
    let size = frame.area();

    if size.width < MIN_TERMINAL_WIDTH || size.height < MIN_TERMINAL_HEIGHT {
        let msg = Paragraph::new(Line::styled(
            t!("app.too_small").to_string(),
            Style::default().fg(state.theme.warning),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(msg, helpers::centered_rect(size.width, 1, size));
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TICKER_INPUT_HEIGHT + PROMPT_INPUT_HEIGHT + 1), // Form
            Constraint::Min(3),    // Report
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    header::render_header(frame, main_chunks[0], state);
    form::render_form(frame, main_chunks[1], state);
    report::render_report(frame, main_chunks[2], state);
    status_bar::render_status_bar(frame, main_chunks[3], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AnalysisResponse, HealthStatus};
    use crate::report::{MarkdownCapability, ReportRenderer};
    use crate::ui::state::{DefaultAction, Settlement, SubmitTrigger};
    use crate::ui::Theme;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn make_state() -> DeskState {
        rust_i18n::set_locale("en");
        DeskState::new("http://127.0.0.1:8787", "AAPL", "risks", Theme::default_dark())
    }

    fn draw(state: &DeskState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn shows_api_base_and_health() {
        let mut state = make_state();
        state.set_health(HealthStatus::Reachable);
        let screen = draw(&state, 100, 30);
        assert!(screen.contains("http://127.0.0.1:8787"));
        assert!(screen.contains("API reachable"));
        assert!(screen.contains("AAPL"));
    }

    #[test]
    fn shows_error_card() {
        let mut state = make_state();
        let ticket = state
            .submit(&mut SubmitTrigger::new(DefaultAction::FocusNext))
            .unwrap();
        state.settle(ticket.seq, Settlement::Failure("server error".to_string()));
        let screen = draw(&state, 100, 30);
        assert!(screen.contains("server error"));
    }

    #[test]
    fn shows_rendered_report() {
        let mut state = make_state();
        let ticket = state
            .submit(&mut SubmitTrigger::new(DefaultAction::FocusNext))
            .unwrap();
        let renderer = ReportRenderer::new(MarkdownCapability::Available, &state.theme);
        let content = "# Banco do Brasil\n\nDividend yield above peers.";
        state.settle(
            ticket.seq,
            Settlement::Success {
                response: AnalysisResponse {
                    content_markdown: content.to_string(),
                    session_id: None,
                },
                report: renderer.render(content),
            },
        );
        let screen = draw(&state, 100, 30);
        assert!(screen.contains("Banco do Brasil"));
        assert!(!screen.contains("# Banco"));
        assert!(screen.contains("Dividend yield above peers."));
    }

    fn settle_report(state: &mut DeskState, content: &str, capability: MarkdownCapability) {
        let ticket = state
            .submit(&mut SubmitTrigger::new(DefaultAction::FocusNext))
            .unwrap();
        let renderer = ReportRenderer::new(capability, &state.theme);
        state.settle(
            ticket.seq,
            Settlement::Success {
                response: AnalysisResponse {
                    content_markdown: content.to_string(),
                    session_id: None,
                },
                report: renderer.render(content),
            },
        );
    }

    #[test]
    fn word_wrapped_report_scrolls_to_its_last_line() {
        let mut state = make_state();
        let word = "x".repeat(49);
        let paragraph = format!("{word} {word} {word}");
        let mut content = vec![paragraph; 40].join("\n\n");
        content.push_str("\n\nENDMARK");
        settle_report(&mut state, &content, MarkdownCapability::Available);

        draw(&state, 100, 30);
        state.scroll_report_down(100_000);
        let screen = draw(&state, 100, 30);
        assert!(screen.contains("ENDMARK"));
    }

    #[test]
    fn scrolling_up_after_overscroll_moves_immediately() {
        let mut state = make_state();
        let content = (0..60)
            .map(|i| format!("line-{i:03}"))
            .collect::<Vec<_>>()
            .join("\n");
        settle_report(&mut state, &content, MarkdownCapability::Unavailable);

        draw(&state, 100, 30);
        state.scroll_report_down(1000);
        let at_end = draw(&state, 100, 30);
        assert!(at_end.contains("line-059"));

        state.scroll_report_up(10);
        let after_up = draw(&state, 100, 30);
        assert_ne!(at_end, after_up);
        assert!(!after_up.contains("line-059"));
    }

    #[test]
    fn tiny_terminal_shows_notice() {
        let state = make_state();
        let screen = draw(&state, 30, 10);
        assert!(screen.contains("too small"));
    }
}
