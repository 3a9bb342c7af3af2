//! Analysis form: ticker, prompt, run button.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::constants::{PROMPT_INPUT_HEIGHT, TICKER_INPUT_HEIGHT};
use crate::ui::state::{DeskState, Field, TextInput};
use crate::utils::spinner_char;

use super::helpers::follow_cursor;

pub fn render_form(frame: &mut Frame, area: Rect, state: &DeskState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TICKER_INPUT_HEIGHT),
            Constraint::Length(PROMPT_INPUT_HEIGHT),
            Constraint::Length(1), // Run button
        ])
        .split(area);

    render_input(
        frame,
        chunks[0],
        state,
        &state.ticker,
        Field::Ticker,
        &t!("form.ticker"),
        &t!("form.ticker_placeholder"),
    );
    render_input(
        frame,
        chunks[1],
        state,
        &state.prompt,
        Field::Prompt,
        &t!("form.prompt"),
        &t!("form.prompt_placeholder"),
    );
    render_button(frame, chunks[2], state);
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    state: &DeskState,
    input: &TextInput,
    field: Field,
    title: &str,
    placeholder: &str,
) {
    let t = &state.theme;
    let focused = state.focus == field;
    let border_style = if focused {
        t.border_highlight_style()
    } else {
        t.border_style()
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", title), Style::default().fg(t.accent)))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);

    let (row, col) = input.cursor_position();
    let row_offset = follow_cursor(row, inner.height);
    let col_offset = follow_cursor(col, inner.width);

    let paragraph = if input.value().is_empty() {
        Paragraph::new(Line::from(Span::styled(
            placeholder.to_string(),
            Style::default().fg(t.text_muted),
        )))
    } else {
        Paragraph::new(input.value().to_string())
            .style(Style::default().fg(t.text_primary))
            .scroll((row_offset as u16, col_offset as u16))
    };
    frame.render_widget(paragraph.block(block), area);

    if focused {
        let x = inner.x + (col - col_offset) as u16;
        let y = inner.y + (row - row_offset) as u16;
        frame.set_cursor_position((x, y));
    }
}

fn render_button(frame: &mut Frame, area: Rect, state: &DeskState) {
    let t = &state.theme;
    let label = if state.loading {
        t!("form.analyzing", spinner = spinner_char(state.tick_count)).to_string()
    } else {
        t!("form.run").to_string()
    };

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", label), t.button_style(!state.loading)),
    ];
    if !state.loading {
        spans.push(Span::styled(
            t!("form.run_hint").to_string(),
            Style::default().fg(t.text_muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
