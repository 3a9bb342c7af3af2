//! Shared rendering helpers: scrollbar, centered rect, cursor follow.

use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render a vertical scrollbar inside a bordered area (1px vertical margin).
///
/// Only renders if `total` exceeds the visible height.
pub fn render_scrollbar_bordered(frame: &mut Frame, area: Rect, total: usize, position: usize) {
    let visible_height = area.height.saturating_sub(2) as usize;
    if total <= visible_height {
        return;
    }
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▲"))
        .end_symbol(Some("▼"));
    let mut scrollbar_state = ScrollbarState::new(total).position(position);
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}

/// Return a `Rect` centered within `area` with the given dimensions.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Offset that keeps `cursor` visible in a window of `visible` cells.
pub fn follow_cursor(cursor: usize, visible: u16) -> usize {
    cursor.saturating_sub(visible.saturating_sub(1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(40, 10, area);
        assert_eq!(r, Rect::new(30, 15, 40, 10));
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 20, 8);
        let r = centered_rect(40, 10, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.height, 8);
        assert_eq!(r.x, 5);
    }

    #[test]
    fn follow_cursor_offsets() {
        assert_eq!(follow_cursor(3, 10), 0);
        assert_eq!(follow_cursor(9, 10), 0);
        assert_eq!(follow_cursor(10, 10), 1);
        assert_eq!(follow_cursor(5, 0), 5);
    }
}
