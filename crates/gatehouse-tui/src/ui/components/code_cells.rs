//! Segmented code cell rendering
//!
//! Presentation only: the input protocol lives in
//! [`gatehouse_core::SegmentedInput`], and the `error` flag changes nothing
//! but the border styling.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use gatehouse_core::{CodeField, SegmentedInput};

use crate::ui::Theme;

/// Cell box width in columns
const CELL_WIDTH: u16 = 5;
/// Cell box height in rows
const CELL_HEIGHT: u16 = 3;
/// Gap between cells
const CELL_GAP: u16 = 2;

/// Total width of a `length`-cell row
pub fn row_width(length: usize) -> u16 {
    let length = length as u16;
    length * CELL_WIDTH + length.saturating_sub(1) * CELL_GAP
}

/// Draw the cell row centered in `area`
pub fn render(
    frame: &mut Frame,
    area: Rect,
    code: &CodeField,
    segments: &SegmentedInput,
    error: bool,
    theme: &Theme,
) {
    let length = code.length();
    let x0 = area.x + area.width.saturating_sub(row_width(length)) / 2;
    let height = CELL_HEIGHT.min(area.height);

    for i in 0..length {
        let x = x0 + i as u16 * (CELL_WIDTH + CELL_GAP);
        if x + CELL_WIDTH > area.right() {
            break;
        }
        let cell = Rect::new(x, area.y, CELL_WIDTH, height);

        let focused = i == segments.focus();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.cell_border(focused, error));
        let inner = block.inner(cell);
        frame.render_widget(block, cell);

        let digit = code.digit_at(i).map(String::from).unwrap_or_default();
        let digit_widget = Paragraph::new(digit)
            .style(theme.cell_digit())
            .alignment(Alignment::Center);
        frame.render_widget(digit_widget, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_width_accounts_for_gaps() {
        assert_eq!(row_width(1), 5);
        assert_eq!(row_width(4), 4 * 5 + 3 * 2);
        assert_eq!(row_width(6), 6 * 5 + 5 * 2);
    }
}
