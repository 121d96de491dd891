//! Email entry screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::ui::components::{spinner, step_header};
use crate::ui::layout::{self, centered_rect_fixed, inset};

/// Flow panel width shared by every step
pub const PANEL_WIDTH: u16 = 64;

/// Natural height of the email panel
pub const PANEL_HEIGHT: u16 = 13;

/// Draw the email entry screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let panel = centered_rect_fixed(PANEL_WIDTH, PANEL_HEIGHT, chunks[1]);
    app.last_panel_height = Some(panel.height);

    let theme = &app.theme;
    layout::render_header(frame, chunks[0], theme);
    layout::render_footer(frame, chunks[2], &[("Esc", "Back"), ("Enter", "Next")], theme);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = inset(block.inner(panel), 2, 0);
    frame.render_widget(block, panel);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step header
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Field label
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Actions
        ])
        .split(inner);

    step_header::render(frame, rows[0], app.flow.step(), theme);

    let label = Paragraph::new("Email").style(theme.label());
    frame.render_widget(label, rows[2]);

    render_input(frame, rows[3], app);

    if app.email_touched && !app.flow.email().is_valid() {
        let message = if app.flow.email().trimmed().is_empty() {
            "Email is required."
        } else {
            "Enter a valid email address."
        };
        let error = Paragraph::new(message).style(theme.danger());
        frame.render_widget(error, rows[4]);
    }

    render_actions(frame, rows[6], app);

    // The submit sweep paints over the finished panel.
    app.veil.render(frame, panel, theme);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let in_flight = app.flow.in_flight();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if in_flight {
            theme.step_label()
        } else {
            theme.border_focused()
        });
    let input_inner = block.inner(area);
    frame.render_widget(block, area);

    let value = app.flow.email().raw();
    if value.is_empty() {
        let placeholder = Paragraph::new("Enter your email").style(theme.placeholder(in_flight));
        frame.render_widget(placeholder, input_inner);
    } else {
        // Leave room for the cursor and the in-flight spinner.
        let avail = input_inner.width.saturating_sub(3) as usize;
        let visible = visible_tail(value, avail);
        let mut spans = vec![Span::styled(visible, theme.input(true))];
        if !in_flight {
            spans.push(Span::styled("▏", theme.text_secondary()));
        }
        let text = Paragraph::new(Line::from(spans)).style(theme.input(true));
        frame.render_widget(text, input_inner);
    }

    if in_flight && input_inner.width > 0 {
        let spot = Rect::new(
            input_inner.right().saturating_sub(1),
            input_inner.y,
            1,
            1,
        );
        let glyph = Paragraph::new(spinner::frame(app.tick)).style(theme.step_label());
        frame.render_widget(glyph, spot);
    }
}

fn render_actions(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let back = Paragraph::new("◂ Back").style(theme.link());
    frame.render_widget(back, area);

    let next_style = if app.flow.can_submit() {
        theme.step_label()
    } else {
        theme.text_muted()
    };
    let next = Paragraph::new("Next ▸")
        .style(next_style)
        .alignment(Alignment::Right);
    frame.render_widget(next, area);
}

/// Trailing slice of `value` that fits in `avail` columns
fn visible_tail(value: &str, avail: usize) -> &str {
    let mut width = 0usize;
    let mut start = value.len();
    for (idx, ch) in value.char_indices().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > avail {
            break;
        }
        width += ch_width;
        start = idx;
    }
    &value[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_tail_keeps_the_end_of_long_values() {
        assert_eq!(visible_tail("user@example.com", 100), "user@example.com");
        assert_eq!(visible_tail("user@example.com", 7), "ple.com");
        assert_eq!(visible_tail("abc", 0), "");
    }
}
