//! Handoff animation between email entry and code entry
//!
//! While this plays, the panel height is pinned to the value captured at
//! submit time so the card can unfold underneath the email header without
//! the surrounding layout jumping.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::components::{spinner, step_header};
use crate::ui::layout::{self, centered_rect_fixed, inset};
use crate::ui::screens::email::{PANEL_HEIGHT, PANEL_WIDTH};

/// Draw the transitioning panel
pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(area);

    layout::render_header(frame, chunks[0], theme);

    let height = app.flow.locked_height().unwrap_or(PANEL_HEIGHT);
    let panel = centered_rect_fixed(PANEL_WIDTH, height, chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    let inner = inset(block.inner(panel), 2, 0);
    frame.render_widget(block, panel);

    step_header::render(
        frame,
        Rect::new(inner.x, inner.y, inner.width, inner.height.min(3)),
        app.flow.step(),
        theme,
    );

    // The code card unfolds under the step header as the glide progresses.
    let progress = app.handoff_progress();
    let card_top = inner.y + 4;
    if card_top < inner.bottom() {
        let full = inner.bottom() - card_top;
        let card_height = (f64::from(full) * progress).round().max(2.0) as u16;
        let card = Rect::new(inner.x, card_top, inner.width, card_height.min(full));

        let card_block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_focused());
        let card_inner = card_block.inner(card);
        frame.render_widget(card_block, card);

        if card_inner.height > 0 {
            let bar = Rect::new(card_inner.x, card_inner.y, card_inner.width, 1);
            frame.buffer_mut().set_style(bar, theme.header_bar());

            let email = app.flow.verified_email().unwrap_or_default();
            let header = Paragraph::new(Line::from(vec![
                Span::styled("Email  ", theme.label()),
                Span::styled(email, theme.text()),
            ]));
            frame.render_widget(header, bar);
        }

        if card_inner.height > 2 {
            let hint = Paragraph::new(format!(
                "{} Preparing verification code…",
                spinner::frame(app.tick)
            ))
            .style(theme.text_muted())
            .alignment(Alignment::Center);
            frame.render_widget(
                hint,
                Rect::new(card_inner.x, card_inner.y + 2, card_inner.width, 1),
            );
        }
    }

    app.veil.render(frame, panel, theme);
}
