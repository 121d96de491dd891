//! Post-verification screen
//!
//! Stands in for the page the flow hands off to once the code is accepted.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::layout::centered_rect;

/// Draw the verified screen
pub fn render(frame: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let area = frame.area();

    let dialog = centered_rect(50, 40, area);

    let block = Block::default()
        .title(" Verified ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Checkmark
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Email
            Constraint::Min(1),    // Spacer
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let mark = Paragraph::new("✓ Email verified")
        .style(theme.success())
        .alignment(Alignment::Center);
    frame.render_widget(mark, chunks[0]);

    if let Some(email) = app.flow.verified_email() {
        let who = Paragraph::new(format!("You're signed in as {email}"))
            .style(theme.text())
            .alignment(Alignment::Center);
        frame.render_widget(who, chunks[2]);
    }

    let help = Paragraph::new("[q] Quit")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
