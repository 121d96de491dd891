//! Code entry screen

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::ui::components::{code_cells, spinner, step_header};
use crate::ui::layout::{self, centered_rect_fixed, inset};
use crate::ui::screens::email::PANEL_WIDTH;

/// Natural height of the code panel
pub const PANEL_HEIGHT: u16 = 21;

/// Draw the code entry screen
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

    // While the unlock is pending the panel keeps the email step's height
    // for one more pass.
    let height = app.flow.locked_height().unwrap_or(PANEL_HEIGHT);
    let panel = centered_rect_fixed(PANEL_WIDTH, height, chunks[1]);
    app.last_panel_height = Some(panel.height);

    let theme = &app.theme;
    layout::render_header(frame, chunks[0], theme);

    let mut hints: Vec<(&str, &str)> = vec![("Esc", "Change email"), ("Enter", "Next")];
    if app.flow.can_resend() {
        hints.push(("r", "Send again"));
    }
    layout::render_footer(frame, chunks[2], &hints, theme);

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
            Constraint::Min(10),   // Card
        ])
        .split(inner);

    step_header::render(frame, rows[0], app.flow.step(), theme);
    render_card(frame, rows[2], app);
}

fn render_card(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let email = app.flow.verified_email().unwrap_or_default();

    let card_block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border());
    let card = card_block.inner(area);
    frame.render_widget(card_block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Confirmed email bar
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Section label
            Constraint::Length(2), // Explainer
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Cells
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Resend
            Constraint::Length(1), // Verifying
            Constraint::Length(1), // Error
        ])
        .split(card);

    render_email_bar(frame, rows[0], app, email);

    let section = Paragraph::new("Enter verification code")
        .style(theme.text())
        .alignment(Alignment::Center);
    frame.render_widget(section, inset(rows[2], 1, 0));

    let explainer = Paragraph::new(format!(
        "Enter the code sent to {email} to use your saved information."
    ))
    .style(theme.text_secondary())
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center);
    frame.render_widget(explainer, inset(rows[3], 1, 0));

    let code_error = app.code_touched && !app.flow.code().is_valid();
    code_cells::render(
        frame,
        inset(rows[5], 1, 0),
        app.flow.code(),
        &app.segments,
        code_error,
        theme,
    );

    render_resend(frame, inset(rows[7], 1, 0), app);

    if app.flow.in_flight() {
        let verifying = Paragraph::new(format!("{} Verifying…", spinner::frame(app.tick)))
            .style(theme.text_secondary())
            .alignment(Alignment::Center);
        frame.render_widget(verifying, inset(rows[8], 1, 0));
    }

    if code_error {
        let message = format!("Enter the {}-digit code.", app.flow.code().length());
        let error = Paragraph::new(message)
            .style(theme.danger())
            .alignment(Alignment::Center);
        frame.render_widget(error, inset(rows[9], 1, 0));
    }
}

fn render_email_bar(frame: &mut Frame, area: Rect, app: &App, email: &str) {
    let theme = &app.theme;
    frame.buffer_mut().set_style(area, theme.header_bar());

    // The sheen replays across the address right-to-left each time the
    // email is (re)confirmed.
    let window = app.sheen.window(email.chars().count());
    let mut spans = vec![Span::styled("Email  ", theme.label())];
    match window {
        Some(range) => {
            for (i, ch) in email.chars().enumerate() {
                let style = if range.contains(&i) {
                    theme.sheen_highlight()
                } else {
                    theme.text()
                };
                spans.push(Span::styled(ch.to_string(), style));
            }
        }
        None => spans.push(Span::styled(email, theme.text())),
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inset(area, 1, 0));

    let change = Paragraph::new("Change")
        .style(theme.link())
        .alignment(Alignment::Right);
    frame.render_widget(change, inset(area, 1, 0));
}

fn render_resend(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let cooldown = app.flow.cooldown();

    let line = if cooldown.is_ready() {
        Line::from(vec![
            Span::styled("Didn't receive a code? ", theme.text_secondary()),
            Span::styled("Send again", theme.link()),
        ])
    } else {
        Line::from(Span::styled(
            format!("Send again in {}", cooldown.remaining_formatted()),
            theme.text_secondary(),
        ))
    };

    let widget = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}
