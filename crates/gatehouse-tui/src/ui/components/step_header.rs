//! Step indicator and heading above the flow panel

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use gatehouse_core::Step;

use crate::ui::Theme;

/// Step indicator text for the onboarding sequence this flow sits in
pub fn step_indicator(step: Step) -> &'static str {
    match step {
        Step::Email => "Step 3/9",
        // The handoff is already heading for the code panel.
        Step::Transitioning | Step::Code => "Step 4/9",
    }
}

/// Draw the step label, heading, and subheading
pub fn render(frame: &mut Frame, area: Rect, step: Step, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Step label
            Constraint::Length(1), // Heading
            Constraint::Length(1), // Subheading
        ])
        .split(area);

    let label = Paragraph::new(step_indicator(step)).style(theme.step_label());
    frame.render_widget(label, chunks[0]);

    let heading = Paragraph::new("What is your email?").style(theme.title());
    frame.render_widget(heading, chunks[1]);

    let subheading =
        Paragraph::new("This is where we send the note").style(theme.text_secondary());
    frame.render_widget(subheading, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_follows_the_step() {
        assert_eq!(step_indicator(Step::Email), "Step 3/9");
        assert_eq!(step_indicator(Step::Transitioning), "Step 4/9");
        assert_eq!(step_indicator(Step::Code), "Step 4/9");
    }
}
