//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::prelude::*;

use gatehouse_core::Step;

use crate::app::{App, Screen};

/// Main render function - delegates to appropriate screen
pub fn render(frame: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Flow => match app.flow.step() {
            Step::Email => screens::email::render(frame, app),
            Step::Transitioning => screens::handoff::render(frame, app),
            Step::Code => screens::code::render(frame, app),
        },
        Screen::Done => screens::done::render(frame, app),
    }
}
