//! Gatehouse - Terminal email verification flow
//!
//! Collects an email address, plays an animated handoff into a one-time
//! code panel, and hands control to the verified screen once a well-formed
//! code is submitted.

// Theme and layout helpers are shared with the library build
#![allow(dead_code)]

use std::io;
use std::panic;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod ui;

use app::{App, TuiConfig};

/// Terminal email verification flow
#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about)]
struct Cli {
    /// Number of digits in the one-time code
    #[arg(long)]
    code_length: Option<usize>,

    /// Seconds enforced between code sends
    #[arg(long)]
    cooldown_secs: Option<u64>,

    /// Use the high-contrast palette
    #[arg(long)]
    high_contrast: bool,
}

/// Application entry point with panic handling for terminal restoration
#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        original_hook(panic_info);
    }));

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("gatehouse=info".parse()?)
                .add_directive("gatehouse_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = TuiConfig::load();
    if let Some(code_length) = cli.code_length {
        config.code_length = code_length;
    }
    if let Some(cooldown_secs) = cli.cooldown_secs {
        config.resend_cooldown_secs = cooldown_secs;
    }
    if cli.high_contrast {
        config.high_contrast = true;
    }
    let config = config.normalize();

    // Run the application
    let result = run_app(&config).await;

    // Ensure terminal is restored even on error
    if let Err(e) = &result {
        tracing::error!("Application error: {}", e);
    }

    result
}

/// Main application runner
async fn run_app(config: &TuiConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run event loop
    let mut app = App::new(config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}
