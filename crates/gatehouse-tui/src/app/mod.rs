//! Application state and event handling

pub mod config;
pub mod events;

pub use config::TuiConfig;
pub use events::{Event, EventHandler, Ticker};

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::info;

use gatehouse_core::{AnimTarget, FlowEffect, FlowEvent, SegmentedInput, Step, VerifyFlow};

use crate::ui;
use crate::ui::components::veil::{Sheen, Veil};
use crate::ui::Theme;

/// Application result type
pub type AppResult<T> = anyhow::Result<T>;

/// How long the email header glides into the code panel
pub const HANDOFF_DURATION: Duration = Duration::from_millis(650);

/// Cosmetic pause between pressing submit and the submission settling.
/// Purely for perceived responsiveness; the flow is correct without it.
const SUBMIT_PAUSE: Duration = Duration::from_millis(450);

/// Animation frame rate
const TICK_RATE: Duration = Duration::from_millis(100);

/// Current screen/view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// The verification flow (email, handoff, code)
    #[default]
    Flow,

    /// Verified; the flow has handed control off
    Done,
}

/// Main application struct
pub struct App {
    /// The verification flow engine
    pub flow: VerifyFlow,

    /// Focus bookkeeping for the code cells
    pub segments: SegmentedInput,

    /// Current screen
    pub screen: Screen,

    /// Visual theme
    pub theme: Theme,

    /// Whether an email submit attempt has been made (gates inline errors)
    pub email_touched: bool,

    /// Whether a code submit attempt has been made
    pub code_touched: bool,

    /// Tick counter for animations
    pub tick: u64,

    /// Full-panel sweep replayed on every email submission
    pub veil: Veil,

    /// Highlight sweep across the confirmed email text
    pub sheen: Sheen,

    /// When the current handoff started, for glide interpolation
    pub handoff_started: Option<Instant>,

    /// Height of the flow panel as last rendered
    pub last_panel_height: Option<u16>,

    /// Whether the app should quit
    pub should_quit: bool,

    events: EventHandler,
    cooldown_ticker: Ticker,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &TuiConfig) -> Self {
        let theme = if config.high_contrast {
            Theme::high_contrast()
        } else {
            Theme::default()
        };

        Self {
            flow: VerifyFlow::new(config.code_length)
                .with_resend_seconds(config.resend_cooldown_secs),
            segments: SegmentedInput::new(config.code_length),
            screen: Screen::Flow,
            theme,
            email_touched: false,
            code_touched: false,
            tick: 0,
            veil: Veil::new(),
            sheen: Sheen::new(),
            handoff_started: None,
            last_panel_height: None,
            should_quit: false,
            events: EventHandler::new(TICK_RATE),
            cooldown_ticker: Ticker::new(),
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> AppResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;
            // That draw was the rendering pass the height unlock waits for.
            self.flow.handle(FlowEvent::RenderSettled);

            match self.events.recv().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Key(_) => {}
            Event::Paste(text) => self.handle_paste(&text),
            Event::Tick => self.tick = self.tick.wrapping_add(1),
            Event::Resize => {}
            Event::CooldownTick => {
                let effects = self.flow.handle(FlowEvent::CooldownTick);
                self.apply_effects(effects);
                if self.flow.cooldown().is_ready() {
                    self.cooldown_ticker.stop();
                }
            }
            Event::SubmitSettled => {
                let container_height = self.last_panel_height;
                let effects = self
                    .flow
                    .handle(FlowEvent::SubmitSettled { container_height });
                self.apply_effects(effects);
            }
            Event::HandoffComplete { target, generation } => {
                let effects = self
                    .flow
                    .handle(FlowEvent::HandoffComplete { target, generation });
                self.apply_effects(effects);
            }
        }
    }

    /// Handle key press events
    fn handle_key(&mut self, key: KeyEvent) {
        // Global quit handler
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Done => self.handle_done_key(key.code),
            Screen::Flow => match self.flow.step() {
                Step::Email => self.handle_email_key(key.code),
                // Input is parked while the handoff plays.
                Step::Transitioning => {}
                Step::Code => self.handle_code_key(key.code),
            },
        }
    }

    fn handle_email_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => self.press_submit(),
            KeyCode::Backspace if !self.flow.in_flight() => {
                self.flow.email_mut().pop();
            }
            KeyCode::Char(c) if !self.flow.in_flight() => {
                self.flow.email_mut().push(c);
            }
            _ => {}
        }
    }

    fn handle_code_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc if !self.flow.in_flight() => {
                let effects = self.flow.handle(FlowEvent::ChangeEmail);
                self.apply_effects(effects);
            }
            KeyCode::Enter => self.press_submit(),
            KeyCode::Char('r') if self.flow.can_resend() && !self.flow.in_flight() => {
                let effects = self.flow.handle(FlowEvent::ResendRequested);
                self.apply_effects(effects);
                self.arm_cooldown_ticker();
                info!("verification code resent");
            }
            KeyCode::Backspace if !self.flow.in_flight() => {
                self.segments.backspace(self.flow.code_mut());
            }
            KeyCode::Left => self.segments.move_left(),
            KeyCode::Right => self.segments.move_right(),
            KeyCode::Char(c) if !self.flow.in_flight() => {
                self.segments.insert(c, self.flow.code_mut());
            }
            _ => {}
        }
    }

    fn handle_done_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.screen != Screen::Flow || self.flow.in_flight() {
            return;
        }
        match self.flow.step() {
            Step::Email => {
                for ch in text.chars().filter(|c| !c.is_control()) {
                    self.flow.email_mut().push(ch);
                }
            }
            Step::Code => self.segments.paste(text, self.flow.code_mut()),
            Step::Transitioning => {}
        }
    }

    /// Activate the submit affordance for the active step
    fn press_submit(&mut self) {
        if !self.flow.can_submit() {
            // Record the attempt so the inline validation message shows.
            match self.flow.step() {
                Step::Email => self.email_touched = true,
                Step::Code => self.code_touched = true,
                Step::Transitioning => {}
            }
            return;
        }

        let effects = self.flow.handle(FlowEvent::SubmitPressed);
        self.apply_effects(effects);

        if self.flow.in_flight() {
            let tx = self.events.sender();
            tokio::spawn(async move {
                tokio::time::sleep(SUBMIT_PAUSE).await;
                let _ = tx.send(Event::SubmitSettled);
            });
        }
    }

    fn apply_effects(&mut self, effects: Vec<FlowEffect>) {
        for effect in effects {
            match effect {
                FlowEffect::SubmitBegan => self.veil.replay(),
                FlowEffect::Verified => {
                    info!(email = ?self.flow.verified_email(), "verification complete");
                    // The flow has handed off; its tick source goes with it.
                    self.cooldown_ticker.stop();
                    self.screen = Screen::Done;
                }
                FlowEffect::StepChanged(step) => {
                    info!(?step, "step changed");
                    match step {
                        Step::Email => {
                            self.email_touched = false;
                        }
                        Step::Transitioning => {
                            self.handoff_started = Some(Instant::now());
                            self.spawn_handoff_drivers();
                            self.arm_cooldown_ticker();
                        }
                        Step::Code => {
                            // The code panel mounts with the first cell
                            // focused and a fresh sheen.
                            self.segments = SegmentedInput::new(self.flow.code().length());
                            self.code_touched = false;
                            self.sheen.sync(self.flow.sheen_key());
                            self.handoff_started = None;
                        }
                    }
                }
            }
        }
    }

    /// Start the one-second tick when the countdown leaves zero
    fn arm_cooldown_ticker(&mut self) {
        if !self.flow.cooldown().is_ready() {
            self.cooldown_ticker.spawn(self.events.sender());
        }
    }

    /// Drive the handoff animation. The panel driver reports completion
    /// with the panel target; the nested sheen finishes earlier and
    /// reports with its own target, which the flow ignores.
    fn spawn_handoff_drivers(&self) {
        let generation = self.flow.handoff_generation();

        let tx = self.events.sender();
        tokio::spawn(async move {
            tokio::time::sleep(HANDOFF_DURATION).await;
            let _ = tx.send(Event::HandoffComplete {
                target: AnimTarget::FlowPanel,
                generation,
            });
        });

        let tx = self.events.sender();
        tokio::spawn(async move {
            tokio::time::sleep(HANDOFF_DURATION / 2).await;
            let _ = tx.send(Event::HandoffComplete {
                target: AnimTarget::EmailSheen,
                generation,
            });
        });
    }

    /// Progress of the current handoff glide in 0..=1
    pub fn handoff_progress(&self) -> f64 {
        match self.handoff_started {
            Some(started) => {
                (started.elapsed().as_secs_f64() / HANDOFF_DURATION.as_secs_f64()).min(1.0)
            }
            None => 1.0,
        }
    }
}
