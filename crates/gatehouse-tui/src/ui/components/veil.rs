//! Transient sweep effects
//!
//! Both effects are fire-and-forget: something replays them (the submit
//! visual on every email submission, the sheen whenever the confirmed email
//! changes) and they run to completion on the animation tick, after which
//! rendering becomes a no-op until the next replay.

use std::ops::Range;
use std::time::{Duration, Instant};

use ratatui::prelude::*;

use crate::ui::Theme;

/// How long the full-panel beam takes to cross
const VEIL_DURATION: Duration = Duration::from_millis(700);

/// How long the email sheen takes to cross
const SHEEN_DURATION: Duration = Duration::from_millis(900);

/// Width of the veil beam in columns
const BEAM_WIDTH: u16 = 4;

/// Full-panel sweep played once per submission
#[derive(Debug, Default)]
pub struct Veil {
    started: Option<Instant>,
}

impl Veil {
    /// Create an idle veil
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the sweep from the left edge
    pub fn replay(&mut self) {
        self.started = Some(Instant::now());
    }

    fn progress(&self) -> Option<f64> {
        let started = self.started?;
        let progress = started.elapsed().as_secs_f64() / VEIL_DURATION.as_secs_f64();
        (progress < 1.0).then_some(progress)
    }

    /// Paint the beam over whatever was already rendered in `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let Some(progress) = self.progress() else {
            return;
        };
        let travel = area.width.saturating_add(BEAM_WIDTH) as f64;
        let head = area.x + (progress * travel) as u16;
        let tail = head.saturating_sub(BEAM_WIDTH).max(area.x);
        let head = head.min(area.right());
        if head > tail {
            let beam = Rect::new(tail, area.y, head - tail, area.height);
            frame.buffer_mut().set_style(beam, theme.veil_beam());
        }
    }
}

/// Right-to-left highlight across the confirmed email text
#[derive(Debug, Default)]
pub struct Sheen {
    started: Option<Instant>,
    last_key: u64,
}

impl Sheen {
    /// Create an idle sheen
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay when the flow hands out a key not seen before
    pub fn sync(&mut self, key: u64) {
        if key != self.last_key {
            self.last_key = key;
            self.started = Some(Instant::now());
        }
    }

    /// Character range currently highlighted in a `len`-character string
    pub fn window(&self, len: usize) -> Option<Range<usize>> {
        let started = self.started?;
        let progress = started.elapsed().as_secs_f64() / SHEEN_DURATION.as_secs_f64();
        if progress >= 1.0 || len == 0 {
            return None;
        }
        // Sweeps right to left.
        let center = ((1.0 - progress) * len as f64) as usize;
        let start = center.saturating_sub(2);
        let end = (center + 2).min(len);
        (end > start).then(|| start..end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_effects_render_nothing() {
        let veil = Veil::new();
        assert!(veil.progress().is_none());

        let sheen = Sheen::new();
        assert!(sheen.window(10).is_none());
    }

    #[test]
    fn sheen_replays_only_on_new_keys() {
        let mut sheen = Sheen::new();
        sheen.sync(1);
        assert!(sheen.window(10).is_some());

        let started = sheen.started;
        sheen.sync(1);
        assert_eq!(sheen.started, started);
    }

    #[test]
    fn fresh_veil_is_in_progress() {
        let mut veil = Veil::new();
        veil.replay();
        assert!(veil.progress().is_some());
    }
}
