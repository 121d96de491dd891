//! Resend cooldown countdown

/// Seconds enforced between code sends
pub const RESEND_COOLDOWN_SECS: u64 = 30;

/// Countdown gating the "send again" affordance.
///
/// This is only the counter; the one-second tick that drives it is an owned
/// resource of the shell, created when the counter leaves zero and torn down
/// when it returns there.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cooldown {
    remaining: u64,
}

impl Cooldown {
    /// Create an expired cooldown
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the countdown
    pub fn start(&mut self, seconds: u64) {
        self.remaining = seconds;
    }

    /// One second elapsed; decrements by exactly 1 while positive
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Seconds left before resend becomes available
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether resend is available
    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    /// Format the remaining time as MM:SS
    pub fn remaining_formatted(&self) -> String {
        let mins = self.remaining / 60;
        let secs = self.remaining % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_ready() {
        let cooldown = Cooldown::new();
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn counts_down_to_zero_and_stays() {
        let mut cooldown = Cooldown::new();
        cooldown.start(2);
        assert!(!cooldown.is_ready());
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 1);
        cooldown.tick();
        assert!(cooldown.is_ready());
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn restart_replaces_the_count() {
        let mut cooldown = Cooldown::new();
        cooldown.start(RESEND_COOLDOWN_SECS);
        cooldown.tick();
        cooldown.start(RESEND_COOLDOWN_SECS);
        assert_eq!(cooldown.remaining(), RESEND_COOLDOWN_SECS);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        let mut cooldown = Cooldown::new();
        cooldown.start(90);
        assert_eq!(cooldown.remaining_formatted(), "01:30");
        cooldown.start(5);
        assert_eq!(cooldown.remaining_formatted(), "00:05");
    }

    proptest! {
        // Ticking never underflows and decreases by at most one.
        #[test]
        fn tick_monotone(start in 0u64..120, ticks in 0usize..200) {
            let mut cooldown = Cooldown::new();
            cooldown.start(start);
            let mut last = cooldown.remaining();
            for _ in 0..ticks {
                cooldown.tick();
                let now = cooldown.remaining();
                prop_assert!(now == last || now == last - 1);
                last = now;
            }
        }
    }
}
