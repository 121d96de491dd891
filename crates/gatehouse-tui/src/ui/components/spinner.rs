//! In-flight spinner

/// Braille spinner frames
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The spinner glyph for the given animation tick
pub fn frame(tick: u64) -> &'static str {
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_frames() {
        let first = frame(0);
        assert_eq!(frame(FRAMES.len() as u64), first);
        assert_ne!(frame(1), first);
    }
}
