//! GPIO input abstractions
//!
//! Buttons are sampled through a single batched read so that every line in
//! one sample comes from the same instant.

/// Batched read of all GPIO input levels
///
/// Bit `n` of the returned word is the level of GPIO `n` (1 = high).
/// Implementations must take every line from one read so that callers
/// never see skew between inputs sampled in the same tick.
pub trait PinSnapshot {
    /// Read the level of every GPIO line
    fn read_all(&mut self) -> u32;
}

/// Check a single line in a snapshot taken with [`PinSnapshot::read_all`]
///
/// Lines outside the 32-bit word read low.
pub const fn level(snapshot: u32, gpio: u8) -> bool {
    gpio < 32 && snapshot & (1 << gpio) != 0
}

/// Force every line outside `sampled` high in a raw input word
///
/// Unsampled lines then read as released buttons (active-low).
pub const fn mask_unsampled(raw: u32, sampled: u32) -> u32 {
    raw | !sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl PinSnapshot for Fixed {
        fn read_all(&mut self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_level_lookup() {
        let mut pins = Fixed((1 << 21) | (1 << 3));
        let snap = pins.read_all();

        assert!(level(snap, 21));
        assert!(level(snap, 3));
        assert!(!level(snap, 22));
        assert!(!level(snap, 40));
    }

    #[test]
    fn test_unsampled_lines_read_high() {
        let sampled = (1 << 21) | (1 << 22);
        // Line 21 low, line 22 high, everything else low in the raw word
        let raw = 1 << 22;
        let snap = mask_unsampled(raw, sampled);

        assert!(!level(snap, 21));
        assert!(level(snap, 22));
        assert!(level(snap, 5));
        assert!(level(snap, 31));
    }
}
