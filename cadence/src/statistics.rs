//! # Statistics Module - Words and Characters Per Minute
//!
//! Speed is derived from the correct totals and the elapsed time in whole seconds. Results are
//! truncated, never rounded, so the same inputs always give the same numbers.
//!
//! ```rust
//! use cadence::statistics::compute_stats;
//!
//! let stats = compute_stats(1, 2, 2);
//! assert_eq!((stats.wpm, stats.cpm), (30, 60));
//! ```

use std::fmt::Display;

const SECONDS_PER_MINUTE: u64 = 60;

/// Typing speed of a test
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Correct words per minute
    pub wpm: u64,
    /// Correct characters per minute
    pub cpm: u64,
}

impl Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} wpm, {} cpm", self.wpm, self.cpm)
    }
}

/// Compute speed from the correct totals.
///
/// Zero elapsed seconds (the test has not started, or is at its first second) yields zero for
/// both rates instead of dividing by zero.
pub fn compute_stats(correct_words: usize, correct_chars: usize, elapsed_seconds: u64) -> Stats {
    if elapsed_seconds == 0 {
        return Stats::default();
    }

    Stats {
        wpm: per_minute(correct_words, elapsed_seconds),
        cpm: per_minute(correct_chars, elapsed_seconds),
    }
}

// floor(count / seconds * 60), done in integers so nothing is lost to float rounding
const fn per_minute(count: usize, elapsed_seconds: u64) -> u64 {
    (count as u64).saturating_mul(SECONDS_PER_MINUTE) / elapsed_seconds
}
