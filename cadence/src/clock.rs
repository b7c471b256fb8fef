//! # Clock Module - Time Sources
//!
//! A test session only ever asks its time source four things: has it started, how many whole
//! seconds have passed, has it run out, and start/stop. Both a countdown and an open-ended
//! stopwatch answer them, so the session treats them the same way.

use web_time::{Duration, Instant};

use crate::InvalidInput;

/// Capability interface of a test timer
pub trait TimeSource {
    fn has_started(&self) -> bool;

    /// Whole seconds since [TimeSource::start], frozen by [TimeSource::stop]
    fn elapsed_seconds(&self) -> u64;

    /// True once the time limit, if any, has been reached
    fn expired(&self) -> bool;

    /// Starts the timer. Calling it again has no effect.
    fn start(&mut self);

    /// Freezes the elapsed time. Has no effect before the timer started.
    fn stop(&mut self);
}

/// Start/stop timing shared by the wall-clock sources
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Span {
    started_at: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl Span {
    const fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    const fn stop_at(&mut self, now: Instant) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(now);
        }
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::ZERO;
        };

        self.stopped_at
            .unwrap_or(now)
            .saturating_duration_since(started_at)
    }
}

/// Open-ended timer. Never expires.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    span: Span,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_at(&mut self, now: Instant) {
        self.span.start_at(now);
    }

    pub fn stop_at(&mut self, now: Instant) {
        self.span.stop_at(now);
    }

    pub fn elapsed_seconds_at(&self, now: Instant) -> u64 {
        self.span.elapsed_at(now).as_secs()
    }
}

impl TimeSource for Stopwatch {
    fn has_started(&self) -> bool {
        self.span.started_at.is_some()
    }

    fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds_at(Instant::now())
    }

    fn expired(&self) -> bool {
        false
    }

    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn stop(&mut self) {
        self.stop_at(Instant::now());
    }
}

/// Timer with a fixed limit. Elapsed time is capped at the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    limit: Duration,
    span: Span,
}

impl Countdown {
    pub fn new(limit_seconds: u64) -> Self {
        Self {
            limit: Duration::from_secs(limit_seconds),
            span: Span::default(),
        }
    }

    pub const fn limit_seconds(&self) -> u64 {
        self.limit.as_secs()
    }

    pub fn start_at(&mut self, now: Instant) {
        self.span.start_at(now);
    }

    pub fn stop_at(&mut self, now: Instant) {
        self.span.stop_at(now);
    }

    pub fn elapsed_seconds_at(&self, now: Instant) -> u64 {
        self.span.elapsed_at(now).min(self.limit).as_secs()
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        self.span.started_at.is_some() && self.span.elapsed_at(now) >= self.limit
    }

    /// Seconds left on the countdown, for display
    pub fn remaining_seconds(&self) -> u64 {
        self.limit_seconds() - self.elapsed_seconds()
    }
}

impl TimeSource for Countdown {
    fn has_started(&self) -> bool {
        self.span.started_at.is_some()
    }

    fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds_at(Instant::now())
    }

    fn expired(&self) -> bool {
        self.expired_at(Instant::now())
    }

    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn stop(&mut self) {
        self.stop_at(Instant::now());
    }
}

/// The wall-clock time source picked by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    Stopwatch(Stopwatch),
    Countdown(Countdown),
}

impl Clock {
    /// A timeout of zero means no time limit.
    pub fn from_timeout(timeout_seconds: i64) -> Result<Self, InvalidInput> {
        match u64::try_from(timeout_seconds) {
            Ok(0) => Ok(Self::Stopwatch(Stopwatch::new())),
            Ok(limit) => Ok(Self::Countdown(Countdown::new(limit))),
            Err(_) => Err(InvalidInput::NegativeTimeout(timeout_seconds)),
        }
    }

    /// Remaining seconds for a countdown, `None` for a stopwatch
    pub fn remaining_seconds(&self) -> Option<u64> {
        match self {
            Self::Stopwatch(_) => None,
            Self::Countdown(countdown) => Some(countdown.remaining_seconds()),
        }
    }
}

impl TimeSource for Clock {
    fn has_started(&self) -> bool {
        match self {
            Self::Stopwatch(source) => source.has_started(),
            Self::Countdown(source) => source.has_started(),
        }
    }

    fn elapsed_seconds(&self) -> u64 {
        match self {
            Self::Stopwatch(source) => source.elapsed_seconds(),
            Self::Countdown(source) => source.elapsed_seconds(),
        }
    }

    fn expired(&self) -> bool {
        match self {
            Self::Stopwatch(source) => source.expired(),
            Self::Countdown(source) => source.expired(),
        }
    }

    fn start(&mut self) {
        match self {
            Self::Stopwatch(source) => source.start(),
            Self::Countdown(source) => source.start(),
        }
    }

    fn stop(&mut self) {
        match self {
            Self::Stopwatch(source) => source.stop(),
            Self::Countdown(source) => source.stop(),
        }
    }
}

/// A time source driven by hand, for tests and headless drivers.
///
/// Elapsed time only changes through [ManualClock::set_elapsed] and [ManualClock::advance],
/// and only while running.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    limit: Option<u64>,
    elapsed: u64,
    started: bool,
    stopped: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manual clock that expires once `limit` seconds have been reached
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    const fn is_running(&self) -> bool {
        self.started && !self.stopped
    }

    pub fn set_elapsed(&mut self, seconds: u64) {
        if self.is_running() {
            self.elapsed = seconds;
        }
    }

    pub fn advance(&mut self, seconds: u64) {
        self.set_elapsed(self.elapsed + seconds);
    }
}

impl TimeSource for ManualClock {
    fn has_started(&self) -> bool {
        self.started
    }

    fn elapsed_seconds(&self) -> u64 {
        self.limit
            .map_or(self.elapsed, |limit| self.elapsed.min(limit))
    }

    fn expired(&self) -> bool {
        self.limit
            .is_some_and(|limit| self.started && self.elapsed >= limit)
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        if self.started {
            self.stopped = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_measures_until_stopped() {
        let now = Instant::now();
        let mut stopwatch = Stopwatch::new();

        assert!(!stopwatch.has_started());
        assert_eq!(stopwatch.elapsed_seconds_at(now + Duration::from_secs(5)), 0);

        stopwatch.start_at(now);
        assert!(stopwatch.has_started());
        assert_eq!(
            stopwatch.elapsed_seconds_at(now + Duration::from_millis(2_900)),
            2
        );

        stopwatch.stop_at(now + Duration::from_secs(4));
        assert_eq!(stopwatch.elapsed_seconds_at(now + Duration::from_secs(60)), 4);
        assert!(!stopwatch.expired());
    }

    #[test]
    fn test_start_is_idempotent() {
        let now = Instant::now();
        let mut stopwatch = Stopwatch::new();

        stopwatch.start_at(now);
        stopwatch.start_at(now + Duration::from_secs(3));

        assert_eq!(stopwatch.elapsed_seconds_at(now + Duration::from_secs(3)), 3);
    }

    #[test]
    fn test_countdown_expires_at_limit() {
        let now = Instant::now();
        let mut countdown = Countdown::new(30);

        // Not started, never expired
        assert!(!countdown.expired_at(now + Duration::from_secs(100)));

        countdown.start_at(now);
        assert!(!countdown.expired_at(now + Duration::from_millis(29_999)));
        assert!(countdown.expired_at(now + Duration::from_secs(30)));

        // Elapsed is capped at the limit
        assert_eq!(countdown.elapsed_seconds_at(now + Duration::from_secs(45)), 30);
    }

    #[test]
    fn test_clock_from_timeout() {
        assert!(matches!(Clock::from_timeout(0), Ok(Clock::Stopwatch(_))));
        assert!(matches!(
            Clock::from_timeout(30),
            Ok(Clock::Countdown(countdown)) if countdown.limit_seconds() == 30
        ));
        assert_eq!(
            Clock::from_timeout(-1),
            Err(InvalidInput::NegativeTimeout(-1))
        );
    }

    #[test]
    fn test_clock_remaining_seconds() {
        let clock = Clock::from_timeout(15).unwrap();
        assert_eq!(clock.remaining_seconds(), Some(15));

        let clock = Clock::from_timeout(0).unwrap();
        assert_eq!(clock.remaining_seconds(), None);
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::with_limit(10);

        // Time does not pass before the start
        clock.advance(4);
        assert_eq!(clock.elapsed_seconds(), 0);
        assert!(!clock.expired());

        clock.start();
        clock.advance(4);
        assert_eq!(clock.elapsed_seconds(), 4);

        clock.set_elapsed(12);
        assert!(clock.expired());
        assert_eq!(clock.elapsed_seconds(), 10);

        clock.stop();
        clock.advance(5);
        assert_eq!(clock.elapsed_seconds(), 10);
    }
}
