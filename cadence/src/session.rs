//! # Session Module - The Typing Test State Machine
//!
//! [TestSession] ties the text, the [Tracker] and a [TimeSource] together and is the only
//! type the surrounding application needs. It is fed one event at a time and answers with an
//! optional [Effect] for the caller to act on.
//!
//! ## Session Lifecycle
//!
//! ```text
//!               first accepted keystroke / start()
//!  NotStarted ------------------------------------> Running
//!      |                                              |   \
//!      |                         end of text / expiry |    \ quit
//!      | quit                                         v     v
//!      +-----------------------------------------> Aborted  Ended
//! ```
//!
//! `Ended` and `Aborted` are terminal. After `Ended` the statistics, cursor and character
//! statuses stay readable for the final screen. `Aborted` has no statistics.
//!
//! ## Usage Example
//!
//! ```rust
//! use cadence::{ManualClock, Phase, StartPolicy, TestSession};
//!
//! let mut session =
//!     TestSession::with_time_source("ab", 10, StartPolicy::FirstKeystroke, ManualClock::new())
//!         .unwrap();
//!
//! session.submit(b'a');
//! assert_eq!(session.phase(), Phase::Running);
//!
//! session.time_source_mut().set_elapsed(2);
//! session.submit(b'b');
//! assert!(session.is_ended());
//!
//! let stats = session.current_stats().unwrap();
//! assert_eq!((stats.wpm, stats.cpm), (30, 60));
//! ```

use tracing::debug;

use crate::config::{SessionConfig, StartPolicy};
use crate::render::{RowRenderer, RowWindow};
use crate::statistics::{Stats, compute_stats};
use crate::tracker::{Submission, Totals, Tracker};
use crate::{Clock, Cursor, InvalidInput, Status, TextModel, TimeSource};

/// Lifecycle state of a [TestSession]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Ended,
    Aborted,
}

/// An input the session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A typed byte. Anything but ASCII letters and space is ignored.
    Char(u8),
    Backspace,
    Quit,
    /// Periodic timer tick, used to notice expiry
    Tick,
    /// Explicit start signal
    Start,
}

/// A request for the caller, produced by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The test started and its time source is running
    StartTimer,
    /// The test ended and its time source is stopped
    StopTimer,
    /// The user quit
    Quit,
}

/// A single typing test
#[derive(Debug, Clone)]
pub struct TestSession<T: TimeSource = Clock> {
    tracker: Tracker,
    time: T,
    phase: Phase,
    start_policy: StartPolicy,
}

impl TestSession<Clock> {
    /// Create a session timed by the wall clock, as configured.
    ///
    /// Fails if the text cannot be typed, the wrap width is zero or the timeout is negative.
    pub fn new(text: &str, config: &SessionConfig) -> Result<Self, InvalidInput> {
        let clock = Clock::from_timeout(config.timeout_seconds)?;
        Self::with_time_source(text, config.wrap_words, config.start_policy, clock)
    }

    /// Seconds left on a countdown, `None` for an untimed test
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.time.remaining_seconds()
    }
}

impl<T: TimeSource> TestSession<T> {
    /// Create a session with any time source
    pub fn with_time_source(
        text: &str,
        wrap_words: usize,
        start_policy: StartPolicy,
        time: T,
    ) -> Result<Self, InvalidInput> {
        let model = TextModel::build(text, wrap_words)?;

        debug!(
            words = model.total_words(),
            characters = model.total_characters(),
            lines = model.line_count(),
            ?start_policy,
            "session created"
        );

        Ok(Self {
            tracker: Tracker::new(model),
            time,
            phase: Phase::NotStarted,
            start_policy,
        })
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn start_policy(&self) -> StartPolicy {
        self.start_policy
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// True once the test finished, by typing out the text or running out of time
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn is_aborted(&self) -> bool {
        self.phase == Phase::Aborted
    }

    pub const fn model(&self) -> &TextModel {
        self.tracker.model()
    }

    pub const fn cursor_position(&self) -> Cursor {
        self.tracker.cursor()
    }

    pub fn character_status(&self, row: usize, word: usize, index: usize) -> Option<Status> {
        self.tracker.status_at(row, word, index)
    }

    pub const fn totals(&self) -> Totals {
        self.tracker.totals()
    }

    pub const fn time_source(&self) -> &T {
        &self.time
    }

    pub const fn time_source_mut(&mut self) -> &mut T {
        &mut self.time
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.time.elapsed_seconds()
    }

    /// Speed so far. `None` once the session was aborted.
    pub fn current_stats(&self) -> Option<Stats> {
        if self.is_aborted() {
            return None;
        }

        let totals = self.tracker.totals();
        Some(compute_stats(
            totals.correct_words,
            totals.correct_chars,
            self.time.elapsed_seconds(),
        ))
    }

    /// The rows a renderer should show around the cursor
    pub fn row_window(&self) -> RowWindow {
        RowWindow::around(self.cursor_position().row, self.model().line_count())
    }

    /// Iterate the characters of `row` with their rendering context
    pub fn render_row(&self, row: usize) -> RowRenderer<'_> {
        RowRenderer::new(self.model(), row, self.cursor_position())
    }

    /// Dispatch a single event
    pub fn handle(&mut self, event: SessionEvent) -> Option<Effect> {
        match event {
            SessionEvent::Char(input) => self.submit(input),
            SessionEvent::Backspace => {
                let was_running = self.is_running();
                self.backspace();
                (was_running && self.is_ended()).then_some(Effect::StopTimer)
            }
            SessionEvent::Quit => Some(self.quit()),
            SessionEvent::Tick => self.tick(),
            SessionEvent::Start => self.start(),
        }
    }

    /// Start the test without a keystroke. Only has an effect before the start.
    pub fn start(&mut self) -> Option<Effect> {
        if self.phase != Phase::NotStarted {
            return None;
        }

        self.time.start();
        self.phase = Phase::Running;
        debug!("session started");

        Some(Effect::StartTimer)
    }

    /// Submit a typed `char`. Characters outside ASCII are ignored.
    pub fn submit_char(&mut self, input: char) -> Option<Effect> {
        u8::try_from(input)
            .ok()
            .and_then(|input| self.submit(input))
    }

    /// Submit a typed byte.
    ///
    /// When the keystroke that starts the test also finishes the text, only
    /// [Effect::StopTimer] is returned. The time source has been started and stopped by then.
    pub fn submit(&mut self, input: u8) -> Option<Effect> {
        let mut effect = None;

        match self.phase {
            Phase::NotStarted => {
                if !self.starts_test(input) {
                    return None;
                }
                effect = self.start();
            }
            Phase::Running => {
                // A keystroke racing the expiry tick must not be scored
                if self.time.expired() {
                    return self.end();
                }
            }
            Phase::Ended | Phase::Aborted => return None,
        }

        match self.tracker.submit(input) {
            Submission::EndOfText => self.end(),
            Submission::Continue | Submission::Ignored => effect,
        }
    }

    /// Erase the previous character. Only accepted while running.
    ///
    /// A backspace after the time ran out ends the test instead. Returns `true` if a character
    /// was erased.
    pub fn backspace(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        if self.time.expired() {
            self.end();
            return false;
        }

        self.tracker.undo()
    }

    /// Notice time expiry
    pub fn tick(&mut self) -> Option<Effect> {
        if self.is_running() && self.time.expired() {
            return self.end();
        }

        None
    }

    /// Abort the test. A session that already ended keeps its result.
    pub fn quit(&mut self) -> Effect {
        match self.phase {
            Phase::NotStarted | Phase::Running => {
                self.time.stop();
                self.phase = Phase::Aborted;
                debug!("session aborted");
            }
            Phase::Ended | Phase::Aborted => (),
        }

        Effect::Quit
    }

    fn starts_test(&self, input: u8) -> bool {
        if !input.is_ascii_alphabetic() {
            return false;
        }

        match self.start_policy {
            StartPolicy::FirstKeystroke => true,
            StartPolicy::MatchingFirstCharacter => input == self.tracker.expected(),
            StartPolicy::Explicit => false,
        }
    }

    fn end(&mut self) -> Option<Effect> {
        self.time.stop();
        self.phase = Phase::Ended;

        let totals = self.tracker.totals();
        debug!(
            correct_words = totals.correct_words,
            correct_chars = totals.correct_chars,
            elapsed_seconds = self.time.elapsed_seconds(),
            "session ended"
        );

        Some(Effect::StopTimer)
    }
}
