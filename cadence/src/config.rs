//! # Configuration Module - Session Settings
//!
//! Settings that shape a single typing test: how many words go on a line, how long the test
//! may run, and what starts the clock.
//!
//! ## Usage
//!
//! ```rust
//! use cadence::config::{SessionConfig, StartPolicy};
//!
//! // Ten words per line, thirty second countdown, starts on the first keystroke
//! let config = SessionConfig::default();
//!
//! // Untimed test that starts once the first character of the text is typed
//! let config = SessionConfig {
//!     timeout_seconds: 0,
//!     start_policy: StartPolicy::MatchingFirstCharacter,
//!     ..SessionConfig::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// What moves a session from not started to running
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// Any letter starts the test, and is scored
    #[default]
    FirstKeystroke,
    /// Only the first character of the text starts the test. Other letters are ignored until then.
    MatchingFirstCharacter,
    /// Keystrokes are ignored until the session is started explicitly
    Explicit,
}

/// Runtime configuration of a typing test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Words per rendered line
    ///
    /// **Default**: 10
    pub wrap_words: usize,

    /// Time limit in seconds. `0` runs an open-ended stopwatch, negative values are rejected.
    ///
    /// **Default**: 30
    pub timeout_seconds: i64,

    /// **Default**: [StartPolicy::FirstKeystroke]
    pub start_policy: StartPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wrap_words: 10,
            timeout_seconds: 30,
            start_policy: StartPolicy::default(),
        }
    }
}
