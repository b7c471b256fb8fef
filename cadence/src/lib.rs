//! # cadence
//!
//! The core of a terminal typing-speed test: a quote decomposed into lines, words and
//! characters, a cursor that walks it one character at a time, per-character correctness with
//! running totals, and words/characters per minute derived from those totals.
//!
//! Rendering, key capture, tick generation and word sourcing live outside this crate. They talk
//! to a [TestSession] through plain synchronous calls.

pub mod clock;
pub mod config;
pub mod cursor;
pub mod render;
pub mod session;
pub mod statistics;
pub mod text;
pub mod tracker;

pub use clock::{Clock, Countdown, ManualClock, Stopwatch, TimeSource};
pub use config::{SessionConfig, StartPolicy};
pub use cursor::Cursor;
pub use render::{RenderingContext, RowRenderer, RowWindow};
pub use session::{Effect, Phase, SessionEvent, TestSession};
pub use statistics::{Stats, compute_stats};
pub use text::{Character, InvalidInput, Line, Status, TextModel, Word};
pub use tracker::{Submission, Totals, Tracker};
