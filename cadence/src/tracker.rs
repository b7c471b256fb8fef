//! # Tracker Module - Keystroke Scoring and Running Totals
//!
//! The [Tracker] owns the text, the cursor and the running `correct_words` / `correct_chars`
//! totals. Totals are kept incrementally on every keystroke and erase, never by rescanning the
//! whole text.
//!
//! ## Input Processing Flow
//!
//! ```text
//! submit(byte)
//!   not a letter or space ---------------------------> Ignored
//!   space -------------------------------------------> Continue (word separator, never scored)
//!   letter: score the character at the cursor
//!           bump correct_chars / correct_words
//!           advance ---- moved ----------------------> Continue
//!                   \--- end of text ---------------> EndOfText
//!
//! undo()
//!   at the end of the text: un-score the last character in place
//!   otherwise: retreat, then un-score the character under the cursor
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use cadence::{Submission, TextModel, Tracker};
//!
//! let mut tracker = Tracker::new(TextModel::build("ab cd", 5).unwrap());
//! assert_eq!(tracker.submit(b'a'), Submission::Continue);
//! assert_eq!(tracker.submit(b'b'), Submission::Continue);
//! assert_eq!(tracker.totals().correct_words, 1);
//! ```

use crate::{Cursor, Status, TextModel};

/// Outcome of submitting a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The byte is outside the accepted alphabet. Nothing changed.
    Ignored,
    /// The keystroke was consumed and there is more text to type
    Continue,
    /// The last character of the text was scored
    EndOfText,
}

/// Running totals of the typing test
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub correct_words: usize,
    pub correct_chars: usize,
}

/// Returns true for the bytes a typing test accepts: ASCII letters and space
pub const fn is_accepted(input: u8) -> bool {
    input.is_ascii_alphabetic() || input == b' '
}

/// Scores keystrokes against a [TextModel]
#[derive(Debug, Clone)]
pub struct Tracker {
    model: TextModel,
    cursor: Cursor,
    totals: Totals,
    /// Set once the last character has been scored. The cursor stays on that character.
    exhausted: bool,
}

impl Tracker {
    pub const fn new(model: TextModel) -> Self {
        Self {
            model,
            cursor: Cursor::START,
            totals: Totals {
                correct_words: 0,
                correct_chars: 0,
            },
            exhausted: false,
        }
    }

    pub const fn model(&self) -> &TextModel {
        &self.model
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub const fn totals(&self) -> Totals {
        self.totals
    }

    /// True once every character has been typed
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn status_at(&self, row: usize, word: usize, index: usize) -> Option<Status> {
        self.model
            .character(row, word, index)
            .map(|character| character.status)
    }

    /// The byte expected at the cursor
    pub fn expected(&self) -> u8 {
        self.model
            .character(self.cursor.row, self.cursor.word, self.cursor.char)
            .map_or(b' ', |character| character.value)
    }

    /// Score `input` against the character at the cursor and move on.
    pub fn submit(&mut self, input: u8) -> Submission {
        if !is_accepted(input) {
            return Submission::Ignored;
        }

        if self.exhausted {
            return Submission::EndOfText;
        }

        // Spaces are separators, not characters. Word boundaries are crossed by `advance`
        // already, so a space is consumed without touching any status.
        if input == b' ' {
            return Submission::Continue;
        }

        let Cursor { row, word, char } = self.cursor;
        let Some(current_word) = self.model.word_mut(row, word) else {
            return Submission::Ignored;
        };
        let Some(character) = current_word.get_mut(char) else {
            return Submission::Ignored;
        };

        if character.value == input {
            character.status = Status::Correct;
            self.totals.correct_chars += 1;

            // The character was pending before, so the word can only just now have become
            // fully correct.
            if current_word.is_fully_correct() {
                self.totals.correct_words += 1;
            }
        } else {
            character.status = Status::Wrong;
        }

        let (next, moved) = self.cursor.advance(&self.model);
        self.cursor = next;

        if moved {
            Submission::Continue
        } else {
            self.exhausted = true;
            Submission::EndOfText
        }
    }

    /// Erase the most recently scored character.
    ///
    /// Returns `false` if there is nothing to erase.
    pub fn undo(&mut self) -> bool {
        if self.exhausted {
            // The cursor never left the last character, so it is the one to erase
            self.exhausted = false;
        } else {
            let (previous, moved) = self.cursor.retreat(&self.model);
            if !moved {
                return false;
            }
            self.cursor = previous;
        }

        let Cursor { row, word, char } = self.cursor;
        let Some(current_word) = self.model.word_mut(row, word) else {
            return false;
        };

        if current_word.is_fully_correct() {
            self.totals.correct_words -= 1;
        }

        if let Some(character) = current_word.get_mut(char) {
            if character.status == Status::Correct {
                self.totals.correct_chars -= 1;
            }
            character.status = Status::Pending;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(text: &str, wrap: usize) -> Tracker {
        Tracker::new(TextModel::build(text, wrap).unwrap())
    }

    fn assert_totals_match_scan(tracker: &Tracker) {
        assert_eq!(
            tracker.totals().correct_words,
            tracker.model().count_fully_correct_words()
        );
        assert_eq!(
            tracker.totals().correct_chars,
            tracker.model().count_correct_characters()
        );
    }

    #[test]
    fn test_submit_scores_and_advances() {
        let mut tracker = tracker("ab cd", 5);

        assert_eq!(tracker.submit(b'a'), Submission::Continue);
        assert_eq!(tracker.submit(b'b'), Submission::Continue);
        assert_eq!(tracker.cursor(), Cursor::new(0, 1, 0));
        assert_eq!(
            tracker.totals(),
            Totals {
                correct_words: 1,
                correct_chars: 2
            }
        );

        assert_eq!(tracker.submit(b'x'), Submission::Continue);
        assert_eq!(tracker.status_at(0, 1, 0), Some(Status::Wrong));
        assert_eq!(tracker.totals().correct_chars, 2);
        assert_eq!(tracker.cursor(), Cursor::new(0, 1, 1));
        assert_totals_match_scan(&tracker);
    }

    #[test]
    fn test_submit_ignores_unaccepted_bytes() {
        let mut tracker = tracker("ab", 1);

        for input in [b'1', b'!', b'\n', b'\t', 0x7f, 0xff] {
            assert_eq!(tracker.submit(input), Submission::Ignored);
        }

        assert_eq!(tracker.cursor(), Cursor::START);
        assert_eq!(tracker.status_at(0, 0, 0), Some(Status::Pending));
        assert_eq!(tracker.totals(), Totals::default());
    }

    #[test]
    fn test_space_is_never_scored() {
        let mut tracker = tracker("ab cd", 5);

        tracker.submit(b'a');
        assert_eq!(tracker.submit(b' '), Submission::Continue);
        assert_eq!(tracker.cursor(), Cursor::new(0, 0, 1));
        assert_eq!(tracker.status_at(0, 0, 1), Some(Status::Pending));

        tracker.submit(b'b');
        // At the boundary, the space is the natural keystroke and changes nothing
        assert_eq!(tracker.submit(b' '), Submission::Continue);
        assert_eq!(tracker.cursor(), Cursor::new(0, 1, 0));
        assert_eq!(tracker.status_at(0, 1, 0), Some(Status::Pending));
        assert_totals_match_scan(&tracker);
    }

    #[test]
    fn test_submit_is_case_sensitive() {
        let mut tracker = tracker("Ab", 1);

        tracker.submit(b'a');
        assert_eq!(tracker.status_at(0, 0, 0), Some(Status::Wrong));
    }

    #[test]
    fn test_end_of_text() {
        let mut tracker = tracker("ab", 3);

        assert_eq!(tracker.submit(b'a'), Submission::Continue);
        assert_eq!(tracker.submit(b'b'), Submission::EndOfText);
        assert!(tracker.is_exhausted());
        assert_eq!(tracker.cursor(), Cursor::new(0, 0, 1));

        // Further input does not re-score the last character
        assert_eq!(tracker.submit(b'x'), Submission::EndOfText);
        assert_eq!(tracker.status_at(0, 0, 1), Some(Status::Correct));
        assert_eq!(
            tracker.totals(),
            Totals {
                correct_words: 1,
                correct_chars: 2
            }
        );
    }

    #[test]
    fn test_undo_after_end_erases_last_character() {
        let mut tracker = tracker("ab", 3);
        tracker.submit(b'a');
        tracker.submit(b'b');

        assert!(tracker.undo());
        assert!(!tracker.is_exhausted());
        assert_eq!(tracker.cursor(), Cursor::new(0, 0, 1));
        assert_eq!(tracker.status_at(0, 0, 1), Some(Status::Pending));
        assert_eq!(
            tracker.totals(),
            Totals {
                correct_words: 0,
                correct_chars: 1
            }
        );

        assert_eq!(tracker.submit(b'b'), Submission::EndOfText);
        assert_totals_match_scan(&tracker);
    }

    #[test]
    fn test_undo_wrong_character_keeps_totals() {
        let mut tracker = tracker("ab cd", 5);
        for input in *b"abx" {
            tracker.submit(input);
        }

        assert!(tracker.undo());
        assert_eq!(tracker.cursor(), Cursor::new(0, 1, 0));
        assert_eq!(tracker.status_at(0, 1, 0), Some(Status::Pending));
        assert_eq!(
            tracker.totals(),
            Totals {
                correct_words: 1,
                correct_chars: 2
            }
        );
    }

    #[test]
    fn test_undo_into_completed_word_uncounts_it() {
        let mut tracker = tracker("ab cd", 5);
        tracker.submit(b'a');
        tracker.submit(b'b');

        // Crosses back over the word boundary onto 'b'
        assert!(tracker.undo());
        assert_eq!(tracker.cursor(), Cursor::new(0, 0, 1));
        assert_eq!(
            tracker.totals(),
            Totals {
                correct_words: 0,
                correct_chars: 1
            }
        );
        assert_totals_match_scan(&tracker);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut tracker = tracker("ab", 1);

        assert!(!tracker.undo());
        assert_eq!(tracker.cursor(), Cursor::START);
        assert_eq!(tracker.totals(), Totals::default());
    }

    #[test]
    fn test_submit_undo_submit_is_idempotent() {
        for input in [b'a', b'z'] {
            let mut once = tracker("ab cd", 1);
            let mut replayed = tracker("ab cd", 1);

            once.submit(input);

            replayed.submit(input);
            replayed.undo();
            replayed.submit(input);

            assert_eq!(once.totals(), replayed.totals());
            assert_eq!(once.cursor(), replayed.cursor());
            assert_eq!(once.model(), replayed.model());
        }
    }

    #[test]
    fn test_totals_stay_consistent_under_mixed_editing() {
        let mut tracker = tracker("the quick brown fox", 2);
        let script: &[Option<u8>] = &[
            Some(b't'),
            Some(b'h'),
            Some(b'e'),
            None,
            None,
            Some(b'x'),
            Some(b'e'),
            Some(b'q'),
            None,
            None,
            None,
            Some(b'h'),
            Some(b'e'),
            Some(b'q'),
            Some(b'u'),
        ];

        for step in script {
            match step {
                Some(input) => {
                    tracker.submit(*input);
                }
                None => {
                    tracker.undo();
                }
            }
            assert_totals_match_scan(&tracker);
            assert!(tracker.totals().correct_words <= tracker.model().total_words());
        }

        assert_eq!(tracker.cursor(), Cursor::new(0, 1, 2));
        assert_eq!(tracker.status_at(0, 0, 1), Some(Status::Correct));
    }
}
