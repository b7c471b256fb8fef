//! # Cursor Module - Navigation Across Word and Line Boundaries
//!
//! A [Cursor] is a `(row, word, char)` triple into a [TextModel]. It moves one character at a
//! time and crosses word and line boundaries using the bounds of the word or line it lands in,
//! since words have different lengths.
//!
//! ```text
//! "ab cd" / "ef"   (wrap width 2)
//!
//! advance: (0,0,0) -> (0,0,1) -> (0,1,0) -> (0,1,1) -> (1,0,0) -> (1,0,1) -> end
//! retreat: the same path, reversed
//! ```

use crate::TextModel;

/// Position of the next character awaiting input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub row: usize,
    pub word: usize,
    pub char: usize,
}

impl Cursor {
    /// The first character of any text
    pub const START: Self = Self::new(0, 0, 0);

    pub const fn new(row: usize, word: usize, char: usize) -> Self {
        Self { row, word, char }
    }

    pub const fn is_start(&self) -> bool {
        self.row == 0 && self.word == 0 && self.char == 0
    }

    /// True when the cursor denotes a character that exists in `model`
    pub fn is_valid_in(&self, model: &TextModel) -> bool {
        model.character(self.row, self.word, self.char).is_some()
    }

    /// Move one character forward.
    ///
    /// Returns the new cursor and whether it moved. `false` means the cursor already sits on the
    /// last character of the text, and the returned cursor is unchanged.
    pub fn advance(self, model: &TextModel) -> (Self, bool) {
        let word_len = model.word(self.row, self.word).map_or(0, |word| word.len());

        if self.char + 1 < word_len {
            (Self::new(self.row, self.word, self.char + 1), true)
        } else if self.word + 1 < model.words_in(self.row) {
            (Self::new(self.row, self.word + 1, 0), true)
        } else if self.row + 1 < model.line_count() {
            (Self::new(self.row + 1, 0, 0), true)
        } else {
            (self, false)
        }
    }

    /// Move one character backward.
    ///
    /// Returns the new cursor and whether it moved. `false` means the cursor is on the first
    /// character of the text.
    pub fn retreat(self, model: &TextModel) -> (Self, bool) {
        if self.char > 0 {
            return (Self::new(self.row, self.word, self.char - 1), true);
        }

        if self.word > 0 {
            let word = self.word - 1;
            let last = model.word(self.row, word).map_or(0, |w| w.len() - 1);
            return (Self::new(self.row, word, last), true);
        }

        if self.row > 0 {
            let row = self.row - 1;
            let word = model.words_in(row).saturating_sub(1);
            let last = model.word(row, word).map_or(0, |w| w.len() - 1);
            return (Self::new(row, word, last), true);
        }

        (self, false)
    }
}
