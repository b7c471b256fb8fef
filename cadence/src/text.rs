//! # Text Module - Quote Decomposition
//!
//! Builds the immutable line/word/character structure a typing test runs against.
//! Only the per-character [Status] changes after construction.
//!
//! ## Data Layout
//!
//! Example: `"ab cd ef"` with a wrap width of 2
//! ```text
//! Line 0: [a][b]   [c][d]
//!         word 0   word 1
//! Line 1: [e][f]
//!         word 0
//! ```
//!
//! Spaces are never stored. They only exist as separators between words, and runs of
//! consecutive spaces collapse into a single separator.

use thiserror::Error;

/// Construction-time failures. Nothing can go wrong once a text has been built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("There should be at least one character in the test")]
    EmptyText,

    #[error("The number of words in one line should be more than zero")]
    ZeroWrapWidth,

    #[error("Timeout should be at least zero, got {0}")]
    NegativeTimeout(i64),

    #[error("Unsupported character {character:?} at byte {index}: only ASCII letters and spaces can be typed")]
    UnsupportedCharacter { character: char, index: usize },
}

/// Input status of a single character
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not typed yet, or erased again
    #[default]
    Pending,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub value: u8,
    pub status: Status,
}

impl Character {
    const fn new(value: u8) -> Self {
        Self {
            value,
            status: Status::Pending,
        }
    }

    /// The character as a `char`, for renderers
    pub const fn as_char(&self) -> char {
        self.value as char
    }
}

/// A non-empty run of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    characters: Vec<Character>,
}

impl Word {
    fn new(flat: &str) -> Self {
        Self {
            characters: flat.bytes().map(Character::new).collect(),
        }
    }

    /// Number of characters in the word. Never zero.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Always false, words are never empty
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.characters.get_mut(index)
    }

    /// True when every character of the word is [Status::Correct]
    pub fn is_fully_correct(&self) -> bool {
        self.characters
            .iter()
            .all(|character| character.status == Status::Correct)
    }

    /// The word as typed text, ignoring status
    pub fn as_string(&self) -> String {
        self.characters.iter().map(Character::as_char).collect()
    }
}

/// A rendered row holding up to `wrap_width` words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    words: Vec<Word>,
}

impl Line {
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }
}

/// The quote, decomposed into lines of words of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextModel {
    lines: Vec<Line>,
    wrap_width: usize,
    total_characters: usize,
    total_words: usize,
}

impl TextModel {
    /// Decompose `flat_text` into lines of `wrap_width` words.
    ///
    /// Runs of spaces collapse, so leading, trailing and repeated spaces never produce empty
    /// words. Fails if there is nothing to type, if `wrap_width` is zero, or if the text holds
    /// anything besides ASCII letters and spaces.
    ///
    /// ```rust
    /// use cadence::TextModel;
    ///
    /// let model = TextModel::build("one two three", 2).unwrap();
    /// assert_eq!(model.line_count(), 2);
    /// assert_eq!(model.total_characters(), 11);
    /// assert!(TextModel::build("   ", 2).is_err());
    /// ```
    pub fn build(flat_text: &str, wrap_width: usize) -> Result<Self, InvalidInput> {
        if wrap_width == 0 {
            return Err(InvalidInput::ZeroWrapWidth);
        }

        if let Some((index, character)) = flat_text
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphabetic() || *c == ' '))
        {
            return Err(InvalidInput::UnsupportedCharacter { character, index });
        }

        let words: Vec<Word> = flat_text
            .split(' ')
            .filter(|flat| !flat.is_empty())
            .map(Word::new)
            .collect();

        if words.is_empty() {
            return Err(InvalidInput::EmptyText);
        }

        let total_words = words.len();
        let total_characters = words.iter().map(Word::len).sum();

        let mut lines = Vec::with_capacity(total_words.div_ceil(wrap_width));
        let mut words = words.into_iter().peekable();
        while words.peek().is_some() {
            lines.push(Line {
                words: words.by_ref().take(wrap_width).collect(),
            });
        }

        Ok(Self {
            lines,
            wrap_width,
            total_characters,
            total_words,
        })
    }

    pub const fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Number of words on `row`, or 0 if the row does not exist
    pub fn words_in(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, Line::len)
    }

    pub fn word(&self, row: usize, word: usize) -> Option<&Word> {
        self.lines.get(row)?.words.get(word)
    }

    pub(crate) fn word_mut(&mut self, row: usize, word: usize) -> Option<&mut Word> {
        self.lines.get_mut(row)?.words.get_mut(word)
    }

    pub fn character(&self, row: usize, word: usize, index: usize) -> Option<&Character> {
        self.word(row, word)?.get(index)
    }

    /// Number of characters, not counting the separating spaces
    pub const fn total_characters(&self) -> usize {
        self.total_characters
    }

    pub const fn total_words(&self) -> usize {
        self.total_words
    }

    /// Iterate every word in text order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.lines.iter().flat_map(|line| line.words.iter())
    }

    /// Count the words whose characters are all correct by scanning the whole text.
    ///
    /// Sessions keep this number incrementally; this is the reference to check against.
    pub fn count_fully_correct_words(&self) -> usize {
        self.words().filter(|word| word.is_fully_correct()).count()
    }

    /// Count correct characters by scanning the whole text
    pub fn count_correct_characters(&self) -> usize {
        self.words()
            .flat_map(|word| word.characters.iter())
            .filter(|character| character.status == Status::Correct)
            .count()
    }
}
