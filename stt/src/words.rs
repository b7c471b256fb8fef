use std::path::{Path, PathBuf};

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WordsError {
    #[error("Failed to read word list {}: {error}", path.display())]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Minimum word length {min} is larger than maximum {max}")]
    LengthRange { min: usize, max: usize },

    #[error("No words of the requested length in the word list")]
    NoWords,
}

/// Which words of a list make it into a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    pub min_length: usize,
    /// 0 means no limit
    pub max_length: usize,
    /// 0 means no limit
    pub max_words: usize,
}

impl WordFilter {
    pub fn validate(&self) -> Result<(), WordsError> {
        if self.max_length != 0 && self.min_length > self.max_length {
            return Err(WordsError::LengthRange {
                min: self.min_length,
                max: self.max_length,
            });
        }

        Ok(())
    }

    /// Words with apostrophes, or anything but ASCII letters, are rejected
    pub fn accepts(&self, word: &str) -> bool {
        let length = word.len();

        !word.is_empty()
            && word.bytes().all(|byte| byte.is_ascii_alphabetic())
            && length >= self.min_length
            && (self.max_length == 0 || length <= self.max_length)
    }
}

/// Read a word list and build a shuffled quote from it
pub fn load_quote(path: &Path, filter: &WordFilter) -> Result<String, WordsError> {
    let content = std::fs::read_to_string(path).map_err(|error| WordsError::Read {
        path: path.to_path_buf(),
        error,
    })?;

    let quote = build_quote(content.lines(), filter, &mut rand::thread_rng())?;
    info!(path = %path.display(), bytes = quote.len(), "quote loaded");

    Ok(quote)
}

/// Filter, lowercase, shuffle and join the given words
pub fn build_quote<'a, R>(
    lines: impl Iterator<Item = &'a str>,
    filter: &WordFilter,
    rng: &mut R,
) -> Result<String, WordsError>
where
    R: Rng + ?Sized,
{
    filter.validate()?;

    let mut words: Vec<String> = lines
        .map(str::trim)
        .filter(|word| filter.accepts(word))
        .map(str::to_ascii_lowercase)
        .collect();

    if words.is_empty() {
        return Err(WordsError::NoWords);
    }

    words.shuffle(rng);

    if filter.max_words != 0 {
        words.truncate(filter.max_words);
    }

    Ok(words.join(" "))
}
