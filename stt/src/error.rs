use cadence::InvalidInput;
use derive_more::From;
use thiserror::Error;

use crate::config::ConfigError;
use crate::words::WordsError;

/// Everything that can stop the application
#[derive(Debug, From, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(ConfigError),

    #[error("{0}")]
    Words(WordsError),

    #[error("Cannot start the test: {0}")]
    Session(InvalidInput),

    #[error("Terminal error: {0}")]
    Terminal(std::io::Error),

    #[from(skip)]
    #[error("Failed to set up logging: {0}")]
    Logging(String),
}
