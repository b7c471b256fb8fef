use std::path::PathBuf;
use std::process::ExitCode;

use cadence::TestSession;
use clap::Parser;
use tracing::{error, info};

use crate::app::App;
use crate::config::{Config, Overrides};
use crate::error::AppError;

mod app;
mod config;
mod error;
mod logging;
mod utils;
mod view;
mod words;

/// A typing speed test for your terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Word list to build the quote from, one word per line
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Test length in seconds, 0 for no limit
    #[arg(short, long, allow_negative_numbers = true)]
    timeout: Option<i64>,

    /// Words per line
    #[arg(short, long)]
    wrap: Option<usize>,

    /// Minimum word length
    #[arg(long = "minlen")]
    min_length: Option<usize>,

    /// Maximum word length, 0 for no limit
    #[arg(long = "maxlen")]
    max_length: Option<usize>,

    /// Maximum number of words in the quote, 0 for no limit
    #[arg(long)]
    max_words: Option<usize>,

    /// Path to the configuration directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            timeout: self.timeout,
            wrap: self.wrap,
            min_length: self.min_length,
            max_length: self.max_length,
            max_words: self.max_words,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "exiting");
            eprintln!("stt: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::get(cli.config.clone(), &cli.overrides())?;
    let settings = config.settings;

    let _guard = match &settings.log_file {
        Some(path) => Some(logging::init(path)?),
        None => None,
    };
    info!(directory = %config.directory.display(), ?settings, "configuration loaded");

    let quote = words::load_quote(&settings.input, &settings.word_filter())?;
    let session = TestSession::new(&quote, &settings.session_config())?;

    if let Some(stats) = App::new(session, &settings).run()? {
        println!("{stats}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "stt", "-i", "words.txt", "-t", "60", "-w", "4", "--minlen", "3", "--maxlen", "0",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.input, Some(PathBuf::from("words.txt")));
        assert_eq!(overrides.timeout, Some(60));
        assert_eq!(overrides.wrap, Some(4));
        assert_eq!(overrides.min_length, Some(3));
        assert_eq!(overrides.max_length, Some(0));
        assert_eq!(overrides.max_words, None);
    }

    #[test]
    fn test_negative_timeout_reaches_the_session() {
        let cli = Cli::parse_from(["stt", "-t", "-5"]);
        assert_eq!(cli.timeout, Some(-5));
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
