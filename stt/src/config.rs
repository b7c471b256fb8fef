use std::path::{Path, PathBuf};

use cadence::{SessionConfig, StartPolicy};
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::words::WordFilter;

pub mod theme;

pub use theme::Theme;

/// Name of the settings file inside the configuration directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Prefix of environment variables that override settings
pub const ENV_PREFIX: &str = "STT_";

/// All user-facing settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Word list, one word per line
    pub input: PathBuf,
    /// Test length in seconds. 0 means no limit.
    pub timeout: i64,
    /// Words per line
    pub wrap: usize,
    pub min_length: usize,
    /// 0 means no limit
    pub max_length: usize,
    /// Upper bound on the words in a quote. 0 means no limit.
    pub max_words: usize,
    pub start_policy: StartPolicy,
    pub tick_rate_ms: u64,
    pub log_file: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("/usr/share/dict/american-english"),
            timeout: 30,
            wrap: 10,
            min_length: 5,
            max_length: 6,
            max_words: 500,
            start_policy: StartPolicy::default(),
            tick_rate_ms: 100,
            log_file: None,
            theme: Theme::default(),
        }
    }
}

impl Settings {
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            wrap_words: self.wrap,
            timeout_seconds: self.timeout,
            start_policy: self.start_policy,
        }
    }

    pub const fn word_filter(&self) -> WordFilter {
        WordFilter {
            min_length: self.min_length,
            max_length: self.max_length,
            max_words: self.max_words,
        }
    }
}

/// Settings given on the command line. Unset fields leave lower layers untouched.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error(
        "Failed to get configuration directory. Please specify the location using the `--config <path>` flag"
    )]
    NoDirectory,

    #[error("Failed to create config directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub directory: PathBuf,
}

impl Config {
    /// Load the settings.
    ///
    /// Layers, lowest first: defaults, `settings.toml` in the configuration directory,
    /// `STT_*` environment variables, command line overrides.
    pub fn get(override_path: Option<PathBuf>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let directory = override_path
            .or_else(|| {
                ProjectDirs::from("com", "stt", "stt").map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        if !directory.exists() {
            std::fs::create_dir_all(&directory)?;
        }

        let mut settings = Self::figment(&directory)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides))
            .extract::<Settings>()
            .map_err(Box::new)?;

        if settings.log_file.is_none() {
            settings.log_file = Some(directory.join("stt.log"));
        }

        Ok(Self {
            settings,
            directory,
        })
    }

    /// Defaults merged with the settings file, if there is one
    fn figment(directory: &Path) -> Figment {
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let settings_toml = directory.join(SETTINGS_FILE);

        if settings_toml.exists() {
            figment.merge(Toml::file(settings_toml))
        } else {
            figment
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    fn extract(directory: &Path, overrides: &Overrides) -> Settings {
        Config::figment(directory)
            .merge(Serialized::defaults(overrides))
            .extract()
            .unwrap()
    }

    #[test]
    fn test_defaults_without_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = extract(dir.path(), &Overrides::default());

        assert_eq!(settings.timeout, 30);
        assert_eq!(settings.wrap, 10);
        assert_eq!((settings.min_length, settings.max_length), (5, 6));
        assert_eq!(settings.start_policy, StartPolicy::FirstKeystroke);
        assert_eq!(settings.theme, Theme::default());
    }

    #[test]
    fn test_settings_file_then_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"
timeout = 60
wrap = 4
start_policy = "matching_first_character"

[theme]
correct = "green"
"#,
        )
        .unwrap();

        let overrides = Overrides {
            wrap: Some(7),
            ..Default::default()
        };
        let settings = extract(dir.path(), &overrides);

        assert_eq!(settings.timeout, 60);
        assert_eq!(settings.wrap, 7);
        assert_eq!(settings.start_policy, StartPolicy::MatchingFirstCharacter);
        assert_eq!(settings.theme.correct, Color::Green);
        assert_eq!(settings.theme.wrong, Theme::default().wrong);
    }

    #[test]
    fn test_get_creates_directory_and_log_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("nested");

        let config = Config::get(Some(config_dir.clone()), &Overrides::default()).unwrap();

        assert!(config_dir.is_dir());
        assert_eq!(config.settings.log_file, Some(config_dir.join("stt.log")));
    }

    #[test]
    fn test_bad_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "timeout = \"soon\"").unwrap();

        let result = Config::get(Some(dir.path().to_path_buf()), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_session_config_from_settings() {
        let settings = Settings {
            timeout: 0,
            wrap: 3,
            ..Default::default()
        };

        let config = settings.session_config();
        assert_eq!(config.timeout_seconds, 0);
        assert_eq!(config.wrap_words, 3);
    }
}
