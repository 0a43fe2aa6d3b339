use crate::game::Variant;
use crate::highscore::HighScoreFile;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("fruitsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Read the configuration file at the default path, if there is one
    pub(crate) fn load_default() -> Result<Config, ConfigError> {
        Config::load(&Config::default_path()?, true)
    }

    /// Return the store the high score should be kept in: the file given in
    /// the configuration or, if that is not set, the default high score file.
    ///
    /// If `self.files.save_high_score` is `false`, or if no path is
    /// configured and the default could not be computed, the returned store
    /// is disabled.
    pub(crate) fn high_score_file(&self) -> HighScoreFile {
        if !self.files.save_high_score {
            return HighScoreFile::disabled();
        }
        match self
            .files
            .high_score_file
            .clone()
            .or_else(HighScoreFile::default_path)
        {
            Some(p) => HighScoreFile::new(p),
            None => {
                log::warn!(
                    "Could not determine where to store the high score; it will not be saved"
                );
                HighScoreFile::disabled()
            }
        }
    }

    /// Return the path to write log messages to: the file given in the
    /// configuration or, if that is not set, a file in the local data
    /// directory
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("fruitsnake").join("fruitsnake.log"))
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// The variant highlighted when the menu opens
    pub(crate) variant: Variant,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,

    /// Path at which log messages should be written
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
