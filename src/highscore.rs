use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the high score is kept between runs.  A store without a path is
/// disabled: loading yields 0 and saving does nothing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct HighScoreFile {
    path: Option<PathBuf>,
}

impl HighScoreFile {
    pub(crate) fn new(path: PathBuf) -> HighScoreFile {
        HighScoreFile { path: Some(path) }
    }

    pub(crate) fn disabled() -> HighScoreFile {
        HighScoreFile { path: None }
    }

    /// Return the default high score file path, or `None` if the local data
    /// directory could not be determined
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("fruitsnake").join("high_score.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the stored high score.  A missing file means no game has set a
    /// high score yet and yields 0.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file exists but could not be read or does not
    /// contain a `{"high_score": <integer>}` record.
    pub(crate) fn load(&self) -> Result<u32, LoadError> {
        let Some(path) = self.path() else {
            return Ok(0);
        };
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError::read(e)),
        };
        // Going through a map first keeps a bare `[N]` array from being
        // accepted as a record
        let map = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&src)
            .map_err(LoadError::deserialize)?;
        serde_json::from_value::<HighScoreRecord>(serde_json::Value::Object(map))
            .map(|rec| rec.high_score)
            .map_err(LoadError::deserialize)
    }

    /// Write `score` as the stored high score, creating parent directories
    /// as needed
    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        let Some(path) = self.path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&HighScoreRecord { high_score: score })
            .map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
struct HighScoreRecord {
    high_score: u32,
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
