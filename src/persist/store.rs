//! Where saved-game records live between invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::PersistError;

/// Storage for the single saved-game record.
///
/// Implementations must treat a missing save as an empty store, not an
/// error; the driver starts a fresh game in that case.
pub trait Store {
    /// Load the saved record, if one exists.
    fn load(&self) -> Result<Option<String>, PersistError>;

    /// Save a record, replacing any previous one.
    fn save(&self, record: &str) -> Result<(), PersistError>;
}

/// A store backed by one flat file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for FileStore {
    fn load(&self) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => {
                let record = data.trim_end_matches(['\r', '\n']);
                if record.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(record.to_string()))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved game");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, record: &str) -> Result<(), PersistError> {
        fs::write(&self.path, record)?;
        Ok(())
    }
}
