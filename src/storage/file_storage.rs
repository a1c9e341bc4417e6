use crate::storage::{Storage, StorageError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

const EXTENSION: &str = "json";

/// Directory-backed storage: each key lives in `<dir>/<key>.json`.
///
/// Keys are percent-encoded into file names, so distinct keys never share a file
/// and no key can name a path outside the directory. Writes go to a temporary
/// sibling first and are renamed into place, so a failed write leaves the
/// previous value untouched.
pub struct FileStorage {
    directory: PathBuf
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into()
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.{EXTENSION}", urlencoding::encode(key)))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::io(key, error))
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.directory).map_err(|error| StorageError::io(key, error))?;

        let path = self.path_for(key);
        let staging = path.with_extension(format!("{EXTENSION}.tmp"));

        fs::write(&staging, value).map_err(|error| StorageError::io(key, error))?;
        fs::rename(&staging, &path).map_err(|error| StorageError::io(key, error))?;

        debug!("Wrote {} bytes for key [{key}] to {}", value.len(), path.display());

        Ok(())
    }
}
