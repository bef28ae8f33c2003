use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::repository::{ProgressMedium, StorageError};

/// File-backed slot: one JSON document in one file.
///
/// Writes go through a sibling temp file followed by a rename, so a reader
/// sees either the previous table or the new one, never a partial write.
#[derive(Debug, Clone)]
pub struct JsonFileMedium {
    path: PathBuf,
}

impl JsonFileMedium {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional slot file inside a data directory.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>, slot: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{slot}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("slot"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressMedium for JsonFileMedium {
    fn read_slot(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Unavailable(err.to_string())),
        }
    }

    fn write_slot(&self, raw: &str) -> Result<(), StorageError> {
        let write_err = |err: io::Error| StorageError::WriteFailed(err.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let temp = self.temp_path();
        let mut file = fs::File::create(&temp).map_err(write_err)?;
        file.write_all(raw.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;
        Ok(())
    }
}
