//! # rf-store-file
//! rusty-feed/crates/rf-plugins/rf-store-file/src/lib.rs
//! Local filesystem implementation of `KeyValueStore`.
//! Each key is one file, `<root>/<key>.json`, replaced atomically on write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rf_core::error::Result;
use rf_core::traits::KeyValueStore;
use tempfile::NamedTempFile;
use tracing::debug;

pub struct FileKvStore {
    /// Directory holding one file per key (e.g., "./data")
    root_path: PathBuf,
}

impl FileKvStore {
    /// Opens `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root_path = root.into();
        fs::create_dir_all(&root_path)?;
        Ok(Self { root_path })
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Keys become file names, so anything that could escape the root is refused.
    fn key_path(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unsupported storage key {key:?}"),
            ));
        }
        Ok(self.root_path.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Writes to a sibling temp file, then renames it over the old value,
    /// so readers see either the previous or the new payload.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let mut tmp = NamedTempFile::new_in(&self.root_path)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), bytes = value.len(), "key written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "key removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
