use super::{Storage, StorageKey};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed storage: one JSON file per key under a state directory.
///
/// Values are written to a temporary file and renamed into place, so a
/// concurrent reader never observes a torn document.
pub struct FileStorage {
    state_dir: PathBuf,
    write_guard: Mutex<()>,
}

impl FileStorage {
    pub fn open(state_dir: &Path) -> Result<FileStorage> {
        if !state_dir.is_dir() {
            bail!("{} is not a valid directory.", state_dir.display());
        }
        Ok(FileStorage {
            state_dir: state_dir.to_owned(),
            write_guard: Mutex::new(()),
        })
    }

    fn key_path(&self, key: StorageKey) -> PathBuf {
        self.state_dir.join(format!("{}.json", key.name()))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to read state file {:?}", path))
            }
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<()> {
        let _guard = self.write_guard.lock().unwrap();
        let path = self.key_path(key);
        let tmp_path = self.state_dir.join(format!("{}.json.tmp", key.name()));
        fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write state file {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace state file {:?}", path))?;
        Ok(())
    }
}
