//! Local persistence for favorites, history and custom colors.
//!
//! Everything is stored as JSON strings under fixed keys in a [`KeyValueStore`]. The CLI keeps
//! one file per key in a data directory; tests use [`MemoryStore`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, Result, StorageErrorCode};

mod collection;
pub mod custom_colors;
mod entry;
pub mod favorites;
pub mod history;

pub use collection::{Collection, Stored, STORAGE_VERSION};
pub use custom_colors::{CustomColor, CustomColors};
pub use entry::PaletteEntry;
pub use favorites::Favorites;
pub use history::History;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store with an optional size limit over all values, in bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn with_quota(quota: usize) -> Self {
        MemoryStore {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();

            if others + value.len() > quota {
                return Err(Error::storage(StorageErrorCode::QuotaExceeded, key));
            }
        }

        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory, created on first write.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();

        self.root.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                tracing::warn!(key, error = %e, "stored file is not valid UTF-8");
                Err(Error::storage(StorageErrorCode::ParseError, key))
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read stored file");
                Err(Error::storage(StorageErrorCode::LoadError, key))
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .and_then(|_| fs::write(self.path_for(key), value))
            .map_err(|e| {
                tracing::warn!(key, error = %e, "failed to write stored file");
                match e.kind() {
                    ErrorKind::StorageFull => Error::storage(StorageErrorCode::QuotaExceeded, key),
                    _ => Error::storage(StorageErrorCode::SaveError, key),
                }
            })
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(_) => Err(Error::storage(StorageErrorCode::SaveError, key)),
        }
    }
}
