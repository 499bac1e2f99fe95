//! Persistence gateway for named JSON documents.
//!
//! Loading is best-effort: a missing, unreadable, or corrupt document yields
//! the type's default value and a warning. Saving always rewrites the whole
//! document and reports failures as [`Error::Persistence`].

use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::NamedTempFile;

/// Storage capability the stores depend on
pub trait Gateway: Clone {
    /// Load a named document, falling back to `T::default()`
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T;

    /// Overwrite a named document
    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()>;
}

/// One pretty-printed `<name>.json` file per document inside a directory
#[derive(Clone, Debug)]
pub struct JsonFileGateway {
    dir: PathBuf,
}

impl JsonFileGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing a named document
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }

    fn read_locked(path: &Path) -> std::io::Result<String> {
        let file = File::open(path)?;
        // Shared lock for reading
        file.lock_shared()?;

        let mut contents = String::new();
        let result = std::io::BufReader::new(&file).read_to_string(&mut contents);
        if let Err(e) = file.unlock() {
            tracing::warn!("Failed to unlock {:?}: {}", path, e);
        }
        result.map(|_| contents)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl Gateway for JsonFileGateway {
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.path_for(name);
        if !path.exists() {
            tracing::debug!("No {} file at {:?}, starting empty", name, path);
            return T::default();
        }

        let contents = match Self::read_locked(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}. Using defaults.", path, e);
                return T::default();
            }
        };

        match serde_json::from_str::<T>(&contents) {
            Ok(value) => {
                tracing::debug!("Loaded {} from {:?}", name, path);
                value
            }
            Err(e) => {
                tracing::warn!("Failed to parse {:?}: {}. Using defaults.", path, e);
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path_for(name);
        serde_json::to_string_pretty(value)
            .map_err(Error::from)
            .and_then(|contents| self.write_atomic(&path, &contents))
            .map_err(|e| Error::Persistence(format!("failed to save {:?}: {}", path, e)))?;

        tracing::debug!("Saved {} to {:?}", name, path);
        Ok(())
    }
}

/// In-process documents, shared between clones
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    documents: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON text of a document, if one has been saved
    pub fn raw(&self, name: &str) -> Option<String> {
        self.documents.borrow().get(name).cloned()
    }

    /// Replace a document with arbitrary text
    pub fn put_raw(&self, name: &str, contents: impl Into<String>) {
        self.documents
            .borrow_mut()
            .insert(name.to_string(), contents.into());
    }
}

impl Gateway for MemoryGateway {
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let documents = self.documents.borrow();
        let Some(contents) = documents.get(name) else {
            return T::default();
        };

        serde_json::from_str(contents).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse in-memory {}: {}. Using defaults.", name, e);
            T::default()
        })
    }

    fn save<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let contents = serde_json::to_string(value)
            .map_err(|e| Error::Persistence(format!("failed to save {}: {}", name, e)))?;
        self.put_raw(name, contents);
        Ok(())
    }
}
