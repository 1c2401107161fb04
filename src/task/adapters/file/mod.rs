//! Directory-backed persistence storing one JSON file per slot.
//!
//! Access is confined to the configured directory through `cap-std`.
//! Writes land in a temporary sibling first and are renamed into place, so
//! a crash mid-write leaves the previous document intact.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io;
use std::sync::Arc;

use crate::task::ports::{PersistenceError, PersistenceResult, StatePersistence};

const DOCUMENT_EXTENSION: &str = "json";
const TEMPORARY_SUFFIX: &str = "tmp";

/// Persistence adapter writing `<slot>.json` files into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStatePersistence {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl JsonFileStatePersistence {
    /// Opens `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] when the directory cannot be created
    /// or opened.
    pub fn open(root: impl Into<Utf8PathBuf>) -> PersistenceResult<Self> {
        let root = root.into();
        Dir::create_ambient_dir_all(&root, ambient_authority()).map_err(PersistenceError::io)?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).map_err(PersistenceError::io)?;
        Ok(Self {
            root,
            dir: Arc::new(dir),
        })
    }

    /// Returns the directory holding the documents.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Returns the file name used for `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::InvalidSlot`] unless the slot is a
    /// non-empty run of ASCII letters, digits, `-`, or `_`.
    pub fn file_name(slot: &str) -> PersistenceResult<String> {
        let is_valid = !slot.is_empty()
            && slot
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
        if !is_valid {
            return Err(PersistenceError::InvalidSlot(slot.to_owned()));
        }
        Ok(format!("{slot}.{DOCUMENT_EXTENSION}"))
    }

    async fn run_blocking<T, F>(&self, operation: F) -> PersistenceResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> PersistenceResult<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || operation(&dir))
            .await
            .map_err(PersistenceError::io)?
    }
}

#[async_trait]
impl StatePersistence for JsonFileStatePersistence {
    async fn load(&self, slot: &str) -> PersistenceResult<Option<String>> {
        let file_name = Self::file_name(slot)?;
        self.run_blocking(move |dir| match dir.read_to_string(&file_name) {
            Ok(document) => Ok(Some(document)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistenceError::io(err)),
        })
        .await
    }

    async fn save(&self, slot: &str, document: &str) -> PersistenceResult<()> {
        let file_name = Self::file_name(slot)?;
        let temporary = format!("{file_name}.{TEMPORARY_SUFFIX}");
        let contents = document.to_owned();
        self.run_blocking(move |dir| {
            dir.write(&temporary, contents.as_bytes())
                .map_err(PersistenceError::io)?;
            dir.rename(&temporary, dir, &file_name)
                .map_err(PersistenceError::io)
        })
        .await
    }
}
