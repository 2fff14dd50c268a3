//! Flat-file photo store.
//!
//! The whole collection lives in one JSON document (`{ "photos": [...] }`).
//! Every operation reads and/or rewrites the entire document:
//!
//! | Operation | Reads | Writes |
//! |---|---|---|
//! | [`PhotoStore::load`] | yes | no |
//! | [`PhotoStore::replace_all`] | no | yes |
//! | [`PhotoStore::delete_by_id`] | yes | yes |
//!
//! There is no locking. Two concurrent writers race and the last write wins;
//! a delete that interleaves with a replace can resurrect or drop records.

use crate::types::{PhotoDocument, PhotoRecord};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Handle to the JSON document on disk. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    path: PathBuf,
}

impl PhotoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty document if either is missing.
    ///
    /// An existing document is left untouched.
    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
            _ => {}
        }
        if !self.path.exists() {
            log::info!("Creating empty photo document at {}", self.path.display());
            self.write(&PhotoDocument::default())?;
        }
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<PhotoRecord>, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        let doc: PhotoDocument = serde_json::from_str(&content)?;
        Ok(doc.photos)
    }

    /// Overwrite the whole collection.
    pub fn replace_all(&self, photos: Vec<PhotoRecord>) -> Result<(), StoreError> {
        self.write(&PhotoDocument::new(photos))
    }

    /// Remove the record with `id`. Unknown ids leave the collection as it was.
    pub fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut photos = self.load()?;
        let before = photos.len();
        photos.retain(|p| p.id != id);
        if photos.len() == before {
            log::debug!("delete: no photo with id {id}");
        }
        self.replace_all(photos)
    }

    fn write(&self, doc: &PhotoDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
