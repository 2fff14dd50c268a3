//! Shared types used by the store, the HTTP service, the API client and the
//! admin editor.
//!
//! These types are serialized as-is to the persisted document and over the
//! wire, so the field names here are the JSON field names.

use serde::{Deserialize, Serialize};

/// A single photo in the gallery.
///
/// Placement (`position`, `rotation`) is generated once when the photo is
/// created and carried forward unchanged by every edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    /// Unique within the collection. Timestamp-derived for new photos.
    pub id: String,
    /// Data URI, normally `data:image/jpeg;base64,...`.
    pub image: String,
    /// Optional caption; an empty string means "no caption".
    #[serde(default)]
    pub caption: String,
    /// World-space placement of the photo plane.
    pub position: [f64; 3],
    /// Euler rotation (XYZ order). The third component is always 0.
    pub rotation: [f64; 3],
}

impl PhotoRecord {
    pub fn has_caption(&self) -> bool {
        !self.caption.trim().is_empty()
    }

    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            rotation: self.rotation,
        }
    }
}

/// Position and rotation of a photo plane, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
}

/// The persisted document and the body of `GET`/`POST /api/photos`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoDocument {
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
}

impl PhotoDocument {
    pub fn new(photos: Vec<PhotoRecord>) -> Self {
        Self { photos }
    }
}
