//! Shared test utilities for the orbit-gallery test suite.
//!
//! Provides photo record fixtures, a scratch [`PhotoStore`], and small
//! in-memory images for the imaging and viewer tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (_tmp, store) = temp_store();
//! store.replace_all(vec![record("1", "Sunset")]).unwrap();
//!
//! let photo = photo_with_image("2", 40, 20); // real 2:1 JPEG inside
//! ```

use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use tempfile::TempDir;

use crate::imaging::encode_data_uri;
use crate::store::PhotoStore;
use crate::types::PhotoRecord;

// =========================================================================
// Records
// =========================================================================

/// A record with a placeholder image that does not decode.
///
/// Placement is off the default camera's centre line so pick tests only hit
/// the planes they position themselves.
pub fn record(id: &str, caption: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        image: "data:image/jpeg;base64,".to_string(),
        caption: caption.to_string(),
        position: [5.0, 5.0, -2.0],
        rotation: [0.0, 0.0, 0.0],
    }
}

/// A record carrying a real `width`×`height` JPEG.
pub fn photo_with_image(id: &str, width: u32, height: u32) -> PhotoRecord {
    PhotoRecord {
        image: jpeg_data_uri(width, height),
        ..record(id, "")
    }
}

// =========================================================================
// Storage
// =========================================================================

/// An initialized store in a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (TempDir, PhotoStore) {
    let tmp = TempDir::new().unwrap();
    let store = PhotoStore::new(tmp.path().join("data").join("photos.json"));
    store.ensure_initialized().unwrap();
    (tmp, store)
}

// =========================================================================
// Images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 128])
    })
}

fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    gradient(width, height).write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// PNG bytes of a small gradient image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageFormat::Png)
}

/// A `data:image/jpeg;base64,...` URI of a small gradient image.
pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    encode_data_uri("image/jpeg", &encode(width, height, ImageFormat::Jpeg))
}
