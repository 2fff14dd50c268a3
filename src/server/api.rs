//! JSON endpoints over the photo store.

use crate::store::PhotoStore;
use crate::types::PhotoDocument;
use rouille::{Request, Response};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Success body for write endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Error body for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

fn error(status: u16, message: &str) -> Response {
    Response::json(&ErrorResponse::new(message)).with_status_code(status)
}

pub(super) enum BodyError {
    TooLarge,
    Unreadable(String),
}

impl BodyError {
    pub(super) fn into_response(self) -> Response {
        match self {
            BodyError::TooLarge => error(413, "Request body too large"),
            BodyError::Unreadable(e) => error(400, &format!("Could not read request body: {e}")),
        }
    }
}

/// Reject requests whose declared `Content-Length` is above `limit`.
pub(super) fn check_declared_length(request: &Request, limit: usize) -> Result<(), BodyError> {
    let declared = request
        .header("Content-Length")
        .and_then(|v| v.trim().parse::<u64>().ok());
    match declared {
        Some(len) if len > limit as u64 => Err(BodyError::TooLarge),
        _ => Ok(()),
    }
}

/// Read the whole body, refusing more than `limit` bytes.
fn read_body(request: &Request, limit: usize) -> Result<Vec<u8>, BodyError> {
    check_declared_length(request, limit)?;
    let Some(body) = request.data() else {
        return Err(BodyError::Unreadable("body already consumed".into()));
    };
    let mut bytes = Vec::new();
    body.take(limit as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| BodyError::Unreadable(e.to_string()))?;
    if bytes.len() > limit {
        return Err(BodyError::TooLarge);
    }
    Ok(bytes)
}

pub(super) fn get_photos(store: &PhotoStore) -> Response {
    match store.load() {
        Ok(photos) => Response::json(&PhotoDocument::new(photos)),
        Err(e) => {
            log::error!("Error reading photos: {e}");
            error(500, "Failed to load photos")
        }
    }
}

pub(super) fn save_photos(request: &Request, store: &PhotoStore, limit: usize) -> Response {
    let bytes = match read_body(request, limit) {
        Ok(bytes) => bytes,
        Err(e) => return e.into_response(),
    };
    let doc: PhotoDocument = match serde_json::from_slice(&bytes) {
        Ok(doc) => doc,
        Err(e) => return error(400, &format!("Invalid JSON: {e}")),
    };
    let count = doc.photos.len();
    match store.replace_all(doc.photos) {
        Ok(()) => {
            log::debug!("saved {count} photos");
            Response::json(&ApiResponse::ok("Photos saved successfully"))
        }
        Err(e) => {
            log::error!("Error saving photos: {e}");
            error(500, "Failed to save photos")
        }
    }
}

pub(super) fn delete_photo(store: &PhotoStore, id: &str) -> Response {
    match store.delete_by_id(id) {
        Ok(()) => Response::json(&ApiResponse::ok("Photo deleted successfully")),
        Err(e) => {
            log::error!("Error deleting photo {id}: {e}");
            error(500, "Failed to delete photo")
        }
    }
}
