//! Access to the photo collection.
//!
//! [`PhotoApi`] is the seam the admin editor is written against. Two
//! implementations exist:
//!
//! - [`ApiClient`]: talks to a running server over HTTP (used by the CLI)
//! - [`PhotoStore`]: works on the JSON document directly (used by the
//!   server's own admin pages)

use crate::store::{PhotoStore, StoreError};
use crate::types::{PhotoDocument, PhotoRecord};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid server URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Server URL cannot carry a path: {0}")]
    BaseUrl(String),
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub trait PhotoApi {
    /// Fetch the whole collection.
    fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, ClientError>;

    /// Replace the whole collection.
    fn save_photos(&self, photos: &[PhotoRecord]) -> Result<(), ClientError>;

    fn delete_photo(&self, id: &str) -> Result<(), ClientError>;

    /// Fetch the collection, treating any failure as an empty gallery.
    fn get_photos(&self) -> Vec<PhotoRecord> {
        self.fetch_photos().unwrap_or_else(|e| {
            log::error!("Error loading photos: {e}");
            Vec::new()
        })
    }
}

impl PhotoApi for PhotoStore {
    fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, ClientError> {
        Ok(self.load()?)
    }

    fn save_photos(&self, photos: &[PhotoRecord]) -> Result<(), ClientError> {
        Ok(self.replace_all(photos.to_vec())?)
    }

    fn delete_photo(&self, id: &str) -> Result<(), ClientError> {
        Ok(self.delete_by_id(id)?)
    }
}

/// Error body returned by the server on failure.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking HTTP client for `/api/photos`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn photos_url(&self) -> String {
        format!("{}/api/photos", self.base_url)
    }

    /// `/api/photos/<id>` with the id percent-encoded as one path segment.
    fn photo_url(&self, id: &str) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.photos_url())?;
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base_url.clone()))?
            .push(id);
        Ok(url)
    }
}

/// Pass successful responses through; turn error statuses into [`ClientError::Status`].
fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

impl PhotoApi for ApiClient {
    fn fetch_photos(&self) -> Result<Vec<PhotoRecord>, ClientError> {
        let response = check(self.http.get(self.photos_url()).send()?)?;
        let doc: PhotoDocument = response.json()?;
        Ok(doc.photos)
    }

    fn save_photos(&self, photos: &[PhotoRecord]) -> Result<(), ClientError> {
        let body = PhotoDocument::new(photos.to_vec());
        check(self.http.post(self.photos_url()).json(&body).send()?)?;
        Ok(())
    }

    fn delete_photo(&self, id: &str) -> Result<(), ClientError> {
        let url = self.photo_url(id)?;
        check(self.http.delete(url).send()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{record, temp_store};

    #[test]
    fn store_backed_api_round_trips() {
        let (_tmp, store) = temp_store();
        store
            .save_photos(&[record("1", "a"), record("2", "b")])
            .unwrap();
        store.delete_photo("1").unwrap();

        let ids: Vec<String> = store.get_photos().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["2"]);
    }

    #[test]
    fn get_photos_treats_failure_as_empty() {
        let store = PhotoStore::new("/nonexistent/dir/photos.json");
        assert!(store.fetch_photos().is_err());
        assert!(store.get_photos().is_empty());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.photos_url(), "http://localhost:3000/api/photos");
    }

    #[test]
    fn photo_url_encodes_reserved_characters() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        let url = |id: &str| client.photo_url(id).unwrap().to_string();
        assert_eq!(url("123"), "http://localhost:3000/api/photos/123");
        assert_eq!(url("a#b"), "http://localhost:3000/api/photos/a%23b");
        assert_eq!(url("a?b"), "http://localhost:3000/api/photos/a%3Fb");
        assert_eq!(url("a/b"), "http://localhost:3000/api/photos/a%2Fb");
    }

    #[test]
    fn unreachable_server_yields_empty_gallery() {
        // Port 9 (discard) on localhost is not expected to run an HTTP server.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        assert!(client.get_photos().is_empty());
    }
}
