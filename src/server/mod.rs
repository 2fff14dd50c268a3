//! HTTP service for the gallery.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────┐                 ┌───────────────────────┐
//! │  rouille worker threads    │   read/write    │  data/photos.json     │
//! │                            │ ──────────────▶ │  { "photos": [...] }  │
//! │  GET    /api/photos        │   (no locking)  └───────────────────────┘
//! │  POST   /api/photos        │
//! │  DELETE /api/photos/{id}   │
//! │  GET    /                  │  gallery page (viewer scene → HTML)
//! │  GET    /admin             │  admin page (AdminSession over the store)
//! │  POST   /admin/photos...   │  admin form actions
//! └────────────────────────────┘
//! ```
//!
//! Every request runs [`handle_request`] against a shared, read-only
//! [`AppState`]. The store has no locking: concurrent writers race and the
//! last write wins.
//!
//! # Endpoints
//!
//! | Method | Path | Result |
//! |---|---|---|
//! | GET | `/api/photos` | `{ "photos": [...] }` |
//! | POST | `/api/photos` | replace the whole collection |
//! | DELETE | `/api/photos/{id}` | delete one photo |
//! | OPTIONS | any | 204 with CORS headers |
//! | GET | `/` | gallery page |
//! | GET | `/admin?admin=<token>[&edit=<id>]` | admin page, else 302 to `/` |
//! | POST | `/admin/photos?admin=<token>` | save the admin form (multipart) |
//! | POST | `/admin/photos/{id}/delete?admin=<token>` | delete from the admin page |

mod api;
mod web;

use crate::config::AppConfig;
use crate::imaging::RustBackend;
use crate::store::{PhotoStore, StoreError};
use rouille::{Request, Response};
use std::sync::Arc;
use thiserror::Error;

pub use api::{ApiResponse, ErrorResponse};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Failed to bind {address}: {message}")]
    Bind { address: String, message: String },
}

/// Everything a request handler needs.
pub struct AppState {
    pub config: AppConfig,
    pub store: PhotoStore,
    pub backend: RustBackend,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = PhotoStore::new(&config.server.data_file);
        Self {
            config,
            store,
            backend: RustBackend::new(),
        }
    }
}

/// Route one request.
pub fn handle_request(request: &Request, state: &AppState) -> Response {
    if request.method() == "OPTIONS" {
        return Response::empty_204()
            .with_additional_header("Access-Control-Allow-Origin", "*")
            .with_additional_header("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS")
            .with_additional_header("Access-Control-Allow-Headers", "Content-Type");
    }

    let response = route(request, state);
    log::debug!(
        "{} {} -> {}",
        request.method(),
        request.raw_url(),
        response.status_code
    );
    response.with_additional_header("Access-Control-Allow-Origin", "*")
}

fn route(request: &Request, state: &AppState) -> Response {
    // Paths with parameters are matched by hand.
    let path = request.url();
    if request.method() == "DELETE" {
        if let Some(id) = path.strip_prefix("/api/photos/") {
            return api::delete_photo(&state.store, id);
        }
    }
    if request.method() == "POST" {
        let delete_id = path
            .strip_prefix("/admin/photos/")
            .and_then(|rest| rest.strip_suffix("/delete"));
        if let Some(id) = delete_id {
            return web::admin_delete(request, state, id);
        }
    }

    rouille::router!(request,
        (GET) ["/api/photos"] => {
            api::get_photos(&state.store)
        },
        (POST) ["/api/photos"] => {
            api::save_photos(request, &state.store, state.config.server.max_body_bytes)
        },
        (GET) ["/"] => {
            web::gallery(state)
        },
        (GET) ["/admin"] => {
            web::admin_page(request, state)
        },
        (POST) ["/admin/photos"] => {
            web::admin_save(request, state)
        },
        _ => {
            Response::json(&ErrorResponse::new("Not found")).with_status_code(404)
        }
    )
}

/// Initialize the store and serve until the process exits.
pub fn serve(config: AppConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(config));
    state.store.ensure_initialized()?;

    let address = state.config.server.address();
    let handler_state = Arc::clone(&state);
    let server = rouille::Server::new(&address, move |request| {
        handle_request(request, &handler_state)
    })
    .map_err(|e| ServerError::Bind {
        address: address.clone(),
        message: e.to_string(),
    })?;

    let port = server.server_addr().port();
    log::info!("Server running on port {port}");
    log::info!("Gallery: http://localhost:{port}");
    log::info!(
        "Admin: http://localhost:{port}/admin?admin={}",
        state.config.server.admin_token
    );
    log::info!("Photos stored in {}", state.store.path().display());

    server.run();
    Ok(())
}
