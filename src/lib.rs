//! # Orbit Gallery
//!
//! A personal photo gallery shown as a 3D carousel. Photos are planes
//! floating in space; visitors pan, orbit and zoom a camera around them and
//! step through them one at a time. A tiny HTTP service keeps the whole
//! collection in one JSON document on disk.
//!
//! # Architecture
//!
//! ```text
//!   admin page / CLI ──▶ AdminSession ──▶ PhotoApi ──▶ HTTP service ──▶ photos.json
//!                                          │  (ApiClient or PhotoStore)
//!   gallery page ◀── pages ◀── Viewer scene ◀── photos (read once per page load)
//! ```
//!
//! Writes go through [`admin::AdminSession`], which is written against the
//! [`client::PhotoApi`] trait. The server's own admin pages run it directly
//! over the [`store::PhotoStore`]; the CLI runs it over HTTP with
//! [`client::ApiClient`]. The gallery page is built from a [`viewer::Viewer`]
//! scene, so plane sizes, placement and caption layout come from the same
//! code the unit tests exercise.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `PhotoRecord` and the persisted `{ "photos": [...] }` document |
//! | [`store`] | Whole-document read/write of the JSON file |
//! | [`server`] | rouille routes: JSON API, gallery page, token-protected admin pages |
//! | [`client`] | `PhotoApi` trait, blocking HTTP client, store-backed implementation |
//! | [`admin`] | Form state, create/edit/delete, random placement, timestamp ids |
//! | [`imaging`] | Upload compression and data URI encode/decode |
//! | [`viewer`] | Camera, gestures, input dispatch, picking, navigation, scene loading |
//! | [`pages`] | Maud templates for the gallery and admin pages |
//! | [`config`] | `config.toml` loading, merging with stock defaults, validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Last Writer Wins
//!
//! The store reads and rewrites the whole document on every change with no
//! locking. Two admins saving at once race, and the later write replaces the
//! earlier one. This is a single-owner gallery.
//!
//! ## Placement Is Fixed At Creation
//!
//! New photos get a random position and a small random tilt. Edits copy the
//! existing placement instead of rolling a new one, so a photo never jumps
//! around the scene when its caption changes.
//!
//! ## Input As A Dispatch Table
//!
//! The viewer never touches a rendering surface. Hosts translate native
//! events into [`viewer::InputEvent`]s; [`viewer::InputDispatcher`] classifies
//! each one and calls the handler registered for its gesture kind against a
//! single owned [`viewer::ViewerState`]. Handlers return
//! [`viewer::ViewerEvent`]s for the host to act on.

pub mod admin;
pub mod client;
pub mod config;
pub mod imaging;
pub mod output;
pub mod pages;
pub mod server;
pub mod store;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
