//! HTML routes: the gallery page and the token-protected admin pages.
//!
//! The admin pages run an [`AdminSession`] directly against the store, so
//! the form flow (compress, create or edit with placement carried forward,
//! delete) is the same one the CLI drives over HTTP.

use super::AppState;
use super::api::check_declared_length;
use crate::admin::AdminSession;
use crate::imaging::RustBackend;
use crate::pages;
use crate::store::PhotoStore;
use crate::viewer::{SceneLayout, Viewer, Viewport};
use rouille::input::post::BufferedFile;
use rouille::{Request, Response};

fn html(markup: maud::Markup) -> Response {
    Response::html(markup.into_string())
}

pub(super) fn gallery(state: &AppState) -> Response {
    let photos = match state.store.load() {
        Ok(photos) => photos,
        Err(e) => {
            log::error!("Error loading photos: {e}");
            Vec::new()
        }
    };

    let mut viewer = Viewer::new(
        RustBackend::new(),
        SceneLayout::from(&state.config.viewer),
        Viewport::default(),
    );
    viewer.load_photos(&photos);
    let placed = viewer.wait_loaded();
    log::debug!("gallery: {placed} of {} photos placed", photos.len());

    let view = viewer.state();
    html(pages::render_gallery_page(
        &photos,
        &view.scene,
        view.navigation.active(),
        &state.config.server.admin_token,
    ))
}

fn authorized(request: &Request, state: &AppState) -> bool {
    request.get_param("admin").as_deref() == Some(state.config.server.admin_token.as_str())
}

fn session(state: &AppState) -> AdminSession<PhotoStore> {
    let mut session = AdminSession::new(
        state.store.clone(),
        state.config.placement.clone(),
        state.config.compression.to_compression_config(),
    );
    // A failed load leaves an error status on the page and blocks writes.
    if let Err(e) = session.load() {
        log::debug!("admin session without photo list: {e}");
    }
    session
}

fn render(state: &AppState, session: &AdminSession<PhotoStore>) -> Response {
    html(pages::render_admin_page(
        &state.config.server.admin_token,
        session.photos(),
        session.form(),
        session.status(),
    ))
}

pub(super) fn admin_page(request: &Request, state: &AppState) -> Response {
    if !authorized(request, state) {
        return Response::redirect_302("/");
    }
    let mut session = session(state);
    if let Some(id) = request.get_param("edit") {
        if let Err(e) = session.edit(&id) {
            log::debug!("stale edit link: {e}");
        }
    }
    render(state, &session)
}

pub(super) fn admin_save(request: &Request, state: &AppState) -> Response {
    if !authorized(request, state) {
        return Response::redirect_302("/");
    }
    if let Err(e) = check_declared_length(request, state.config.server.max_body_bytes) {
        return e.into_response();
    }

    let input = rouille::post_input!(request, {
        photo: Option<BufferedFile>,
        caption: Option<String>,
        editing_id: Option<String>,
    });
    let input = match input {
        Ok(input) => input,
        Err(e) => {
            log::debug!("bad admin form: {e}");
            return Response::text(format!("Invalid form: {e}")).with_status_code(400);
        }
    };

    let mut session = session(state);
    if !session.is_loaded() {
        return render(state, &session);
    }
    let editing_id = input.editing_id.filter(|id| !id.is_empty());
    if let Some(id) = &editing_id {
        if session.edit(id).is_err() {
            return render(state, &session);
        }
    }
    session.set_caption(input.caption.unwrap_or_default());

    if let Some(file) = input.photo.filter(|f| !f.data.is_empty()) {
        if session.select_image(&state.backend, &file.data).is_err() {
            return render(state, &session);
        }
    }

    match session.save(&mut rand::thread_rng()) {
        Ok(id) => log::info!("saved photo {id}"),
        Err(e) => log::debug!("admin save rejected: {e}"),
    }
    render(state, &session)
}

pub(super) fn admin_delete(request: &Request, state: &AppState, id: &str) -> Response {
    if !authorized(request, state) {
        return Response::redirect_302("/");
    }
    let mut session = session(state);
    if !session.is_loaded() {
        return render(state, &session);
    }
    if session.delete(id).is_ok() {
        log::info!("deleted photo {id}");
    }
    render(state, &session)
}
