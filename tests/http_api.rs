//! End-to-end tests for the HTTP routes, driven through `handle_request`
//! with fake rouille requests against a scratch data file.

use image::{ImageFormat, RgbImage};
use orbit_gallery::admin::AdminSession;
use orbit_gallery::client::PhotoApi;
use orbit_gallery::config::AppConfig;
use orbit_gallery::imaging::{CompressionConfig, RustBackend, compress_image};
use orbit_gallery::server::{AppState, handle_request};
use orbit_gallery::types::{PhotoDocument, PhotoRecord};
use rouille::{Request, Response};
use std::io::{Cursor, Read};
use tempfile::TempDir;

// =========================================================================
// Fixtures
// =========================================================================

fn app() -> (TempDir, AppState) {
    let tmp = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.server.data_file = tmp
        .path()
        .join("data")
        .join("photos.json")
        .to_string_lossy()
        .into_owned();
    config.server.admin_token = "secret".to_string();
    let state = AppState::new(config);
    state.store.ensure_initialized().unwrap();
    (tmp, state)
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 9 % 256) as u8, (y * 3 % 256) as u8, 64])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn photo(id: &str, caption: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        image: compress_image(&RustBackend::new(), &png(40, 20), &CompressionConfig::default())
            .unwrap(),
        caption: caption.to_string(),
        position: [1.0, -2.0, 0.5],
        rotation: [0.1, -0.2, 0.0],
    }
}

fn get(state: &AppState, url: &str) -> Response {
    handle_request(&Request::fake_http("GET", url, vec![], vec![]), state)
}

fn post_json(state: &AppState, url: &str, body: &str) -> Response {
    let request = Request::fake_http(
        "POST",
        url,
        vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Content-Length".to_string(), body.len().to_string()),
        ],
        body.as_bytes().to_vec(),
    );
    handle_request(&request, state)
}

fn body(response: Response) -> String {
    let (mut reader, _) = response.data.into_reader_and_size();
    let mut text = String::new();
    reader.read_to_string(&mut text).unwrap();
    text
}

fn header(response: &Response, name: &str) -> Option<String> {
    response
        .headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.to_string())
}

fn listed(state: &AppState) -> Vec<PhotoRecord> {
    let response = get(state, "/api/photos");
    assert_eq!(response.status_code, 200);
    let doc: PhotoDocument = serde_json::from_str(&body(response)).unwrap();
    doc.photos
}

// =========================================================================
// JSON API
// =========================================================================

#[test]
fn empty_store_lists_no_photos() {
    let (_tmp, state) = app();
    let response = get(&state, "/api/photos");
    assert_eq!(response.status_code, 200);
    assert_eq!(body(response), r#"{"photos":[]}"#);
}

#[test]
fn post_replaces_whole_collection() {
    let (_tmp, state) = app();
    let first = serde_json::to_string(&PhotoDocument::new(vec![photo("1", "a"), photo("2", "b")]))
        .unwrap();
    let response = post_json(&state, "/api/photos", &first);
    assert_eq!(response.status_code, 200);
    assert_eq!(
        body(response),
        r#"{"success":true,"message":"Photos saved successfully"}"#
    );

    let second = serde_json::to_string(&PhotoDocument::new(vec![photo("3", "c")])).unwrap();
    post_json(&state, "/api/photos", &second);

    let ids: Vec<String> = listed(&state).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["3"]);
}

#[test]
fn delete_removes_one_photo() {
    let (_tmp, state) = app();
    state
        .store
        .replace_all(vec![photo("1", "a"), photo("2", "b"), photo("3", "c")])
        .unwrap();

    let response = handle_request(
        &Request::fake_http("DELETE", "/api/photos/2", vec![], vec![]),
        &state,
    );
    assert_eq!(response.status_code, 200);
    assert!(body(response).contains("Photo deleted successfully"));

    let ids: Vec<String> = listed(&state).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[test]
fn delete_unknown_id_is_a_noop() {
    let (_tmp, state) = app();
    state.store.replace_all(vec![photo("1", "a")]).unwrap();
    let response = handle_request(
        &Request::fake_http("DELETE", "/api/photos/nope", vec![], vec![]),
        &state,
    );
    assert_eq!(response.status_code, 200);
    assert_eq!(listed(&state).len(), 1);
}

#[test]
fn malformed_json_is_rejected() {
    let (_tmp, state) = app();
    let response = post_json(&state, "/api/photos", "{not json");
    assert_eq!(response.status_code, 400);
    assert!(body(response).contains("Invalid JSON"));
}

#[test]
fn oversized_body_is_rejected() {
    let (_tmp, mut state) = app();
    state.config.server.max_body_bytes = 16;
    let big = r#"{"photos":[],"padding":"xxxxxxxxxxxxxxxxxxxxxxxx"}"#;
    let response = post_json(&state, "/api/photos", big);
    assert_eq!(response.status_code, 413);
}

#[test]
fn oversized_body_without_declared_length_is_rejected() {
    let (_tmp, mut state) = app();
    state.config.server.max_body_bytes = 16;
    let request = Request::fake_http("POST", "/api/photos", vec![], vec![b' '; 64]);
    assert_eq!(handle_request(&request, &state).status_code, 413);
}

#[test]
fn storage_failure_is_a_500() {
    let (tmp, state) = app();
    std::fs::write(tmp.path().join("data").join("photos.json"), "garbage").unwrap();
    let response = get(&state, "/api/photos");
    assert_eq!(response.status_code, 500);
    assert_eq!(body(response), r#"{"error":"Failed to load photos"}"#);
}

#[test]
fn unknown_route_is_404() {
    let (_tmp, state) = app();
    assert_eq!(get(&state, "/nope").status_code, 404);
}

#[test]
fn preflight_gets_cors_headers() {
    let (_tmp, state) = app();
    let response = handle_request(
        &Request::fake_http("OPTIONS", "/api/photos", vec![], vec![]),
        &state,
    );
    assert_eq!(response.status_code, 204);
    assert_eq!(
        header(&response, "Access-Control-Allow-Origin").as_deref(),
        Some("*")
    );
    assert!(
        header(&response, "Access-Control-Allow-Methods")
            .unwrap()
            .contains("DELETE")
    );
}

#[test]
fn responses_allow_any_origin() {
    let (_tmp, state) = app();
    let response = get(&state, "/api/photos");
    assert_eq!(
        header(&response, "Access-Control-Allow-Origin").as_deref(),
        Some("*")
    );
}

// =========================================================================
// Admin scenario
// =========================================================================

#[test]
fn admin_adds_photo_then_api_lists_it() {
    let (_tmp, state) = app();
    assert!(listed(&state).is_empty());

    let mut session = AdminSession::new(
        state.store.clone(),
        state.config.placement.clone(),
        state.config.compression.to_compression_config(),
    );
    session.load().unwrap();
    session.select_image(&RustBackend::new(), &png(64, 48)).unwrap();
    session.set_caption("Test");
    let id = session.save(&mut rand::thread_rng()).unwrap();

    let photos = listed(&state);
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].caption, "Test");
    assert_eq!(photos[0].id, id);
    assert!(!photos[0].id.is_empty());
    assert!(photos[0].image.starts_with("data:image/jpeg;base64,"));
    assert_eq!(photos[0].rotation[2], 0.0);
}

#[test]
fn admin_edit_over_api_keeps_placement() {
    let (_tmp, state) = app();
    state.store.replace_all(vec![photo("1", "old")]).unwrap();

    let mut session = AdminSession::new(
        state.store.clone(),
        state.config.placement.clone(),
        state.config.compression.to_compression_config(),
    );
    session.load().unwrap();
    session.edit("1").unwrap();
    session.set_caption("new");
    session.save(&mut rand::thread_rng()).unwrap();

    let photos = state.store.get_photos();
    assert_eq!(photos[0].caption, "new");
    assert_eq!(photos[0].position, [1.0, -2.0, 0.5]);
    assert_eq!(photos[0].rotation, [0.1, -0.2, 0.0]);
}

#[test]
fn admin_form_upload_creates_photo() {
    let (_tmp, state) = app();
    let boundary = "orbitboundary";
    let mut data = Vec::new();
    data.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nTest\r\n"
        )
        .as_bytes(),
    );
    data.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"p.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    data.extend_from_slice(&png(30, 20));
    data.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::fake_http(
        "POST",
        "/admin/photos?admin=secret",
        vec![
            (
                "Content-Type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            ),
            ("Content-Length".to_string(), data.len().to_string()),
        ],
        data,
    );
    let response = handle_request(&request, &state);
    assert_eq!(response.status_code, 200);
    assert!(body(response).contains("Photo saved."));

    let photos = listed(&state);
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].caption, "Test");
}

// =========================================================================
// Pages
// =========================================================================

#[test]
fn admin_rejects_wrong_token() {
    let (_tmp, state) = app();
    for url in ["/admin", "/admin?admin=wrong"] {
        let response = get(&state, url);
        assert_eq!(response.status_code, 302, "{url}");
        assert_eq!(header(&response, "Location").as_deref(), Some("/"));
    }
}

#[test]
fn admin_form_post_rejects_wrong_token() {
    let (_tmp, state) = app();
    let request = Request::fake_http("POST", "/admin/photos?admin=wrong", vec![], vec![]);
    assert_eq!(handle_request(&request, &state).status_code, 302);
}

#[test]
fn admin_page_lists_photos() {
    let (_tmp, state) = app();
    state.store.replace_all(vec![photo("1", "Sunset")]).unwrap();
    let response = get(&state, "/admin?admin=secret");
    assert_eq!(response.status_code, 200);
    let html = body(response);
    assert!(html.contains("Sunset"));
    assert!(html.contains("/admin/photos/1/delete?admin=secret"));
}

#[test]
fn admin_edit_link_prefills_form() {
    let (_tmp, state) = app();
    state.store.replace_all(vec![photo("1", "Sunset")]).unwrap();
    let html = body(get(&state, "/admin?admin=secret&edit=1"));
    assert!(html.contains("Edit photo"));
    assert!(html.contains(r#"name="editing_id" value="1""#));
}

#[test]
fn stale_edit_link_shows_status_and_blank_form() {
    let (_tmp, state) = app();
    state.store.replace_all(vec![photo("1", "Sunset")]).unwrap();
    let response = get(&state, "/admin?admin=secret&edit=gone");
    assert_eq!(response.status_code, 200);
    let html = body(response);
    assert!(html.contains("Photo gone no longer exists."));
    assert!(html.contains("Add a new photo"));
    assert!(html.contains("Sunset"));
}

#[test]
fn admin_delete_form_removes_photo() {
    let (_tmp, state) = app();
    state
        .store
        .replace_all(vec![photo("1", "a"), photo("2", "b")])
        .unwrap();
    let request = Request::fake_http("POST", "/admin/photos/1/delete?admin=secret", vec![], vec![]);
    let response = handle_request(&request, &state);
    assert_eq!(response.status_code, 200);
    assert!(body(response).contains("Photo deleted."));

    let ids: Vec<String> = listed(&state).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["2"]);
}

#[test]
fn admin_delete_form_decodes_awkward_id() {
    let (_tmp, state) = app();
    state
        .store
        .replace_all(vec![photo("a#b ?c", "x"), photo("keep", "y")])
        .unwrap();
    let request = Request::fake_http(
        "POST",
        "/admin/photos/a%23b%20%3Fc/delete?admin=secret",
        vec![],
        vec![],
    );
    assert_eq!(handle_request(&request, &state).status_code, 200);

    let ids: Vec<String> = listed(&state).into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["keep"]);
}

#[test]
fn admin_write_refused_when_store_unreadable() {
    let (tmp, state) = app();
    let path = tmp.path().join("data").join("photos.json");
    std::fs::write(&path, "garbage").unwrap();
    let request = Request::fake_http("POST", "/admin/photos/1/delete?admin=secret", vec![], vec![]);
    let response = handle_request(&request, &state);
    assert_eq!(response.status_code, 200);
    assert!(body(response).contains("Could not load photos"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
}

#[test]
fn empty_gallery_links_to_admin() {
    let (_tmp, state) = app();
    let response = get(&state, "/");
    assert_eq!(response.status_code, 200);
    let html = body(response);
    assert!(html.contains("No photos yet"));
    assert!(html.contains("/admin?admin=secret"));
}

#[test]
fn gallery_renders_first_photo_active() {
    let (_tmp, state) = app();
    state
        .store
        .replace_all(vec![photo("1", "Sunset"), photo("2", "")])
        .unwrap();
    let html = body(get(&state, "/"));
    assert!(html.contains(r#"class="photo active" data-index="0""#));
    assert!(html.contains(r#"class="photo" data-index="1""#));
    assert!(html.contains("1 / 2"));
    assert!(html.contains("<span>Sunset</span>"));
}
