//! HTML pages served by the HTTP service.
//!
//! ## Pages
//!
//! - **Gallery** (`/`): the 3D carousel. Plane sizes, placements and caption
//!   lines come from the [`viewer`](crate::viewer) scene; `static/gallery.js`
//!   only applies them as CSS 3D transforms and drives the camera.
//! - **Admin** (`/admin?admin=<token>`): add/edit form and the photo list.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (border colors injected from the scene constants)
//! - `static/gallery.js`: Camera, gestures and navigation for the gallery
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::admin::{AdminForm, Status};
use crate::types::PhotoRecord;
use crate::viewer::camera::{
    DEFAULT_FOV_Y_DEGREES, DEFAULT_RADIUS, ORBIT_GAIN, PAN_SPEED, PHI_MAX, PHI_MIN,
    PINCH_ZOOM_GAIN, WHEEL_ZOOM_GAIN,
};
use crate::viewer::caption::LINE_HEIGHT;
use crate::viewer::gesture::{SWIPE_MAX_DURATION, SWIPE_MIN_DISTANCE};
use crate::viewer::scene::{ACTIVE_BORDER, INACTIVE_BORDER, PhotoPlane, Scene};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use url::form_urlencoded::byte_serialize;

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// CSS pixels per world unit in the CSS 3D scene.
pub const PIXELS_PER_UNIT: f32 = 100.0;

/// Base stylesheet with the border colors prepended as custom properties.
pub fn stylesheet() -> String {
    format!(
        ":root {{\n    --active-border: #{ACTIVE_BORDER:06x};\n    --inactive-border: #{INACTIVE_BORDER:06x};\n}}\n\n{CSS_STATIC}"
    )
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Percent-encode a query value.
fn query_value(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// Percent-encode one path segment. Spaces become `%20`, not `+`.
fn path_segment(value: &str) -> String {
    query_value(value).replace('+', "%20")
}

fn admin_url(token: &str) -> String {
    format!("/admin?admin={}", query_value(token))
}

fn edit_url(token: &str, id: &str) -> String {
    format!("{}&edit={}", admin_url(token), query_value(id))
}

fn save_url(token: &str) -> String {
    format!("/admin/photos?admin={}", query_value(token))
}

fn delete_url(token: &str, id: &str) -> String {
    format!(
        "/admin/photos/{}/delete?admin={}",
        path_segment(id),
        query_value(token)
    )
}

// ============================================================================
// Gallery
// ============================================================================

fn render_plane(plane: &PhotoPlane, photo: &PhotoRecord) -> Markup {
    let alt = if photo.has_caption() {
        photo.caption.clone()
    } else {
        format!("Photo {}", plane.index + 1)
    };
    html! {
        div.photo.active[plane.is_active()]
            data-index=(plane.index)
            data-id=(plane.photo_id)
            data-x=(plane.position.x) data-y=(plane.position.y) data-z=(plane.position.z)
            data-rx=(plane.rotation.x) data-ry=(plane.rotation.y) data-rz=(plane.rotation.z)
            data-w=(plane.size.x) data-h=(plane.size.y) {
            img src=(photo.image) alt=(alt) draggable="false";
            @if let Some(caption) = &plane.caption {
                div.caption
                    data-offset-y=(caption.offset.y)
                    data-w=(caption.scale.x) data-h=(caption.scale.y) {
                    @for line in &caption.lines {
                        span { (line) }
                    }
                }
            }
        }
    }
}

/// Camera and gesture constants handed to the page script.
fn scene_attributes(total: usize, active: Option<usize>) -> Markup {
    html! {
        div id="scene"
            data-total=(total)
            data-active=[active]
            data-px-per-unit=(PIXELS_PER_UNIT)
            data-orbit-gain=(ORBIT_GAIN)
            data-pan-speed=(PAN_SPEED)
            data-wheel-gain=(WHEEL_ZOOM_GAIN)
            data-pinch-gain=(PINCH_ZOOM_GAIN)
            data-phi-min=(PHI_MIN)
            data-phi-max=(PHI_MAX)
            data-radius=(DEFAULT_RADIUS)
            data-fov=(DEFAULT_FOV_Y_DEGREES)
            data-swipe-distance=(SWIPE_MIN_DISTANCE)
            data-swipe-ms=(SWIPE_MAX_DURATION.as_millis() as u64)
            data-caption-line=(LINE_HEIGHT) {
            div id="world" {}
        }
    }
}

/// The gallery page.
///
/// `scene` holds the planes that could be decoded; `photos` is the full list
/// so the counter reflects every stored photo.
pub fn render_gallery_page(
    photos: &[PhotoRecord],
    scene: &Scene,
    active: Option<usize>,
    admin_token: &str,
) -> Markup {
    let css = stylesheet();
    let content = html! {
        @if photos.is_empty() {
            main.empty {
                h2 { "No photos yet" }
                a.button href=(admin_url(admin_token)) { "Add photos" }
            }
        } @else {
            div.sky {}
            (scene_attributes(photos.len(), active))
            template id="planes" {
                @for (i, photo) in photos.iter().enumerate() {
                    @if let Some(plane) = scene.plane(i) {
                        (render_plane(plane, photo))
                    }
                }
            }
            @if let Some(i) = active {
                div id="counter" data-total=(photos.len()) { (i + 1) " / " (photos.len()) }
            }
            div.controls {
                button id="prev" type="button" { "← Previous" }
                button id="next" type="button" { "Next →" }
            }
            aside.help {
                p { "Drag to move around" }
                p { "Ctrl/⌘ + drag to rotate" }
                p { "Scroll or pinch to zoom" }
                p { "Click a photo, swipe or use ← → to browse" }
            }
            script { (PreEscaped(JS)) }
        }
    };
    base_document("Gallery", &css, Some("gallery"), content)
}

// ============================================================================
// Admin
// ============================================================================

fn render_status(status: &Status) -> Markup {
    html! {
        p.status.error[status.is_error()] role="status" { (status.text()) }
    }
}

fn render_form(token: &str, form: &AdminForm) -> Markup {
    let action = save_url(token);
    html! {
        section.panel {
            h3 { @if form.is_editing() { "Edit photo" } @else { "Add a new photo" } }
            form method="post" action=(action) enctype="multipart/form-data" {
                label for="photo" { "Image" }
                input id="photo" type="file" name="photo" accept="image/*";
                @if let Some(image) = &form.image {
                    img.preview src=(image) alt="Preview";
                }
                label for="caption" { "Caption" }
                textarea id="caption" name="caption" rows="3" placeholder="Write a caption..." {
                    (form.caption)
                }
                @if let Some(id) = &form.editing_id {
                    input type="hidden" name="editing_id" value=(id);
                }
                div.actions {
                    button type="submit" {
                        @if form.is_editing() { "Update photo" } @else { "Save photo" }
                    }
                    @if form.is_editing() {
                        a.button.secondary href=(admin_url(token)) { "Cancel" }
                    }
                }
            }
        }
    }
}

fn render_photo_list(token: &str, photos: &[PhotoRecord]) -> Markup {
    html! {
        section.photo-list {
            h3 { "Photos (" (photos.len()) ")" }
            @if photos.is_empty() {
                p.muted { "No photos yet." }
            }
            @for photo in photos {
                article.photo-item {
                    img src=(photo.image) alt=(photo.caption);
                    p {
                        @if photo.has_caption() { (photo.caption) } @else { em { "(no caption)" } }
                    }
                    div.actions {
                        a.button href=(edit_url(token, &photo.id)) { "Edit" }
                        form method="post"
                            action=(delete_url(token, &photo.id))
                            onsubmit="return confirm('Delete this photo?')" {
                            button.danger type="submit" { "Delete" }
                        }
                    }
                }
            }
        }
    }
}

/// The admin page: status line, add/edit form, photo list.
pub fn render_admin_page(
    token: &str,
    photos: &[PhotoRecord],
    form: &AdminForm,
    status: Option<&Status>,
) -> Markup {
    let css = stylesheet();
    let content = html! {
        main.admin {
            header {
                h2 { "Manage gallery" }
                a.button.secondary href="/" { "Back to gallery" }
            }
            @if let Some(status) = status {
                (render_status(status))
            }
            (render_form(token, form))
            (render_photo_list(token, photos))
        }
    };
    base_document("Gallery admin", &css, Some("admin-view"), content)
}

// ============================================================================
// Tests
// ============================================================================
