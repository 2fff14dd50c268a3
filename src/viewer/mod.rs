//! Gallery viewer core.
//!
//! A platform-independent model of the 3D carousel: the orbit camera, photo
//! planes with their captions, navigation between photos, and the input
//! dispatch that ties them together. A host (the served gallery page, or a
//! native front end) feeds [`InputEvent`]s into [`Viewer::handle`] and reacts
//! to the returned [`ViewerEvent`]s.
//!
//! ```text
//! records ──▶ SceneLoader (rayon) ──channel──▶ Viewer::poll_loaded ──▶ Scene
//!                                                                       │
//! InputEvent ──▶ InputDispatcher ──▶ handlers(&mut ViewerState) ──▶ ViewerEvent
//! ```

pub mod camera;
pub mod caption;
pub mod gesture;
pub mod input;
pub mod loader;
pub mod navigation;
pub mod scene;
pub mod state;

pub use camera::{OrbitCamera, Ray, Spherical};
pub use caption::{FixedAdvance, TextMeasure, wrap_words};
pub use input::{
    Cursor, GestureKind, InputDispatcher, InputEvent, Key, Modifiers, ViewerEvent, classify,
};
pub use loader::{LoadedPlane, SceneLoader, build_plane};
pub use navigation::{NavDirection, Navigation};
pub use scene::{CaptionBillboard, PhotoPlane, Scene, SceneLayout};
pub use state::{ViewerState, Viewport};

use crate::imaging::ImageBackend;
use crate::types::PhotoRecord;

pub struct Viewer<B> {
    state: ViewerState,
    dispatcher: InputDispatcher,
    loader: SceneLoader<B>,
}

impl<B: ImageBackend + Send + 'static> Viewer<B> {
    pub fn new(backend: B, layout: SceneLayout, viewport: Viewport) -> Self {
        Self {
            state: ViewerState::new(viewport),
            dispatcher: InputDispatcher::new(),
            loader: SceneLoader::new(backend, layout),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn dispatcher_mut(&mut self) -> &mut InputDispatcher {
        &mut self.dispatcher
    }

    /// Start decoding `records` and reset navigation to the new list.
    ///
    /// A non-empty list makes the first photo active.
    pub fn load_photos(&mut self, records: &[PhotoRecord]) -> Vec<ViewerEvent> {
        if self.state.scene.is_disposed() {
            log::debug!("ignoring {} photos for a disposed viewer", records.len());
            return Vec::new();
        }
        self.state.navigation = Navigation::new(records.len());
        self.loader.spawn_all(records);
        if records.is_empty() {
            return Vec::new();
        }
        let active = self.state.navigation.select(0);
        self.state.scene.set_active(active);
        vec![ViewerEvent::ActiveChanged(active)]
    }

    /// Insert decoded planes that are ready. Returns how many were inserted.
    pub fn poll_loaded(&mut self) -> usize {
        let loaded = self.loader.drain();
        self.insert_loaded(loaded)
    }

    /// Block until every queued decode has finished, then insert them.
    pub fn wait_loaded(&mut self) -> usize {
        let pending = self.loader.pending();
        let loaded = self.loader.wait_for(pending);
        self.insert_loaded(loaded)
    }

    fn insert_loaded(&mut self, loaded: Vec<LoadedPlane>) -> usize {
        let mut inserted = 0;
        for item in loaded {
            match item.result {
                Ok(plane) => {
                    if self.state.scene.insert(plane) {
                        inserted += 1;
                    } else {
                        log::debug!("dropping late plane for photo {}", item.photo_id);
                    }
                }
                Err(e) => log::warn!("skipping photo {}: {}", item.photo_id, e),
            }
        }
        inserted
    }

    /// Run one input event through the dispatch table.
    ///
    /// Navigation and selection are applied to the navigation state before
    /// returning, and followed by an `ActiveChanged` event when the active
    /// photo moved.
    pub fn handle(&mut self, input: &InputEvent) -> Vec<ViewerEvent> {
        if self.state.scene.is_disposed() {
            return Vec::new();
        }
        let events = self.dispatcher.dispatch(&mut self.state, input);
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            out.push(event);
            let before = self.state.navigation.active();
            let after = match event {
                ViewerEvent::Navigate(direction) => self.state.navigation.step(direction),
                ViewerEvent::PhotoSelected(index) => self.state.navigation.select(index),
                _ => continue,
            };
            if after != before {
                self.state.scene.set_active(after);
                out.push(ViewerEvent::ActiveChanged(after));
            }
        }
        out
    }

    /// "current / total" for the on-screen counter.
    pub fn counter_label(&self) -> Option<String> {
        self.state.navigation.counter_label()
    }

    /// Release every plane. Later loads and input are ignored.
    pub fn dispose(&mut self) -> Vec<ViewerEvent> {
        self.state.scene.dispose();
        self.state.reset_gesture();
        vec![ViewerEvent::CursorChanged(Cursor::Default)]
    }
}
