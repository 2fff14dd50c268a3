//! Owned viewer state passed to every input handler.

use super::camera::OrbitCamera;
use super::gesture::PressSample;
use super::navigation::Navigation;
use super::scene::Scene;
use glam::Vec2;

/// Host viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel position (origin top-left, +Y down) to normalized device coordinates.
    pub fn to_ndc(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x / self.width * 2.0 - 1.0,
            -(pos.y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Everything the input handlers read and mutate.
#[derive(Debug, Default)]
pub struct ViewerState {
    pub camera: OrbitCamera,
    pub scene: Scene,
    pub navigation: Navigation,
    pub viewport: Viewport,
    /// A pointer or single-finger drag is in progress.
    pub dragging: bool,
    /// Modifier sampled at drag start: orbit instead of pan.
    pub orbit_mode: bool,
    pub last_pointer: Option<Vec2>,
    pub swipe_start: Option<PressSample>,
    pub pinch_distance: Option<f32>,
}

impl ViewerState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Forget any in-flight drag, swipe or pinch.
    pub fn reset_gesture(&mut self) {
        self.dragging = false;
        self.orbit_mode = false;
        self.last_pointer = None;
        self.swipe_start = None;
        self.pinch_distance = None;
    }
}
