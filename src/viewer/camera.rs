//! Spherical orbit camera.
//!
//! The camera orbits a movable `target`. Its position is derived from a
//! spherical triple (radius, theta, phi):
//!
//! ```text
//! position = target + radius * (sin φ sin θ, cos φ, sin φ cos θ)
//! ```
//!
//! Only [`OrbitCamera::orbit`] recomputes the position from the spherical
//! triple. Pan moves camera and target together without touching the triple,
//! and the dolly operations move the camera along its view direction and then
//! resynchronize `radius` to the real distance from the target. The view
//! direction itself only changes when the camera looks at the target again.

use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

/// Radians of orbit per pixel of pointer movement.
pub const ORBIT_GAIN: f32 = 0.005;
/// World units of pan per pixel of pointer movement.
pub const PAN_SPEED: f32 = 0.02;
/// World units of dolly per unit of wheel `deltaY`.
pub const WHEEL_ZOOM_GAIN: f32 = 0.5 * 0.01;
/// World units of dolly per pixel of pinch distance change.
pub const PINCH_ZOOM_GAIN: f32 = 0.5 * 0.001;
/// Polar angle bounds. Keeps the camera from flipping over the poles.
pub const PHI_MIN: f32 = 0.1;
pub const PHI_MAX: f32 = PI - 0.1;

pub const DEFAULT_RADIUS: f32 = 8.0;
pub const DEFAULT_FOV_Y_DEGREES: f32 = 75.0;

/// Spherical coordinates around the camera target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    /// Horizontal angle around the Y axis.
    pub theta: f32,
    /// Polar angle from +Y. π/2 is eye level.
    pub phi: f32,
}

impl Spherical {
    pub fn to_offset(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }
}

impl Default for Spherical {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            theta: 0.0,
            phi: FRAC_PI_2,
        }
    }
}

/// A ray in world space. `direction` is normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub spherical: Spherical,
    pub target: Vec3,
    pub position: Vec3,
    /// Unit view direction, updated whenever the camera looks at the target.
    view_dir: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let mut camera = Self {
            spherical: Spherical::default(),
            target: Vec3::ZERO,
            position: Vec3::ZERO,
            view_dir: Vec3::NEG_Z,
            fov_y: DEFAULT_FOV_Y_DEGREES.to_radians(),
        };
        camera.update_position();
        camera
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the position from the spherical triple and look at the target.
    pub fn update_position(&mut self) {
        self.position = self.target + self.spherical.to_offset();
        self.look_at_target();
    }

    fn look_at_target(&mut self) {
        let dir = self.target - self.position;
        if dir.length_squared() > f32::EPSILON {
            self.view_dir = dir.normalize();
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.view_dir
    }

    /// Camera right vector: `forward × world up`.
    pub fn right(&self) -> Vec3 {
        self.view_dir.cross(Vec3::Y).normalize_or_zero()
    }

    /// Rotate around the target by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.spherical.theta -= dx * ORBIT_GAIN;
        self.spherical.phi = (self.spherical.phi - dy * ORBIT_GAIN).clamp(PHI_MIN, PHI_MAX);
        self.update_position();
    }

    /// Move camera and target together by a pointer delta in pixels.
    ///
    /// Dragging right moves the world right under the pointer, so the camera
    /// moves left; dragging down moves the camera up.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let offset = self.right() * (-dx * PAN_SPEED) + Vec3::Y * (dy * PAN_SPEED);
        self.position += offset;
        self.target += offset;
    }

    /// Move along the view direction, then resync `radius` to the target distance.
    pub fn dolly(&mut self, amount: f32) {
        self.position += self.view_dir * amount;
        self.spherical.radius = self.position.distance(self.target);
    }

    /// Wheel zoom. Negative `delta_y` (scroll up) moves forward.
    pub fn wheel(&mut self, delta_y: f32) {
        self.dolly(-delta_y * WHEEL_ZOOM_GAIN);
    }

    /// Pinch zoom from the previous and current finger distance in pixels.
    pub fn pinch(&mut self, previous_distance: f32, current_distance: f32) {
        let delta = previous_distance - current_distance;
        self.dolly(-delta * PINCH_ZOOM_GAIN);
    }

    /// Ray from the camera through a point in normalized device coordinates.
    ///
    /// `ndc` is in `[-1, 1]²` with +Y up; `aspect` is viewport width / height.
    pub fn ray_from_ndc(&self, ndc: Vec2, aspect: f32) -> Ray {
        let forward = self.view_dir;
        let right = self.right();
        let up = right.cross(forward);
        let tan_half = (self.fov_y * 0.5).tan();
        let direction =
            (forward + right * (ndc.x * tan_half * aspect) + up * (ndc.y * tan_half)).normalize();
        Ray {
            origin: self.position,
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        a.abs_diff_eq(b, 1e-4)
    }

    #[test]
    fn default_camera_sits_on_positive_z() {
        let camera = OrbitCamera::new();
        assert!(approx(camera.position, Vec3::new(0.0, 0.0, 8.0)));
        assert!(approx(camera.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn spherical_offset_matches_formula() {
        let s = Spherical {
            radius: 2.0,
            theta: FRAC_PI_2,
            phi: FRAC_PI_2,
        };
        assert!(approx(s.to_offset(), Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn orbit_applies_angular_gain() {
        let mut camera = OrbitCamera::new();
        camera.orbit(100.0, 0.0);
        assert!((camera.spherical.theta - (-0.5)).abs() < 1e-6);
        assert!((camera.spherical.phi - FRAC_PI_2).abs() < 1e-6);
        assert!((camera.position.distance(camera.target) - DEFAULT_RADIUS).abs() < 1e-4);
    }

    #[test]
    fn orbit_clamps_phi_under_repeated_large_drags() {
        let mut camera = OrbitCamera::new();
        for _ in 0..50 {
            camera.orbit(0.0, 10_000.0);
            assert!(camera.spherical.phi >= PHI_MIN && camera.spherical.phi <= PHI_MAX);
        }
        assert_eq!(camera.spherical.phi, PHI_MIN);
        for _ in 0..50 {
            camera.orbit(3.0, -10_000.0);
            assert!(camera.spherical.phi >= PHI_MIN && camera.spherical.phi <= PHI_MAX);
        }
        assert_eq!(camera.spherical.phi, PHI_MAX);
    }

    #[test]
    fn orbit_keeps_looking_at_target() {
        let mut camera = OrbitCamera::new();
        camera.orbit(40.0, 25.0);
        let expected = (camera.target - camera.position).normalize();
        assert!(approx(camera.forward(), expected));
    }

    #[test]
    fn pan_moves_camera_and_target_together() {
        let mut camera = OrbitCamera::new();
        let before = camera.position - camera.target;
        camera.pan(10.0, 5.0);

        // Looking down -Z: right is +X. dx=10 → -0.2 on X; dy=5 → +0.1 on Y.
        assert!(approx(camera.target, Vec3::new(-0.2, 0.1, 0.0)));
        assert!(approx(camera.position - camera.target, before));
        assert_eq!(camera.spherical.radius, DEFAULT_RADIUS);
    }

    #[test]
    fn pan_does_not_touch_spherical_angles() {
        let mut camera = OrbitCamera::new();
        camera.orbit(20.0, 10.0);
        let spherical = camera.spherical;
        camera.pan(-30.0, 12.0);
        assert_eq!(camera.spherical, spherical);
    }

    #[test]
    fn wheel_scroll_up_moves_forward_and_resyncs_radius() {
        let mut camera = OrbitCamera::new();
        camera.wheel(-100.0);
        // -(-100) * 0.005 = 0.5 forward along -Z
        assert!(approx(camera.position, Vec3::new(0.0, 0.0, 7.5)));
        assert!((camera.spherical.radius - 7.5).abs() < 1e-5);
    }

    #[test]
    fn wheel_past_target_keeps_view_direction() {
        let mut camera = OrbitCamera::new();
        camera.wheel(-2000.0); // 10 units forward, 2 past the target
        assert!(approx(camera.position, Vec3::new(0.0, 0.0, -2.0)));
        assert!((camera.spherical.radius - 2.0).abs() < 1e-4);
        assert!(approx(camera.forward(), Vec3::NEG_Z));
    }

    #[test]
    fn pinch_moves_along_view_direction() {
        let mut camera = OrbitCamera::new();
        // Fingers spread from 100 to 300: delta = -200 → dolly +0.1
        camera.pinch(100.0, 300.0);
        assert!((camera.spherical.radius - 7.9).abs() < 1e-5);
    }

    #[test]
    fn center_ray_points_forward() {
        let camera = OrbitCamera::new();
        let ray = camera.ray_from_ndc(Vec2::ZERO, 16.0 / 9.0);
        assert!(approx(ray.origin, camera.position));
        assert!(approx(ray.direction, Vec3::NEG_Z));
    }

    #[test]
    fn corner_ray_spreads_by_field_of_view() {
        let camera = OrbitCamera::new();
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0), 1.0);
        let angle = ray.direction.angle_between(Vec3::NEG_Z);
        assert!((angle - camera.fov_y / 2.0).abs() < 1e-4);
        assert!(ray.direction.y > 0.0);
    }
}
