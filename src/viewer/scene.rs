//! Photo planes and the scene that holds them.
//!
//! Every photo becomes a flat plane of fixed height whose width follows the
//! image's aspect ratio, placed at the record's stored position and rotated
//! by its stored Euler angles (XYZ order). Planes are double sided, so a
//! pick ray hits them from either face.

use super::camera::Ray;
use super::caption::{self, FixedAdvance};
use crate::config::ViewerConfig;
use crate::types::PhotoRecord;
use glam::{EulerRot, Quat, Vec2, Vec3};

/// Border color of the active photo (gold).
pub const ACTIVE_BORDER: u32 = 0xffd700;
/// Border color of every other photo (light grey).
pub const INACTIVE_BORDER: u32 = 0xcccccc;

/// Gap between the bottom edge of a photo and its caption billboard.
const CAPTION_GAP: f32 = 0.5;
/// Caption billboard width as a fraction of the photo width.
const CAPTION_WIDTH_FRACTION: f32 = 0.8;

/// Sizing rules for planes and captions.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub photo_height: f32,
    pub caption_max_width: f32,
    pub measure: FixedAdvance,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            photo_height: 2.0,
            caption_max_width: caption::MAX_LINE_WIDTH,
            measure: FixedAdvance::default(),
        }
    }
}

impl From<&ViewerConfig> for SceneLayout {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            photo_height: config.photo_height,
            caption_max_width: config.caption_max_width,
            measure: FixedAdvance::default(),
        }
    }
}

impl SceneLayout {
    /// World-space plane size for an image with the given aspect ratio.
    pub fn plane_size(&self, aspect: f32) -> Vec2 {
        Vec2::new(self.photo_height * aspect, self.photo_height)
    }

    /// Build the plane for `record` once its image dimensions are known.
    pub fn plane_for(&self, record: &PhotoRecord, index: usize, aspect: f32) -> PhotoPlane {
        let size = self.plane_size(aspect);
        let caption = record
            .has_caption()
            .then(|| self.billboard(&record.caption, size));
        PhotoPlane {
            index,
            photo_id: record.id.clone(),
            size,
            position: to_vec3(record.position),
            rotation: to_vec3(record.rotation),
            caption,
            border_color: INACTIVE_BORDER,
        }
    }

    fn billboard(&self, text: &str, plane: Vec2) -> CaptionBillboard {
        let lines = caption::wrap_words(text, self.caption_max_width, &self.measure);
        let line_centers = caption::line_centers(lines.len());
        let width = plane.x * CAPTION_WIDTH_FRACTION;
        let aspect = caption::TEXTURE_HEIGHT as f32 / caption::TEXTURE_WIDTH as f32;
        CaptionBillboard {
            lines,
            line_centers,
            offset: Vec3::new(0.0, -plane.y / 2.0 - CAPTION_GAP, 0.0),
            scale: Vec2::new(width, width * aspect),
        }
    }
}

fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Caption text laid out for the caption texture.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBillboard {
    pub lines: Vec<String>,
    /// Vertical centre of each line on the texture, in texture pixels.
    pub line_centers: Vec<f32>,
    /// Offset from the photo centre, in the photo's local frame.
    pub offset: Vec3,
    /// World-space billboard size.
    pub scale: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPlane {
    /// Position of the photo in the gallery list.
    pub index: usize,
    pub photo_id: String,
    /// Width and height in world units.
    pub size: Vec2,
    pub position: Vec3,
    /// Euler angles, XYZ order.
    pub rotation: Vec3,
    pub caption: Option<CaptionBillboard>,
    pub border_color: u32,
}

impl PhotoPlane {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn is_active(&self) -> bool {
        self.border_color == ACTIVE_BORDER
    }

    /// Distance along `ray` to the plane's surface, if the ray hits it.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inverse = self.orientation().inverse();
        let origin = inverse * (ray.origin - self.position);
        let direction = inverse * ray.direction;

        if direction.z.abs() < 1e-6 {
            return None;
        }
        let t = -origin.z / direction.z;
        if t < 0.0 {
            return None;
        }
        let hit = origin + direction * t;
        let half = self.size / 2.0;
        (hit.x.abs() <= half.x && hit.y.abs() <= half.y).then_some(t)
    }
}

/// The set of photo planes currently on screen.
///
/// Planes arrive one at a time as their images finish decoding. Once the
/// scene is disposed it accepts nothing further.
#[derive(Debug, Default)]
pub struct Scene {
    planes: Vec<PhotoPlane>,
    active: Option<usize>,
    disposed: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plane, replacing any plane already at the same index.
    ///
    /// Returns `false` when the scene has been disposed.
    pub fn insert(&mut self, mut plane: PhotoPlane) -> bool {
        if self.disposed {
            return false;
        }
        plane.border_color = if self.active == Some(plane.index) {
            ACTIVE_BORDER
        } else {
            INACTIVE_BORDER
        };
        match self.planes.iter_mut().find(|p| p.index == plane.index) {
            Some(existing) => *existing = plane,
            None => self.planes.push(plane),
        }
        true
    }

    pub fn planes(&self) -> &[PhotoPlane] {
        &self.planes
    }

    pub fn plane(&self, index: usize) -> Option<&PhotoPlane> {
        self.planes.iter().find(|p| p.index == index)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Recolor borders so only `active` is highlighted.
    pub fn set_active(&mut self, active: Option<usize>) {
        self.active = active;
        for plane in &mut self.planes {
            plane.border_color = if Some(plane.index) == active {
                ACTIVE_BORDER
            } else {
                INACTIVE_BORDER
            };
        }
    }

    /// Index of the nearest plane hit by `ray`.
    pub fn pick(&self, ray: &Ray) -> Option<usize> {
        self.planes
            .iter()
            .filter_map(|p| p.intersect(ray).map(|t| (t, p.index)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, index)| index)
    }

    /// Drop every plane and refuse later inserts.
    pub fn dispose(&mut self) {
        self.planes.clear();
        self.disposed = true;
    }
}
