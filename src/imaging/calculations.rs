//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions of a compressed upload.
///
/// Only the width is constrained: images wider than `max_width` are scaled
/// down to exactly `max_width` with the height following the aspect ratio.
/// Narrower images keep their size; uploads are never upscaled.
///
/// # Examples
/// ```
/// # use orbit_gallery::imaging::calculate_compressed_dimensions;
/// // 4000x3000 landscape at max width 1920 → 1920x1440
/// assert_eq!(calculate_compressed_dimensions((4000, 3000), 1920), (1920, 1440));
///
/// // Tall portraits are only limited by their width
/// assert_eq!(calculate_compressed_dimensions((1000, 4000), 1920), (1000, 4000));
/// ```
pub fn calculate_compressed_dimensions(source: (u32, u32), max_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w <= max_width || src_w == 0 {
        return (src_w, src_h);
    }
    let h = (src_h as f64 * max_width as f64 / src_w as f64).round() as u32;
    (max_width, h.max(1))
}

/// Width divided by height, or `None` for degenerate images.
pub fn aspect_ratio(dimensions: (u32, u32)) -> Option<f32> {
    let (w, h) = dimensions;
    if w == 0 || h == 0 {
        return None;
    }
    Some(w as f32 / h as f32)
}
