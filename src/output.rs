//! CLI output formatting for the photo commands.
//!
//! # Information-First Display
//!
//! A photo's primary display is its positional index and caption. The id and
//! placement are secondary context shown on indented lines, so a listing
//! reads as a gallery inventory while still giving the ids the `edit` and
//! `delete` commands need.
//!
//! ```text
//! Photos (2)
//! 001 Sunset over the bay
//!     Id: 1712345678901
//!     Position: (3.20, -1.05, 0.40)
//!     Rotation: (0.12, -0.20, 0.00)
//! 002 (no caption)
//!     Id: 1712345699999
//!     Position: (-4.00, 2.50, -3.10)
//!     Rotation: (-0.05, 0.18, 0.00)
//! ```
//!
//! # Architecture
//!
//! Each listing has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::types::PhotoRecord;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Longest caption shown on a header line.
const CAPTION_PREVIEW_CHARS: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Collapse whitespace and cut at `max` characters, appending `...` if cut.
fn caption_preview(caption: &str, max: usize) -> String {
    let flat = caption.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Header line: captioned photos show the caption, uncaptioned show a marker.
///
/// ```text
/// 001 Sunset over the bay
/// 002 (no caption)
/// ```
fn photo_header(index: usize, photo: &PhotoRecord) -> String {
    if photo.has_caption() {
        format!(
            "{} {}",
            format_index(index),
            caption_preview(&photo.caption, CAPTION_PREVIEW_CHARS)
        )
    } else {
        format!("{} (no caption)", format_index(index))
    }
}

fn triple(v: [f64; 3]) -> String {
    format!("({:.2}, {:.2}, {:.2})", v[0], v[1], v[2])
}

// ============================================================================
// Photo listing
// ============================================================================

/// Format the photo collection as an indexed inventory.
pub fn format_photo_list(photos: &[PhotoRecord]) -> Vec<String> {
    if photos.is_empty() {
        return vec!["No photos yet".to_string()];
    }

    let mut lines = vec![format!("Photos ({})", photos.len())];
    for (i, photo) in photos.iter().enumerate() {
        lines.push(photo_header(i + 1, photo));
        lines.push(format!("{}Id: {}", indent(1), photo.id));
        lines.push(format!("{}Position: {}", indent(1), triple(photo.position)));
        lines.push(format!("{}Rotation: {}", indent(1), triple(photo.rotation)));
    }
    lines
}

pub fn print_photo_list(photos: &[PhotoRecord]) {
    for line in format_photo_list(photos) {
        println!("{}", line);
    }
}

// ============================================================================
// Command results
// ============================================================================

/// Confirmation for `add` and `edit`.
pub fn format_saved(id: &str, photos: &[PhotoRecord]) -> Vec<String> {
    match photos.iter().position(|p| p.id == id) {
        Some(pos) => vec![
            format!("Saved {}", photo_header(pos + 1, &photos[pos])),
            format!("{}Id: {}", indent(1), id),
        ],
        None => vec![format!("Saved {id}")],
    }
}

/// Confirmation for `delete`.
pub fn format_deleted(id: &str, remaining: usize) -> Vec<String> {
    vec![format!("Deleted {id} ({remaining} photos remaining)")]
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::record;

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn index_is_zero_padded() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(caption_preview("a\n  b\tc", 60), "a b c");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(caption_preview("ééééé", 3), "ééé...");
    }

    // =========================================================================
    // Photo listing
    // =========================================================================

    #[test]
    fn empty_collection() {
        assert_eq!(format_photo_list(&[]), vec!["No photos yet"]);
    }

    #[test]
    fn lists_caption_then_context() {
        let lines = format_photo_list(&[record("7", "Sunset"), record("8", "  ")]);
        assert_eq!(
            lines,
            vec![
                "Photos (2)",
                "001 Sunset",
                "    Id: 7",
                "    Position: (5.00, 5.00, -2.00)",
                "    Rotation: (0.00, 0.00, 0.00)",
                "002 (no caption)",
                "    Id: 8",
                "    Position: (5.00, 5.00, -2.00)",
                "    Rotation: (0.00, 0.00, 0.00)",
            ]
        );
    }

    // =========================================================================
    // Command results
    // =========================================================================

    #[test]
    fn saved_shows_position_in_collection() {
        let photos = vec![record("1", "a"), record("2", "b")];
        assert_eq!(format_saved("2", &photos), vec!["Saved 002 b", "    Id: 2"]);
    }

    #[test]
    fn saved_unknown_id_falls_back() {
        assert_eq!(format_saved("9", &[]), vec!["Saved 9"]);
    }

    #[test]
    fn deleted_reports_remaining() {
        assert_eq!(format_deleted("3", 4), vec!["Deleted 3 (4 photos remaining)"]);
    }
}
