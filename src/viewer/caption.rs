//! Caption word wrap and caption-texture layout.
//!
//! Captions are rasterized onto a fixed 512×128 texture shown as a billboard
//! under the photo. Text is measured through [`TextMeasure`] so a host with
//! real font metrics can plug them in; [`FixedAdvance`] is the built-in
//! approximation used when no font is available.

pub const TEXTURE_WIDTH: u32 = 512;
pub const TEXTURE_HEIGHT: u32 = 128;
pub const TEXTURE_PADDING: f32 = 20.0;
pub const LINE_HEIGHT: f32 = 32.0;
pub const FONT: &str = r#"italic 28px "Georgia", "Palatino", serif"#;

/// Default wrap width: texture width minus padding on both sides.
pub const MAX_LINE_WIDTH: f32 = TEXTURE_WIDTH as f32 - 2.0 * TEXTURE_PADDING;

pub trait TextMeasure {
    /// Rendered width of `text` in texture pixels.
    fn measure(&self, text: &str) -> f32;
}

/// Every character advances by the same width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl Default for FixedAdvance {
    /// Roughly the mean advance of 28px italic Georgia.
    fn default() -> Self {
        Self { advance: 13.0 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Greedy word wrap.
///
/// Words are appended to the current line while the line (measured with its
/// trailing space) fits in `max_width`. A word that would overflow starts a
/// new line, unless the current line is empty: a single over-long word gets
/// a line of its own rather than being split.
pub fn wrap_words(text: &str, max_width: f32, measure: &impl TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{line}{word} ");
        if measure.measure(&candidate) > max_width && !line.is_empty() {
            lines.push(line.trim_end().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// Vertical centre of each line on the caption texture, top to bottom.
///
/// The block of lines is centred vertically on the texture.
pub fn line_centers(line_count: usize) -> Vec<f32> {
    let block = line_count as f32 * LINE_HEIGHT;
    let start = (TEXTURE_HEIGHT as f32 - block) / 2.0 + LINE_HEIGHT / 2.0;
    (0..line_count)
        .map(|i| start + i as f32 * LINE_HEIGHT)
        .collect()
}
