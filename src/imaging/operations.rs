//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! configuration, compute parameters, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::calculate_compressed_dimensions;
use super::data_uri::{decode_data_uri, encode_data_uri};
use super::params::{CompressParams, Quality};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for upload compression.
#[derive(Debug, Clone, Copy)]
pub struct CompressionConfig {
    pub max_width: u32,
    pub quality: Quality,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: Quality::default(),
        }
    }
}

/// Plan a compression without executing it.
pub fn plan_compression(source: (u32, u32), config: &CompressionConfig) -> CompressParams {
    let (width, height) = calculate_compressed_dimensions(source, config.max_width);
    CompressParams {
        width,
        height,
        quality: config.quality,
    }
}

/// Compress an uploaded image and return it as a JPEG data URI.
///
/// The image is scaled down to `max_width` when wider, then always
/// re-encoded as JPEG, whatever format it arrived in.
pub fn compress_image(
    backend: &impl ImageBackend,
    bytes: &[u8],
    config: &CompressionConfig,
) -> Result<String> {
    let source = backend.identify(bytes)?;
    let params = plan_compression(source.as_tuple(), config);
    let jpeg = backend.compress(bytes, &params)?;
    log::debug!(
        "compressed {}x{} ({} bytes) → {}x{} ({} bytes)",
        source.width,
        source.height,
        bytes.len(),
        params.width,
        params.height,
        jpeg.len()
    );
    Ok(encode_data_uri("image/jpeg", &jpeg))
}

/// Read the pixel dimensions of an image stored as a data URI.
pub fn data_uri_dimensions(backend: &impl ImageBackend, uri: &str) -> Result<(u32, u32)> {
    let decoded = decode_data_uri(uri)?;
    Ok(backend.identify(&decoded.bytes)?.as_tuple())
}
