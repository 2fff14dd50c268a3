//! Image processing, pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Compress upload** | Lanczos3 resize + JPEG encoder |
//! | **Data URIs** | `base64` standard engine |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
pub mod calculations;
mod data_uri;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{aspect_ratio, calculate_compressed_dimensions};
pub use data_uri::{DataUri, decode_data_uri, encode_data_uri};
pub use operations::{CompressionConfig, compress_image, data_uri_dimensions, plan_compression};
pub use params::{CompressParams, Quality};
pub use rust_backend::RustBackend;
