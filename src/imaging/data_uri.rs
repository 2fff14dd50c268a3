//! `data:` URI encoding and decoding for stored images.
//!
//! Photo records keep their image inline as `data:<mime>;base64,<payload>`.
//! Only base64 payloads are accepted on decode.

use super::backend::BackendError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// A decoded data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Parse a base64 data URI.
pub fn decode_data_uri(uri: &str) -> Result<DataUri, BackendError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| BackendError::DataUri("missing `data:` scheme".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| BackendError::DataUri("missing `,` separator".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| BackendError::DataUri("only base64 payloads are supported".into()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| BackendError::DataUri(e.to_string()))?;
    Ok(DataUri {
        mime: mime.to_string(),
        bytes,
    })
}

/// Encode bytes as a base64 data URI with the given MIME type.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
