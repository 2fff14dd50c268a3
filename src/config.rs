//! Server configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 3000                   # PORT env var overrides this
//! data_file = "data/photos.json"
//! admin_token = "aryy"          # /admin?admin=<token>
//! max_body_bytes = 52428800     # 50 MiB, uploads are inline base64
//!
//! [compression]
//! max_width = 1920              # Uploads wider than this are scaled down
//! quality = 85                  # JPEG quality (1-100)
//!
//! [placement]
//! position_spread = [10.0, 6.0, 8.0]  # Random position range per axis, centred on 0
//! rotation_spread = [0.3, 0.5]        # Random X/Y rotation range (radians)
//!
//! [viewer]
//! photo_height = 2.0            # World-space height of every photo plane
//! caption_max_width = 472       # Caption wrap width in texture pixels
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CompressionConfig, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP listener, storage location and admin access.
    pub server: ServerConfig,
    /// Upload compression settings.
    pub compression: CompressionSettings,
    /// Random placement ranges for new photos.
    pub placement: PlacementConfig,
    /// Scene layout settings for the gallery viewer.
    pub viewer: ViewerConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if self.server.admin_token.is_empty() {
            return Err(ConfigError::Validation(
                "server.admin_token must not be empty".into(),
            ));
        }
        if self.server.data_file.is_empty() {
            return Err(ConfigError::Validation(
                "server.data_file must not be empty".into(),
            ));
        }
        if !(1..=100).contains(&self.compression.quality) {
            return Err(ConfigError::Validation(
                "compression.quality must be 1-100".into(),
            ));
        }
        if self.compression.max_width == 0 {
            return Err(ConfigError::Validation(
                "compression.max_width must be non-zero".into(),
            ));
        }
        if self.viewer.photo_height <= 0.0 {
            return Err(ConfigError::Validation(
                "viewer.photo_height must be positive".into(),
            ));
        }
        if self.viewer.caption_max_width <= 0.0 {
            return Err(ConfigError::Validation(
                "viewer.caption_max_width must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Apply the `PORT` environment variable on top of the file config.
    pub fn apply_env(&mut self) {
        self.apply_port(std::env::var("PORT").ok().as_deref());
    }

    /// Override the port from a `PORT` value. Non-numeric values are ignored.
    fn apply_port(&mut self, value: Option<&str>) {
        match value.map(|v| v.trim().parse::<u16>()) {
            Some(Ok(port)) => self.server.port = port,
            Some(Err(e)) => log::warn!("ignoring PORT={:?}: {e}", value.unwrap_or_default()),
            None => {}
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Path of the JSON document holding every photo.
    pub data_file: String,
    /// Shared secret expected in `/admin?admin=<token>`.
    pub admin_token: String,
    /// Request bodies above this size are rejected with 413.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            data_file: "data/photos.json".to_string(),
            admin_token: "aryy".to_string(),
            max_body_bytes: 50 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Upload compression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionSettings {
    pub max_width: u32,
    pub quality: u32,
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            max_width: 1920,
            quality: 85,
        }
    }
}

impl CompressionSettings {
    pub fn to_compression_config(&self) -> CompressionConfig {
        CompressionConfig {
            max_width: self.max_width,
            quality: Quality::new(self.quality),
        }
    }
}

/// Random placement ranges for new photos.
///
/// Each value is the full width of a range centred on zero: a spread of 10
/// places photos uniformly in `[-5, 5)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlacementConfig {
    pub position_spread: [f64; 3],
    /// X and Y rotation spread; Z rotation is always 0.
    pub rotation_spread: [f64; 2],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            position_spread: [10.0, 6.0, 8.0],
            rotation_spread: [0.3, 0.5],
        }
    }
}

/// Gallery scene layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub photo_height: f32,
    pub caption_max_width: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            photo_height: 2.0,
            caption_max_width: 472.0,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file yields the stock defaults; an existing file is merged on
/// top of them, with unknown keys rejected and values validated.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Orbit Gallery Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
# Address to listen on.
bind = "0.0.0.0"

# Port to listen on. The PORT environment variable overrides this.
port = 3000

# JSON document holding every photo. Created empty on first start.
data_file = "data/photos.json"

# Shared secret for the admin page: /admin?admin=<token>
admin_token = "aryy"

# Largest accepted request body in bytes. Images travel inline as base64.
max_body_bytes = 52428800

# ---------------------------------------------------------------------------
# Upload compression
# ---------------------------------------------------------------------------
[compression]
# Uploads wider than this are scaled down, keeping their aspect ratio.
max_width = 1920

# JPEG quality (1 = worst, 100 = best).
quality = 85

# ---------------------------------------------------------------------------
# Placement of new photos
# ---------------------------------------------------------------------------
[placement]
# Width of the random range per axis, centred on 0.
position_spread = [10.0, 6.0, 8.0]

# Random tilt range around X and Y (radians). Z rotation is always 0.
rotation_spread = [0.3, 0.5]

# ---------------------------------------------------------------------------
# Gallery scene
# ---------------------------------------------------------------------------
[viewer]
# World-space height of every photo plane; width follows the aspect ratio.
photo_height = 2.0

# Caption wrap width in caption-texture pixels.
caption_max_width = 472.0
"##
}
