//! Board configuration.

use crate::shapes::SerializableColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for a board client. Every field has a default, so a partial (or
/// empty) JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Fixed CRDT peer id. A random one is used when unset.
    pub peer_id: Option<u64>,
    /// Fill color for new rectangles.
    pub rect_color: SerializableColor,
    /// Stroke color for new lines.
    pub line_color: SerializableColor,
    /// Stroke width for new lines.
    pub line_stroke_width: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            peer_id: None,
            rect_color: SerializableColor::new(66, 133, 244, 255),
            line_color: SerializableColor::black(),
            line_stroke_width: 2.0,
        }
    }
}

impl BoardConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded board config from {:?}", path);
        Ok(config)
    }
}
