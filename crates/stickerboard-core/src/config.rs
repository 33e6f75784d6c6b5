//! Editor configuration.

use crate::element::TextStyle;
use crate::history::DEFAULT_HISTORY_LIMIT;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for an editing session. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Fixed canvas size.
    pub canvas: Size,
    /// Where tool actions place new elements.
    pub placement: Point,
    /// Shift applied to duplicated elements.
    pub duplicate_offset: Vec2,
    /// Maximum number of undo snapshots retained.
    pub history_limit: usize,
    /// Style for new text elements when none is given.
    pub default_text_style: TextStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: Size::new(600.0, 600.0),
            placement: Point::new(200.0, 200.0),
            duplicate_offset: Vec2::new(20.0, 20.0),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_text_style: TextStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FontFamily;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.placement, Point::new(200.0, 200.0));
        assert_eq!(config.duplicate_offset, Vec2::new(20.0, 20.0));
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.default_text_style.font_family, FontFamily::Arial);
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{ "history_limit": 10 }"#).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.canvas, Size::new(600.0, 600.0));
    }

    #[test]
    fn test_nested_fields() {
        let json = r##"{
            "duplicate_offset": { "x": 5.0, "y": -5.0 },
            "default_text_style": {
                "font_family": "Courier New",
                "font_size": 32.0,
                "color": "#ff0000"
            }
        }"##;
        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.duplicate_offset, Vec2::new(5.0, -5.0));
        assert_eq!(config.default_text_style.font_family, FontFamily::CourierNew);
        assert_eq!(config.default_text_style.font_size, 32.0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = EditorConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
