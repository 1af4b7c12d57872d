//! Configuration for Trip Atlas overlays.
//!
//! Every field has a default, so a host can load a partial JSON document:
//!
//! ```
//! use trip_atlas_core::Config;
//!
//! let config = Config::from_json_str(r#"{ "overlay": { "tile": { "padding": 0.5 } } }"#).unwrap();
//! assert_eq!(config.overlay.tile.padding, 0.5);
//! assert_eq!(config.overlay.tile.marker_radius, 3.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::ColorScale;

#[derive(Debug)]
pub enum ConfigError {
    /// The document is not valid JSON for [`Config`]
    Parse(serde_json::Error),
    /// A numeric parameter is out of its allowed range
    InvalidValue { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Invalid configuration: {}", e),
            Self::InvalidValue { field, value } => {
                write!(f, "Invalid value {} for `{}`", value, field)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn check(field: &'static str, value: f64, valid: bool) -> Result<(), ConfigError> {
    if value.is_finite() && valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { field, value })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profiling: ProfilingMode,
    pub overlay: OverlayConfig,
}

impl Config {
    /// Parse and validate a (possibly partial) JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.overlay.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfilingMode {
    /// Profiling is disabled
    #[default]
    Off,
    /// Scopes are recorded but not served
    On,
    /// Scopes are recorded and served to `puffin_viewer`
    WithWebserver,
}

/// Visual parameters shared by the station renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub color_scale: ColorScale,
    pub tile: TileStyle,
    pub border: BorderStyle,
}

impl OverlayConfig {
    /// Every parameter must be finite. The saturation time and marker radius
    /// must be positive, the padding non-negative and the border thickness
    /// within `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let saturation_time = self.color_scale.saturation_time;
        check("color_scale.saturation_time", saturation_time, saturation_time > 0.0)?;
        check("tile.padding", self.tile.padding, self.tile.padding >= 0.0)?;
        check("tile.marker_radius", self.tile.marker_radius, self.tile.marker_radius > 0.0)?;
        check("border.min_zoom", self.border.min_zoom, true)?;
        let thickness = self.border.thickness as f64;
        check("border.thickness", thickness, (0.0..=1.0).contains(&thickness))
    }

    pub fn with_saturation_time(mut self, seconds: f64) -> Result<Self, ConfigError> {
        self.color_scale.saturation_time = seconds;
        self.validate()?;
        Ok(self)
    }

    pub fn with_tile_padding(mut self, padding: f64) -> Result<Self, ConfigError> {
        self.tile.padding = padding;
        self.validate()?;
        Ok(self)
    }

    pub fn with_marker_radius(mut self, radius: f64) -> Result<Self, ConfigError> {
        self.tile.marker_radius = radius;
        self.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileStyle {
    /// Fraction of the tile's geographic size added on every side of the query box.
    pub padding: f64,
    /// Marker radius in pixels.
    pub marker_radius: f64,
}

impl Default for TileStyle {
    fn default() -> Self {
        Self {
            padding: 0.3,
            marker_radius: 3.0,
        }
    }
}

/// Outlined disks are drawn once the map is zoomed in far enough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderStyle {
    pub min_zoom: f64,
    /// Ring width as a fraction of the point radius.
    pub thickness: f32,
}

impl BorderStyle {
    pub fn thickness_at(&self, zoom: f64) -> f32 {
        if zoom >= self.min_zoom {
            self.thickness
        } else {
            0.0
        }
    }
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            min_zoom: 12.0,
            thickness: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.profiling, ProfilingMode::Off);
        assert_eq!(config.overlay.color_scale.saturation_time, 3000.0);
        assert_eq!(config.overlay.tile.padding, 0.3);
        assert_eq!(config.overlay.tile.marker_radius, 3.0);
    }

    #[test]
    fn test_border_only_when_zoomed_in() {
        let border = BorderStyle::default();
        assert_eq!(border.thickness_at(11.9), 0.0);
        assert!(border.thickness_at(12.0) > 0.0);
        assert!(border.thickness_at(18.0) > 0.0);
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(
            r#"{ "profiling": "with_webserver", "overlay": { "color_scale": { "saturation_time": 10000.0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.profiling, ProfilingMode::WithWebserver);
        assert_eq!(config.overlay.color_scale.saturation_time, 10000.0);
        assert_eq!(config.overlay.border, BorderStyle::default());
    }

    #[test]
    fn test_builders() {
        let overlay = OverlayConfig::default()
            .with_saturation_time(600.0)
            .and_then(|o| o.with_tile_padding(0.1))
            .and_then(|o| o.with_marker_radius(5.0))
            .unwrap();
        assert_eq!(overlay.color_scale.saturation_time, 600.0);
        assert_eq!(overlay.tile.padding, 0.1);
        assert_eq!(overlay.tile.marker_radius, 5.0);
    }

    fn rejected_field(json: &str) -> &'static str {
        match Config::from_json_str(json) {
            Err(ConfigError::InvalidValue { field, .. }) => field,
            other => panic!("expected InvalidValue for {}, got {:?}", json, other),
        }
    }

    #[test]
    fn test_rejects_non_positive_saturation_time() {
        for value in ["0.0", "-3000.0"] {
            let json = format!(r#"{{ "overlay": {{ "color_scale": {{ "saturation_time": {} }} }} }}"#, value);
            assert_eq!(rejected_field(&json), "color_scale.saturation_time");
        }
        assert!(OverlayConfig::default().with_saturation_time(f64::NAN).is_err());
        assert!(OverlayConfig::default().with_saturation_time(f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_bad_tile_style() {
        assert_eq!(
            rejected_field(r#"{ "overlay": { "tile": { "padding": -0.1 } } }"#),
            "tile.padding"
        );
        assert_eq!(
            rejected_field(r#"{ "overlay": { "tile": { "marker_radius": 0.0 } } }"#),
            "tile.marker_radius"
        );
        assert!(OverlayConfig::default().with_marker_radius(-3.0).is_err());
        assert!(OverlayConfig::default().with_tile_padding(f64::NAN).is_err());
        // No padding is allowed.
        assert!(OverlayConfig::default().with_tile_padding(0.0).is_ok());
    }

    #[test]
    fn test_rejects_bad_border() {
        assert_eq!(
            rejected_field(r#"{ "overlay": { "border": { "thickness": 1.5 } } }"#),
            "border.thickness"
        );
    }

    #[test]
    fn test_parse_error_is_distinct() {
        assert!(matches!(Config::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }
}
