//! Ticket configuration
//!
//! Every option has a default, so a config file only lists what it changes:
//!
//! ```toml
//! orientation = "horizontal"
//! hole_radius = 15.0
//! corner_radius = 10.0
//! background_color = "#FFF5E1"
//! elevation = 8.0
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticket_core::{Color, CornerRadius, Orientation, TicketError};

/// Errors from loading or validating a ticket configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid ticket config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize ticket config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid color {0:?}, expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),

    #[error(transparent)]
    Ticket(#[from] TicketError),
}

/// Appearance of one ticket
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketConfig {
    pub orientation: Orientation,
    /// Notch radius; 0 disables the notches
    pub hole_radius: f32,
    /// Notch offset along the orientation's axis, until an anchor resolves it
    pub hole_position: f32,
    #[serde(with = "hex_color")]
    pub background_color: Color,
    pub show_border: bool,
    #[serde(with = "hex_color")]
    pub border_color: Color,
    pub border_width: f32,
    /// Radius for every corner without an override
    pub corner_radius: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_left_corner_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_right_corner_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_right_corner_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_left_corner_radius: Option<f32>,
    /// Shadow elevation in pixels; 0 disables the shadow
    pub elevation: f32,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            hole_radius: 0.0,
            hole_position: 0.0,
            background_color: Color::WHITE,
            show_border: false,
            border_color: Color::GRAY,
            border_width: 0.0,
            corner_radius: 0.0,
            top_left_corner_radius: None,
            top_right_corner_radius: None,
            bottom_right_corner_radius: None,
            bottom_left_corner_radius: None,
            elevation: 0.0,
        }
    }
}

impl TicketConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: TicketConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject NaN and infinite values.
    ///
    /// Negative lengths pass; they are clamped to zero when the outline is built.
    pub fn validate(&self) -> Result<(), TicketError> {
        let radii = self.corner_radii();
        let values = [
            ("hole_radius", self.hole_radius),
            ("hole_position", self.hole_position),
            ("border_width", self.border_width),
            ("top_left_corner_radius", radii.top_left),
            ("top_right_corner_radius", radii.top_right),
            ("bottom_right_corner_radius", radii.bottom_right),
            ("bottom_left_corner_radius", radii.bottom_left),
            ("elevation", self.elevation),
        ];
        for (name, value) in values {
            ensure_finite(name, value)?;
        }
        Ok(())
    }

    /// Per-corner radii with overrides applied
    pub fn corner_radii(&self) -> CornerRadius {
        let base = self.corner_radius;
        CornerRadius::new(
            self.top_left_corner_radius.unwrap_or(base),
            self.top_right_corner_radius.unwrap_or(base),
            self.bottom_right_corner_radius.unwrap_or(base),
            self.bottom_left_corner_radius.unwrap_or(base),
        )
    }

    /// Replace all four corners, dropping any overrides
    pub fn set_corner_radii(&mut self, radii: CornerRadius) {
        if radii.is_uniform() {
            self.corner_radius = radii.top_left;
            self.top_left_corner_radius = None;
            self.top_right_corner_radius = None;
            self.bottom_right_corner_radius = None;
            self.bottom_left_corner_radius = None;
        } else {
            self.top_left_corner_radius = Some(radii.top_left);
            self.top_right_corner_radius = Some(radii.top_right);
            self.bottom_right_corner_radius = Some(radii.bottom_right);
            self.bottom_left_corner_radius = Some(radii.bottom_left);
        }
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<f32, TicketError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TicketError::NonFinite { name, value })
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB`
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    let invalid = || ConfigError::InvalidColor(value.to_string());
    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let packed = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    match hex.len() {
        6 => Ok(Color::from_hex(packed)),
        8 => Ok(Color::from_argb(packed)),
        _ => Err(invalid()),
    }
}

/// Format as `#RRGGBB`, or `#AARRGGBB` when not opaque
pub fn format_color(color: Color) -> String {
    let argb = color.to_argb();
    if argb >> 24 == 0xFF {
        format!("#{:06X}", argb & 0x00FF_FFFF)
    } else {
        format!("#{argb:08X}")
    }
}

mod hex_color {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use ticket_core::Color;

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_color(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_color(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TicketConfig::default();
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.hole_radius, 0.0);
        assert_eq!(config.background_color, Color::WHITE);
        assert!(!config.show_border);
        assert_eq!(config.border_color, Color::GRAY);
        assert_eq!(config.border_width, 0.0);
        assert_eq!(config.corner_radii(), CornerRadius::ZERO);
        assert_eq!(config.elevation, 0.0);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = TicketConfig::from_toml_str("").expect("config");
        assert_eq!(config, TicketConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = TicketConfig::from_toml_str(
            r##"
            orientation = "horizontal"
            hole_radius = 15.0
            hole_position = 100.0
            background_color = "#FFF5E1"
            show_border = true
            border_color = "#80333333"
            border_width = 2.0
            corner_radius = 10.0
            bottom_left_corner_radius = 0.0
            elevation = 8.0
            "##,
        )
        .expect("config");

        assert_eq!(config.orientation, Orientation::Horizontal);
        assert_eq!(config.hole_radius, 15.0);
        assert_eq!(config.hole_position, 100.0);
        assert_eq!(config.background_color.to_argb(), 0xFFFFF5E1);
        assert!(config.show_border);
        assert_eq!(config.border_color.to_argb(), 0x80333333);
        assert_eq!(config.corner_radii(), CornerRadius::new(10.0, 10.0, 10.0, 0.0));
        assert_eq!(config.elevation, 8.0);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = TicketConfig::from_toml_str(r#"border_color = "gray""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("gray"));

        assert!(matches!(parse_color("#12345"), Err(ConfigError::InvalidColor(_))));
        assert!(matches!(parse_color("#+12345"), Err(ConfigError::InvalidColor(_))));
        assert!(matches!(parse_color("FFFFFF"), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn test_unknown_orientation_rejected() {
        assert!(TicketConfig::from_toml_str(r#"orientation = "diagonal""#).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = TicketConfig::from_toml_str("elevation = nan").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Ticket(TicketError::NonFinite { name: "elevation", .. })
        ));
    }

    #[test]
    fn test_color_formatting() {
        assert_eq!(format_color(Color::GRAY), "#888888");
        assert_eq!(format_color(Color::from_argb(0x80333333)), "#80333333");
        assert_eq!(parse_color("#888888").expect("color"), Color::GRAY);
    }

    #[test]
    fn test_toml_output_reloads() {
        let mut config = TicketConfig {
            orientation: Orientation::Horizontal,
            hole_radius: 12.0,
            elevation: 4.0,
            ..Default::default()
        };
        config.set_corner_radii(CornerRadius::new(1.0, 2.0, 3.0, 4.0));

        let text = config.to_toml_string().expect("serialize");
        assert!(text.contains("orientation = \"horizontal\""));
        assert_eq!(TicketConfig::from_toml_str(&text).expect("reload"), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TicketConfig::load("/nonexistent/ticket.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/ticket.toml"));
    }
}
