//! Construction-time parameters for the selector.
//!
//! Lengths are in density-independent units and get multiplied by the
//! selector's scale factor. Angles are in degrees, clockwise from 3 o'clock.

use crate::swatch::Swatch;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};

/// Reference to an image the rendering surface knows how to load.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
#[display("{}", _0.display())]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbConfig {
    pub radius: f64,
    pub stroke: Swatch,
    pub stroke_width: f64,
    /// Gap between the outline and the filled selection disc.
    pub fill_inset: f64,
    /// Replaces the outline and fill when set.
    pub image: Option<ImageRef>,
    pub image_size: f64,
}

impl Default for ThumbConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            stroke: Swatch::BLACK,
            stroke_width: 2.0,
            fill_inset: 4.0,
            image: None,
            image_size: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub radius: f64,
    pub fill: Swatch,
    pub label: String,
    pub label_color: Swatch,
    pub text_size: f64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            radius: 16.0,
            fill: Swatch::BLUE,
            label: "OK".to_string(),
            label_color: Swatch::WHITE,
            text_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub palette: Vec<Swatch>,
    /// Outer radius minus inner radius.
    pub ring_thickness: f64,
    /// Subtracted from half the shorter side to get the outer radius.
    pub outer_margin: f64,
    /// Added to every wedge's start angle when drawing.
    pub rotation_offset: f64,
    pub overlay: Option<ImageRef>,
    /// Extra space around the ring covered by the overlay image.
    pub overlay_padding: f64,
    /// Paint for the inner disc. `None` clears it to transparent.
    pub inner_fill: Option<Swatch>,
    pub thumb: ThumbConfig,
    pub button: Option<ButtonConfig>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

/// The two stock looks of the ring.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Five colors, wedges starting at 3 o'clock, ring filling the bounds.
    #[default]
    Classic,
    /// Seven colors, wedges starting at 12 o'clock, inset ring, dark center
    /// with a confirm button.
    Confirm,
}

impl Preset {
    pub fn config(&self) -> SelectorConfig {
        match self {
            Self::Classic => SelectorConfig {
                palette: vec![
                    Swatch::RED,
                    Swatch::GREEN,
                    Swatch::BLUE,
                    Swatch::YELLOW,
                    Swatch::CYAN,
                ],
                ring_thickness: 140.0,
                outer_margin: 0.0,
                rotation_offset: 0.0,
                overlay: None,
                overlay_padding: 0.0,
                inner_fill: None,
                thumb: ThumbConfig::default(),
                button: None,
            },
            Self::Confirm => SelectorConfig {
                palette: vec![
                    Swatch::RED,
                    Swatch::GREEN,
                    Swatch::BLUE,
                    Swatch::YELLOW,
                    Swatch::CYAN,
                    Swatch::MAGENTA,
                    Swatch::LIGHT_GRAY,
                ],
                outer_margin: 80.0,
                rotation_offset: 270.0,
                overlay_padding: 45.0,
                inner_fill: Some(Swatch::BLACK),
                button: Some(ButtonConfig::default()),
                ..Self::Classic.config()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_deserialization() {
        let cases = vec![
            ("\"classic\"", Preset::Classic),
            ("\"Classic\"", Preset::Classic),
            ("\"CONFIRM\"", Preset::Confirm),
            ("\"confirm\"", Preset::Confirm),
        ];

        for (json, expected) in cases {
            let deserialized: Preset = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(Preset::Confirm.to_string(), "confirm");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{
            "palette": ["black", "white"],
            "rotation_offset": 90,
            "thumb": { "radius": 12 },
            "button": { "label": "Go" }
        }"#;
        let config: SelectorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.palette, vec![Swatch::BLACK, Swatch::WHITE]);
        assert_eq!(config.rotation_offset, 90.0);
        assert_eq!(config.ring_thickness, 140.0);
        assert_eq!(config.thumb.radius, 12.0);
        assert_eq!(config.thumb.stroke, Swatch::BLACK);
        let button = config.button.unwrap();
        assert_eq!(button.label, "Go");
        assert_eq!(button.fill, Swatch::BLUE);
    }

    #[test]
    fn test_confirm_preset_differs_only_in_look() {
        let classic = Preset::Classic.config();
        let confirm = Preset::Confirm.config();
        assert_eq!(confirm.palette.len(), 7);
        assert_eq!(confirm.ring_thickness, classic.ring_thickness);
        assert_eq!(confirm.thumb, classic.thumb);
        assert!(classic.button.is_none());
        assert!(confirm.button.is_some());
    }

    #[test]
    fn test_config_survives_serialization() {
        let config = Preset::Confirm.config();
        let json = serde_json::to_string(&config).unwrap();
        let back: SelectorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
