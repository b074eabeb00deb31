// Imports
use crate::scene::Font;
use crate::EngineError;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration of the hand-drawn restyling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename = "xkcd_config")]
pub struct XkcdConfig {
    /// The jitter amplitude in pixels. Converted to data units for every drawing surface.
    #[serde(rename = "jitter_px")]
    pub jitter_px: f64,
    /// Travelled pixel distance per resampled point.
    #[serde(rename = "pixels_per_sample")]
    pub pixels_per_sample: f64,
    /// The line width of restyled lines and patch edges.
    #[serde(rename = "line_width")]
    pub line_width: f64,
    /// The line width of the redrawn spines and tick marks.
    #[serde(rename = "axis_line_width")]
    pub axis_line_width: f64,
    /// The length of tick marks in pixels.
    #[serde(rename = "tick_length_px")]
    pub tick_length_px: f64,
    /// The distance between a spine and its tick labels in pixels.
    #[serde(rename = "tick_label_gap_px")]
    pub tick_label_gap_px: f64,
    /// The font family replaces every font. Smaller sizes are raised to the font size.
    #[serde(rename = "font")]
    pub font: Font,
    /// If the axes get redrawn spines, tick marks and tick labels.
    #[serde(rename = "draw_axes")]
    pub draw_axes: bool,
    /// Seed for reproducible output. When not set, every call is randomized independently.
    #[serde(rename = "seed")]
    pub seed: Option<u64>,
}

impl Default for XkcdConfig {
    fn default() -> Self {
        Self {
            jitter_px: 3.0,
            pixels_per_sample: 4.0,
            line_width: 2.0,
            axis_line_width: 2.0,
            tick_length_px: 8.0,
            tick_label_gap_px: 6.0,
            font: Font::new("Humor Sans", 14.0),
            draw_axes: true,
            seed: None,
        }
    }
}

impl XkcdConfig {
    /// Load a config from Json. Missing fields take their default values, the result is validated.
    pub fn load_from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Deserializing xkcd config from Json failed.")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that lengths and widths are finite and not negative, and that sample distance and font size are positive.
    pub fn validate(&self) -> Result<(), EngineError> {
        let non_negative = [
            ("jitter_px", self.jitter_px),
            ("line_width", self.line_width),
            ("axis_line_width", self.axis_line_width),
            ("tick_length_px", self.tick_length_px),
            ("tick_label_gap_px", self.tick_label_gap_px),
        ];
        let positive = [
            ("pixels_per_sample", self.pixels_per_sample),
            ("font.size", self.font.size),
        ];

        if let Some(&(field, value)) = non_negative
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(EngineError::InvalidConfig {
                field,
                value,
                expected: "a finite, non-negative value",
            });
        }
        if let Some(&(field, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(EngineError::InvalidConfig {
                field,
                value,
                expected: "a finite, positive value",
            });
        }
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Serializing xkcd config to Json failed.")
    }
}
