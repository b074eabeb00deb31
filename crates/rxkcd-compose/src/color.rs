// Imports
use palette::{LinSrgba, Mix, Srgba};
use serde::{Deserialize, Serialize};

/// A rgba color
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(default, rename = "color")]
pub struct Color {
    /// Red, ranging [0.0, 1.0].
    #[serde(rename = "r")]
    pub r: f64,
    /// Green, ranging [0.0, 1.0].
    #[serde(rename = "g")]
    pub g: f64,
    /// Blue, ranging [0.0, 1.0].
    #[serde(rename = "b")]
    pub b: f64,
    /// Alpha, ranging [0.0, 1.0].
    #[serde(rename = "a")]
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Transparent color with r,g,b set to 0.0.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Black color.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// White color.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Red color.
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Green color.
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };

    /// Blue color.
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    /// A new color from rgba values.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// A new opaque color from 8 bit rgb values.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Approximate equality.
    pub fn approx_eq(self, other: Self) -> bool {
        approx::relative_eq!(self.r, other.r)
            && approx::relative_eq!(self.g, other.g)
            && approx::relative_eq!(self.b, other.b)
            && approx::relative_eq!(self.a, other.a)
    }

    /// Mix two colors in linear light.
    ///
    /// A factor of 0.0 returns `self`, a factor of 1.0 returns `other`.
    pub fn mix(self, other: Self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        if factor == 0.0 {
            return self;
        } else if factor == 1.0 {
            return other;
        }

        let from: LinSrgba<f64> = Srgba::from(self).into_linear();
        let to: LinSrgba<f64> = Srgba::from(other).into_linear();

        let mixed: Srgba<f64> = Srgba::from_linear(from.mix(to, factor));
        mixed.into()
    }

    /// The color as a css `rgb(..)` string, for use in svg attributes.
    pub fn to_css_rgb(self) -> String {
        format!(
            "rgb({},{},{})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }
}

impl From<Color> for Srgba<f64> {
    fn from(color: Color) -> Self {
        Srgba::new(color.r, color.g, color.b, color.a)
    }
}

impl From<Srgba<f64>> for Color {
    fn from(color: Srgba<f64>) -> Self {
        Self::new(color.red, color.green, color.blue, color.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn mix_endpoints() {
        let from = Color::from_rgb_u8(200, 30, 40);
        let to = Color::BLUE;

        assert_eq!(from.mix(to, 0.0), from);
        assert_eq!(from.mix(to, 1.0), to);
    }

    #[test]
    fn mix_midpoint_stays_in_gamut() {
        let mixed = Color::RED.mix(Color::GREEN, 0.5);

        assert!(mixed.r > 0.0 && mixed.r < 1.0);
        assert!(mixed.g > 0.0 && mixed.g < 1.0);
        assert!(mixed.approx_eq(Color::GREEN.mix(Color::RED, 0.5)));
    }

    #[test]
    fn css_rgb() {
        assert_eq!(Color::from_rgb_u8(255, 128, 0).to_css_rgb(), "rgb(255,128,0)");
    }
}
