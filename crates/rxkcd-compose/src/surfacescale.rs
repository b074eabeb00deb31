// Imports
use crate::ext::AabbExt;
use crate::jitter::JitterError;
use p2d::bounding_volume::Aabb;
use serde::{Deserialize, Serialize};

/// The scale between data units and pixels of a drawing surface.
///
/// Derived from the pixel extents and the coordinate limits of the surface,
/// so it must be recreated whenever one of them changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename = "surface_scale")]
pub struct SurfaceScale {
    /// Pixels per data unit, for the x and y axis.
    #[serde(rename = "px_per_unit")]
    px_per_unit: na::Vector2<f64>,
}

impl SurfaceScale {
    /// Derive the scale from the pixel extents of the surface and its data coordinate limits.
    pub fn from_extents(
        pixel_extents: na::Vector2<f64>,
        data_limits: &Aabb,
    ) -> Result<Self, JitterError> {
        let valid_pixels = pixel_extents.iter().all(|e| e.is_finite() && *e > 0.0);

        if !valid_pixels || !data_limits.is_proper() {
            return Err(JitterError::DegenerateSurface {
                pixel_extents,
                data_extents: data_limits.extents(),
            });
        }

        Ok(Self {
            px_per_unit: pixel_extents.component_div(&data_limits.extents()),
        })
    }

    /// Pixels per data unit, for the x and y axis.
    pub fn px_per_unit(&self) -> na::Vector2<f64> {
        self.px_per_unit
    }

    /// Convert a vector in data units to pixels.
    pub fn to_pixels(&self, v: na::Vector2<f64>) -> na::Vector2<f64> {
        v.component_mul(&self.px_per_unit)
    }

    /// Convert a distance in pixels to data units, per axis.
    pub fn pixels_to_data(&self, pixels: f64) -> na::Vector2<f64> {
        na::Vector2::from_element(pixels).component_div(&self.px_per_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::SurfaceScale;
    use crate::ext::AabbExt;
    use approx::assert_relative_eq;
    use p2d::bounding_volume::Aabb;

    #[test]
    fn scale_from_extents() {
        let limits = Aabb::new_positive(na::point![0.0, -1.0], na::point![10.0, 1.0]);
        let scale = SurfaceScale::from_extents(na::vector![400.0, 300.0], &limits).unwrap();

        assert_relative_eq!(scale.px_per_unit(), na::vector![40.0, 150.0]);
        assert_relative_eq!(
            scale.to_pixels(na::vector![0.5, 0.5]),
            na::vector![20.0, 75.0]
        );
        assert_relative_eq!(scale.pixels_to_data(3.0), na::vector![0.075, 0.02]);
    }

    #[test]
    fn degenerate_surfaces_are_rejected() {
        let flat = Aabb::new_positive(na::point![0.0, 1.0], na::point![10.0, 1.0]);
        let limits = Aabb::new_positive(na::point![0.0, 0.0], na::point![1.0, 1.0]);

        assert!(SurfaceScale::from_extents(na::vector![400.0, 300.0], &flat).is_err());
        assert!(SurfaceScale::from_extents(na::vector![0.0, 300.0], &limits).is_err());
        assert!(SurfaceScale::from_extents(na::vector![f64::NAN, 300.0], &limits).is_err());
    }
}
