// Modules
/// Tremor noise generation.
pub mod noise;
/// Resampling of polylines.
pub mod resample;
/// Zero-phase smoothing.
pub mod smooth;

// Re-exports
pub use noise::generate_noise;
pub use resample::{polyline_pixel_length, resample_colors, resample_linear};
pub use smooth::smooth;

// Imports
use crate::SurfaceScale;
use rand::Rng;
use rand_distr::{Distribution, StandardUniform};
use thiserror::Error;
use tracing::trace;

/// Errors of the jitter pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JitterError {
    /// The x and y coordinates differ in length.
    #[error("x and y coordinates differ in length, x: {x}, y: {y}")]
    LengthMismatch {
        /// Length of the x coordinates.
        x: usize,
        /// Length of the y coordinates.
        y: usize,
    },
    /// The polyline has no points.
    #[error("polyline has no points")]
    EmptyPolyline,
    /// A jitter amplitude is negative or not finite.
    #[error("invalid jitter amplitude {0:?}")]
    InvalidAmplitude(na::Vector2<f64>),
    /// The drawing surface has no area in pixels or data units.
    #[error("degenerate drawing surface, pixel extents {pixel_extents:?}, data extents {data_extents:?}")]
    DegenerateSurface {
        /// The extents in pixels.
        pixel_extents: na::Vector2<f64>,
        /// The extents in data units.
        data_extents: na::Vector2<f64>,
    },
}

/// Disable the jitter on axes where it would only thicken a straight line.
///
/// Perfectly horizontal polylines get no x jitter, perfectly vertical polylines no y jitter.
pub fn suppress_degenerate_jitter(x: &[f64], y: &[f64], jitter: na::Vector2<f64>) -> na::Vector2<f64> {
    let all_equal = |values: &[f64]| values.iter().all(|v| Some(v) == values.first());
    let mut jitter = jitter;

    if all_equal(y) {
        jitter[0] = 0.0;
    }
    if all_equal(x) {
        jitter[1] = 0.0;
    }

    jitter
}

/// The context of jitter operations on a single drawing surface.
///
/// Holds the pixel scale of the surface and the random number generator,
/// so nothing about the surface is cached beyond the lifetime of the context.
#[derive(Debug, Clone)]
pub struct JitterContext<R> {
    /// The scale of the drawing surface.
    pub scale: SurfaceScale,
    /// Travelled pixel distance per resampled point.
    pixels_per_sample: f64,
    /// The random number generator.
    pub rng: R,
}

impl<R: Rng> JitterContext<R> {
    /// The default travelled pixel distance per resampled point.
    pub const PIXELS_PER_SAMPLE_DEFAULT: f64 = 4.0;
    /// The lower limit for the pixels per resampled point.
    pub const PIXELS_PER_SAMPLE_MIN: f64 = 0.5;
    /// Computed sample counts never go below this value, so endpoints survive resampling.
    pub const TARGET_COUNT_MIN: usize = 2;
    /// Computed sample counts never exceed this value.
    ///
    /// Polylines that reach far beyond the limits of the surface are sampled more sparsely.
    pub const TARGET_COUNT_MAX: usize = 20_000;

    /// A new context for the surface with the given scale.
    pub fn new(scale: SurfaceScale, rng: R) -> Self {
        Self {
            scale,
            pixels_per_sample: Self::PIXELS_PER_SAMPLE_DEFAULT,
            rng,
        }
    }

    /// Set the travelled pixel distance per resampled point.
    pub fn with_pixels_per_sample(mut self, pixels_per_sample: f64) -> Self {
        self.pixels_per_sample = pixels_per_sample.max(Self::PIXELS_PER_SAMPLE_MIN);
        self
    }

    /// Travelled pixel distance per resampled point.
    pub fn pixels_per_sample(&self) -> f64 {
        self.pixels_per_sample
    }

    /// The sample count for the polyline, one sample for every [Self::pixels_per_sample] of screen distance.
    ///
    /// Clamped to [Self::TARGET_COUNT_MIN] and [Self::TARGET_COUNT_MAX].
    pub fn target_count_for(&self, x: &[f64], y: &[f64]) -> usize {
        let pixel_len = polyline_pixel_length(x, y, &self.scale);
        let count = (pixel_len / self.pixels_per_sample).ceil();

        if count.is_nan() {
            return Self::TARGET_COUNT_MIN;
        }
        // the float to int cast saturates
        (count as usize).clamp(Self::TARGET_COUNT_MIN, Self::TARGET_COUNT_MAX)
    }

    /// Resample the polyline and add smoothed tremor noise to it.
    ///
    /// `jitter` is the amplitude in data units for x and y. When `target_count` is `None` or zero,
    /// the count is derived from the length of the polyline on screen.
    /// A single point is returned unchanged. The endpoints of the output are not pinned.
    pub fn resample_and_jitter(
        &mut self,
        x: &[f64],
        y: &[f64],
        jitter: na::Vector2<f64>,
        target_count: Option<usize>,
    ) -> Result<(Vec<f64>, Vec<f64>), JitterError> {
        if x.len() != y.len() {
            return Err(JitterError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(JitterError::EmptyPolyline);
        }
        if jitter.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(JitterError::InvalidAmplitude(jitter));
        }
        if x.len() == 1 {
            return Ok((x.to_vec(), y.to_vec()));
        }

        let n = match target_count {
            Some(n) if n > 0 => n,
            _ => self.target_count_for(x, y),
        };
        trace!(
            input_len = x.len(),
            target_count = n,
            "resampling and jittering polyline"
        );

        let x_noise = self.tremor(n, jitter[0]);
        let y_noise = self.tremor(n, jitter[1]);

        let x_out = resample_linear(x, n)
            .into_iter()
            .zip(x_noise)
            .map(|(v, noise)| v + noise)
            .collect();
        let y_out = resample_linear(y, n)
            .into_iter()
            .zip(y_noise)
            .map(|(v, noise)| v + noise)
            .collect();

        Ok((x_out, y_out))
    }

    /// Smoothed noise of length `n`, with every sample weighted randomly and scaled by the amplitude.
    fn tremor(&mut self, n: usize, amplitude: f64) -> Vec<f64> {
        if amplitude == 0.0 {
            return vec![0.0; n];
        }

        let noise = generate_noise(n, &mut self.rng);
        let weighted = noise
            .into_iter()
            .map(|v| {
                let weight: f64 = StandardUniform.sample(&mut self.rng);
                v * weight * amplitude
            })
            .collect::<Vec<f64>>();

        smooth(&weighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ext::AabbExt;
    use crate::utils::new_rng_default_pcg64;
    use p2d::bounding_volume::Aabb;

    fn context(seed: u64) -> JitterContext<rand_pcg::Pcg64> {
        let limits = Aabb::new_positive(na::point![0.0, 0.0], na::point![10.0, 10.0]);
        let scale = SurfaceScale::from_extents(na::vector![400.0, 400.0], &limits).unwrap();
        JitterContext::new(scale, new_rng_default_pcg64(Some(seed)))
    }

    #[test]
    fn zero_jitter_is_plain_resample() {
        let mut cx = context(1);
        let x = [0.0, 1.0, 2.5, 4.0];
        let y = [1.0, -3.0, 2.0, 0.5];

        let (x_out, y_out) = cx
            .resample_and_jitter(&x, &y, na::vector![0.0, 0.0], Some(37))
            .unwrap();

        assert_eq!(x_out, resample_linear(&x, 37));
        assert_eq!(y_out, resample_linear(&y, 37));
    }

    #[test]
    fn output_has_target_count() {
        let mut cx = context(2);
        let x = [0.0, 5.0, 10.0];
        let y = [0.0, 8.0, 2.0];

        for count in [2, 3, 50, 401] {
            let (x_out, y_out) = cx
                .resample_and_jitter(&x, &y, na::vector![0.1, 0.1], Some(count))
                .unwrap();
            assert_eq!(x_out.len(), count);
            assert_eq!(y_out.len(), count);
        }
    }

    #[test]
    fn target_count_from_pixel_length() {
        let mut cx = context(3);
        // 2.5 units at 40 px per unit -> 100 px -> 25 samples
        let x = [1.0, 3.5];
        let y = [4.0, 4.0];

        assert_eq!(cx.target_count_for(&x, &y), 25);

        let (x_out, y_out) = cx
            .resample_and_jitter(&x, &y, na::vector![0.05, 0.05], None)
            .unwrap();
        assert_eq!(x_out.len(), 25);
        assert_eq!(y_out.len(), 25);

        let (x_out, _) = cx
            .resample_and_jitter(&x, &y, na::vector![0.05, 0.05], Some(0))
            .unwrap();
        assert_eq!(x_out.len(), 25);

        // a zero length polyline still keeps two samples
        assert_eq!(cx.target_count_for(&[2.0, 2.0], &[2.0, 2.0]), 2);
    }

    #[test]
    fn target_count_far_outside_limits() {
        let mut cx = context(7);
        let x = [0.0, 1e300];
        let y = [0.0, 1.0];
        let max_count = JitterContext::<rand_pcg::Pcg64>::TARGET_COUNT_MAX;

        assert_eq!(cx.target_count_for(&x, &y), max_count);
        assert_eq!(cx.target_count_for(&[0.0, f64::MAX], &[0.0, f64::MAX]), max_count);

        let (x_out, y_out) = cx
            .resample_and_jitter(&x, &y, na::vector![0.05, 0.05], None)
            .unwrap();
        assert_eq!(x_out.len(), max_count);
        assert_eq!(y_out.len(), max_count);
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let mut cx = context(4);
        let x = [0.0, 10.0];
        let y = [0.0, 10.0];
        let amplitude = 0.2;

        let (x_out, y_out) = cx
            .resample_and_jitter(&x, &y, na::vector![amplitude, amplitude], Some(500))
            .unwrap();
        let x_plain = resample_linear(&x, 500);
        let y_plain = resample_linear(&y, 500);

        for i in 0..500 {
            assert!((x_out[i] - x_plain[i]).abs() <= amplitude);
            assert!((y_out[i] - y_plain[i]).abs() <= amplitude);
        }
    }

    #[test]
    fn single_point_is_unchanged() {
        let mut cx = context(5);

        let (x_out, y_out) = cx
            .resample_and_jitter(&[3.0], &[4.0], na::vector![1.0, 1.0], Some(10))
            .unwrap();
        assert_eq!(x_out, vec![3.0]);
        assert_eq!(y_out, vec![4.0]);
    }

    #[test]
    fn invalid_input() {
        let mut cx = context(6);

        assert_eq!(
            cx.resample_and_jitter(&[0.0, 1.0], &[0.0], na::vector![0.0, 0.0], None),
            Err(JitterError::LengthMismatch { x: 2, y: 1 })
        );
        assert_eq!(
            cx.resample_and_jitter(&[], &[], na::vector![0.0, 0.0], None),
            Err(JitterError::EmptyPolyline)
        );
        assert!(matches!(
            cx.resample_and_jitter(&[0.0, 1.0], &[0.0, 1.0], na::vector![-1.0, 0.0], None),
            Err(JitterError::InvalidAmplitude(_))
        ));
    }

    #[test]
    fn degenerate_jitter_suppression() {
        let jitter = na::vector![0.3, 0.4];

        assert_eq!(
            suppress_degenerate_jitter(&[0.0, 1.0, 2.0], &[5.0, 5.0, 5.0], jitter),
            na::vector![0.0, 0.4]
        );
        assert_eq!(
            suppress_degenerate_jitter(&[2.0, 2.0], &[0.0, 1.0], jitter),
            na::vector![0.3, 0.0]
        );
        assert_eq!(
            suppress_degenerate_jitter(&[0.0, 1.0], &[0.0, 1.0], jitter),
            jitter
        );
    }
}
