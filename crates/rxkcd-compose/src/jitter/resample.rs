// Imports
use crate::{Color, SurfaceScale};

/// The normalized parameter of sample `i` out of `count` evenly spaced samples in `[0.0, 1.0]`.
///
/// A single sample sits at the end of the range.
pub fn sample_parameter(i: usize, count: usize) -> f64 {
    if count <= 1 {
        1.0
    } else {
        i as f64 / (count - 1) as f64
    }
}

/// Locate the parameter `t` on a sequence of `len` evenly parametrized values.
///
/// Returns the index of the segment start and the fraction along the segment.
pub fn locate_parameter(t: f64, len: usize) -> (usize, f64) {
    if len < 2 {
        return (0, 0.0);
    }
    let pos = t.clamp(0.0, 1.0) * (len - 1) as f64;
    let k = (pos.floor() as usize).min(len - 2);

    (k, pos - k as f64)
}

/// Piecewise linear resampling of `values` over a normalized parameter to `count` samples.
///
/// The first and last input value are reproduced exactly.
pub fn resample_linear(values: &[f64], count: usize) -> Vec<f64> {
    match values {
        [] => Vec::new(),
        [single] => vec![*single; count],
        _ => (0..count)
            .map(|i| {
                let (k, frac) = locate_parameter(sample_parameter(i, count), values.len());
                values[k] * (1.0 - frac) + values[k + 1] * frac
            })
            .collect(),
    }
}

/// Resample per-vertex colors over the same normalized parameter as [resample_linear].
pub fn resample_colors(colors: &[Color], count: usize) -> Vec<Color> {
    match colors {
        [] => Vec::new(),
        [single] => vec![*single; count],
        _ => (0..count)
            .map(|i| {
                let (k, frac) = locate_parameter(sample_parameter(i, count), colors.len());
                colors[k].mix(colors[k + 1], frac)
            })
            .collect(),
    }
}

/// The length of the polyline in pixels on the surface.
pub fn polyline_pixel_length(x: &[f64], y: &[f64], scale: &SurfaceScale) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| {
            scale
                .to_pixels(na::vector![xs[1] - xs[0], ys[1] - ys[0]])
                .magnitude()
        })
        .sum()
}
