/// The count of samples the signal is padded with at each end, replicating the edge values.
pub const SMOOTH_PADDING: usize = 10;
/// The coefficient of the single-pole filter.
pub const SMOOTH_COEFFICIENT: f64 = 0.5;
/// How often the forward-backward pass is applied.
pub const SMOOTH_PASSES: usize = 2;

/// Smooth the signal with a zero-phase single-pole low pass.
///
/// The signal is padded by edge replication, filtered forward and backward [SMOOTH_PASSES] times
/// and then stripped of the padding again. The returned signal has the same length as the input.
pub fn smooth(values: &[f64]) -> Vec<f64> {
    let (Some(first), Some(last)) = (values.first().copied(), values.last().copied()) else {
        return Vec::new();
    };

    let mut padded = Vec::with_capacity(values.len() + 2 * SMOOTH_PADDING);
    padded.extend(std::iter::repeat(first).take(SMOOTH_PADDING));
    padded.extend_from_slice(values);
    padded.extend(std::iter::repeat(last).take(SMOOTH_PADDING));

    for _ in 0..SMOOTH_PASSES {
        single_pole_pass(padded.iter_mut());
        single_pole_pass(padded.iter_mut().rev());
    }

    padded[SMOOTH_PADDING..SMOOTH_PADDING + values.len()].to_vec()
}

/// `y[i] = a * x[i] + (1 - a) * y[i - 1]`, starting at rest on the first value.
fn single_pole_pass<'a>(values: impl Iterator<Item = &'a mut f64>) {
    let mut prev: Option<f64> = None;

    for v in values {
        let filtered = match prev {
            Some(prev) => SMOOTH_COEFFICIENT * *v + (1.0 - SMOOTH_COEFFICIENT) * prev,
            None => *v,
        };
        *v = filtered;
        prev = Some(filtered);
    }
}
