// Imports
use rand::Rng;

/// The chance for a burst to start at a position is one in this value.
pub const BURST_CHANCE_DENOMINATOR: u32 = 10;
/// The maximum length of a single burst.
pub const BURST_LEN_MAX: usize = 100;
/// The signal stays zero in a margin of `ceil(n / MARGIN_DIVISOR)` samples at both ends.
pub const MARGIN_DIVISOR: usize = 50;

/// The number of samples at each end that stay zero for a signal of length `n`.
pub fn noise_margin(n: usize) -> usize {
    n.div_ceil(MARGIN_DIVISOR)
}

/// Generate a hand tremor signal of length `n`.
///
/// The signal consists of runs of zeros and bursts of `+1.0` or `-1.0`. It is neither scaled nor smoothed.
pub fn generate_noise<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let mut noise = vec![0.0; n];
    let margin = noise_margin(n);
    let end = n.saturating_sub(margin);

    let mut i = margin;
    while i < end {
        if rng.random_range(1..=BURST_CHANCE_DENOMINATOR) == 1 {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let len = rng.random_range(1..=(end - i).min(BURST_LEN_MAX));

            noise[i..i + len].fill(sign);
            i += len;
        }
        i += 1;
    }

    noise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::new_rng_default_pcg64;

    #[test]
    fn noise_len_values_and_margins() {
        let mut rng = new_rng_default_pcg64(Some(42));

        for n in [1, 2, 7, 49, 50, 51, 137, 1000, 12_345] {
            let noise = generate_noise(n, &mut rng);
            let margin = noise_margin(n);

            assert_eq!(noise.len(), n);
            assert!(noise.iter().all(|v| *v == 0.0 || *v == 1.0 || *v == -1.0));
            assert!(noise[..margin.min(n)].iter().all(|v| *v == 0.0));
            assert!(noise[n.saturating_sub(margin)..].iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn noise_empty() {
        let mut rng = new_rng_default_pcg64(Some(0));

        assert!(generate_noise(0, &mut rng).is_empty());
    }

    #[test]
    fn bursts_are_bounded_and_separated() {
        let mut rng = new_rng_default_pcg64(Some(3));
        let noise = generate_noise(20_000, &mut rng);

        let mut run_len = 0;
        let mut run_value = 0.0;
        for v in noise.iter().copied() {
            if v != 0.0 && v == run_value {
                run_len += 1;
            } else {
                run_len = usize::from(v != 0.0);
                run_value = v;
            }
            assert!(run_len <= BURST_LEN_MAX);
        }

        // a burst is always followed by at least one zero
        assert!(noise.windows(2).all(|w| w[0] == 0.0 || w[1] == 0.0 || w[0] == w[1]));
        assert!(noise.iter().any(|v| *v != 0.0));
    }
}
