// Imports
use rand::{Rng, SeedableRng};

/// A new random number generator with the pcg64 algorithm.
///
/// Used for seedable, reproducible random numbers.
pub fn new_rng_default_pcg64(seed: Option<u64>) -> rand_pcg::Pcg64 {
    if let Some(seed) = seed {
        rand_pcg::Pcg64::seed_from_u64(seed)
    } else {
        rand_pcg::Pcg64::from_os_rng()
    }
}

/// Generate a new seed by generating a random value seeded from the old seed using the Pcg algorithm.
pub fn seed_advance(seed: u64) -> u64 {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    rng.random()
}

/// Format a tick value the way axis labels usually show it: integers without decimals,
/// everything else with at most three significant decimals and trailing zeros trimmed.
pub fn format_tick_value(value: f64) -> String {
    if value == value.round() && value.abs() < 1e15 {
        // avoids printing "-0"
        return format!("{}", value.round() as i64);
    }

    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    // small negative values round to "-0"
    if trimmed == "-0" {
        return String::from("0");
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rngs_are_reproducible() {
        let mut first = new_rng_default_pcg64(Some(7));
        let mut second = new_rng_default_pcg64(Some(7));

        assert_eq!(first.random::<u64>(), second.random::<u64>());
        assert_ne!(seed_advance(7), 7);
    }

    #[test]
    fn tick_value_formatting() {
        assert_eq!(format_tick_value(3.0), "3");
        assert_eq!(format_tick_value(-0.0), "0");
        assert_eq!(format_tick_value(0.25), "0.25");
        assert_eq!(format_tick_value(1.0 / 3.0), "0.333");
        assert_eq!(format_tick_value(-0.0001), "0");
        assert_eq!(format_tick_value(0.0001), "0");
        assert_eq!(format_tick_value(-0.25), "-0.25");
    }
}
