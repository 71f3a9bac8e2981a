// External Crate Imports
use statrs::function::gamma::ln_gamma;

// Public API ==========================================================================================================

/// The probability of `hits` or more of `peaks` independent peaks each being matched, when a single peak goes
/// unmatched with probability `exp(-rate)`
///
/// Each binomial term is evaluated in log space (with `ln C(K, k)` from the log-gamma function) and only
/// exponentiated at the end, so large peak counts neither overflow nor underflow part-way through.
pub fn upper_tail(peaks: usize, hits: usize, rate: f64) -> f64 {
    // NOTE: Computing `1 - exp(-rate)` directly loses all precision when `rate` is tiny
    let ln_q = (-(-rate).exp_m1()).ln();
    let ln_peaks_factorial = ln_factorial(peaks);

    let p_value: f64 = (hits..=peaks)
        .map(|matched| {
            let missed = peaks - matched;
            let ln_choose = ln_peaks_factorial - ln_factorial(matched) - ln_factorial(missed);

            // SAFETY: Terms are skipped when their exponent is zero, since `0 * inf` or `0 * -inf` are NaN
            let mut ln_term = ln_choose;
            if missed > 0 {
                ln_term -= missed as f64 * rate;
            }
            if matched > 0 {
                ln_term += matched as f64 * ln_q;
            }
            ln_term.exp()
        })
        .sum();

    p_value.min(1.0)
}

// Private Functions ===================================================================================================

fn ln_factorial(n: usize) -> f64 {
    ln_gamma(n as f64 + 1.0)
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use assert_float_eq::{assert_float_absolute_eq, assert_float_relative_eq};

    use super::*;

    #[test]
    fn known_tails() {
        assert_float_relative_eq!(upper_tail(2, 1, 2.0 / 1_500.0), 0.002_663_114_269_499_138, 1e-9);
        assert_float_relative_eq!(upper_tail(2, 1, 1.0 / 1_500.0), 0.001_332_444_839_374_494, 1e-9);
        assert_float_relative_eq!(upper_tail(2, 2, 2.0 / 1_500.0), 1.775_409_249_975_891_2e-6, 1e-9);
        assert_float_relative_eq!(upper_tail(10, 3, 5.0 / 100.0), 0.010_746_308_483_291_642, 1e-9);
        assert_float_relative_eq!(upper_tail(10, 10, 5.0 / 100.0), 7.613_402_730_882_01e-14, 1e-9);
    }

    #[test]
    fn zero_hits_are_certain() {
        for (peaks, rate) in [(1, 0.1), (2, 2.0 / 1_500.0), (25, 0.5), (200, 3.0)] {
            assert_float_absolute_eq!(upper_tail(peaks, 0, rate), 1.0, 1e-9);
        }
    }

    #[test]
    fn zero_rate() {
        // No sequences means no peak can be matched
        assert_float_absolute_eq!(upper_tail(5, 0, 0.0), 1.0);
        assert_float_absolute_eq!(upper_tail(5, 1, 0.0), 0.0);
        assert_float_absolute_eq!(upper_tail(5, 5, 0.0), 0.0);
    }

    #[test]
    fn infinite_rate() {
        // A zero-width mass window matches every peak
        assert_float_absolute_eq!(upper_tail(5, 0, f64::INFINITY), 1.0);
        assert_float_absolute_eq!(upper_tail(5, 3, f64::INFINITY), 1.0);
        assert_float_absolute_eq!(upper_tail(5, 5, f64::INFINITY), 1.0);
    }

    #[test]
    fn non_increasing_in_hits() {
        for rate in [1e-6, 1e-3, 0.1, 0.7, 2.5] {
            let tail: Vec<_> = (0..=40).map(|hits| upper_tail(40, hits, rate)).collect();
            assert!(tail.iter().all(|p| (0.0..=1.0).contains(p)));
            assert!(tail.windows(2).all(|w| w[1] <= w[0]));
        }
    }

    #[test]
    fn large_peak_counts() {
        let p_value = upper_tail(5_000, 2_500, 0.01);
        assert!(p_value.is_finite());
        assert!((0.0..1e-300).contains(&p_value));

        let p_value = upper_tail(5_000, 10, 0.01);
        assert_float_absolute_eq!(p_value, 1.0, 1e-9);
    }
}
