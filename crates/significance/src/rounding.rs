// Constants ===========================================================================================================

/// The precision that reported p-values and e-values are rounded to
pub const SIGNIFICANT_FIGURES: usize = 3;

// Public API ==========================================================================================================

/// Rounds `value` to `figures` significant figures, returning zero and non-finite values unchanged
#[must_use]
pub fn round_sig_figs(value: f64, figures: usize) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }

    // NOTE: Scientific formatting rounds on the exact decimal expansion, which scaling by powers of ten doesn't
    let precision = figures.saturating_sub(1);
    format!("{value:.precision$e}").parse().unwrap_or(value)
}

// Module Tests ========================================================================================================
