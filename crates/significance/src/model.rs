// Standard Library Imports
use std::ops::RangeInclusive;

// Local Crate Imports
use crate::{
    MatchModel, Result, SIGNIFICANT_FIGURES, Significance, SignificanceError, round_sig_figs,
    tail::upper_tail,
};

// Public API ==========================================================================================================

impl MatchModel {
    /// Builds the model for a spectrum of `peak_count` peaks, searched against `organism_count` organisms whose
    /// sequences were filtered to `mass_range` and matched with the given `tolerance` (all in Daltons)
    pub fn new(
        peak_count: usize,
        organism_count: usize,
        mass_range: RangeInclusive<f64>,
        tolerance: f64,
    ) -> Result<Self> {
        let (min, max) = mass_range.into_inner();
        let valid_range = min.is_finite() && max.is_finite() && min <= max;
        let valid_tolerance = tolerance.is_finite() && tolerance > 0.0;
        if !(valid_range && valid_tolerance) {
            return Err(SignificanceError::InvalidWindow {
                min,
                max,
                tolerance,
            });
        }

        Ok(Self {
            peak_count,
            organism_count,
            bins: (max - min) / (2.0 * tolerance),
        })
    }

    #[must_use]
    pub const fn peak_count(&self) -> usize {
        self.peak_count
    }

    #[must_use]
    pub const fn organism_count(&self) -> usize {
        self.organism_count
    }

    /// The number of tolerance-wide bins the mass window is divided into, which isn't rounded to a whole number
    #[must_use]
    pub const fn bins(&self) -> f64 {
        self.bins
    }

    /// The probability of an organism with `sequences` filtered sequences hitting at least `hits` peaks by chance
    pub fn p_value(&self, hits: usize, sequences: usize) -> Result<f64> {
        if hits > self.peak_count {
            return Err(SignificanceError::TooManyHits {
                hits,
                peaks: self.peak_count,
            });
        }
        if hits > 0 && sequences == 0 {
            return Err(SignificanceError::HitsWithoutSequences { hits });
        }

        Ok(upper_tail(self.peak_count, hits, self.rate(sequences)))
    }

    /// Both the p-value and e-value of an organism, left unrounded
    pub fn significance(&self, hits: usize, sequences: usize) -> Result<Significance> {
        let p_value = self.p_value(hits, sequences)?;
        let e_value = p_value * self.organism_count as f64;

        Ok(Significance { p_value, e_value })
    }
}

impl Significance {
    #[must_use]
    pub const fn p_value(&self) -> f64 {
        self.p_value
    }

    /// The number of organisms expected to score at least this well by chance
    #[must_use]
    pub const fn e_value(&self) -> f64 {
        self.e_value
    }

    /// Rounds both values to [`SIGNIFICANT_FIGURES`], as they are reported
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            p_value: round_sig_figs(self.p_value, SIGNIFICANT_FIGURES),
            e_value: round_sig_figs(self.e_value, SIGNIFICANT_FIGURES),
        }
    }
}

// Private Methods =====================================================================================================

impl MatchModel {
    // NOTE: With a zero-width mass window, any organism with at least one sequence matches every peak
    fn rate(&self, sequences: usize) -> f64 {
        if sequences == 0 {
            0.0
        } else if self.bins == 0.0 {
            f64::INFINITY
        } else {
            sequences as f64 / self.bins
        }
    }
}

// Module Tests ========================================================================================================
