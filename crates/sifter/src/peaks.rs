// Standard Library Imports
use std::{collections::BTreeSet, str::FromStr};

// Local Crate Imports
use crate::{Mz, Result, Spectrum, SpectrumError, tolerance_window::ToleranceWindow};

// Constants ===========================================================================================================

const PEAK_SEPARATOR: char = '\t';

// Public API ==========================================================================================================

impl Spectrum {
    /// Parses a tab-separated list of peak masses, rejecting the whole spectrum if any one peak is invalid
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpectrumError::Empty);
        }

        let mut peaks = BTreeSet::new();
        let mut peak_count = 0;
        for (index, token) in text.split(PEAK_SEPARATOR).enumerate() {
            let token = token.trim();
            let mass = token
                .parse::<f64>()
                .ok()
                .filter(|mass| mass.is_finite())
                .ok_or_else(|| SpectrumError::InvalidPeak {
                    position: index + 1,
                    token: token.to_owned(),
                })?;

            peaks.insert(Mz::from(mass));
            peak_count += 1;
        }

        Ok(Self { peak_count, peaks })
    }

    /// The number of peaks parsed, duplicates included
    #[must_use]
    pub const fn peak_count(&self) -> usize {
        self.peak_count
    }

    /// The number of distinct peak masses
    #[must_use]
    pub fn distinct_peaks(&self) -> usize {
        self.peaks.len()
    }

    pub fn peaks(&self) -> impl Iterator<Item = f64> + '_ {
        self.peaks.iter().map(|&mz| mz.into())
    }

    /// Every distinct peak `p` with `|p - mass| <= tolerance`, in ascending order
    pub fn find_peaks(&self, mass: f64, tolerance: f64) -> impl Iterator<Item = Mz> + '_ {
        self.peaks
            .range(Mz::tolerance_window(mass, tolerance))
            .copied()
            .filter(move |&peak| (f64::from(peak) - mass).abs() <= tolerance)
    }
}

impl FromStr for Spectrum {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Module Tests ========================================================================================================
