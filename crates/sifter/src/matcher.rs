// Standard Library Imports
use std::{collections::BTreeSet, rc::Rc};

// External Crate Imports
use tracing::trace;

// Local Crate Imports
use crate::{Candidate, HitTable, Mz, Result, Spectrum, SpectrumError, SpectrumMatcher};

// Public API ==========================================================================================================

impl<'s> SpectrumMatcher<'s> {
    pub fn new(spectrum: &'s Spectrum, tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(SpectrumError::InvalidTolerance(tolerance));
        }

        Ok(Self {
            spectrum,
            tolerance,
        })
    }

    #[must_use]
    pub const fn spectrum(&self) -> &'s Spectrum {
        self.spectrum
    }

    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The distinct peaks lying within tolerance of any of the candidate's masses
    pub fn matched_peaks<C: Candidate>(&self, candidate: &C) -> BTreeSet<Mz> {
        candidate
            .ion_masses()
            .flat_map(|mass| self.spectrum.find_peaks(mass, self.tolerance))
            .collect()
    }

    /// Consumes `candidates` one at a time, keeping only those that matched at least one peak
    pub fn match_candidates<C: Candidate>(&self, candidates: impl IntoIterator<Item = C>) -> HitTable<C> {
        let mut hit_table = HitTable::default();
        for candidate in candidates {
            let peaks = self.matched_peaks(&candidate);
            if peaks.is_empty() {
                continue;
            }

            trace!(
                organism = candidate.organism(),
                peaks = ?peaks.iter().map(|&mz| f64::from(mz)).collect::<Vec<_>>(),
                "candidate matched"
            );

            // NOTE: A candidate matching several peaks is shared between them, not cloned
            let candidate = Rc::new(candidate);
            for peak in peaks {
                hit_table.insert(peak, Rc::clone(&candidate));
            }
        }
        hit_table
    }
}

// Module Tests ========================================================================================================
