//! Matching experimental mass spectra against theoretical candidate masses, then scoring and ranking the organisms
//! those candidates came from

pub mod errors;
mod matcher;
mod ordered_floats;
mod peaks;
mod ranker;
mod scores;
mod tolerance_window;

#[cfg(test)]
mod testing_tools;

// Standard Library Imports
use std::{
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

// External Crate Imports
use ahash::HashMap;

// Local Crate Imports
pub use errors::{Result, SpectrumError};
pub use ordered_floats::Mz;

// Public API ==========================================================================================================

/// Anything with an organism of origin and one or more theoretical masses that could show up as a peak
pub trait Candidate {
    fn organism(&self) -> &str;

    fn ion_masses(&self) -> impl Iterator<Item = f64> + '_;
}

/// An experimental peak list, indexed for range queries
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Spectrum {
    peak_count: usize,
    peaks: BTreeSet<Mz>,
}

#[derive(Copy, Clone, Debug)]
pub struct SpectrumMatcher<'s> {
    spectrum: &'s Spectrum,
    tolerance: f64,
}

/// Every peak that matched at least one candidate, mapped to the candidates it matched
#[derive(Clone, PartialEq, Debug)]
pub struct HitTable<C>(BTreeMap<Mz, Vec<Rc<C>>>);

/// The number of distinct peaks hit by each organism
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Scores(HashMap<String, usize>);

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RankedOrganism {
    organism: String,
    hits: usize,
}

// NOTE: Deriving this would require `C: Default`
impl<C> Default for HitTable<C> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}
