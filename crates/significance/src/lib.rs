//! The statistical significance of an organism's peak hits, under a model where each peak independently lands
//! within tolerance of one of the organism's sequences

pub mod errors;
mod model;
mod rounding;
mod tail;

#[cfg(test)]
mod testing_tools;

// Local Crate Imports
pub use errors::{Result, SignificanceError};
pub use rounding::{SIGNIFICANT_FIGURES, round_sig_figs};

// Public API ==========================================================================================================

/// The parameters shared by every organism scored against one spectrum and one reference collection
///
/// The mass window is divided into `(max - min) / (2 * tolerance)` bins, the width of a single match. An organism
/// with `n` sequences then covers any given peak with probability `q = 1 - exp(-n / bins)`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MatchModel {
    peak_count: usize,
    organism_count: usize,
    bins: f64,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Significance {
    p_value: f64,
    e_value: f64,
}
