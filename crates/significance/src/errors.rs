// External Crate Imports
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = SignificanceError> = std::result::Result<T, E>;

#[derive(Clone, PartialEq, Debug, Diagnostic, Error)]
pub enum SignificanceError {
    #[diagnostic(help("the mass window needs min <= max and a positive, finite tolerance"))]
    #[error("invalid mass window {min}..={max} Da with a tolerance of {tolerance} Da")]
    InvalidWindow { min: f64, max: f64, tolerance: f64 },

    #[diagnostic(help("an organism can hit each peak at most once"))]
    #[error("{hits} hits were reported against a spectrum of only {peaks} peaks")]
    TooManyHits { hits: usize, peaks: usize },

    #[diagnostic(help("hits can only come from sequences that passed the mass filter"))]
    #[error("{hits} hits were reported for an organism without any sequences")]
    HitsWithoutSequences { hits: usize },
}
