// External Crate Imports
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = SpectrumError> = std::result::Result<T, E>;

#[derive(Clone, PartialEq, Debug, Diagnostic, Error)]
pub enum SpectrumError {
    #[diagnostic(help("a spectrum needs at least one peak"))]
    #[error("the spectrum contains no peaks")]
    Empty,

    #[diagnostic(help("peaks must be decimal numbers separated by tab characters"))]
    #[error("peak {position} ({token:?}) is not a valid mass")]
    InvalidPeak { position: usize, token: String },

    #[diagnostic(help("the mass tolerance must be a positive, finite number of Daltons"))]
    #[error("invalid mass tolerance {0}")]
    InvalidTolerance(f64),
}
