// External Crate Imports
use miette::Diagnostic;
use proteome::ProteomeError;
use sifter::SpectrumError;
use significance::SignificanceError;
use thiserror::Error;

// Local Crate Imports
use crate::{JobId, JobStatus};

pub type Result<T, E = WorkerError> = std::result::Result<T, E>;

#[derive(Clone, PartialEq, Debug, Diagnostic, Error)]
pub enum StoreError {
    #[error("no job with the id {0} exists")]
    NotFound(JobId),

    #[diagnostic(help("jobs only move from Incomplete, to Running, then to Done or Failed"))]
    #[error("job {job} can't move from {from} to {to}")]
    IllegalTransition {
        job: JobId,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("the job store was left in an inconsistent state by a thread that panicked")]
    Poisoned,
}

/// A reason for failing a job before it ever starts running
#[derive(Clone, PartialEq, Debug, Diagnostic, Error)]
pub enum JobRejection {
    #[error("invalid spectrum: {0}")]
    InvalidSpectrum(#[from] SpectrumError),

    #[error("invalid mass window: the minimum mass of {min} Da must not exceed the maximum mass of {max} Da")]
    InvalidMassWindow { min: f64, max: f64 },

    #[error("invalid mass tolerance of {0} Da: it must be positive and finite")]
    InvalidTolerance(f64),

    #[error("unknown reference database {0:?}")]
    UnknownDatabase(String),
}

#[derive(Debug, Diagnostic, Error)]
pub enum WorkerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Proteome(#[from] ProteomeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Spectrum(#[from] SpectrumError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Significance(#[from] SignificanceError),

    #[diagnostic(help("was the database removed from the catalog while the search was queued?"))]
    #[error("the reference database {0:?} is no longer available")]
    MissingDatabase(String),
}
