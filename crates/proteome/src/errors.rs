// Standard Library Imports
use std::{io, path::PathBuf};

// External Crate Imports
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = ProteomeError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum ProteomeError {
    #[diagnostic(help("check that the reference collection exists and is readable"))]
    #[error("failed to open the reference collection at {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line} of the reference collection")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[diagnostic(help("every block of residues must follow a header line starting with '>'"))]
    #[error("found residues on line {line} before any FASTA header")]
    OrphanResidues { line: usize },
}

impl ProteomeError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();

        Self::Open { path, source }
    }

    pub(crate) const fn read(line: usize, source: io::Error) -> Self {
        Self::Read { line, source }
    }
}

// NOTE: This is kept separate from `ProteomeError`, since it's only ever returned by `IonMode::from_str` and needs to
// be `Clone + Eq` for command-line parsers that hold on to their errors
#[derive(Debug, Diagnostic, Clone, Eq, PartialEq, Error)]
#[diagnostic(help("the supported ion modes are \"Positive\" and \"Negative\""))]
#[error("unknown ion mode {0:?}")]
pub struct UnknownIonMode(pub(crate) String);
