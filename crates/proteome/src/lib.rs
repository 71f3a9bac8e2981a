//! Reference protein collections, and the biomarker masses that can be derived from them

mod biomarker;
mod census;
pub mod errors;
mod fasta;
mod filter;
mod organism;
mod record;
pub mod residue_database;

#[cfg(test)]
mod testing_tools;

// External Crate Imports
use ahash::HashMap;
use derive_more::{Constructor, Display};
use rust_decimal::Decimal;

// Local Crate Imports
pub use biomarker::{METHIONINE_RESIDUE_MASS, PROTON_MASS};
pub use errors::{ProteomeError, Result};
pub use fasta::FastaReader;
pub use organism::organism_name;
pub use residue_database::ResidueDatabase;

// Public API ==========================================================================================================

/// A single entry of a reference collection, exactly as it was read
#[derive(Clone, Eq, PartialEq, Hash, Debug, Constructor)]
pub struct SequenceRecord {
    description: String,
    residues: String,
}

/// A [`SequenceRecord`] that has passed a [`SequenceFilter`], along with the properties computed along the way
#[derive(Clone, PartialEq, Debug)]
pub struct FilteredSequence {
    record: SequenceRecord,
    organism: String,
    mass: f64,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Display)]
pub enum IonMode {
    #[default]
    Positive,
    Negative,
}

/// The one or two ion masses a sequence could be observed at under a given [`IonMode`]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct IonMasses {
    primary: f64,
    demethionylated: Option<f64>,
}

/// A filtered sequence paired with its [`IonMasses`], ready to be matched against a spectrum
#[derive(Clone, PartialEq, Debug)]
pub struct Biomarker {
    sequence: FilteredSequence,
    ion_masses: IonMasses,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Copy, Clone, Debug)]
pub struct SequenceFilter<'r> {
    residue_db: &'r ResidueDatabase,
    lower_bound: f64,
    upper_bound: f64,
}

/// A lazy iterator of [`FilteredSequence`]s that keeps an [`OrganismCensus`] of everything it has let through
#[derive(Clone, Debug)]
pub struct Filtered<'r, I> {
    filter: SequenceFilter<'r>,
    records: I,
    census: OrganismCensus,
}

/// The number of surviving sequences for each organism in a filtered collection
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct OrganismCensus(HashMap<String, usize>);

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Clone, Eq, PartialEq, Debug)]
struct Residue {
    name: String,
    mass: Decimal,
}
