// Local Crate Imports
use crate::{FilteredSequence, SequenceRecord};

// Public API ==========================================================================================================

impl SequenceRecord {
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn residues(&self) -> &str {
        &self.residues
    }
}

impl FilteredSequence {
    #[must_use]
    pub const fn record(&self) -> &SequenceRecord {
        &self.record
    }

    #[must_use]
    pub fn organism(&self) -> &str {
        &self.organism
    }

    /// The monoisotopic mass of the neutral protein, in Daltons
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    #[must_use]
    pub fn residues(&self) -> &str {
        self.record.residues()
    }
}
