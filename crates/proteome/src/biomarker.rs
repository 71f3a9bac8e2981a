// Standard Library Imports
use std::{iter, str::FromStr};

// External Crate Imports
use sifter::Candidate;

// Local Crate Imports
use crate::{Biomarker, FilteredSequence, IonMasses, IonMode, errors::UnknownIonMode};

// Constants ===========================================================================================================

/// The mass gained (or lost) on protonation (or deprotonation), in Daltons
pub const PROTON_MASS: f64 = 1.007_825;

/// The mass lost when the initiator methionine is cleaved from a protein's N-terminus
pub const METHIONINE_RESIDUE_MASS: f64 = 131.040_4;

const INITIATOR_METHIONINE: char = 'M';

// Public API ==========================================================================================================

impl IonMode {
    #[must_use]
    pub const fn ionize(self, mass: f64) -> f64 {
        match self {
            Self::Positive => mass + PROTON_MASS,
            Self::Negative => mass - PROTON_MASS,
        }
    }
}

impl FromStr for IonMode {
    type Err = UnknownIonMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Self::Positive),
            "negative" | "neg" | "-" => Ok(Self::Negative),
            _ => Err(UnknownIonMode(s.to_owned())),
        }
    }
}

impl IonMasses {
    /// Ionizes a sequence, yielding a second, demethionylated mass when the sequence starts with methionine
    #[must_use]
    pub fn new(sequence: &FilteredSequence, mode: IonMode) -> Self {
        let primary = mode.ionize(sequence.mass());
        let demethionylated = sequence
            .residues()
            .starts_with(INITIATOR_METHIONINE)
            .then(|| primary - METHIONINE_RESIDUE_MASS);

        Self {
            primary,
            demethionylated,
        }
    }

    #[must_use]
    pub const fn primary(&self) -> f64 {
        self.primary
    }

    #[must_use]
    pub const fn demethionylated(&self) -> Option<f64> {
        self.demethionylated
    }

    pub fn iter(self) -> impl Iterator<Item = f64> {
        iter::once(self.primary).chain(self.demethionylated)
    }
}

impl Biomarker {
    #[must_use]
    pub fn new(sequence: FilteredSequence, mode: IonMode) -> Self {
        let ion_masses = IonMasses::new(&sequence, mode);
        Self {
            sequence,
            ion_masses,
        }
    }

    #[must_use]
    pub const fn sequence(&self) -> &FilteredSequence {
        &self.sequence
    }

    #[must_use]
    pub const fn ion_masses(&self) -> IonMasses {
        self.ion_masses
    }
}

impl Candidate for Biomarker {
    fn organism(&self) -> &str {
        self.sequence.organism()
    }

    fn ion_masses(&self) -> impl Iterator<Item = f64> + '_ {
        self.ion_masses.iter()
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;

    use crate::{ResidueDatabase, SequenceFilter, SequenceRecord};

    use super::*;

    fn biomarker(residues: &str, mode: IonMode) -> Biomarker {
        let db = ResidueDatabase::default();
        let record = SequenceRecord::new(
            "test OS=Escherichia coli OX=562".to_owned(),
            residues.to_owned(),
        );
        let sequence = SequenceFilter::new(&db, 0.0, f64::INFINITY)
            .accept(record)
            .unwrap();
        Biomarker::new(sequence, mode)
    }

    #[test]
    fn positive_mode() {
        let ions = biomarker("KKKKRRR", IonMode::Positive).ion_masses();
        assert_float_absolute_eq!(ions.primary(), 999.701_575);
        assert_eq!(ions.demethionylated(), None);
    }

    #[test]
    fn negative_mode() {
        let ions = biomarker("KKKKRRR", IonMode::Negative).ion_masses();
        assert_float_absolute_eq!(ions.primary(), 997.685_925);
        assert_eq!(ions.demethionylated(), None);
    }

    #[test]
    fn initiator_methionine() {
        let marker = biomarker("MKKKKRRR", IonMode::Positive);
        let ions = marker.ion_masses();
        assert_float_absolute_eq!(ions.primary(), 1_130.742_059);
        assert_float_absolute_eq!(ions.demethionylated().unwrap(), 999.701_659);

        let masses: Vec<_> = Candidate::ion_masses(&marker).collect();
        assert_eq!(masses.len(), 2);
        assert_float_absolute_eq!(masses[0], ions.primary());
        assert_float_absolute_eq!(masses[1], ions.demethionylated().unwrap());

        // Only a leading methionine counts
        let ions = biomarker("KKKKMRRR", IonMode::Positive).ion_masses();
        assert_eq!(ions.demethionylated(), None);
    }

    #[test]
    fn candidate_organism() {
        let marker = biomarker("GASPVTLNDK", IonMode::Positive);
        assert_eq!(Candidate::organism(&marker), "Escherichia coli");
        assert_eq!(Candidate::ion_masses(&marker).count(), 1);
    }

    #[test]
    fn parse_ion_mode() {
        assert_eq!("Positive".parse(), Ok(IonMode::Positive));
        assert_eq!("negative".parse(), Ok(IonMode::Negative));
        assert_eq!(" NEG ".parse(), Ok(IonMode::Negative));
        assert_eq!("+".parse(), Ok(IonMode::Positive));

        let error = "neutral".parse::<IonMode>().unwrap_err();
        assert_eq!(error.to_string(), r#"unknown ion mode "neutral""#);
    }

    #[test]
    fn display_ion_mode() {
        assert_eq!(IonMode::Positive.to_string(), "Positive");
        assert_eq!(IonMode::Negative.to_string(), "Negative");
        assert_eq!(IonMode::default(), IonMode::Positive);
    }
}
