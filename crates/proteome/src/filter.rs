// External Crate Imports
use tracing::debug;

// Local Crate Imports
use crate::{
    Filtered, FilteredSequence, OrganismCensus, ResidueDatabase, Result, SequenceFilter, SequenceRecord,
    organism::organism_name,
};

// Public API ==========================================================================================================

impl<'r> SequenceFilter<'r> {
    /// Keeps sequences whose monoisotopic mass falls within `lower_bound..=upper_bound` Daltons
    #[must_use]
    pub const fn new(residue_db: &'r ResidueDatabase, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            residue_db,
            lower_bound,
            upper_bound,
        }
    }

    /// Returns `None` for records that aren't candidates: those containing unsupported residues, those with a mass
    /// out of bounds, and those without any organism tag. None of these are errors.
    #[must_use]
    pub fn accept(&self, record: SequenceRecord) -> Option<FilteredSequence> {
        let Some(mass) = self.residue_db.monoisotopic_mass(record.residues()) else {
            debug!(
                description = record.description(),
                "skipping sequence with unsupported residues"
            );
            return None;
        };

        if !(self.lower_bound..=self.upper_bound).contains(&mass) {
            return None;
        }

        let Some(organism) = organism_name(record.description()) else {
            debug!(
                description = record.description(),
                "skipping sequence without an organism tag"
            );
            return None;
        };

        Some(FilteredSequence {
            record,
            organism,
            mass,
        })
    }

    pub fn apply<I>(self, records: I) -> Filtered<'r, I::IntoIter>
    where
        I: IntoIterator<Item = Result<SequenceRecord>>,
    {
        Filtered {
            filter: self,
            records: records.into_iter(),
            census: OrganismCensus::default(),
        }
    }
}

impl<I> Filtered<'_, I> {
    /// The organisms let through so far. This is only complete once the iterator has been exhausted.
    #[must_use]
    pub const fn census(&self) -> &OrganismCensus {
        &self.census
    }

    #[must_use]
    pub fn into_census(self) -> OrganismCensus {
        self.census
    }
}

impl<I> Iterator for Filtered<'_, I>
where
    I: Iterator<Item = Result<SequenceRecord>>,
{
    type Item = Result<FilteredSequence>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.records.next()? {
                Ok(record) => {
                    if let Some(sequence) = self.filter.accept(record) {
                        self.census.record(sequence.organism());
                        return Some(Ok(sequence));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

// Module Tests ========================================================================================================
