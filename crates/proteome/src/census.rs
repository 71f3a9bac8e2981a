// Local Crate Imports
use crate::OrganismCensus;

// Public API ==========================================================================================================

impl OrganismCensus {
    pub(crate) fn record(&mut self, organism: &str) {
        if let Some(count) = self.0.get_mut(organism) {
            *count += 1;
        } else {
            self.0.insert(organism.to_owned(), 1);
        }
    }

    /// The number of filtered sequences belonging to `organism`, which is zero for organisms never seen
    #[must_use]
    pub fn sequences(&self, organism: &str) -> usize {
        self.0.get(organism).copied().unwrap_or_default()
    }

    /// The number of distinct organisms with at least one filtered sequence
    #[must_use]
    pub fn organisms(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(organism, &count)| (organism.as_str(), count))
    }
}

impl<S: AsRef<str>> FromIterator<S> for OrganismCensus {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut census = Self::default();
        for organism in iter {
            census.record(organism.as_ref());
        }
        census
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_sequences() {
        let census: OrganismCensus = ["Escherichia coli", "Bacillus subtilis", "Escherichia coli"]
            .into_iter()
            .collect();

        assert_eq!(census.sequences("Escherichia coli"), 2);
        assert_eq!(census.sequences("Bacillus subtilis"), 1);
        assert_eq!(census.sequences("Thermus thermophilus"), 0);
        assert_eq!(census.organisms(), 2);
        assert_eq!(census.total(), 3);
        assert!(!census.is_empty());

        let mut counts: Vec<_> = census.iter().collect();
        counts.sort_unstable();
        assert_eq!(counts, [("Bacillus subtilis", 1), ("Escherichia coli", 2)]);
    }

    #[test]
    fn empty_census() {
        let census = OrganismCensus::default();
        assert!(census.is_empty());
        assert_eq!(census.organisms(), 0);
        assert_eq!(census.total(), 0);
        assert_eq!(census.sequences("Escherichia coli"), 0);
    }
}
