// Standard Library Imports
use std::cmp::Ordering;

// External Crate Imports
use itertools::Itertools;

// Local Crate Imports
use crate::{RankedOrganism, Scores};

// Public API ==========================================================================================================

impl Scores {
    /// Organisms with the most hits first, with ties broken alphabetically by organism name
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedOrganism> {
        self.iter()
            .map(|(organism, hits)| RankedOrganism::new(organism, hits))
            .sorted_unstable()
            .collect()
    }
}

impl RankedOrganism {
    pub fn new(organism: impl Into<String>, hits: usize) -> Self {
        Self {
            organism: organism.into(),
            hits,
        }
    }

    #[must_use]
    pub fn organism(&self) -> &str {
        &self.organism
    }

    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }
}

// NOTE: This is the ranking order, so "greater" organisms have fewer hits
impl Ord for RankedOrganism {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .hits
            .cmp(&self.hits)
            .then_with(|| self.organism.cmp(&other.organism))
    }
}

impl PartialOrd for RankedOrganism {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use crate::{Spectrum, SpectrumMatcher, testing_tools::TestCandidate};

    use super::*;

    fn ranking(ranked: &[RankedOrganism]) -> Vec<(&str, usize)> {
        ranked.iter().map(|r| (r.organism(), r.hits())).collect()
    }

    #[test]
    fn rank_by_hits_then_name() {
        let spectrum = Spectrum::parse("1000.0\t1200.0\t1400.0").unwrap();
        let matcher = SpectrumMatcher::new(&spectrum, 0.5).unwrap();
        let scores = matcher
            .match_candidates([
                TestCandidate::new("Delta", &[1_000.0]),
                TestCandidate::new("Bravo", &[1_000.0, 1_200.0]),
                TestCandidate::new("Alpha", &[1_400.0]),
                TestCandidate::new("Charlie", &[1_000.0, 1_200.0, 1_400.0]),
                TestCandidate::new("Echo", &[1_200.0]),
            ])
            .scores();

        assert_eq!(
            ranking(&scores.ranked()),
            [
                ("Charlie", 3),
                ("Bravo", 2),
                ("Alpha", 1),
                ("Delta", 1),
                ("Echo", 1)
            ]
        );
    }

    #[test]
    fn names_compare_bytewise() {
        let ranked = [
            RankedOrganism::new("bacillus subtilis", 4),
            RankedOrganism::new("Escherichia coli", 4),
            RankedOrganism::new("Bacillus subtilis", 4),
            RankedOrganism::new("Listeria monocytogenes", 9),
        ]
        .into_iter()
        .sorted()
        .collect_vec();

        assert_eq!(
            ranking(&ranked),
            [
                ("Listeria monocytogenes", 9),
                ("Bacillus subtilis", 4),
                ("Escherichia coli", 4),
                ("bacillus subtilis", 4)
            ]
        );
    }

    #[test]
    fn ranking_is_deterministic() {
        let spectrum = Spectrum::parse("1000.0\t1200.0").unwrap();
        let matcher = SpectrumMatcher::new(&spectrum, 0.5).unwrap();
        let rank = || {
            matcher
                .match_candidates((0..50).map(|i| {
                    let organism = ["Alpha", "Bravo", "Charlie", "Delta"][i % 4];
                    TestCandidate::new(organism, &[[1_000.0, 1_100.0, 1_200.0][i % 3]])
                }))
                .scores()
                .ranked()
        };

        let first = rank();
        for _ in 0..10 {
            assert_eq!(rank(), first);
        }
    }
}
