// Standard Library Imports
use std::rc::Rc;

// External Crate Imports
use ahash::{HashSet, HashSetExt};

// Local Crate Imports
use crate::{Candidate, HitTable, Mz, Scores};

// Public API ==========================================================================================================

impl<C> HitTable<C> {
    /// The number of distinct peaks that matched at least one candidate
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn peaks(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.keys().map(|&mz| mz.into())
    }

    #[must_use]
    pub fn matches(&self, peak: f64) -> Option<&[Rc<C>]> {
        self.0.get(&Mz::from(peak)).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &[Rc<C>])> + '_ {
        self.0
            .iter()
            .map(|(&mz, candidates)| (mz.into(), candidates.as_slice()))
    }

    pub(crate) fn insert(&mut self, peak: Mz, candidate: Rc<C>) {
        self.0.entry(peak).or_default().push(candidate);
    }
}

impl<C: Candidate> HitTable<C> {
    /// Every organism gains a single hit per peak, however many of its candidates matched that peak
    #[must_use]
    pub fn scores(&self) -> Scores {
        let mut scores = Scores::default();
        for candidates in self.0.values() {
            let mut organisms = HashSet::with_capacity(candidates.len());
            for candidate in candidates {
                let organism = candidate.organism();
                if organisms.insert(organism) {
                    scores.add_hit(organism);
                }
            }
        }
        scores
    }
}

impl Scores {
    /// The number of distinct peaks hit by `organism`, which is zero for organisms without any hits
    #[must_use]
    pub fn hits(&self, organism: &str) -> usize {
        self.0.get(organism).copied().unwrap_or_default()
    }

    /// The number of organisms with at least one hit
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.0.iter().map(|(organism, &hits)| (organism.as_str(), hits))
    }

    fn add_hit(&mut self, organism: &str) {
        if let Some(hits) = self.0.get_mut(organism) {
            *hits += 1;
        } else {
            self.0.insert(organism.to_owned(), 1);
        }
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use crate::{Spectrum, SpectrumMatcher, testing_tools::TestCandidate};

    use super::*;

    fn scores(peaks: &str, candidates: &[(&'static str, &[f64])]) -> (Scores, usize) {
        let spectrum = Spectrum::parse(peaks).unwrap();
        let matcher = SpectrumMatcher::new(&spectrum, 0.5).unwrap();
        let hit_table = matcher.match_candidates(
            candidates
                .iter()
                .map(|&(organism, masses)| TestCandidate::new(organism, masses)),
        );
        (hit_table.scores(), spectrum.peak_count())
    }

    #[test]
    fn one_hit_per_peak_per_organism() {
        let (scores, _) = scores(
            "1000.0\t1200.0",
            &[
                ("A", &[999.7]),
                ("A", &[1_000.2]),
                ("B", &[1_199.7]),
            ],
        );
        assert_eq!(scores.hits("A"), 1);
        assert_eq!(scores.hits("B"), 1);
        assert_eq!(scores.hits("C"), 0);
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn shared_peaks_count_for_everyone() {
        let (scores, _) = scores(
            "1000.0\t1200.0\t1400.0",
            &[
                ("A", &[999.7]),
                ("B", &[1_000.1, 1_400.3]),
                ("A", &[1_200.0]),
                ("C", &[1_600.0]),
            ],
        );
        let mut hits: Vec<_> = scores.iter().collect();
        hits.sort_unstable();
        assert_eq!(hits, [("A", 2), ("B", 2)]);
    }

    #[test]
    fn hits_never_exceed_peak_count() {
        // Both organisms match every distinct peak, and the duplicated peak is only counted once
        let candidates: &[(&'static str, &[f64])] = &[
            ("A", &[1_000.0, 1_000.4, 1_000.8]),
            ("A", &[1_000.2]),
            ("B", &[1_000.4]),
        ];
        let (scores, peak_count) = scores("1000.0\t1000.4\t1000.4\t1000.8", candidates);
        assert_eq!(peak_count, 4);
        assert!(scores.iter().all(|(_, hits)| hits <= peak_count));
        assert_eq!(scores.hits("A"), 3);
        assert_eq!(scores.hits("B"), 3);
    }

    #[test]
    fn nothing_matched() {
        let (scores, _) = scores("1000.0", &[("A", &[2_000.0])]);
        assert!(scores.is_empty());
    }
}
