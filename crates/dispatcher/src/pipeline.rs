// External Crate Imports
use itertools::process_results;
use proteome::{Biomarker, ResidueDatabase, SequenceFilter};
use sifter::{Spectrum, SpectrumMatcher};
use significance::MatchModel;
use tracing::debug;

// Local Crate Imports
use crate::{JobId, ReferenceLibrary, ResultRecord, SearchRequest, WorkerError, errors::Result};

// Public API ==========================================================================================================

/// Scores every organism in the requested database against `spectrum`, returning one ranked and rounded
/// [`ResultRecord`] for each organism that matched at least one peak
///
/// The reference collection is streamed through the filter and matcher, so it's never held in memory all at once.
pub fn search(
    job: JobId,
    request: &SearchRequest,
    spectrum: &Spectrum,
    library: &impl ReferenceLibrary,
    residue_db: &ResidueDatabase,
) -> Result<Vec<ResultRecord>> {
    let records = library
        .open(&request.database)?
        .ok_or_else(|| WorkerError::MissingDatabase(request.database.clone()))?;

    let matcher = SpectrumMatcher::new(spectrum, request.mass_tolerance)?;
    let mut filtered = SequenceFilter::new(residue_db, request.min_mass, request.max_mass).apply(records);
    let hit_table = process_results(filtered.by_ref(), |sequences| {
        matcher.match_candidates(sequences.map(|sequence| Biomarker::new(sequence, request.mode)))
    })?;
    let census = filtered.into_census();

    let model = MatchModel::new(
        spectrum.peak_count(),
        census.organisms(),
        request.min_mass..=request.max_mass,
        request.mass_tolerance,
    )?;
    debug!(
        %job,
        peaks = spectrum.peak_count(),
        matched_peaks = hit_table.len(),
        organisms = census.organisms(),
        sequences = census.total(),
        bins = model.bins(),
        "matched spectrum against reference database"
    );

    hit_table
        .scores()
        .ranked()
        .into_iter()
        .map(|organism| {
            let sequences = census.sequences(organism.organism());
            let significance = model.significance(organism.hits(), sequences)?.rounded();

            Ok(ResultRecord::new(
                job,
                organism.organism().to_owned(),
                organism.hits(),
                significance.p_value(),
                significance.e_value(),
            ))
        })
        .collect()
}

// Module Tests ========================================================================================================
