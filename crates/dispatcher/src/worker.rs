// Standard Library Imports
use std::{
    sync::{Mutex, MutexGuard, TryLockError},
    time::Instant,
};

// External Crate Imports
use chrono::{DateTime, TimeDelta, Utc};
use proteome::ResidueDatabase;
use sifter::Spectrum;
use tracing::{debug, error, info, warn};

// Local Crate Imports
use crate::{
    Drain, DrainLock, DrainSummary, JobId, JobRejection, JobStore, JobWorker, ReferenceLibrary, SearchJob,
    SearchRequest, errors::Result, pipeline,
};

// Public API ==========================================================================================================

/// The lock shared by every [`JobWorker`] created with [`JobWorker::new`]
pub static DRAIN_LOCK: DrainLock = DrainLock::new();

impl DrainLock {
    #[must_use]
    pub const fn new() -> Self {
        Self(Mutex::new(()))
    }

    /// Takes the lock if nobody else holds it, without ever waiting
    pub fn try_acquire(&self) -> Option<MutexGuard<'_, ()>> {
        match self.0.try_lock() {
            Ok(guard) => Some(guard),
            // NOTE: The lock guards no data, so a drain that panicked can't have left anything inconsistent
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

impl<S: JobStore, L: ReferenceLibrary> JobWorker<'static, S, L> {
    pub fn new(store: S, library: L) -> Self {
        Self::with_lock(store, library, &DRAIN_LOCK)
    }
}

impl<'l, S: JobStore, L: ReferenceLibrary> JobWorker<'l, S, L> {
    pub fn with_lock(store: S, library: L, lock: &'l DrainLock) -> Self {
        Self {
            store,
            library,
            residue_db: ResidueDatabase::default(),
            lock,
        }
    }

    #[must_use]
    pub fn with_residue_db(self, residue_db: ResidueDatabase) -> Self {
        Self { residue_db, ..self }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Drains every incomplete job from the store, unless another drain is already underway
    ///
    /// Jobs are processed one at a time, oldest first. A job that fails validation is marked as failed and the drain
    /// moves on, but any other error stops the drain and is returned, leaving the job it happened in marked as
    /// running. Once the queue looks empty, the lock is released and the queue checked once more, so a job submitted
    /// just before that release is never stranded.
    pub fn run_once(&self) -> Result<Drain> {
        let Some(mut guard) = self.lock.try_acquire() else {
            debug!("another drain is already in progress");
            return Ok(Drain::AlreadyRunning);
        };

        let mut summary = DrainSummary::default();
        loop {
            self.drain(&mut summary)?;
            drop(guard);

            if !self.store.has_incomplete()? {
                break;
            }
            // NOTE: If this fails, whoever holds the lock will also re-check the queue before they finish
            match self.lock.try_acquire() {
                Some(next_guard) => guard = next_guard,
                None => break,
            }
        }

        Ok(Drain::Finished(summary))
    }

    /// Fails every job that has been running for longer than `max_age`, returning `None` without doing anything if
    /// a drain is in progress
    pub fn expire_stale(&self, max_age: TimeDelta) -> Result<Option<Vec<JobId>>> {
        let Some(_guard) = self.lock.try_acquire() else {
            return Ok(None);
        };

        let cutoff = Utc::now()
            .checked_sub_signed(max_age)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let expired = self.store.running_before(cutoff)?;
        for &id in &expired {
            warn!(job = %id, %max_age, "expiring a search that has been running for too long");
            self.store
                .mark_failed(id, format!("search was still running after {max_age}"))?;
        }

        Ok(Some(expired))
    }
}

impl DrainSummary {
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.failed
    }
}

// Private Methods =====================================================================================================

impl<S: JobStore, L: ReferenceLibrary> JobWorker<'_, S, L> {
    fn drain(&self, summary: &mut DrainSummary) -> Result<()> {
        while let Some(job) = self.store.next_incomplete()? {
            match self.validate(job.request()) {
                Ok(spectrum) => {
                    self.process(&job, &spectrum)?;
                    summary.completed += 1;
                }
                Err(rejection) => {
                    warn!(job = %job.id(), title = job.request().title, %rejection, "rejecting search");
                    self.store.mark_failed(job.id(), rejection.to_string())?;
                    summary.failed += 1;
                }
            }
        }
        Ok(())
    }

    fn validate(&self, request: &SearchRequest) -> Result<Spectrum, JobRejection> {
        let spectrum = Spectrum::parse(&request.query)?;

        let SearchRequest {
            min_mass: min,
            max_mass: max,
            mass_tolerance,
            ..
        } = *request;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(JobRejection::InvalidMassWindow { min, max });
        }
        if !(mass_tolerance.is_finite() && mass_tolerance > 0.0) {
            return Err(JobRejection::InvalidTolerance(mass_tolerance));
        }
        if !self.library.contains(&request.database) {
            return Err(JobRejection::UnknownDatabase(request.database.clone()));
        }

        Ok(spectrum)
    }

    fn process(&self, job: &SearchJob, spectrum: &Spectrum) -> Result<()> {
        let id = job.id();
        let request = job.request();
        let started = Instant::now();

        self.store.mark_running(id, Utc::now())?;
        info!(
            job = %id,
            owner = request.owner,
            title = request.title,
            database = request.database,
            "starting search"
        );

        let results = pipeline::search(id, request, spectrum, &self.library, &self.residue_db)
            .inspect_err(|e| error!(job = %id, error = %e, "search failed and will be left running"))?;
        let organisms = results.len();
        self.store.complete(id, results)?;

        info!(job = %id, organisms, elapsed = ?started.elapsed(), "finished search");
        Ok(())
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_is_exclusive() {
        let lock = DrainLock::new();
        let guard = lock.try_acquire();
        assert!(guard.is_some());
        assert!(lock.try_acquire().is_none());
        drop(guard);
        assert!(lock.try_acquire().is_some());
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let lock = DrainLock::new();
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = lock.try_acquire();
                    panic!("drain panicked");
                })
                .join();
        });
        assert!(lock.try_acquire().is_some());
    }
}
