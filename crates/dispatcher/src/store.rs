// Standard Library Imports
use std::sync::MutexGuard;

// External Crate Imports
use chrono::{DateTime, Utc};

// Local Crate Imports
use crate::{
    JobId, JobStatus, JobStore, MemoryStore, ResultRecord, SearchJob, SearchRequest, StoreError, StoreState,
};

// Public API ==========================================================================================================

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a job with an explicit creation time, instead of the current time
    pub fn submit_at(&self, request: SearchRequest, created: DateTime<Utc>) -> Result<JobId, StoreError> {
        let mut state = self.state()?;
        state.last_id += 1;
        let id = JobId(state.last_id);
        state.jobs.insert(id, SearchJob::new(id, created, request));

        Ok(id)
    }

    /// Every job in the store, in order of their ids
    pub fn jobs(&self) -> Result<Vec<SearchJob>, StoreError> {
        Ok(self.state()?.jobs.values().cloned().collect())
    }
}

impl JobStore for MemoryStore {
    fn submit(&self, request: SearchRequest) -> Result<JobId, StoreError> {
        self.submit_at(request, Utc::now())
    }

    fn job(&self, id: JobId) -> Result<SearchJob, StoreError> {
        self.state()?.job_mut(id).cloned()
    }

    fn next_incomplete(&self) -> Result<Option<SearchJob>, StoreError> {
        let state = self.state()?;
        let next = state
            .jobs
            .values()
            .filter(|job| job.status().is_incomplete())
            .min_by_key(|job| (job.created(), job.id()));

        Ok(next.cloned())
    }

    fn mark_running(&self, id: JobId, since: DateTime<Utc>) -> Result<(), StoreError> {
        self.state()?
            .job_mut(id)?
            .transition(JobStatus::Running { since })
    }

    fn mark_failed(&self, id: JobId, reason: String) -> Result<(), StoreError> {
        self.state()?
            .job_mut(id)?
            .transition(JobStatus::Failed { reason })
    }

    fn complete(&self, id: JobId, results: Vec<ResultRecord>) -> Result<(), StoreError> {
        let mut state = self.state()?;
        state.job_mut(id)?.transition(JobStatus::Done)?;
        state.results.insert(id, results);

        Ok(())
    }

    fn results(&self, id: JobId) -> Result<Vec<ResultRecord>, StoreError> {
        let mut state = self.state()?;
        state.job_mut(id)?;

        Ok(state.results.get(&id).cloned().unwrap_or_default())
    }

    fn running_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobId>, StoreError> {
        let state = self.state()?;
        let stale = state
            .jobs
            .values()
            .filter(|job| matches!(job.status(), &JobStatus::Running { since } if since < cutoff))
            .map(SearchJob::id)
            .collect();

        Ok(stale)
    }
}

// Private Methods =====================================================================================================

impl MemoryStore {
    fn state(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl StoreState {
    fn job_mut(&mut self, id: JobId) -> Result<&mut SearchJob, StoreError> {
        self.jobs.get_mut(&id).ok_or(StoreError::NotFound(id))
    }
}

// Module Tests ========================================================================================================
