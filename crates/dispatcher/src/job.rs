// External Crate Imports
use chrono::{DateTime, Utc};

// Local Crate Imports
use crate::{JobId, JobStatus, ResultRecord, SearchJob, SearchRequest, StoreError};

// Public API ==========================================================================================================

impl SearchJob {
    #[must_use]
    pub const fn new(id: JobId, created: DateTime<Utc>, request: SearchRequest) -> Self {
        Self {
            id,
            created,
            status: JobStatus::Incomplete,
            request,
        }
    }

    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    #[must_use]
    pub const fn status(&self) -> &JobStatus {
        &self.status
    }

    #[must_use]
    pub const fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub(crate) fn transition(&mut self, next: JobStatus) -> Result<(), StoreError> {
        if !self.status.can_become(&next) {
            return Err(StoreError::IllegalTransition {
                job: self.id,
                from: self.status.clone(),
                to: next,
            });
        }

        self.status = next;
        Ok(())
    }
}

impl JobStatus {
    #[must_use]
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete)
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }

    #[must_use]
    pub const fn can_become(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Incomplete, Self::Running { .. } | Self::Failed { .. })
                | (Self::Running { .. }, Self::Done | Self::Failed { .. })
        )
    }
}

impl ResultRecord {
    #[must_use]
    pub const fn new(job: JobId, organism_name: String, matching_hit: usize, p_value: f64, e_value: f64) -> Self {
        Self {
            job,
            organism_name,
            matching_hit,
            p_value,
            e_value,
        }
    }

    #[must_use]
    pub const fn job(&self) -> JobId {
        self.job
    }

    #[must_use]
    pub fn organism_name(&self) -> &str {
        &self.organism_name
    }

    /// The number of distinct peaks matched by this organism
    #[must_use]
    pub const fn matching_hit(&self) -> usize {
        self.matching_hit
    }

    #[must_use]
    pub const fn p_value(&self) -> f64 {
        self.p_value
    }

    #[must_use]
    pub const fn e_value(&self) -> f64 {
        self.e_value
    }
}

// Module Tests ========================================================================================================

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proteome::IonMode;

    use super::*;

    fn job() -> SearchJob {
        let request = SearchRequest {
            owner: "alice".to_owned(),
            title: "Unknown isolate".to_owned(),
            query: "1000.0\t1200.0".to_owned(),
            min_mass: 500.0,
            max_mass: 2_000.0,
            mass_tolerance: 0.5,
            mode: IonMode::Positive,
            database: "Bacteria".to_owned(),
        };
        SearchJob::new(JobId(1), Utc.timestamp_opt(0, 0).unwrap(), request)
    }

    fn running() -> JobStatus {
        JobStatus::Running {
            since: Utc.timestamp_opt(60, 0).unwrap(),
        }
    }

    fn failed() -> JobStatus {
        JobStatus::Failed {
            reason: "expired".to_owned(),
        }
    }

    #[test]
    fn legal_transitions() {
        let mut job = job();
        assert!(job.status().is_incomplete());
        job.transition(running()).unwrap();
        job.transition(JobStatus::Done).unwrap();
        assert!(job.status().is_finished());

        let mut job = self::job();
        job.transition(failed()).unwrap();
        assert!(job.status().is_finished());

        let mut job = self::job();
        job.transition(running()).unwrap();
        job.transition(failed()).unwrap();
    }

    #[test]
    fn illegal_transitions() {
        let all = [JobStatus::Incomplete, running(), JobStatus::Done, failed()];
        let legal = [
            (JobStatus::Incomplete, running()),
            (JobStatus::Incomplete, failed()),
            (running(), JobStatus::Done),
            (running(), failed()),
        ];
        for from in &all {
            for to in &all {
                let expected = legal.contains(&(from.clone(), to.clone()));
                assert_eq!(from.can_become(to), expected, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn rejected_transitions_leave_status_unchanged() {
        let mut job = job();
        job.transition(running()).unwrap();
        job.transition(JobStatus::Done).unwrap();

        let error = job.transition(running()).unwrap_err();
        assert_eq!(job.status(), &JobStatus::Done);
        assert_eq!(
            error.to_string(),
            "job 1 can't move from Done to Running (since 1970-01-01 00:01:00 UTC)"
        );
    }
}
