//! Queuing organism-identification searches, and draining that queue one search at a time

pub mod catalog;
pub mod errors;
mod job;
mod pipeline;
mod store;
mod worker;

#[cfg(test)]
mod testing_tools;

// Standard Library Imports
use std::{
    collections::BTreeMap,
    io::BufRead,
    path::PathBuf,
    sync::{Arc, Mutex},
};

// External Crate Imports
use chrono::{DateTime, TimeDelta, Utc};
use derive_more::{Display, From};
use proteome::{FastaReader, IonMode, ResidueDatabase};

// Local Crate Imports
pub use errors::{JobRejection, StoreError, WorkerError};
pub use worker::DRAIN_LOCK;

// Public API ==========================================================================================================

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From)]
pub struct JobId(u64);

/// Everything a producer supplies when asking for a spectrum to be identified
#[derive(Clone, PartialEq, Debug)]
pub struct SearchRequest {
    pub owner: String,
    pub title: String,
    /// Tab-separated peak masses, in Daltons
    pub query: String,
    pub min_mass: f64,
    pub max_mass: f64,
    pub mass_tolerance: f64,
    pub mode: IonMode,
    /// The name of a reference database, as listed in a [`ReferenceLibrary`]
    pub database: String,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SearchJob {
    id: JobId,
    created: DateTime<Utc>,
    status: JobStatus,
    request: SearchRequest,
}

/// Where a job is in its lifecycle, which only ever moves forward:
///
/// ```text
/// Incomplete ──> Running ──> Done
///      │            │
///      └────────────┴──────> Failed
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Display)]
pub enum JobStatus {
    Incomplete,
    #[display("Running (since {since})")]
    Running { since: DateTime<Utc> },
    Done,
    #[display("Failed ({reason})")]
    Failed { reason: String },
}

/// A single organism's row of a finished job's results
#[derive(Clone, PartialEq, Debug)]
pub struct ResultRecord {
    job: JobId,
    organism_name: String,
    matching_hit: usize,
    p_value: f64,
    e_value: f64,
}

/// Shared storage for jobs and their results
///
/// Every method must be atomic with respect to every other, since producers and the worker call into the store
/// concurrently. In particular, [`JobStore::complete`] must record a job's results and mark it as done in a single
/// step, so a job is never seen as done without its results (or with its results, but not done).
pub trait JobStore {
    fn submit(&self, request: SearchRequest) -> Result<JobId, StoreError>;

    fn job(&self, id: JobId) -> Result<SearchJob, StoreError>;

    /// The incomplete job created first, with ties broken by the lowest [`JobId`]
    fn next_incomplete(&self) -> Result<Option<SearchJob>, StoreError>;

    fn has_incomplete(&self) -> Result<bool, StoreError> {
        Ok(self.next_incomplete()?.is_some())
    }

    fn mark_running(&self, id: JobId, since: DateTime<Utc>) -> Result<(), StoreError>;

    fn mark_failed(&self, id: JobId, reason: String) -> Result<(), StoreError>;

    fn complete(&self, id: JobId, results: Vec<ResultRecord>) -> Result<(), StoreError>;

    fn results(&self, id: JobId) -> Result<Vec<ResultRecord>, StoreError>;

    /// Every job that started running before `cutoff`, and still hasn't finished
    fn running_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobId>, StoreError>;
}

/// A thread-safe [`JobStore`] that lives entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

/// A lookup from reference database names to the FASTA collections behind them
pub trait ReferenceLibrary {
    type Reader: BufRead;

    fn contains(&self, database: &str) -> bool;

    /// Opens a fresh reader over the named collection, or returns `None` if there is no such database
    fn open(&self, database: &str) -> proteome::Result<Option<FastaReader<Self::Reader>>>;
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct DatabaseCatalog {
    stale_after: Option<TimeDelta>,
    databases: BTreeMap<String, PathBuf>,
}

/// Ensures that only one drain of the job queue runs at once
#[derive(Debug, Default)]
pub struct DrainLock(Mutex<()>);

pub struct JobWorker<'l, S, L> {
    store: S,
    library: L,
    residue_db: ResidueDatabase,
    lock: &'l DrainLock,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Drain {
    /// Another drain held the lock, so nothing was done
    AlreadyRunning,
    Finished(DrainSummary),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DrainSummary {
    completed: usize,
    failed: usize,
}

// ---------------------------------------------------------------------------------------------------------------------

#[derive(Debug, Default)]
struct StoreState {
    last_id: u64,
    jobs: BTreeMap<JobId, SearchJob>,
    results: BTreeMap<JobId, Vec<ResultRecord>>,
}

// Reference Impls =====================================================================================================

macro_rules! job_store_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: JobStore> JobStore for $ref_type {
                fn submit(&self, request: SearchRequest) -> Result<JobId, StoreError> {
                    (**self).submit(request)
                }

                fn job(&self, id: JobId) -> Result<SearchJob, StoreError> {
                    (**self).job(id)
                }

                fn next_incomplete(&self) -> Result<Option<SearchJob>, StoreError> {
                    (**self).next_incomplete()
                }

                fn has_incomplete(&self) -> Result<bool, StoreError> {
                    (**self).has_incomplete()
                }

                fn mark_running(&self, id: JobId, since: DateTime<Utc>) -> Result<(), StoreError> {
                    (**self).mark_running(id, since)
                }

                fn mark_failed(&self, id: JobId, reason: String) -> Result<(), StoreError> {
                    (**self).mark_failed(id, reason)
                }

                fn complete(&self, id: JobId, results: Vec<ResultRecord>) -> Result<(), StoreError> {
                    (**self).complete(id, results)
                }

                fn results(&self, id: JobId) -> Result<Vec<ResultRecord>, StoreError> {
                    (**self).results(id)
                }

                fn running_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<JobId>, StoreError> {
                    (**self).running_before(cutoff)
                }
            }
        )+
    };
}

job_store_ref_impls!(&T, Box<T>, Arc<T>);

macro_rules! reference_library_ref_impls {
    ($($ref_type:ty),+ $(,)?) => {
        $(
            impl<T: ReferenceLibrary> ReferenceLibrary for $ref_type {
                type Reader = T::Reader;

                fn contains(&self, database: &str) -> bool {
                    (**self).contains(database)
                }

                fn open(&self, database: &str) -> proteome::Result<Option<FastaReader<Self::Reader>>> {
                    (**self).open(database)
                }
            }
        )+
    };
}

reference_library_ref_impls!(&T, Box<T>, Arc<T>);
