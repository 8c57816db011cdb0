//! Entity store seam consumed by search and analytics.
//!
//! The trait exposes the read primitives a relational backend would offer
//! (counts, substring lookups, clause-filtered pages, find-by-id). Services
//! never mutate through it.

mod clauses;
mod memory;
mod page;

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationStatus, Candidate, CandidateId,
    Company, CompanyId, Job, JobId, JobStatus, Recruiter,
};

pub use clauses::{CandidateClause, CandidateCriteria, JobClause, JobCriteria};
pub use memory::InMemoryStore;
pub use page::{CandidateSort, JobSort, Page, PageRequest, SortDirection};

/// Read-only storage abstraction so the services can be exercised in isolation.
pub trait EntityStore: Send + Sync {
    fn count(&self, kind: EntityKind) -> Result<u64, StoreError>;
    fn count_jobs_by_status(&self, status: JobStatus) -> Result<u64, StoreError>;
    fn count_applications_by_status(&self, status: ApplicationStatus) -> Result<u64, StoreError>;
    fn count_applications_excluding(&self, status: ApplicationStatus) -> Result<u64, StoreError>;

    /// Case-insensitive substring match over name, email, skills, title and employer.
    fn search_candidates(&self, term: &str) -> Result<Vec<Candidate>, StoreError>;
    /// Case-insensitive substring match over name, industry and location.
    fn search_companies(&self, term: &str) -> Result<Vec<Company>, StoreError>;
    /// Case-insensitive substring match over title, description and location.
    fn search_jobs(&self, term: &str) -> Result<Vec<Job>, StoreError>;

    fn query_candidates(
        &self,
        clauses: &[CandidateClause],
        request: &PageRequest<CandidateSort>,
    ) -> Result<Page<Candidate>, StoreError>;
    fn query_jobs(
        &self,
        clauses: &[JobClause],
        request: &PageRequest<JobSort>,
    ) -> Result<Page<Job>, StoreError>;

    fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, StoreError>;
    fn company(&self, id: CompanyId) -> Result<Option<Company>, StoreError>;
    fn job(&self, id: JobId) -> Result<Option<Job>, StoreError>;
    fn application(&self, id: ApplicationId) -> Result<Option<Application>, StoreError>;

    fn applications(&self) -> Result<Vec<Application>, StoreError>;
    fn applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError>;
    /// Applications whose follow-up date is strictly before `before`, skipping `excluding`.
    fn follow_ups_due(
        &self,
        before: NaiveDateTime,
        excluding: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError>;
    fn jobs(&self) -> Result<Vec<Job>, StoreError>;
    fn recruiters(&self) -> Result<Vec<Recruiter>, StoreError>;
    /// Notes with a scheduled follow-up at or before `at`, earliest first.
    fn notes_with_follow_up_due(
        &self,
        at: NaiveDateTime,
    ) -> Result<Vec<ApplicationNote>, StoreError>;

    fn recent_applications(&self, limit: usize) -> Result<Vec<Application>, StoreError>;
    fn recent_jobs(&self, limit: usize) -> Result<Vec<Job>, StoreError>;
    fn recent_notes(&self, limit: usize) -> Result<Vec<ApplicationNote>, StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Candidate,
    Company,
    Job,
    Application,
    Note,
    Recruiter,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
            Self::Job => "job",
            Self::Application => "application",
            Self::Note => "note",
            Self::Recruiter => "recruiter",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} is referenced but does not exist")]
    MissingReference { entity: EntityKind, id: u64 },
    #[error("{entity} {id} already exists")]
    Conflict { entity: EntityKind, id: u64 },
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a foreign key, turning a dangling id into [`StoreError::MissingReference`].
pub(crate) fn require<T>(
    found: Option<T>,
    entity: EntityKind,
    id: u64,
) -> Result<T, StoreError> {
    found.ok_or(StoreError::MissingReference { entity, id })
}
