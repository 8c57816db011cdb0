use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDateTime;

use super::clauses::{candidate_matches_term, contains, job_matches_term};
use super::{
    CandidateClause, CandidateSort, EntityKind, EntityStore, JobClause, JobSort, Page,
    PageRequest, StoreError,
};
use crate::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationStatus, Candidate, CandidateId,
    Company, CompanyId, Job, JobId, JobStatus, NoteId, Recruiter, RecruiterId,
};

#[derive(Debug, Default)]
struct Tables {
    candidates: BTreeMap<CandidateId, Candidate>,
    companies: BTreeMap<CompanyId, Company>,
    jobs: BTreeMap<JobId, Job>,
    applications: BTreeMap<ApplicationId, Application>,
    notes: BTreeMap<NoteId, ApplicationNote>,
    recruiters: BTreeMap<RecruiterId, Recruiter>,
}

/// Process-local store backed by ordered maps, so scans run in id order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_candidate(&self, candidate: Candidate) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(
            &mut tables.candidates,
            candidate.id,
            candidate,
            EntityKind::Candidate,
            |id| id.0,
        )
    }

    pub fn insert_company(&self, company: Company) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(
            &mut tables.companies,
            company.id,
            company,
            EntityKind::Company,
            |id| id.0,
        )
    }

    pub fn insert_job(&self, job: Job) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(&mut tables.jobs, job.id, job, EntityKind::Job, |id| id.0)
    }

    pub fn insert_application(&self, application: Application) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(
            &mut tables.applications,
            application.id,
            application,
            EntityKind::Application,
            |id| id.0,
        )
    }

    pub fn insert_note(&self, note: ApplicationNote) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(&mut tables.notes, note.id, note, EntityKind::Note, |id| id.0)
    }

    pub fn insert_recruiter(&self, recruiter: Recruiter) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        insert_unique(
            &mut tables.recruiters,
            recruiter.id,
            recruiter,
            EntityKind::Recruiter,
            |id| id.0,
        )
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl EntityStore for InMemoryStore {
    fn count(&self, kind: EntityKind) -> Result<u64, StoreError> {
        let tables = self.read()?;
        let count = match kind {
            EntityKind::Candidate => tables.candidates.len(),
            EntityKind::Company => tables.companies.len(),
            EntityKind::Job => tables.jobs.len(),
            EntityKind::Application => tables.applications.len(),
            EntityKind::Note => tables.notes.len(),
            EntityKind::Recruiter => tables.recruiters.len(),
        };
        Ok(count as u64)
    }

    fn count_jobs_by_status(&self, status: JobStatus) -> Result<u64, StoreError> {
        let tables = self.read()?;
        Ok(tables.jobs.values().filter(|job| job.status == status).count() as u64)
    }

    fn count_applications_by_status(&self, status: ApplicationStatus) -> Result<u64, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.status == status)
            .count() as u64)
    }

    fn count_applications_excluding(&self, status: ApplicationStatus) -> Result<u64, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.status != status)
            .count() as u64)
    }

    fn search_candidates(&self, term: &str) -> Result<Vec<Candidate>, StoreError> {
        let term = term.to_lowercase();
        let tables = self.read()?;
        Ok(tables
            .candidates
            .values()
            .filter(|candidate| candidate_matches_term(candidate, &term))
            .cloned()
            .collect())
    }

    fn search_companies(&self, term: &str) -> Result<Vec<Company>, StoreError> {
        let term = term.to_lowercase();
        let tables = self.read()?;
        Ok(tables
            .companies
            .values()
            .filter(|company| {
                contains(Some(&company.name), &term)
                    || contains(company.industry.as_deref(), &term)
                    || contains(company.location.as_deref(), &term)
            })
            .cloned()
            .collect())
    }

    fn search_jobs(&self, term: &str) -> Result<Vec<Job>, StoreError> {
        let term = term.to_lowercase();
        let tables = self.read()?;
        Ok(tables
            .jobs
            .values()
            .filter(|job| job_matches_term(job, &term))
            .cloned()
            .collect())
    }

    fn query_candidates(
        &self,
        clauses: &[CandidateClause],
        request: &PageRequest<CandidateSort>,
    ) -> Result<Page<Candidate>, StoreError> {
        let tables = self.read()?;
        let matched: Vec<Candidate> = tables
            .candidates
            .values()
            .filter(|candidate| clauses.iter().all(|clause| clause.matches(candidate)))
            .cloned()
            .collect();

        let sort = request.sort;
        Ok(request.paginate(matched, |a, b| sort.compare(a, b), |candidate| candidate.id))
    }

    fn query_jobs(
        &self,
        clauses: &[JobClause],
        request: &PageRequest<JobSort>,
    ) -> Result<Page<Job>, StoreError> {
        let tables = self.read()?;
        let matched: Vec<Job> = tables
            .jobs
            .values()
            .filter(|job| {
                let company_name = tables
                    .companies
                    .get(&job.company_id)
                    .map(|company| company.name.as_str());
                clauses.iter().all(|clause| clause.matches(job, company_name))
            })
            .cloned()
            .collect();

        let sort = request.sort;
        Ok(request.paginate(matched, |a, b| sort.compare(a, b), |job| job.id))
    }

    fn candidate(&self, id: CandidateId) -> Result<Option<Candidate>, StoreError> {
        Ok(self.read()?.candidates.get(&id).cloned())
    }

    fn company(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.read()?.companies.get(&id).cloned())
    }

    fn job(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.read()?.jobs.get(&id).cloned())
    }

    fn application(&self, id: ApplicationId) -> Result<Option<Application>, StoreError> {
        Ok(self.read()?.applications.get(&id).cloned())
    }

    fn applications(&self) -> Result<Vec<Application>, StoreError> {
        Ok(self.read()?.applications.values().cloned().collect())
    }

    fn applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.status == status)
            .cloned()
            .collect())
    }

    fn follow_ups_due(
        &self,
        before: NaiveDateTime,
        excluding: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .applications
            .values()
            .filter(|application| application.status != excluding)
            .filter(|application| application.follow_up_date.is_some_and(|due| due < before))
            .cloned()
            .collect())
    }

    fn jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.read()?.jobs.values().cloned().collect())
    }

    fn recruiters(&self) -> Result<Vec<Recruiter>, StoreError> {
        Ok(self.read()?.recruiters.values().cloned().collect())
    }

    fn notes_with_follow_up_due(
        &self,
        at: NaiveDateTime,
    ) -> Result<Vec<ApplicationNote>, StoreError> {
        let tables = self.read()?;
        let mut due: Vec<ApplicationNote> = tables
            .notes
            .values()
            .filter(|note| note.scheduled_follow_up.is_some_and(|when| when <= at))
            .cloned()
            .collect();
        due.sort_by_key(|note| (note.scheduled_follow_up, note.id));
        Ok(due)
    }

    fn recent_applications(&self, limit: usize) -> Result<Vec<Application>, StoreError> {
        let tables = self.read()?;
        Ok(newest_first(
            tables.applications.values(),
            |application| (application.created_at, application.id),
            limit,
        ))
    }

    fn recent_jobs(&self, limit: usize) -> Result<Vec<Job>, StoreError> {
        let tables = self.read()?;
        Ok(newest_first(
            tables.jobs.values(),
            |job| (job.created_at, job.id),
            limit,
        ))
    }

    fn recent_notes(&self, limit: usize) -> Result<Vec<ApplicationNote>, StoreError> {
        let tables = self.read()?;
        Ok(newest_first(
            tables.notes.values(),
            |note| (note.created_at, note.id),
            limit,
        ))
    }
}

fn insert_unique<K: Ord + Copy, V>(
    table: &mut BTreeMap<K, V>,
    key: K,
    value: V,
    entity: EntityKind,
    raw_id: fn(K) -> u64,
) -> Result<(), StoreError> {
    if table.contains_key(&key) {
        return Err(StoreError::Conflict {
            entity,
            id: raw_id(key),
        });
    }
    table.insert(key, value);
    Ok(())
}

/// Newest by `key` first (ids break ties, higher first), cut to `limit`.
fn newest_first<'a, T: Clone + 'a, K: Ord>(
    rows: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
    limit: usize,
) -> Vec<T> {
    let mut rows: Vec<&T> = rows.collect();
    rows.sort_by_key(|row| Reverse(key(*row)));
    rows.into_iter().take(limit).cloned().collect()
}
