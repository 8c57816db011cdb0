use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, info};

use super::record::{
    CandidateHit, CompanyHit, GlobalSearchResults, JobHit, RankedResult, RankedSearchResults,
    RecordKind, SearchFilters, SearchRecord,
};
use super::scoring::relevance_score;
use crate::domain::{Candidate, Job};
use crate::store::{
    require, CandidateCriteria, CandidateSort, EntityKind, EntityStore, JobCriteria, JobSort,
    Page, PageRequest, StoreError,
};

/// Default number of suggestions returned for type-ahead lookups.
pub const SUGGESTION_LIMIT: usize = 5;

/// Keyword, ranked and filtered search over the entity store.
pub struct SearchService<S> {
    store: Arc<S>,
}

impl<S> SearchService<S>
where
    S: EntityStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Up to `limit` matches per entity type.
    pub fn global_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<GlobalSearchResults, SearchError> {
        let results = GlobalSearchResults {
            candidates: self.search_candidates(query, limit)?,
            companies: self.search_companies(query, limit)?,
            jobs: self.search_jobs(query, limit)?,
        };
        debug!(
            query,
            limit,
            candidates = results.candidates.len(),
            companies = results.companies.len(),
            jobs = results.jobs.len(),
            "global search"
        );
        Ok(results)
    }

    pub fn search_candidates(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        Ok(self
            .store
            .search_candidates(query)?
            .iter()
            .take(limit)
            .map(|candidate| SearchRecord::Candidate(CandidateHit::from(candidate)))
            .collect())
    }

    pub fn search_companies(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        Ok(self
            .store
            .search_companies(query)?
            .iter()
            .take(limit)
            .map(|company| SearchRecord::Company(CompanyHit::from(company)))
            .collect())
    }

    pub fn search_jobs(&self, query: &str, limit: usize) -> Result<Vec<SearchRecord>, SearchError> {
        self.store
            .search_jobs(query)?
            .iter()
            .take(limit)
            .map(|job| self.job_hit(job).map(SearchRecord::Job))
            .collect()
    }

    /// Scores a pool of `2 * limit` matches per type and keeps the best `limit`.
    pub fn search_with_ranking(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<RankedSearchResults, SearchError> {
        let pool = self
            .global_search(query, limit.saturating_mul(2))?
            .into_records();

        let mut results: Vec<RankedResult> = pool
            .into_iter()
            .map(|record| RankedResult {
                relevance_score: relevance_score(query, &record),
                record,
            })
            .collect();
        let total_results = results.len();

        // sort_by is stable, so equal scores keep candidate/company/job order.
        results.sort_by(|a, b| descending_score(a.relevance_score, b.relevance_score));
        results.truncate(limit);

        info!(query, limit, total_results, "ranked search");
        Ok(RankedSearchResults {
            query: query.to_string(),
            total_results,
            results,
        })
    }

    pub fn search_candidates_advanced(
        &self,
        criteria: &CandidateCriteria,
        request: &PageRequest<CandidateSort>,
    ) -> Result<Page<Candidate>, SearchError> {
        let clauses = criteria.clauses();
        let page = self.store.query_candidates(&clauses, request)?;
        debug!(
            clauses = clauses.len(),
            page = request.page,
            total = page.total_elements,
            "advanced candidate search"
        );
        Ok(page)
    }

    pub fn search_jobs_advanced(
        &self,
        criteria: &JobCriteria,
        request: &PageRequest<JobSort>,
    ) -> Result<Page<Job>, SearchError> {
        let clauses = criteria.clauses();
        let page = self.store.query_jobs(&clauses, request)?;
        debug!(
            clauses = clauses.len(),
            page = request.page,
            total = page.total_elements,
            "advanced job search"
        );
        Ok(page)
    }

    /// Searches one type (or all three when `type` is absent or blank), grouped by type.
    /// An unrecognised `type` yields no records.
    pub fn search_by_filters(
        &self,
        filters: &SearchFilters,
        limit: usize,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        let query = filters.query.as_deref().unwrap_or_default();
        let kinds: Vec<RecordKind> = match filters.kind.as_deref().map(str::trim) {
            None | Some("") => RecordKind::ordered().to_vec(),
            Some(raw) => match RecordKind::parse(raw) {
                Some(kind) => vec![kind],
                None => {
                    debug!(kind = raw, "unknown search type");
                    return Ok(Vec::new());
                }
            },
        };

        let mut records = Vec::new();
        for kind in kinds {
            let found = match kind {
                RecordKind::Candidate => self.search_candidates(query, limit)?,
                RecordKind::Company => self.search_companies(query, limit)?,
                RecordKind::Job => self.search_jobs(query, limit)?,
            };
            records.extend(found);
        }

        records.sort_by(|a, b| a.kind().label().cmp(b.kind().label()));
        records.truncate(limit);
        Ok(records)
    }

    /// Type-ahead variant of [`Self::global_search`].
    pub fn suggestions(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<GlobalSearchResults, SearchError> {
        self.global_search(query, limit.unwrap_or(SUGGESTION_LIMIT))
    }

    fn job_hit(&self, job: &Job) -> Result<JobHit, SearchError> {
        let company = require(
            self.store.company(job.company_id)?,
            EntityKind::Company,
            job.company_id.0,
        )?;
        Ok(JobHit::from_job(job, Some(company.name)))
    }
}

fn descending_score(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Error raised by search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
