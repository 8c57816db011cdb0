use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::record::SearchFilters;
use super::service::{SearchError, SearchService, SUGGESTION_LIMIT};
use crate::domain::{CompanyId, JobStatus, JobType};
use crate::http::{clamp_limit, lenient, non_blank, ok, store_failure, LenientQuery};
use crate::store::{
    CandidateCriteria, CandidateSort, EntityStore, JobCriteria, JobSort, PageRequest,
    SortDirection,
};

const GLOBAL_LIMIT: usize = 10;
const TYPE_LIMIT: usize = 20;
const FILTER_LIMIT: usize = 50;
const PAGE_SIZE: usize = 20;

pub struct SearchState<S> {
    service: Arc<SearchService<S>>,
    max_limit: usize,
}

impl<S> Clone for SearchState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            max_limit: self.max_limit,
        }
    }
}

/// Router builder exposing `/api/search/*`.
pub fn search_router<S>(service: Arc<SearchService<S>>, max_limit: usize) -> Router
where
    S: EntityStore + 'static,
{
    Router::new()
        .route("/api/search/global", get(global_handler::<S>))
        .route("/api/search/ranked", get(ranked_handler::<S>))
        .route("/api/search/candidates", get(candidates_handler::<S>))
        .route(
            "/api/search/candidates/advanced",
            get(candidates_advanced_handler::<S>),
        )
        .route("/api/search/companies", get(companies_handler::<S>))
        .route("/api/search/jobs", get(jobs_handler::<S>))
        .route("/api/search/jobs/advanced", get(jobs_advanced_handler::<S>))
        .route("/api/search/filter", post(filter_handler::<S>))
        .route("/api/search/suggestions", get(suggestions_handler::<S>))
        .with_state(SearchState { service, max_limit })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KeywordParams {
    q: Option<String>,
    limit: Option<String>,
}

impl KeywordParams {
    fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandidateSearchParams {
    q: Option<String>,
    location: Option<String>,
    min_experience: Option<String>,
    max_experience: Option<String>,
    skills: Option<String>,
    page: Option<String>,
    size: Option<String>,
    sort_by: Option<String>,
    sort_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobSearchParams {
    q: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    status: Option<String>,
    min_salary: Option<String>,
    max_salary: Option<String>,
    company_id: Option<String>,
    page: Option<String>,
    size: Option<String>,
    sort_by: Option<String>,
    sort_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LimitParams {
    limit: Option<String>,
}

pub(crate) async fn global_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), GLOBAL_LIMIT, state.max_limit);
    respond(
        state.service.global_search(params.query(), limit),
        "Global search completed successfully",
        "Global search failed",
    )
}

pub(crate) async fn ranked_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), TYPE_LIMIT, state.max_limit);
    respond(
        state.service.search_with_ranking(params.query(), limit),
        "Ranked search completed successfully",
        "Ranked search failed",
    )
}

pub(crate) async fn candidates_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), TYPE_LIMIT, state.max_limit);
    respond(
        state.service.search_candidates(params.query(), limit),
        "Candidate search completed successfully",
        "Candidate search failed",
    )
}

pub(crate) async fn companies_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), TYPE_LIMIT, state.max_limit);
    respond(
        state.service.search_companies(params.query(), limit),
        "Company search completed successfully",
        "Company search failed",
    )
}

pub(crate) async fn jobs_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), TYPE_LIMIT, state.max_limit);
    respond(
        state.service.search_jobs(params.query(), limit),
        "Job search completed successfully",
        "Job search failed",
    )
}

pub(crate) async fn candidates_advanced_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<CandidateSearchParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let criteria = CandidateCriteria {
        query: non_blank(params.q.as_deref()),
        location: non_blank(params.location.as_deref()),
        min_experience: lenient(params.min_experience.as_deref()),
        max_experience: lenient(params.max_experience.as_deref()),
        skills: non_blank(params.skills.as_deref()),
    };
    let request = PageRequest {
        page: lenient(params.page.as_deref()).unwrap_or(0),
        size: clamp_limit(params.size.as_deref(), PAGE_SIZE, state.max_limit),
        sort: params
            .sort_by
            .as_deref()
            .and_then(CandidateSort::parse)
            .unwrap_or_default(),
        direction: direction(params.sort_dir.as_deref()),
    };

    respond(
        state.service.search_candidates_advanced(&criteria, &request),
        "Advanced candidate search completed successfully",
        "Advanced candidate search failed",
    )
}

pub(crate) async fn jobs_advanced_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<JobSearchParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let criteria = JobCriteria {
        query: non_blank(params.q.as_deref()),
        location: non_blank(params.location.as_deref()),
        job_type: params.job_type.as_deref().and_then(JobType::parse),
        status: params.status.as_deref().and_then(JobStatus::parse),
        min_salary: lenient(params.min_salary.as_deref()),
        max_salary: lenient(params.max_salary.as_deref()),
        company_id: lenient(params.company_id.as_deref()).map(CompanyId),
    };
    let request = PageRequest {
        page: lenient(params.page.as_deref()).unwrap_or(0),
        size: clamp_limit(params.size.as_deref(), PAGE_SIZE, state.max_limit),
        sort: params
            .sort_by
            .as_deref()
            .and_then(JobSort::parse)
            .unwrap_or_default(),
        direction: direction(params.sort_dir.as_deref()),
    };

    respond(
        state.service.search_jobs_advanced(&criteria, &request),
        "Advanced job search completed successfully",
        "Advanced job search failed",
    )
}

/// The body is read as raw bytes so that a missing or non-JSON body means "no filters".
pub(crate) async fn filter_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<LimitParams>,
    body: Bytes,
) -> Response
where
    S: EntityStore + 'static,
{
    let value: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let filters = SearchFilters::from_value(&value);
    let limit = clamp_limit(params.limit.as_deref(), FILTER_LIMIT, state.max_limit);

    respond(
        state.service.search_by_filters(&filters, limit),
        "Filtered search completed successfully",
        "Filtered search failed",
    )
}

pub(crate) async fn suggestions_handler<S>(
    State(state): State<SearchState<S>>,
    LenientQuery(params): LenientQuery<KeywordParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), SUGGESTION_LIMIT, state.max_limit);
    respond(
        state.service.suggestions(params.query(), Some(limit)),
        "Search suggestions retrieved successfully",
        "Failed to get search suggestions",
    )
}

fn direction(raw: Option<&str>) -> SortDirection {
    raw.map(SortDirection::parse).unwrap_or_default()
}

fn respond<T: serde::Serialize>(
    result: Result<T, SearchError>,
    success: &str,
    failed: &str,
) -> Response {
    match result {
        Ok(data) => ok(success, data),
        Err(SearchError::Store(error)) => store_failure(failed, &error),
    }
}
