use std::sync::Arc;

use axum::{
    extract::State,
    response::Response,
    routing::get,
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use super::service::{AnalyticsError, AnalyticsService};
use crate::http::{clamp_limit, ok, store_failure, LenientQuery};
use crate::store::EntityStore;

const RECENT_LIMIT: usize = 10;

pub struct DashboardState<S> {
    service: Arc<AnalyticsService<S>>,
    max_limit: usize,
}

impl<S> Clone for DashboardState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            max_limit: self.max_limit,
        }
    }
}

/// Router builder exposing `/api/dashboard/*`. Time-relative views use the local clock.
pub fn dashboard_router<S>(service: Arc<AnalyticsService<S>>, max_limit: usize) -> Router
where
    S: EntityStore + 'static,
{
    Router::new()
        .route("/api/dashboard/stats", get(stats_handler::<S>))
        .route(
            "/api/dashboard/recent-activity",
            get(recent_activity_handler::<S>),
        )
        .route("/api/dashboard/follow-ups", get(follow_ups_handler::<S>))
        .route(
            "/api/dashboard/applications-by-status",
            get(applications_by_status_handler::<S>),
        )
        .route(
            "/api/dashboard/jobs-by-status",
            get(jobs_by_status_handler::<S>),
        )
        .route(
            "/api/dashboard/applications-per-job",
            get(applications_per_job_handler::<S>),
        )
        .route(
            "/api/dashboard/conversion-rates",
            get(conversion_rates_handler::<S>),
        )
        .route(
            "/api/dashboard/average-time-to-fill",
            get(average_time_to_fill_handler::<S>),
        )
        .route(
            "/api/dashboard/recruiter-performance",
            get(recruiter_performance_handler::<S>),
        )
        .route(
            "/api/dashboard/monthly-trends",
            get(monthly_trends_handler::<S>),
        )
        .route("/api/dashboard/summary", get(summary_handler::<S>))
        .route("/api/dashboard/recent-jobs", get(recent_jobs_handler::<S>))
        .route("/api/dashboard/recent-notes", get(recent_notes_handler::<S>))
        .route(
            "/api/dashboard/note-follow-ups",
            get(note_follow_ups_handler::<S>),
        )
        .with_state(DashboardState { service, max_limit })
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LimitParams {
    limit: Option<String>,
}

pub(crate) async fn stats_handler<S>(State(state): State<DashboardState<S>>) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.dashboard_stats(),
        "Dashboard statistics retrieved successfully",
        "Failed to retrieve dashboard statistics",
    )
}

pub(crate) async fn recent_activity_handler<S>(
    State(state): State<DashboardState<S>>,
    LenientQuery(params): LenientQuery<LimitParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), RECENT_LIMIT, state.max_limit);
    respond(
        state.service.recent_activity(limit),
        "Recent activities retrieved successfully",
        "Failed to retrieve recent activities",
    )
}

pub(crate) async fn follow_ups_handler<S>(State(state): State<DashboardState<S>>) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.follow_up_needed(now()),
        "Follow-ups retrieved successfully",
        "Failed to retrieve follow-ups",
    )
}

pub(crate) async fn applications_by_status_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.applications_by_status(),
        "Application status statistics retrieved successfully",
        "Failed to retrieve application status statistics",
    )
}

pub(crate) async fn jobs_by_status_handler<S>(State(state): State<DashboardState<S>>) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.jobs_by_status(),
        "Job status statistics retrieved successfully",
        "Failed to retrieve job status statistics",
    )
}

pub(crate) async fn applications_per_job_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.applications_per_job(),
        "Applications per job retrieved successfully",
        "Failed to retrieve applications per job",
    )
}

pub(crate) async fn conversion_rates_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.conversion_rates(),
        "Conversion rates retrieved successfully",
        "Failed to retrieve conversion rates",
    )
}

pub(crate) async fn average_time_to_fill_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.average_time_to_fill(),
        "Average time to fill retrieved successfully",
        "Failed to retrieve average time to fill",
    )
}

pub(crate) async fn recruiter_performance_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.recruiter_performance(),
        "Recruiter performance retrieved successfully",
        "Failed to retrieve recruiter performance",
    )
}

pub(crate) async fn monthly_trends_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.monthly_trends(now()),
        "Monthly trends retrieved successfully",
        "Failed to retrieve monthly trends",
    )
}

pub(crate) async fn summary_handler<S>(State(state): State<DashboardState<S>>) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.summary(now()),
        "Dashboard summary retrieved successfully",
        "Failed to retrieve dashboard summary",
    )
}

pub(crate) async fn recent_jobs_handler<S>(
    State(state): State<DashboardState<S>>,
    LenientQuery(params): LenientQuery<LimitParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), RECENT_LIMIT, state.max_limit);
    respond(
        state.service.recent_jobs(limit),
        "Recent jobs retrieved successfully",
        "Failed to retrieve recent jobs",
    )
}

pub(crate) async fn recent_notes_handler<S>(
    State(state): State<DashboardState<S>>,
    LenientQuery(params): LenientQuery<LimitParams>,
) -> Response
where
    S: EntityStore + 'static,
{
    let limit = clamp_limit(params.limit.as_deref(), RECENT_LIMIT, state.max_limit);
    respond(
        state.service.recent_notes(limit),
        "Recent notes retrieved successfully",
        "Failed to retrieve recent notes",
    )
}

pub(crate) async fn note_follow_ups_handler<S>(
    State(state): State<DashboardState<S>>,
) -> Response
where
    S: EntityStore + 'static,
{
    respond(
        state.service.note_follow_ups_due(now()),
        "Note follow-ups retrieved successfully",
        "Failed to retrieve note follow-ups",
    )
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn respond<T: serde::Serialize>(
    result: Result<T, AnalyticsError>,
    success: &str,
    failed: &str,
) -> Response {
    match result {
        Ok(data) => ok(success, data),
        Err(AnalyticsError::Store(error)) => store_failure(failed, &error),
    }
}
