use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::{
    ApplicationId, ApplicationStatus, JobId, JobStatus, JobType, NoteId, NoteType, Priority,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applications: u64,
    pub total_jobs: u64,
    pub total_candidates: u64,
    pub total_companies: u64,
    pub open_jobs: u64,
    pub filled_jobs: u64,
    pub active_applications: u64,
    pub hired_candidates: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount<T> {
    pub status: T,
    pub count: u64,
}

pub type ApplicationStatusCount = StatusCount<ApplicationStatus>;
pub type JobStatusCount = StatusCount<JobStatus>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationCount {
    #[serde(skip)]
    pub job_id: JobId,
    pub job_title: String,
    pub company_name: String,
    pub application_count: u64,
}

/// Percentages of all applications per funnel stage. Serializes as `{}` when
/// there are no applications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offer_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_rate: Option<f64>,
}

impl ConversionRates {
    pub fn is_empty(&self) -> bool {
        self.screening_rate.is_none()
            && self.interview_rate.is_none()
            && self.offer_rate.is_none()
            && self.hire_rate.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: ApplicationId,
    pub candidate_name: String,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    pub applied_at: NaiveDateTime,
    pub last_update: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpEntry {
    pub id: ApplicationId,
    pub candidate_name: String,
    pub candidate_email: String,
    pub job_title: String,
    pub company_name: String,
    pub status: ApplicationStatus,
    pub follow_up_date: NaiveDateTime,
    pub days_past_due: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterPerformance {
    pub recruiter_name: String,
    pub total_jobs: u64,
    pub total_applications: u64,
    pub hired_count: u64,
    pub success_rate: f64,
}

/// One (month, year) cell of a trend series. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub month: u32,
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrends {
    pub application_trends: Vec<TrendBucket>,
    pub hire_trends: Vec<TrendBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityEntry>,
    pub follow_ups: Vec<FollowUpEntry>,
    pub conversion_rates: ConversionRates,
    pub average_time_to_fill: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentJob {
    pub id: JobId,
    pub title: String,
    pub company_name: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub priority: Priority,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: NoteId,
    pub application_id: ApplicationId,
    pub author_name: String,
    pub candidate_name: String,
    pub job_title: String,
    pub note_type: NoteType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_follow_up: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
