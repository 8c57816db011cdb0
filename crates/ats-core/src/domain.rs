//! Read-only projections of the tracked entities.
//!
//! Lifecycle of these records belongs to the CRUD services; search and
//! analytics only ever read them through an [`EntityStore`](crate::store::EntityStore).

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecruiterId(pub u64);

/// A person in the talent pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    /// Free-form, usually comma separated.
    pub skills: Option<String>,
    pub experience_years: Option<u32>,
    pub current_job_title: Option<String>,
    pub current_company: Option<String>,
    pub summary: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A hiring organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// An opening posted by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub job_type: JobType,
    pub status: JobStatus,
    pub priority: Priority,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
    pub deadline: Option<NaiveDate>,
    pub company_id: CompanyId,
    pub assigned_recruiter_id: Option<RecruiterId>,
    pub created_at: NaiveDateTime,
}

/// A candidate's application to a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub status: ApplicationStatus,
    pub rating: Option<u8>,
    pub applied_at: NaiveDateTime,
    pub follow_up_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Recruiter commentary attached to an application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationNote {
    pub id: NoteId,
    pub application_id: ApplicationId,
    pub author_id: RecruiterId,
    pub content: String,
    pub note_type: NoteType,
    pub scheduled_follow_up: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// User that jobs get assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recruiter {
    pub id: RecruiterId,
    pub first_name: String,
    pub last_name: String,
}

impl Recruiter {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Screening,
    Interviewing,
    Offer,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Applied,
            Self::Screening,
            Self::Interviewing,
            Self::Offer,
            Self::Hired,
            Self::Rejected,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::Screening => "SCREENING",
            Self::Interviewing => "INTERVIEWING",
            Self::Offer => "OFFER",
            Self::Hired => "HIRED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match_label(raw, &Self::ordered(), |status| status.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    OnHold,
    Filled,
    Cancelled,
}

impl JobStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::OnHold, Self::Filled, Self::Cancelled]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::OnHold => "ON_HOLD",
            Self::Filled => "FILLED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match_label(raw, &Self::ordered(), |status| status.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::FullTime,
            Self::PartTime,
            Self::Contract,
            Self::Internship,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Contract => "CONTRACT",
            Self::Internship => "INTERNSHIP",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match_label(raw, &Self::ordered(), |job_type| job_type.label())
    }
}

/// Declaration order doubles as urgency order (`Urgent` sorts last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Medium, Self::High, Self::Urgent]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match_label(raw, &Self::ordered(), |priority| priority.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteType {
    Call,
    Email,
    Interview,
    General,
    FollowUp,
}

impl NoteType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Call,
            Self::Email,
            Self::Interview,
            Self::General,
            Self::FollowUp,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Call => "CALL",
            Self::Email => "EMAIL",
            Self::Interview => "INTERVIEW",
            Self::General => "GENERAL",
            Self::FollowUp => "FOLLOW_UP",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match_label(raw, &Self::ordered(), |note_type| note_type.label())
    }
}

macro_rules! display_via_label {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })+
    };
}

display_via_label!(ApplicationStatus, JobStatus, JobType, Priority, NoteType);

/// Accepts `on hold`, `on-hold` and `On_Hold` alike.
fn match_label<T: Copy>(raw: &str, options: &[T], label: fn(T) -> &'static str) -> Option<T> {
    let normalized: String = raw
        .trim()
        .chars()
        .map(|ch| if ch == '-' || ch == ' ' { '_' } else { ch })
        .collect();

    options
        .iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(&normalized))
}
