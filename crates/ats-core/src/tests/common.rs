use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::analytics::AnalyticsService;
use crate::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationStatus, Candidate, CandidateId,
    Company, CompanyId, Job, JobId, JobStatus, JobType, NoteId, NoteType, Priority, Recruiter,
    RecruiterId,
};
use crate::search::SearchService;
use crate::store::{
    CandidateClause, CandidateSort, EntityKind, EntityStore, InMemoryStore, JobClause, JobSort,
    Page, PageRequest, StoreError,
};

pub(super) const MAX_LIMIT: usize = 100;

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid timestamp")
}

/// Reference clock for every time-relative assertion.
pub(super) fn now() -> NaiveDateTime {
    at(2025, 6, 15, 12, 0)
}

pub(super) fn recruiter(id: u64, first: &str, last: &str) -> Recruiter {
    Recruiter {
        id: RecruiterId(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
    }
}

pub(super) fn company(
    id: u64,
    name: &str,
    industry: &str,
    location: &str,
    description: &str,
) -> Company {
    Company {
        id: CompanyId(id),
        name: name.to_string(),
        industry: Some(industry.to_string()),
        location: Some(location.to_string()),
        website: None,
        description: Some(description.to_string()),
        created_at: at(2025, 1, 2, 9, 0),
    }
}

pub(super) struct CandidateSeed<'a> {
    pub(super) id: u64,
    pub(super) first: &'a str,
    pub(super) last: &'a str,
    pub(super) location: &'a str,
    pub(super) skills: &'a str,
    pub(super) experience: Option<u32>,
    pub(super) title: &'a str,
    pub(super) employer: Option<&'a str>,
}

pub(super) fn candidate(seed: CandidateSeed<'_>) -> Candidate {
    Candidate {
        id: CandidateId(seed.id),
        first_name: seed.first.to_string(),
        last_name: seed.last.to_string(),
        email: format!("{}@example.com", seed.first.to_lowercase()),
        phone: None,
        location: Some(seed.location.to_string()),
        linkedin_url: None,
        skills: Some(seed.skills.to_string()),
        experience_years: seed.experience,
        current_job_title: Some(seed.title.to_string()),
        current_company: seed.employer.map(str::to_string),
        summary: None,
        created_at: at(2025, 2, 1, 9, 0),
    }
}

pub(super) struct JobSeed<'a> {
    pub(super) id: u64,
    pub(super) title: &'a str,
    pub(super) description: &'a str,
    pub(super) location: &'a str,
    pub(super) job_type: JobType,
    pub(super) status: JobStatus,
    pub(super) priority: Priority,
    pub(super) salary: (Option<u32>, Option<u32>),
    pub(super) company: u64,
    pub(super) recruiter: Option<u64>,
    pub(super) created_at: NaiveDateTime,
}

pub(super) fn job(seed: JobSeed<'_>) -> Job {
    Job {
        id: JobId(seed.id),
        title: seed.title.to_string(),
        description: seed.description.to_string(),
        location: Some(seed.location.to_string()),
        job_type: seed.job_type,
        status: seed.status,
        priority: seed.priority,
        min_salary: seed.salary.0,
        max_salary: seed.salary.1,
        deadline: None,
        company_id: CompanyId(seed.company),
        assigned_recruiter_id: seed.recruiter.map(RecruiterId),
        created_at: seed.created_at,
    }
}

pub(super) fn application(
    id: u64,
    candidate: u64,
    job: u64,
    status: ApplicationStatus,
    applied_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    follow_up_date: Option<NaiveDateTime>,
) -> Application {
    Application {
        id: ApplicationId(id),
        candidate_id: CandidateId(candidate),
        job_id: JobId(job),
        status,
        rating: None,
        applied_at,
        follow_up_date,
        created_at: applied_at,
        updated_at,
    }
}

pub(super) fn note(
    id: u64,
    application: u64,
    author: u64,
    content: &str,
    note_type: NoteType,
    scheduled_follow_up: Option<NaiveDateTime>,
    created_at: NaiveDateTime,
) -> ApplicationNote {
    ApplicationNote {
        id: NoteId(id),
        application_id: ApplicationId(application),
        author_id: RecruiterId(author),
        content: content.to_string(),
        note_type,
        scheduled_follow_up,
        created_at,
    }
}

/// Small but complete hiring pipeline:
///
/// - companies: Acme Robotics, Globex, Initech
/// - candidates: Ada (8y), Grace (30y), Linus (unknown), Margaret (12y)
/// - jobs: Senior Java Developer (Initech, open), Robotics Engineer (Acme, open),
///   Data Analyst (Globex, filled), Java Intern (Initech, on hold)
/// - six applications, two of them hired, one rejected
pub(super) fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();

    for seed in [
        recruiter(1, "Ana", "Diaz"),
        recruiter(2, "Ben", "Okafor"),
        recruiter(3, "Cy", "Lee"),
    ] {
        store.insert_recruiter(seed).expect("insert recruiter");
    }

    for seed in [
        company(1, "Acme Robotics", "Robotics", "Austin", "Industrial automation"),
        company(2, "Globex", "Energy", "Springfield", "Power and utilities"),
        company(3, "Initech", "Software", "Austin", "Enterprise Java consulting"),
    ] {
        store.insert_company(seed).expect("insert company");
    }

    for seed in [
        CandidateSeed {
            id: 1,
            first: "Ada",
            last: "Lovelace",
            location: "London",
            skills: "Rust, Python",
            experience: Some(8),
            title: "Senior Engineer",
            employer: Some("Analytical"),
        },
        CandidateSeed {
            id: 2,
            first: "Grace",
            last: "Hopper",
            location: "Arlington",
            skills: "Java, COBOL",
            experience: Some(30),
            title: "Java Developer",
            employer: Some("Navy"),
        },
        CandidateSeed {
            id: 3,
            first: "Linus",
            last: "Park",
            location: "Austin",
            skills: "Python, SQL",
            experience: None,
            title: "Data Analyst",
            employer: None,
        },
        CandidateSeed {
            id: 4,
            first: "Margaret",
            last: "Hamilton",
            location: "Boston",
            skills: "Java, Flight Software",
            experience: Some(12),
            title: "Engineering Director",
            employer: Some("Acme Robotics"),
        },
    ] {
        store.insert_candidate(candidate(seed)).expect("insert candidate");
    }

    for seed in [
        JobSeed {
            id: 1,
            title: "Senior Java Developer",
            description: "Build payment services",
            location: "Austin",
            job_type: JobType::FullTime,
            status: JobStatus::Open,
            priority: Priority::High,
            salary: (Some(90_000), Some(130_000)),
            company: 3,
            recruiter: Some(1),
            created_at: at(2025, 5, 1, 9, 0),
        },
        JobSeed {
            id: 2,
            title: "Robotics Engineer",
            description: "Design robot arms",
            location: "Austin",
            job_type: JobType::FullTime,
            status: JobStatus::Open,
            priority: Priority::Urgent,
            salary: (Some(100_000), Some(150_000)),
            company: 1,
            recruiter: Some(1),
            created_at: at(2025, 5, 10, 9, 0),
        },
        JobSeed {
            id: 3,
            title: "Data Analyst",
            description: "Energy market analytics",
            location: "Springfield",
            job_type: JobType::Contract,
            status: JobStatus::Filled,
            priority: Priority::Medium,
            salary: (None, None),
            company: 2,
            recruiter: Some(2),
            created_at: at(2025, 3, 1, 9, 0),
        },
        JobSeed {
            id: 4,
            title: "Java Intern",
            description: "Learn Java on the job",
            location: "Remote",
            job_type: JobType::Internship,
            status: JobStatus::OnHold,
            priority: Priority::Low,
            salary: (Some(20_000), None),
            company: 3,
            recruiter: None,
            created_at: at(2025, 6, 1, 9, 0),
        },
    ] {
        store.insert_job(job(seed)).expect("insert job");
    }

    use ApplicationStatus::{Applied, Hired, Interviewing, Rejected, Screening};
    for seed in [
        application(
            1,
            1,
            2,
            Applied,
            at(2025, 6, 1, 9, 0),
            at(2025, 6, 1, 9, 0),
            Some(at(2025, 6, 10, 12, 0)),
        ),
        application(
            2,
            2,
            1,
            Interviewing,
            at(2025, 5, 5, 9, 0),
            at(2025, 5, 20, 9, 0),
            Some(at(2025, 6, 14, 18, 0)),
        ),
        application(
            3,
            3,
            3,
            Hired,
            at(2025, 3, 5, 10, 0),
            at(2025, 4, 4, 10, 0),
            None,
        ),
        application(
            4,
            4,
            1,
            Rejected,
            at(2025, 5, 6, 9, 0),
            at(2025, 5, 25, 9, 0),
            Some(at(2025, 6, 1, 9, 0)),
        ),
        application(
            5,
            4,
            2,
            Hired,
            at(2025, 5, 12, 8, 0),
            at(2025, 6, 2, 20, 0),
            None,
        ),
        application(
            6,
            1,
            1,
            Screening,
            at(2025, 6, 12, 9, 0),
            at(2025, 6, 13, 9, 0),
            Some(at(2025, 6, 20, 9, 0)),
        ),
    ] {
        store.insert_application(seed).expect("insert application");
    }

    for seed in [
        note(
            1,
            2,
            1,
            "Phone screen went well",
            NoteType::Call,
            Some(at(2025, 6, 14, 9, 0)),
            at(2025, 5, 10, 10, 0),
        ),
        note(
            2,
            1,
            2,
            "Send take-home exercise",
            NoteType::Email,
            Some(at(2025, 6, 18, 9, 0)),
            at(2025, 6, 2, 10, 0),
        ),
        note(
            3,
            6,
            1,
            "Resume looks strong",
            NoteType::General,
            None,
            at(2025, 6, 12, 15, 0),
        ),
    ] {
        store.insert_note(seed).expect("insert note");
    }

    store
}

pub(super) fn search_service() -> SearchService<InMemoryStore> {
    SearchService::new(Arc::new(seeded_store()))
}

pub(super) fn analytics_service() -> AnalyticsService<InMemoryStore> {
    AnalyticsService::new(Arc::new(seeded_store()))
}

pub(super) fn empty_analytics() -> AnalyticsService<InMemoryStore> {
    AnalyticsService::new(Arc::new(InMemoryStore::new()))
}

/// Store holding a job whose company was never loaded.
pub(super) fn dangling_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .insert_job(job(JobSeed {
            id: 7,
            title: "Orphaned Role",
            description: "Company record is missing",
            location: "Nowhere",
            job_type: JobType::PartTime,
            status: JobStatus::Open,
            priority: Priority::Low,
            salary: (None, None),
            company: 99,
            recruiter: None,
            created_at: at(2025, 6, 1, 9, 0),
        }))
        .expect("insert job");
    store
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Store whose every query fails.
pub(super) struct UnavailableStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

impl EntityStore for UnavailableStore {
    fn count(&self, _kind: EntityKind) -> Result<u64, StoreError> {
        offline()
    }

    fn count_jobs_by_status(&self, _status: JobStatus) -> Result<u64, StoreError> {
        offline()
    }

    fn count_applications_by_status(&self, _status: ApplicationStatus) -> Result<u64, StoreError> {
        offline()
    }

    fn count_applications_excluding(&self, _status: ApplicationStatus) -> Result<u64, StoreError> {
        offline()
    }

    fn search_candidates(&self, _term: &str) -> Result<Vec<Candidate>, StoreError> {
        offline()
    }

    fn search_companies(&self, _term: &str) -> Result<Vec<Company>, StoreError> {
        offline()
    }

    fn search_jobs(&self, _term: &str) -> Result<Vec<Job>, StoreError> {
        offline()
    }

    fn query_candidates(
        &self,
        _clauses: &[CandidateClause],
        _request: &PageRequest<CandidateSort>,
    ) -> Result<Page<Candidate>, StoreError> {
        offline()
    }

    fn query_jobs(
        &self,
        _clauses: &[JobClause],
        _request: &PageRequest<JobSort>,
    ) -> Result<Page<Job>, StoreError> {
        offline()
    }

    fn candidate(&self, _id: CandidateId) -> Result<Option<Candidate>, StoreError> {
        offline()
    }

    fn company(&self, _id: CompanyId) -> Result<Option<Company>, StoreError> {
        offline()
    }

    fn job(&self, _id: JobId) -> Result<Option<Job>, StoreError> {
        offline()
    }

    fn application(&self, _id: ApplicationId) -> Result<Option<Application>, StoreError> {
        offline()
    }

    fn applications(&self) -> Result<Vec<Application>, StoreError> {
        offline()
    }

    fn applications_by_status(
        &self,
        _status: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        offline()
    }

    fn follow_ups_due(
        &self,
        _before: NaiveDateTime,
        _excluding: ApplicationStatus,
    ) -> Result<Vec<Application>, StoreError> {
        offline()
    }

    fn jobs(&self) -> Result<Vec<Job>, StoreError> {
        offline()
    }

    fn recruiters(&self) -> Result<Vec<Recruiter>, StoreError> {
        offline()
    }

    fn notes_with_follow_up_due(
        &self,
        _at: NaiveDateTime,
    ) -> Result<Vec<ApplicationNote>, StoreError> {
        offline()
    }

    fn recent_applications(&self, _limit: usize) -> Result<Vec<Application>, StoreError> {
        offline()
    }

    fn recent_jobs(&self, _limit: usize) -> Result<Vec<Job>, StoreError> {
        offline()
    }

    fn recent_notes(&self, _limit: usize) -> Result<Vec<ApplicationNote>, StoreError> {
        offline()
    }
}
