use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::domain::{
    Application, ApplicationId, ApplicationNote, ApplicationStatus, Candidate, CandidateId,
    Company, CompanyId, Job, JobId, JobStatus, JobType, NoteId, NoteType, Priority, Recruiter,
    RecruiterId,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandidateRow {
    id: u64,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default)]
    experience_years: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_job_title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl CandidateRow {
    pub(crate) fn into_candidate(self) -> Result<Candidate, String> {
        Ok(Candidate {
            id: CandidateId(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            location: self.location,
            linkedin_url: self.linkedin_url,
            skills: self.skills,
            experience_years: self.experience_years,
            current_job_title: self.current_job_title,
            current_company: self.current_company,
            summary: self.summary,
            created_at: required_timestamp("createdAt", self.created_at.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompanyRow {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl CompanyRow {
    pub(crate) fn into_company(self) -> Result<Company, String> {
        Ok(Company {
            id: CompanyId(self.id),
            name: self.name,
            industry: self.industry,
            location: self.location,
            website: self.website,
            description: self.description,
            created_at: required_timestamp("createdAt", self.created_at.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JobRow {
    id: u64,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    job_type: String,
    status: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    priority: Option<String>,
    #[serde(default)]
    min_salary: Option<u32>,
    #[serde(default)]
    max_salary: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    company_id: u64,
    #[serde(default)]
    assigned_recruiter_id: Option<u64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl JobRow {
    pub(crate) fn into_job(self) -> Result<Job, String> {
        let job_type = JobType::parse(&self.job_type)
            .ok_or_else(|| format!("unknown jobType '{}'", self.job_type))?;
        let status = JobStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown job status '{}'", self.status))?;
        let priority = match self.priority.as_deref() {
            Some(raw) => Priority::parse(raw).ok_or_else(|| format!("unknown priority '{raw}'"))?,
            None => Priority::Medium,
        };
        let deadline = match self.deadline.as_deref() {
            Some(raw) => Some(
                parse_datetime(raw)
                    .map(|timestamp| timestamp.date())
                    .ok_or_else(|| format!("invalid deadline '{raw}'"))?,
            ),
            None => None,
        };

        Ok(Job {
            id: JobId(self.id),
            title: self.title,
            description: self.description,
            location: self.location,
            job_type,
            status,
            priority,
            min_salary: self.min_salary,
            max_salary: self.max_salary,
            deadline,
            company_id: CompanyId(self.company_id),
            assigned_recruiter_id: self.assigned_recruiter_id.map(RecruiterId),
            created_at: required_timestamp("createdAt", self.created_at.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApplicationRow {
    id: u64,
    candidate_id: u64,
    job_id: u64,
    status: String,
    #[serde(default)]
    rating: Option<u8>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applied_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    follow_up_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    updated_at: Option<String>,
}

impl ApplicationRow {
    /// `appliedAt` and `updatedAt` fall back to `createdAt` when left empty.
    pub(crate) fn into_application(self) -> Result<Application, String> {
        let status = ApplicationStatus::parse(&self.status)
            .ok_or_else(|| format!("unknown application status '{}'", self.status))?;
        let created_at = required_timestamp("createdAt", self.created_at.as_deref())?;
        let applied_at = optional_timestamp("appliedAt", self.applied_at.as_deref())?
            .unwrap_or(created_at);
        let updated_at = optional_timestamp("updatedAt", self.updated_at.as_deref())?
            .unwrap_or(created_at);

        Ok(Application {
            id: ApplicationId(self.id),
            candidate_id: CandidateId(self.candidate_id),
            job_id: JobId(self.job_id),
            status,
            rating: self.rating,
            applied_at,
            follow_up_date: optional_timestamp("followUpDate", self.follow_up_date.as_deref())?,
            created_at,
            updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NoteRow {
    id: u64,
    application_id: u64,
    author_id: u64,
    content: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    note_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    scheduled_follow_up: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl NoteRow {
    pub(crate) fn into_note(self) -> Result<ApplicationNote, String> {
        let note_type = match self.note_type.as_deref() {
            Some(raw) => NoteType::parse(raw).ok_or_else(|| format!("unknown noteType '{raw}'"))?,
            None => NoteType::General,
        };

        Ok(ApplicationNote {
            id: NoteId(self.id),
            application_id: ApplicationId(self.application_id),
            author_id: RecruiterId(self.author_id),
            content: self.content,
            note_type,
            scheduled_follow_up: optional_timestamp(
                "scheduledFollowUp",
                self.scheduled_follow_up.as_deref(),
            )?,
            created_at: required_timestamp("createdAt", self.created_at.as_deref())?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RecruiterRow {
    id: u64,
    first_name: String,
    last_name: String,
}

impl RecruiterRow {
    pub(crate) fn into_recruiter(self) -> Recruiter {
        Recruiter {
            id: RecruiterId(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn required_timestamp(column: &str, raw: Option<&str>) -> Result<NaiveDateTime, String> {
    optional_timestamp(column, raw)?.ok_or_else(|| format!("{column} is required"))
}

fn optional_timestamp(column: &str, raw: Option<&str>) -> Result<Option<NaiveDateTime>, String> {
    match raw {
        Some(value) => parse_datetime(value)
            .map(Some)
            .ok_or_else(|| format!("invalid {column} '{value}'")),
        None => Ok(None),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare dates.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_accepts_supported_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 2)
            .and_then(|date| date.and_hms_opt(8, 15, 0))
            .expect("valid timestamp");

        assert_eq!(parse_datetime("2025-04-02T08:15:00Z"), Some(expected));
        assert_eq!(parse_datetime("2025-04-02T10:15:00+02:00"), Some(expected));
        assert_eq!(parse_datetime("2025-04-02 08:15:00"), Some(expected));
        assert_eq!(parse_datetime(" 2025-04-02T08:15:00 "), Some(expected));
        assert_eq!(
            parse_datetime("2025-04-02"),
            expected.date().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_datetime("04/02/2025"), None);
        assert_eq!(parse_datetime("  "), None);
    }

    #[test]
    fn missing_created_at_is_reported_by_column() {
        let row = RecruiterRow {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Diaz".to_string(),
        };
        assert_eq!(row.into_recruiter().full_name(), "Ana Diaz");

        assert_eq!(
            required_timestamp("createdAt", None),
            Err("createdAt is required".to_string())
        );
        assert_eq!(
            optional_timestamp("followUpDate", Some("soon")),
            Err("invalid followUpDate 'soon'".to_string())
        );
    }
}
