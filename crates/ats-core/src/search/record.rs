use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    Candidate, CandidateId, Company, CompanyId, Job, JobId, JobStatus, JobType, Priority,
};

/// Entity types a search can span. Declaration order is discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Candidate,
    Company,
    Job,
}

impl RecordKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Candidate, Self::Company, Self::Job]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Company => "company",
            Self::Job => "job",
        }
    }

    /// Case-insensitive; `None` for anything that is not one of the three labels.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateHit {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub current_job_title: Option<String>,
    pub experience_years: Option<u32>,
    pub skills: Option<String>,
}

impl From<&Candidate> for CandidateHit {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.full_name(),
            email: candidate.email.clone(),
            phone: candidate.phone.clone(),
            location: candidate.location.clone(),
            current_job_title: candidate.current_job_title.clone(),
            experience_years: candidate.experience_years,
            skills: candidate.skills.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHit {
    pub id: CompanyId,
    pub name: String,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl From<&Company> for CompanyHit {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            industry: company.industry.clone(),
            location: company.location.clone(),
            website: company.website.clone(),
            description: company.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHit {
    pub id: JobId,
    pub title: String,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub job_type: JobType,
    pub status: JobStatus,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
}

impl JobHit {
    /// The company name is resolved by the caller since jobs only carry the id.
    pub fn from_job(job: &Job, company_name: Option<String>) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            company_name,
            location: job.location.clone(),
            job_type: job.job_type,
            status: job.status,
            priority: job.priority,
            deadline: job.deadline,
        }
    }
}

/// Flat projection of one matched entity, tagged with its `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchRecord {
    Candidate(CandidateHit),
    Company(CompanyHit),
    Job(JobHit),
}

impl SearchRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Candidate(_) => RecordKind::Candidate,
            Self::Company(_) => RecordKind::Company,
            Self::Job(_) => RecordKind::Job,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Self::Candidate(hit) => hit.id.0,
            Self::Company(hit) => hit.id.0,
            Self::Job(hit) => hit.id.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    #[serde(flatten)]
    pub record: SearchRecord,
    pub relevance_score: f64,
}

/// Per-type matches with no cross-type ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GlobalSearchResults {
    pub candidates: Vec<SearchRecord>,
    pub companies: Vec<SearchRecord>,
    pub jobs: Vec<SearchRecord>,
}

impl GlobalSearchResults {
    pub fn len(&self) -> usize {
        self.candidates.len() + self.companies.len() + self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates, then companies, then jobs.
    pub fn into_records(self) -> Vec<SearchRecord> {
        self.candidates
            .into_iter()
            .chain(self.companies)
            .chain(self.jobs)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSearchResults {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<RankedResult>,
}

/// Body of a filtered search. Both keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: Option<String>,
    /// Raw `type` value; validated when the search runs.
    pub kind: Option<String>,
}

impl SearchFilters {
    /// Reads `query` and `type` from a JSON object, ignoring non-string values.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            query: text("query"),
            kind: text("type"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_serialize_flat_with_type_tag() {
        let record = SearchRecord::Company(CompanyHit {
            id: CompanyId(4),
            name: "Globex".to_string(),
            industry: None,
            location: Some("Springfield".to_string()),
            website: None,
            description: None,
        });
        let ranked = RankedResult {
            record,
            relevance_score: 4.5,
        };

        let value = serde_json::to_value(&ranked).expect("serialize");
        assert_eq!(value["type"], json!("company"));
        assert_eq!(value["id"], json!(4));
        assert_eq!(value["name"], json!("Globex"));
        assert_eq!(value["relevanceScore"], json!(4.5));
    }

    #[test]
    fn filters_ignore_non_string_values() {
        let filters = SearchFilters::from_value(&json!({"query": 12, "type": "Job"}));
        assert_eq!(filters.query, None);
        assert_eq!(filters.kind.as_deref(), Some("Job"));

        assert_eq!(SearchFilters::from_value(&json!([])), SearchFilters::default());
    }

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!(RecordKind::parse("JOB"), Some(RecordKind::Job));
        assert_eq!(RecordKind::parse(" company "), Some(RecordKind::Company));
        assert_eq!(RecordKind::parse("recruiter"), None);
    }
}
