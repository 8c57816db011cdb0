//! Conjunctive search criteria expressed as predicate clauses.
//!
//! Each present criterion contributes exactly one clause and absent or blank
//! criteria contribute none, so an empty clause list matches everything.

use crate::domain::{Candidate, CompanyId, Job, JobStatus, JobType};

/// Optional filters for the advanced candidate search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateCriteria {
    pub query: Option<String>,
    pub location: Option<String>,
    pub min_experience: Option<u32>,
    pub max_experience: Option<u32>,
    pub skills: Option<String>,
}

impl CandidateCriteria {
    pub fn clauses(&self) -> Vec<CandidateClause> {
        let mut clauses = Vec::new();

        if let Some(term) = needle(self.query.as_deref()) {
            clauses.push(CandidateClause::Matches(term));
        }
        if let Some(location) = needle(self.location.as_deref()) {
            clauses.push(CandidateClause::LocationContains(location));
        }
        if let Some(years) = self.min_experience {
            clauses.push(CandidateClause::MinExperience(years));
        }
        if let Some(years) = self.max_experience {
            clauses.push(CandidateClause::MaxExperience(years));
        }
        if let Some(skills) = needle(self.skills.as_deref()) {
            clauses.push(CandidateClause::SkillsContain(skills));
        }

        clauses
    }
}

/// Single predicate over a candidate. Text payloads are already lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateClause {
    Matches(String),
    LocationContains(String),
    MinExperience(u32),
    MaxExperience(u32),
    SkillsContain(String),
}

impl CandidateClause {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        match self {
            Self::Matches(term) => candidate_matches_term(candidate, term),
            Self::LocationContains(location) => contains(candidate.location.as_deref(), location),
            // Unknown experience never satisfies a bound.
            Self::MinExperience(years) => candidate
                .experience_years
                .is_some_and(|experience| experience >= *years),
            Self::MaxExperience(years) => candidate
                .experience_years
                .is_some_and(|experience| experience <= *years),
            Self::SkillsContain(skills) => contains(candidate.skills.as_deref(), skills),
        }
    }
}

/// Optional filters for the advanced job search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobCriteria {
    pub query: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
    pub company_id: Option<CompanyId>,
}

impl JobCriteria {
    pub fn clauses(&self) -> Vec<JobClause> {
        let mut clauses = Vec::new();

        if let Some(term) = needle(self.query.as_deref()) {
            clauses.push(JobClause::Matches(term));
        }
        if let Some(location) = needle(self.location.as_deref()) {
            clauses.push(JobClause::LocationContains(location));
        }
        if let Some(job_type) = self.job_type {
            clauses.push(JobClause::JobTypeIs(job_type));
        }
        if let Some(status) = self.status {
            clauses.push(JobClause::StatusIs(status));
        }
        if let Some(floor) = self.min_salary {
            clauses.push(JobClause::PaysAtLeast(floor));
        }
        if let Some(ceiling) = self.max_salary {
            clauses.push(JobClause::StartsAtMost(ceiling));
        }
        if let Some(company_id) = self.company_id {
            clauses.push(JobClause::CompanyIs(company_id));
        }

        clauses
    }
}

/// Single predicate over a job. `Matches` also looks at the owning company's name,
/// which the store joins in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobClause {
    Matches(String),
    LocationContains(String),
    JobTypeIs(JobType),
    StatusIs(JobStatus),
    /// Salary range overlap, lower side: the job's ceiling reaches the requested floor.
    PaysAtLeast(u32),
    /// Salary range overlap, upper side: the job's floor stays under the requested ceiling.
    StartsAtMost(u32),
    CompanyIs(CompanyId),
}

impl JobClause {
    pub fn matches(&self, job: &Job, company_name: Option<&str>) -> bool {
        match self {
            Self::Matches(term) => {
                contains(Some(&job.title), term)
                    || contains(Some(&job.description), term)
                    || contains(company_name, term)
            }
            Self::LocationContains(location) => contains(job.location.as_deref(), location),
            Self::JobTypeIs(job_type) => job.job_type == *job_type,
            Self::StatusIs(status) => job.status == *status,
            // A job without a published bound is not excluded by that side.
            Self::PaysAtLeast(floor) => job.max_salary.map_or(true, |max| max >= *floor),
            Self::StartsAtMost(ceiling) => job.min_salary.map_or(true, |min| min <= *ceiling),
            Self::CompanyIs(company_id) => job.company_id == *company_id,
        }
    }
}

/// Global candidate lookup: full name, email, skills, current title, current employer.
pub(crate) fn candidate_matches_term(candidate: &Candidate, term: &str) -> bool {
    contains(Some(&candidate.full_name()), term)
        || contains(Some(&candidate.email), term)
        || contains(candidate.skills.as_deref(), term)
        || contains(candidate.current_job_title.as_deref(), term)
        || contains(candidate.current_company.as_deref(), term)
}

/// Global job lookup: title, description, location.
pub(crate) fn job_matches_term(job: &Job, term: &str) -> bool {
    contains(Some(&job.title), term)
        || contains(Some(&job.description), term)
        || contains(job.location.as_deref(), term)
}

/// `needle` must already be lower-cased. An empty needle matches any present value.
pub(crate) fn contains(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(needle))
}

fn needle(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateId, JobId, Priority};
    use chrono::NaiveDate;

    fn created() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid timestamp")
    }

    fn candidate(experience: Option<u32>) -> Candidate {
        Candidate {
            id: CandidateId(1),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            location: Some("London".to_string()),
            linkedin_url: None,
            skills: Some("Rust, Analytical Engines".to_string()),
            experience_years: experience,
            current_job_title: Some("Engineer".to_string()),
            current_company: None,
            summary: None,
            created_at: created(),
        }
    }

    fn job(min_salary: Option<u32>, max_salary: Option<u32>) -> Job {
        Job {
            id: JobId(1),
            title: "Platform Engineer".to_string(),
            description: "Own the build fleet".to_string(),
            location: Some("Berlin".to_string()),
            job_type: JobType::FullTime,
            status: JobStatus::Open,
            priority: Priority::High,
            min_salary,
            max_salary,
            deadline: None,
            company_id: CompanyId(7),
            assigned_recruiter_id: None,
            created_at: created(),
        }
    }

    #[test]
    fn blank_criteria_produce_no_clauses() {
        let criteria = CandidateCriteria {
            query: Some("   ".to_string()),
            location: Some(String::new()),
            ..CandidateCriteria::default()
        };
        assert!(criteria.clauses().is_empty());
        assert!(JobCriteria::default().clauses().is_empty());
    }

    #[test]
    fn each_present_criterion_adds_one_clause() {
        let criteria = CandidateCriteria {
            query: Some("Ada".to_string()),
            location: Some("LON".to_string()),
            min_experience: Some(2),
            max_experience: Some(10),
            skills: Some("rust".to_string()),
        };
        let clauses = criteria.clauses();
        assert_eq!(clauses.len(), 5);
        assert_eq!(clauses[0], CandidateClause::Matches("ada".to_string()));
        assert!(clauses.iter().all(|clause| clause.matches(&candidate(Some(5)))));
    }

    #[test]
    fn experience_bounds_exclude_unknown_experience() {
        assert!(!CandidateClause::MinExperience(1).matches(&candidate(None)));
        assert!(!CandidateClause::MaxExperience(30).matches(&candidate(None)));
        assert!(CandidateClause::MaxExperience(5).matches(&candidate(Some(5))));
        assert!(!CandidateClause::MinExperience(6).matches(&candidate(Some(5))));
    }

    #[test]
    fn salary_clauses_test_range_overlap() {
        let posted = job(Some(80_000), Some(100_000));

        assert!(JobClause::PaysAtLeast(90_000).matches(&posted, None));
        assert!(JobClause::PaysAtLeast(100_000).matches(&posted, None));
        assert!(!JobClause::PaysAtLeast(100_001).matches(&posted, None));
        assert!(JobClause::StartsAtMost(80_000).matches(&posted, None));
        assert!(!JobClause::StartsAtMost(79_999).matches(&posted, None));

        let unpublished = job(None, None);
        assert!(JobClause::PaysAtLeast(1_000_000).matches(&unpublished, None));
        assert!(JobClause::StartsAtMost(1).matches(&unpublished, None));
    }

    #[test]
    fn job_query_clause_includes_company_name() {
        let posted = job(None, None);
        let clause = JobClause::Matches("acme".to_string());
        assert!(clause.matches(&posted, Some("ACME Robotics")));
        assert!(!clause.matches(&posted, Some("Globex")));
        assert!(!clause.matches(&posted, None));
    }

    #[test]
    fn global_candidate_match_covers_full_name() {
        assert!(candidate_matches_term(&candidate(None), "ada love"));
        assert!(candidate_matches_term(&candidate(None), "engines"));
        assert!(!candidate_matches_term(&candidate(None), "london"));
    }
}
