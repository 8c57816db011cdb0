//! Heuristic relevance between a query and a search record.
//!
//! Scores are unnormalized sums of per-field contributions and are only
//! comparable within one ranked search.

use super::record::SearchRecord;

/// Score assigned to every record when the query is blank.
pub const NEUTRAL_SCORE: f64 = 1.0;

/// How a lower-cased field value relates to the lower-cased query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    None,
    Substring,
    Prefix,
    Exact,
}

impl MatchKind {
    pub fn classify(value: &str, query: &str) -> Self {
        if value == query {
            Self::Exact
        } else if value.starts_with(query) {
            Self::Prefix
        } else if value.contains(query) {
            Self::Substring
        } else {
            Self::None
        }
    }

    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Exact => 2.0,
            Self::Prefix => 1.5,
            Self::Substring => 1.0,
            Self::None => 0.0,
        }
    }
}

/// Weighted contribution of one field. Absent fields contribute nothing.
pub fn field_contribution(value: Option<&str>, query: &str, weight: f64) -> f64 {
    value.map_or(0.0, |value| {
        weight * MatchKind::classify(&value.to_lowercase(), query).multiplier()
    })
}

/// Sum of weighted field matches; `NEUTRAL_SCORE` for a blank query.
pub fn relevance_score(query: &str, record: &SearchRecord) -> f64 {
    if query.trim().is_empty() {
        return NEUTRAL_SCORE;
    }

    let query = query.to_lowercase();
    weighted_fields(record)
        .into_iter()
        .map(|(value, weight)| field_contribution(value, &query, weight))
        .sum()
}

fn weighted_fields(record: &SearchRecord) -> Vec<(Option<&str>, f64)> {
    match record {
        SearchRecord::Candidate(hit) => vec![
            (Some(hit.name.as_str()), 3.0),
            (hit.skills.as_deref(), 2.0),
            (hit.current_job_title.as_deref(), 2.0),
            (hit.location.as_deref(), 1.0),
        ],
        SearchRecord::Company(hit) => vec![
            (Some(hit.name.as_str()), 3.0),
            (hit.industry.as_deref(), 2.0),
            (hit.description.as_deref(), 1.0),
            (hit.location.as_deref(), 1.0),
        ],
        SearchRecord::Job(hit) => vec![
            (Some(hit.title.as_str()), 3.0),
            (hit.company_name.as_deref(), 2.0),
            (hit.location.as_deref(), 1.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateId, JobId, JobStatus, JobType, Priority};
    use crate::search::record::{CandidateHit, JobHit};

    fn job_hit(title: &str, company: Option<&str>) -> SearchRecord {
        SearchRecord::Job(JobHit {
            id: JobId(1),
            title: title.to_string(),
            company_name: company.map(str::to_string),
            location: None,
            job_type: JobType::FullTime,
            status: JobStatus::Open,
            priority: Priority::Low,
            deadline: None,
        })
    }

    fn candidate_hit(skills: &str) -> SearchRecord {
        SearchRecord::Candidate(CandidateHit {
            id: CandidateId(1),
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            phone: None,
            location: None,
            current_job_title: None,
            experience_years: None,
            skills: Some(skills.to_string()),
        })
    }

    #[test]
    fn blank_query_is_neutral() {
        assert_eq!(relevance_score("", &job_hit("Anything", None)), 1.0);
        assert_eq!(relevance_score("   ", &candidate_hit("Java")), 1.0);
    }

    #[test]
    fn substring_title_match_uses_plain_weight() {
        let score = relevance_score("java developer", &job_hit("Senior Java Developer", None));
        assert_eq!(score, 3.0);
    }

    #[test]
    fn skills_prefix_and_substring() {
        // "java, python" starts with "java"
        assert_eq!(relevance_score("java", &candidate_hit("Java, Python")), 3.0);
        assert_eq!(relevance_score("python", &candidate_hit("Java, Python")), 2.0);
    }

    #[test]
    fn exact_beats_prefix_beats_substring() {
        let exact = relevance_score("rust", &job_hit("Rust", None));
        let prefix = relevance_score("rust", &job_hit("Rust Engineer", None));
        let substring = relevance_score("rust", &job_hit("Senior Rust Engineer", None));
        let none = relevance_score("rust", &job_hit("Go Engineer", None));

        assert_eq!(exact, 6.0);
        assert_eq!(prefix, 4.5);
        assert_eq!(substring, 3.0);
        assert_eq!(none, 0.0);
    }

    #[test]
    fn contributions_sum_across_fields_and_ignore_absent_ones() {
        let score = relevance_score("acme", &job_hit("Acme Liaison", Some("ACME")));
        assert_eq!(score, 4.5 + 4.0);
        assert_eq!(relevance_score("acme", &job_hit("Liaison", None)), 0.0);
    }

    #[test]
    fn query_case_is_ignored() {
        assert_eq!(
            relevance_score("RUST", &job_hit("rust", None)),
            relevance_score("rust", &job_hit("RUST", None))
        );
    }
}
