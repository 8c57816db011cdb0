use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::{Candidate, Job};

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than `desc` sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateSort {
    #[default]
    FirstName,
    LastName,
    Email,
    Location,
    ExperienceYears,
    CreatedAt,
    Id,
}

impl CandidateSort {
    /// Field names as the HTTP layer receives them (`sortBy=experienceYears`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            "location" => Some(Self::Location),
            "experienceYears" => Some(Self::ExperienceYears),
            "createdAt" => Some(Self::CreatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    pub fn compare(self, a: &Candidate, b: &Candidate) -> Ordering {
        match self {
            Self::FirstName => text(&a.first_name).cmp(&text(&b.first_name)),
            Self::LastName => text(&a.last_name).cmp(&text(&b.last_name)),
            Self::Email => text(&a.email).cmp(&text(&b.email)),
            Self::Location => optional_text(a.location.as_deref())
                .cmp(&optional_text(b.location.as_deref())),
            Self::ExperienceYears => a.experience_years.cmp(&b.experience_years),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSort {
    #[default]
    Title,
    Location,
    JobType,
    Status,
    Priority,
    MinSalary,
    MaxSalary,
    Deadline,
    CreatedAt,
    Id,
}

impl JobSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "title" => Some(Self::Title),
            "location" => Some(Self::Location),
            "jobType" => Some(Self::JobType),
            "status" => Some(Self::Status),
            "priority" => Some(Self::Priority),
            "minSalary" => Some(Self::MinSalary),
            "maxSalary" => Some(Self::MaxSalary),
            "deadline" => Some(Self::Deadline),
            "createdAt" => Some(Self::CreatedAt),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    pub fn compare(self, a: &Job, b: &Job) -> Ordering {
        match self {
            Self::Title => text(&a.title).cmp(&text(&b.title)),
            Self::Location => optional_text(a.location.as_deref())
                .cmp(&optional_text(b.location.as_deref())),
            Self::JobType => a.job_type.cmp(&b.job_type),
            Self::Status => a.status.cmp(&b.status),
            Self::Priority => a.priority.cmp(&b.priority),
            Self::MinSalary => a.min_salary.cmp(&b.min_salary),
            Self::MaxSalary => a.max_salary.cmp(&b.max_salary),
            Self::Deadline => a.deadline.cmp(&b.deadline),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Id => a.id.cmp(&b.id),
        }
    }
}

/// Zero-based page window plus ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<S> {
    pub page: usize,
    pub size: usize,
    pub sort: S,
    pub direction: SortDirection,
}

impl<S: Default> Default for PageRequest<S> {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: S::default(),
            direction: SortDirection::Asc,
        }
    }
}

impl<S> PageRequest<S> {
    /// Sorts `items` by the requested key, breaking ties with `tie_break` ascending
    /// regardless of direction, then cuts out the requested window.
    pub fn paginate<T, K: Ord>(
        &self,
        mut items: Vec<T>,
        compare: impl Fn(&T, &T) -> Ordering,
        tie_break: impl Fn(&T) -> K,
    ) -> Page<T> {
        items.sort_by(|a, b| {
            self.direction
                .apply(compare(a, b))
                .then_with(|| tie_break(a).cmp(&tie_break(b)))
        });

        let size = self.size.max(1);
        let total_elements = items.len();
        let total_pages = total_elements.div_ceil(size);
        let content = items
            .into_iter()
            .skip(self.page.saturating_mul(size))
            .take(size)
            .collect();

        Page {
            content,
            page: self.page,
            size,
            total_elements,
            total_pages,
        }
    }
}

/// Slice of a filtered, sorted result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

fn text(value: &str) -> String {
    value.to_lowercase()
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_breaks_ties_by_key_in_both_directions() {
        let rows = vec![(3, "b"), (1, "a"), (2, "b"), (4, "a")];
        let request = PageRequest {
            page: 0,
            size: 10,
            sort: (),
            direction: SortDirection::Desc,
        };

        let page = request.paginate(rows, |a, b| a.1.cmp(b.1), |row| row.0);
        let ids: Vec<_> = page.content.iter().map(|row| row.0).collect();
        assert_eq!(ids, [2, 3, 1, 4]);
    }

    #[test]
    fn paginate_reports_totals_and_windows() {
        let rows: Vec<u32> = (0..45).collect();
        let request = PageRequest {
            page: 2,
            size: 20,
            sort: (),
            direction: SortDirection::Asc,
        };

        let page = request.paginate(rows, |a, b| a.cmp(b), |row| *row);
        assert_eq!(page.total_elements, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content, (40..45).collect::<Vec<_>>());

        let beyond = PageRequest { page: 9, ..request }.paginate(
            (0..5).collect::<Vec<u32>>(),
            |a, b| a.cmp(b),
            |row| *row,
        );
        assert!(beyond.content.is_empty());
        assert_eq!(beyond.total_pages, 1);
    }

    #[test]
    fn unknown_sort_fields_are_rejected_for_defaulting() {
        assert_eq!(CandidateSort::parse("experienceYears"), Some(CandidateSort::ExperienceYears));
        assert_eq!(CandidateSort::parse("password"), None);
        assert_eq!(JobSort::parse("maxSalary"), Some(JobSort::MaxSalary));
        assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
    }
}
