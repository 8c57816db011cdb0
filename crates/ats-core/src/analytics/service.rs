use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use super::trends::monthly_buckets;
use super::views::{
    ActivityEntry, ApplicationStatusCount, ConversionRates, DashboardStats, DashboardSummary,
    FollowUpEntry, JobApplicationCount, JobStatusCount, MonthlyTrends, NoteView, RecentJob,
    RecruiterPerformance, StatusCount,
};
use crate::domain::{
    Application, ApplicationNote, ApplicationStatus, Candidate, CandidateId, Company, Job, JobId,
    JobStatus, RecruiterId,
};
use crate::store::{require, EntityKind, EntityStore, StoreError};

/// Number of activity rows embedded in the dashboard summary.
pub const SUMMARY_ACTIVITY_LIMIT: usize = 5;

/// Read-only aggregation over the entity store. Every call recomputes.
pub struct AnalyticsService<S> {
    store: Arc<S>,
}

impl<S> AnalyticsService<S>
where
    S: EntityStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn dashboard_stats(&self) -> Result<DashboardStats, AnalyticsError> {
        let store = &self.store;
        Ok(DashboardStats {
            total_applications: store.count(EntityKind::Application)?,
            total_jobs: store.count(EntityKind::Job)?,
            total_candidates: store.count(EntityKind::Candidate)?,
            total_companies: store.count(EntityKind::Company)?,
            open_jobs: store.count_jobs_by_status(JobStatus::Open)?,
            filled_jobs: store.count_jobs_by_status(JobStatus::Filled)?,
            active_applications: store.count_applications_excluding(ApplicationStatus::Rejected)?,
            hired_candidates: store.count_applications_by_status(ApplicationStatus::Hired)?,
        })
    }

    pub fn applications_by_status(&self) -> Result<Vec<ApplicationStatusCount>, AnalyticsError> {
        ApplicationStatus::ordered()
            .into_iter()
            .map(|status| -> Result<ApplicationStatusCount, AnalyticsError> {
                Ok(StatusCount {
                    status,
                    count: self.store.count_applications_by_status(status)?,
                })
            })
            .collect()
    }

    pub fn jobs_by_status(&self) -> Result<Vec<JobStatusCount>, AnalyticsError> {
        JobStatus::ordered()
            .into_iter()
            .map(|status| -> Result<JobStatusCount, AnalyticsError> {
                Ok(StatusCount {
                    status,
                    count: self.store.count_jobs_by_status(status)?,
                })
            })
            .collect()
    }

    /// Busiest jobs first; jobs without applications are left out.
    pub fn applications_per_job(&self) -> Result<Vec<JobApplicationCount>, AnalyticsError> {
        let mut per_job: BTreeMap<JobId, u64> = BTreeMap::new();
        for application in self.store.applications()? {
            *per_job.entry(application.job_id).or_default() += 1;
        }

        let mut rows = Vec::with_capacity(per_job.len());
        for (job_id, application_count) in per_job {
            let (job, company) = self.job_with_company(job_id)?;
            rows.push(JobApplicationCount {
                job_id,
                job_title: job.title,
                company_name: company.name,
                application_count,
            });
        }

        rows.sort_by(|a, b| {
            b.application_count
                .cmp(&a.application_count)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });
        Ok(rows)
    }

    pub fn conversion_rates(&self) -> Result<ConversionRates, AnalyticsError> {
        let total = self.store.count(EntityKind::Application)?;
        if total == 0 {
            return Ok(ConversionRates::default());
        }

        let rate = |status: ApplicationStatus| -> Result<Option<f64>, AnalyticsError> {
            let count = self.store.count_applications_by_status(status)?;
            Ok(Some(percentage(count, total)))
        };

        Ok(ConversionRates {
            screening_rate: rate(ApplicationStatus::Screening)?,
            interview_rate: rate(ApplicationStatus::Interviewing)?,
            offer_rate: rate(ApplicationStatus::Offer)?,
            hire_rate: rate(ApplicationStatus::Hired)?,
        })
    }

    pub fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>, AnalyticsError> {
        self.store
            .recent_applications(limit)?
            .into_iter()
            .map(|application| -> Result<ActivityEntry, AnalyticsError> {
                let candidate = self.candidate_of(&application)?;
                let (job, company) = self.job_with_company(application.job_id)?;
                Ok(ActivityEntry {
                    id: application.id,
                    candidate_name: candidate.full_name(),
                    job_title: job.title,
                    company_name: company.name,
                    status: application.status,
                    applied_at: application.applied_at,
                    last_update: application.updated_at,
                })
            })
            .collect()
    }

    /// Overdue follow-ups on applications that are still in play, most overdue first.
    pub fn follow_up_needed(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<FollowUpEntry>, AnalyticsError> {
        let mut entries = Vec::new();
        for application in self.store.follow_ups_due(now, ApplicationStatus::Rejected)? {
            let Some(follow_up_date) = application.follow_up_date else {
                continue;
            };
            let candidate = self.candidate_of(&application)?;
            let (job, company) = self.job_with_company(application.job_id)?;
            entries.push(FollowUpEntry {
                id: application.id,
                candidate_name: candidate.full_name(),
                candidate_email: candidate.email,
                job_title: job.title,
                company_name: company.name,
                status: application.status,
                follow_up_date,
                days_past_due: (now - follow_up_date).num_days().max(0),
            });
        }

        entries.sort_by(|a, b| {
            a.follow_up_date
                .cmp(&b.follow_up_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(entries)
    }

    /// Mean whole days from application to hire; `0.0` without hires.
    pub fn average_time_to_fill(&self) -> Result<f64, AnalyticsError> {
        let hired = self
            .store
            .applications_by_status(ApplicationStatus::Hired)?;
        if hired.is_empty() {
            return Ok(0.0);
        }

        let total_days: i64 = hired
            .iter()
            .map(|application| (application.updated_at - application.applied_at).num_days())
            .sum();
        Ok(total_days as f64 / hired.len() as f64)
    }

    /// One row per recruiter with at least one assigned job, ordered by recruiter id.
    pub fn recruiter_performance(&self) -> Result<Vec<RecruiterPerformance>, AnalyticsError> {
        let jobs = self.store.jobs()?;
        let applications = self.store.applications()?;
        let recruiters: HashMap<RecruiterId, String> = self
            .store
            .recruiters()?
            .into_iter()
            .map(|recruiter| (recruiter.id, recruiter.full_name()))
            .collect();

        let mut assigned: BTreeMap<RecruiterId, Vec<JobId>> = BTreeMap::new();
        for job in &jobs {
            if let Some(recruiter_id) = job.assigned_recruiter_id {
                assigned.entry(recruiter_id).or_default().push(job.id);
            }
        }

        let mut rows = Vec::with_capacity(assigned.len());
        for (recruiter_id, job_ids) in assigned {
            let recruiter_name = require(
                recruiters.get(&recruiter_id).cloned(),
                EntityKind::Recruiter,
                recruiter_id.0,
            )?;
            let owned: Vec<&Application> = applications
                .iter()
                .filter(|application| job_ids.contains(&application.job_id))
                .collect();
            let total_applications = owned.len() as u64;
            let hired_count = owned
                .iter()
                .filter(|application| application.status == ApplicationStatus::Hired)
                .count() as u64;

            rows.push(RecruiterPerformance {
                recruiter_name,
                total_jobs: job_ids.len() as u64,
                total_applications,
                hired_count,
                success_rate: percentage(hired_count, total_applications),
            });
        }

        Ok(rows)
    }

    /// Six month application and hire series ending at `now`'s month.
    pub fn monthly_trends(&self, now: NaiveDateTime) -> Result<MonthlyTrends, AnalyticsError> {
        let applications = self.store.applications()?;

        let application_trends =
            monthly_buckets(applications.iter().map(|application| application.created_at), now);
        let hire_trends = monthly_buckets(
            applications
                .iter()
                .filter(|application| application.status == ApplicationStatus::Hired)
                .map(|application| application.updated_at),
            now,
        );

        Ok(MonthlyTrends {
            application_trends,
            hire_trends,
        })
    }

    pub fn summary(&self, now: NaiveDateTime) -> Result<DashboardSummary, AnalyticsError> {
        let summary = DashboardSummary {
            stats: self.dashboard_stats()?,
            recent_activity: self.recent_activity(SUMMARY_ACTIVITY_LIMIT)?,
            follow_ups: self.follow_up_needed(now)?,
            conversion_rates: self.conversion_rates()?,
            average_time_to_fill: self.average_time_to_fill()?,
        };
        debug!(
            follow_ups = summary.follow_ups.len(),
            applications = summary.stats.total_applications,
            "dashboard summary"
        );
        Ok(summary)
    }

    pub fn recent_jobs(&self, limit: usize) -> Result<Vec<RecentJob>, AnalyticsError> {
        self.store
            .recent_jobs(limit)?
            .into_iter()
            .map(|job| -> Result<RecentJob, AnalyticsError> {
                let company = self.company_of(&job)?;
                Ok(RecentJob {
                    id: job.id,
                    title: job.title,
                    company_name: company.name,
                    job_type: job.job_type,
                    status: job.status,
                    priority: job.priority,
                    created_at: job.created_at,
                })
            })
            .collect()
    }

    pub fn recent_notes(&self, limit: usize) -> Result<Vec<NoteView>, AnalyticsError> {
        let notes = self.store.recent_notes(limit)?;
        self.note_views(notes)
    }

    /// Notes whose scheduled follow-up has come due, earliest first.
    pub fn note_follow_ups_due(&self, now: NaiveDateTime) -> Result<Vec<NoteView>, AnalyticsError> {
        let notes = self.store.notes_with_follow_up_due(now)?;
        self.note_views(notes)
    }

    fn note_views(
        &self,
        notes: Vec<ApplicationNote>,
    ) -> Result<Vec<NoteView>, AnalyticsError> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }
        let authors: HashMap<RecruiterId, String> = self
            .store
            .recruiters()?
            .into_iter()
            .map(|recruiter| (recruiter.id, recruiter.full_name()))
            .collect();

        notes
            .into_iter()
            .map(|note| -> Result<NoteView, AnalyticsError> {
                let application = require(
                    self.store.application(note.application_id)?,
                    EntityKind::Application,
                    note.application_id.0,
                )?;
                let candidate = self.candidate_of(&application)?;
                let job = self.job(application.job_id)?;
                let author_name = require(
                    authors.get(&note.author_id).cloned(),
                    EntityKind::Recruiter,
                    note.author_id.0,
                )?;
                Ok(NoteView {
                    id: note.id,
                    application_id: note.application_id,
                    author_name,
                    candidate_name: candidate.full_name(),
                    job_title: job.title,
                    note_type: note.note_type,
                    content: note.content,
                    scheduled_follow_up: note.scheduled_follow_up,
                    created_at: note.created_at,
                })
            })
            .collect()
    }

    fn candidate_of(&self, application: &Application) -> Result<Candidate, StoreError> {
        let id: CandidateId = application.candidate_id;
        require(self.store.candidate(id)?, EntityKind::Candidate, id.0)
    }

    fn job(&self, id: JobId) -> Result<Job, StoreError> {
        require(self.store.job(id)?, EntityKind::Job, id.0)
    }

    fn company_of(&self, job: &Job) -> Result<Company, StoreError> {
        require(
            self.store.company(job.company_id)?,
            EntityKind::Company,
            job.company_id.0,
        )
    }

    fn job_with_company(&self, id: JobId) -> Result<(Job, Company), StoreError> {
        let job = self.job(id)?;
        let company = self.company_of(&job)?;
        Ok((job, company))
    }
}

/// `100 * part / total`, `0.0` when `total` is zero.
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0).min(100.0)
}

/// Error raised by analytics operations.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
