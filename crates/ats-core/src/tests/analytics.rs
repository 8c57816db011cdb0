use std::sync::Arc;

use super::common::*;
use crate::analytics::{AnalyticsError, AnalyticsService, DashboardStats, StatusCount};
use crate::domain::{ApplicationId, ApplicationStatus, JobStatus, NoteId};
use crate::store::{EntityKind, InMemoryStore, StoreError};

fn approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn stats_count_the_whole_pipeline() {
    let stats = analytics_service().dashboard_stats().expect("stats");

    assert_eq!(
        stats,
        DashboardStats {
            total_applications: 6,
            total_jobs: 4,
            total_candidates: 4,
            total_companies: 3,
            open_jobs: 2,
            filled_jobs: 1,
            active_applications: 5,
            hired_candidates: 2,
        }
    );
}

#[test]
fn empty_store_reports_zeroes() {
    let service = empty_analytics();

    assert_eq!(service.dashboard_stats().expect("stats"), DashboardStats::default());
    assert!(service.conversion_rates().expect("rates").is_empty());
    assert_eq!(service.average_time_to_fill().expect("average"), 0.0);
    assert!(service.applications_per_job().expect("per job").is_empty());
    assert!(service.recruiter_performance().expect("performance").is_empty());

    let trends = service.monthly_trends(now()).expect("trends");
    assert_eq!(trends.application_trends.len(), 6);
    assert!(trends.application_trends.iter().all(|bucket| bucket.count == 0));
}

#[test]
fn status_breakdowns_list_every_status_in_order() {
    let service = analytics_service();

    let applications = service.applications_by_status().expect("by status");
    assert_eq!(
        applications[0],
        StatusCount {
            status: ApplicationStatus::Applied,
            count: 1,
        }
    );
    let counts: Vec<(ApplicationStatus, u64)> = applications
        .iter()
        .map(|row| (row.status, row.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            (ApplicationStatus::Applied, 1),
            (ApplicationStatus::Screening, 1),
            (ApplicationStatus::Interviewing, 1),
            (ApplicationStatus::Offer, 0),
            (ApplicationStatus::Hired, 2),
            (ApplicationStatus::Rejected, 1),
        ]
    );

    let jobs = service.jobs_by_status().expect("by status");
    let counts: Vec<(JobStatus, u64)> = jobs.iter().map(|row| (row.status, row.count)).collect();
    assert_eq!(
        counts,
        vec![
            (JobStatus::Open, 2),
            (JobStatus::OnHold, 1),
            (JobStatus::Filled, 1),
            (JobStatus::Cancelled, 0),
        ]
    );
}

#[test]
fn applications_per_job_puts_busiest_first() {
    let rows = analytics_service().applications_per_job().expect("per job");

    let summary: Vec<(&str, &str, u64)> = rows
        .iter()
        .map(|row| {
            (
                row.job_title.as_str(),
                row.company_name.as_str(),
                row.application_count,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Senior Java Developer", "Initech", 3),
            ("Robotics Engineer", "Acme Robotics", 2),
            ("Data Analyst", "Globex", 1),
        ]
    );
}

#[test]
fn conversion_rates_are_shares_of_all_applications() {
    let rates = analytics_service().conversion_rates().expect("rates");

    approx(rates.screening_rate.expect("screening"), 100.0 / 6.0);
    approx(rates.interview_rate.expect("interview"), 100.0 / 6.0);
    approx(rates.offer_rate.expect("offer"), 0.0);
    approx(rates.hire_rate.expect("hire"), 200.0 / 6.0);
}

#[test]
fn recent_activity_is_newest_first() {
    let activity = analytics_service().recent_activity(5).expect("activity");

    let ids: Vec<ApplicationId> = activity.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, [6, 1, 5, 4, 2].map(ApplicationId).to_vec());
    assert_eq!(activity[0].candidate_name, "Ada Lovelace");
    assert_eq!(activity[0].company_name, "Initech");
    assert_eq!(activity[0].last_update, at(2025, 6, 13, 9, 0));
}

#[test]
fn follow_ups_skip_rejected_and_future_dates() {
    let entries = analytics_service().follow_up_needed(now()).expect("follow ups");

    let due: Vec<(ApplicationId, i64)> = entries
        .iter()
        .map(|entry| (entry.id, entry.days_past_due))
        .collect();
    assert_eq!(due, vec![(ApplicationId(1), 5), (ApplicationId(2), 0)]);
    assert_eq!(entries[0].candidate_email, "ada@example.com");
    assert_eq!(entries[0].company_name, "Acme Robotics");
}

#[test]
fn follow_up_at_exactly_now_is_not_due() {
    let entries = analytics_service()
        .follow_up_needed(at(2025, 6, 10, 12, 0))
        .expect("follow ups");

    assert!(entries.is_empty(), "got {entries:?}");
}

#[test]
fn time_to_fill_averages_whole_days() {
    // 30 days and 21.5 days truncated to 21.
    approx(analytics_service().average_time_to_fill().expect("average"), 25.5);
}

#[test]
fn recruiter_performance_covers_recruiters_with_jobs() {
    let rows = analytics_service().recruiter_performance().expect("performance");

    assert_eq!(rows.len(), 2, "recruiters without jobs are omitted");

    assert_eq!(rows[0].recruiter_name, "Ana Diaz");
    assert_eq!(rows[0].total_jobs, 2);
    assert_eq!(rows[0].total_applications, 5);
    assert_eq!(rows[0].hired_count, 1);
    approx(rows[0].success_rate, 20.0);

    assert_eq!(rows[1].recruiter_name, "Ben Okafor");
    assert_eq!(rows[1].total_jobs, 1);
    approx(rows[1].success_rate, 100.0);
}

#[test]
fn recruiter_without_record_is_a_missing_reference() {
    let store = InMemoryStore::new();
    store
        .insert_company(company(1, "Globex", "Energy", "Springfield", "Power"))
        .expect("insert company");
    store
        .insert_job(job(JobSeed {
            id: 1,
            title: "Operator",
            description: "Runs the plant",
            location: "Springfield",
            job_type: crate::domain::JobType::FullTime,
            status: JobStatus::Open,
            priority: crate::domain::Priority::Medium,
            salary: (None, None),
            company: 1,
            recruiter: Some(42),
            created_at: at(2025, 1, 3, 9, 0),
        }))
        .expect("insert job");
    let service = AnalyticsService::new(Arc::new(store));

    match service.recruiter_performance() {
        Err(AnalyticsError::Store(StoreError::MissingReference {
            entity: EntityKind::Recruiter,
            id: 42,
        })) => {}
        other => panic!("expected missing recruiter, got {other:?}"),
    }
}

#[test]
fn monthly_trends_cover_six_months_ending_now() {
    let trends = analytics_service().monthly_trends(now()).expect("trends");

    let months: Vec<(u32, i32)> = trends
        .application_trends
        .iter()
        .map(|bucket| (bucket.month, bucket.year))
        .collect();
    assert_eq!(
        months,
        vec![(1, 2025), (2, 2025), (3, 2025), (4, 2025), (5, 2025), (6, 2025)]
    );

    let applications: Vec<u64> = trends.application_trends.iter().map(|b| b.count).collect();
    assert_eq!(applications, vec![0, 0, 1, 0, 3, 2]);

    let hires: Vec<u64> = trends.hire_trends.iter().map(|b| b.count).collect();
    assert_eq!(hires, vec![0, 0, 0, 1, 0, 1]);
}

#[test]
fn summary_bundles_the_dashboard() {
    let summary = analytics_service().summary(now()).expect("summary");

    assert_eq!(summary.stats.total_applications, 6);
    assert_eq!(summary.recent_activity.len(), 5);
    assert_eq!(summary.follow_ups.len(), 2);
    assert!(!summary.conversion_rates.is_empty());
    approx(summary.average_time_to_fill, 25.5);
}

#[test]
fn recent_jobs_and_notes_are_newest_first() {
    let service = analytics_service();

    let jobs = service.recent_jobs(2).expect("recent jobs");
    let titles: Vec<&str> = jobs.iter().map(|job| job.title.as_str()).collect();
    assert_eq!(titles, vec!["Java Intern", "Robotics Engineer"]);
    assert_eq!(jobs[0].company_name, "Initech");

    let notes = service.recent_notes(2).expect("recent notes");
    let ids: Vec<NoteId> = notes.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![NoteId(3), NoteId(2)]);
    assert_eq!(notes[0].author_name, "Ana Diaz");
    assert_eq!(notes[0].candidate_name, "Ada Lovelace");
    assert_eq!(notes[0].job_title, "Senior Java Developer");
}

#[test]
fn note_follow_ups_include_everything_due_by_now() {
    let service = analytics_service();

    let due = service.note_follow_ups_due(now()).expect("note follow ups");
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, NoteId(1));
    assert_eq!(due[0].author_name, "Ana Diaz");
    assert_eq!(due[0].candidate_name, "Grace Hopper");

    let later = service
        .note_follow_ups_due(at(2025, 6, 18, 9, 0))
        .expect("note follow ups");
    let ids: Vec<NoteId> = later.iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![NoteId(1), NoteId(2)], "boundary is inclusive");
}

#[test]
fn store_outage_propagates() {
    let service = AnalyticsService::new(Arc::new(UnavailableStore));

    match service.summary(now()) {
        Err(AnalyticsError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected unavailable store, got {other:?}"),
    }
}
