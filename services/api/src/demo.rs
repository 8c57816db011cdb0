use crate::infra::{load_store, parse_timestamp};
use ats_core::analytics::{AnalyticsService, DashboardSummary};
use ats_core::error::AppError;
use ats_core::import::{FixtureImporter, ImportError};
use ats_core::search::{GlobalSearchResults, RankedSearchResults, SearchRecord, SearchService};
use ats_core::store::InMemoryStore;
use chrono::{Local, NaiveDateTime};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

const BUNDLED_RECRUITERS: &str = include_str!("../../../fixtures/recruiters.csv");
const BUNDLED_COMPANIES: &str = include_str!("../../../fixtures/companies.csv");
const BUNDLED_CANDIDATES: &str = include_str!("../../../fixtures/candidates.csv");
const BUNDLED_JOBS: &str = include_str!("../../../fixtures/jobs.csv");
const BUNDLED_APPLICATIONS: &str = include_str!("../../../fixtures/applications.csv");
const BUNDLED_NOTES: &str = include_str!("../../../fixtures/notes.csv");

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Keyword to search for
    pub(crate) query: String,
    /// CSV fixture directory to load
    #[arg(long)]
    pub(crate) fixtures: PathBuf,
    /// Maximum results (per type unless --ranked)
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
    /// Score and order results across all types
    #[arg(long)]
    pub(crate) ranked: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// CSV fixture directory to load
    #[arg(long)]
    pub(crate) fixtures: PathBuf,
    /// Reference time for follow-ups and trends (defaults to now)
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) as_of: Option<NaiveDateTime>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Keyword used for the ranked search portion of the demo
    #[arg(long, default_value = "java")]
    pub(crate) query: String,
    /// Reference time for the dashboard portion; the bundled data is from mid 2025
    #[arg(long, value_parser = parse_timestamp, default_value = "2025-06-10 12:00:00")]
    pub(crate) as_of: NaiveDateTime,
}

/// Store seeded from the fixture CSVs compiled into the binary.
pub(crate) fn bundled_store() -> Result<InMemoryStore, ImportError> {
    let store = InMemoryStore::new();
    FixtureImporter::load_recruiters(&store, BUNDLED_RECRUITERS.as_bytes())?;
    FixtureImporter::load_companies(&store, BUNDLED_COMPANIES.as_bytes())?;
    FixtureImporter::load_candidates(&store, BUNDLED_CANDIDATES.as_bytes())?;
    FixtureImporter::load_jobs(&store, BUNDLED_JOBS.as_bytes())?;
    FixtureImporter::load_applications(&store, BUNDLED_APPLICATIONS.as_bytes())?;
    FixtureImporter::load_notes(&store, BUNDLED_NOTES.as_bytes())?;
    Ok(store)
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        query,
        fixtures,
        limit,
        ranked,
    } = args;

    let store = Arc::new(load_store(Some(&fixtures))?);
    let service = SearchService::new(store);

    if ranked {
        let results = service.search_with_ranking(&query, limit)?;
        print!("{}", render_ranked(&results));
    } else {
        let results = service.global_search(&query, limit)?;
        print!("{}", render_global(&query, &results));
    }
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs { fixtures, as_of } = args;
    let as_of = as_of.unwrap_or_else(|| Local::now().naive_local());

    let store = Arc::new(load_store(Some(&fixtures))?);
    let summary = AnalyticsService::new(store).summary(as_of)?;
    print!("{}", render_summary(&summary, as_of));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { query, as_of } = args;
    let store = Arc::new(bundled_store()?);

    println!("ATS search and analytics demo (bundled fixtures)");
    let search = SearchService::new(store.clone());
    let ranked = search.search_with_ranking(&query, 5)?;
    print!("\n{}", render_ranked(&ranked));

    let analytics = AnalyticsService::new(store);
    let summary = analytics.summary(as_of)?;
    print!("\n{}", render_summary(&summary, as_of));

    println!("\nRecruiter performance");
    for row in analytics.recruiter_performance()? {
        println!(
            "- {}: {} jobs | {} applications | {} hired ({:.1}%)",
            row.recruiter_name,
            row.total_jobs,
            row.total_applications,
            row.hired_count,
            row.success_rate
        );
    }

    let notes = analytics.note_follow_ups_due(as_of)?;
    if !notes.is_empty() {
        println!("\nNote follow-ups due");
        for note in notes {
            println!(
                "- {} on {} ({}): {}",
                note.author_name, note.candidate_name, note.job_title, note.content
            );
        }
    }
    Ok(())
}

fn describe(record: &SearchRecord) -> String {
    match record {
        SearchRecord::Candidate(hit) => match &hit.current_job_title {
            Some(title) => format!("candidate #{} {} ({title})", hit.id.0, hit.name),
            None => format!("candidate #{} {}", hit.id.0, hit.name),
        },
        SearchRecord::Company(hit) => format!("company #{} {}", hit.id.0, hit.name),
        SearchRecord::Job(hit) => match &hit.company_name {
            Some(company) => format!("job #{} {} @ {company}", hit.id.0, hit.title),
            None => format!("job #{} {}", hit.id.0, hit.title),
        },
    }
}

pub(crate) fn render_global(query: &str, results: &GlobalSearchResults) -> String {
    let mut out = format!("Search results for '{query}' ({} matches)\n", results.len());
    for (label, records) in [
        ("Candidates", &results.candidates),
        ("Companies", &results.companies),
        ("Jobs", &results.jobs),
    ] {
        out.push_str(&format!("{label}: {}\n", records.len()));
        for record in records {
            out.push_str(&format!("  - {}\n", describe(record)));
        }
    }
    out
}

pub(crate) fn render_ranked(results: &RankedSearchResults) -> String {
    let mut out = format!(
        "Ranked results for '{}' (showing {} of {})\n",
        results.query,
        results.results.len(),
        results.total_results
    );
    for (rank, result) in results.results.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. [{:.1}] {}\n",
            rank + 1,
            result.relevance_score,
            describe(&result.record)
        ));
    }
    out
}

pub(crate) fn render_summary(summary: &DashboardSummary, as_of: NaiveDateTime) -> String {
    let stats = &summary.stats;
    let mut out = format!("Dashboard as of {}\n", as_of.format("%Y-%m-%d %H:%M"));
    out.push_str(&format!(
        "- {} applications ({} active, {} hired)\n",
        stats.total_applications, stats.active_applications, stats.hired_candidates
    ));
    out.push_str(&format!(
        "- {} jobs ({} open, {} filled) across {} companies\n",
        stats.total_jobs, stats.open_jobs, stats.filled_jobs, stats.total_companies
    ));
    out.push_str(&format!("- {} candidates\n", stats.total_candidates));
    out.push_str(&format!(
        "- average time to fill: {:.1} days\n",
        summary.average_time_to_fill
    ));

    let rates = &summary.conversion_rates;
    if !rates.is_empty() {
        let pct = |rate: Option<f64>| rate.unwrap_or_default();
        out.push_str(&format!(
            "- funnel: {:.0}% screening | {:.0}% interview | {:.0}% offer | {:.0}% hired\n",
            pct(rates.screening_rate),
            pct(rates.interview_rate),
            pct(rates.offer_rate),
            pct(rates.hire_rate)
        ));
    }

    out.push_str("Recent activity\n");
    for entry in &summary.recent_activity {
        out.push_str(&format!(
            "  - {} -> {} @ {} [{}]\n",
            entry.candidate_name, entry.job_title, entry.company_name, entry.status
        ));
    }

    if summary.follow_ups.is_empty() {
        out.push_str("No follow-ups overdue\n");
    } else {
        out.push_str("Follow-ups overdue\n");
        for entry in &summary.follow_ups {
            out.push_str(&format!(
                "  - {} ({}) for {}: {} day(s) past due\n",
                entry.candidate_name, entry.candidate_email, entry.job_title, entry.days_past_due
            ));
        }
    }
    out
}
