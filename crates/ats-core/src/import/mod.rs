//! CSV fixture loading into the in-memory store.
//!
//! Tables load parents first (recruiters, companies, candidates, jobs,
//! applications, notes) and every foreign key is checked against what is
//! already loaded, so a seeded store has no dangling references.

mod rows;

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{ApplicationNote, Job};
use crate::store::{EntityKind, EntityStore, InMemoryStore, StoreError};

use rows::{ApplicationRow, CandidateRow, CompanyRow, JobRow, NoteRow, RecruiterRow};

pub use rows::parse_datetime;

pub const CANDIDATES_FILE: &str = "candidates.csv";
pub const COMPANIES_FILE: &str = "companies.csv";
pub const JOBS_FILE: &str = "jobs.csv";
pub const APPLICATIONS_FILE: &str = "applications.csv";
pub const RECRUITERS_FILE: &str = "recruiters.csv";
pub const NOTES_FILE: &str = "notes.csv";

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow {
        table: &'static str,
        line: usize,
        message: String,
    },
    Store(StoreError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read fixture: {}", err),
            ImportError::Csv(err) => write!(f, "invalid fixture CSV data: {}", err),
            ImportError::InvalidRow {
                table,
                line,
                message,
            } => write!(f, "{table} line {line}: {message}"),
            ImportError::Store(err) => write!(f, "could not load fixture row: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::InvalidRow { .. } => None,
            ImportError::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<StoreError> for ImportError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Counts of rows loaded per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub recruiters: usize,
    pub companies: usize,
    pub candidates: usize,
    pub jobs: usize,
    pub applications: usize,
    pub notes: usize,
}

pub struct FixtureImporter;

impl FixtureImporter {
    /// Loads a fixture directory. `recruiters.csv` and `notes.csv` are optional.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<InMemoryStore, ImportError> {
        let dir = dir.as_ref();
        let store = InMemoryStore::new();
        let mut summary = ImportSummary::default();

        let recruiters = dir.join(RECRUITERS_FILE);
        if recruiters.exists() {
            summary.recruiters = Self::load_recruiters(&store, std::fs::File::open(recruiters)?)?;
        }
        summary.companies =
            Self::load_companies(&store, std::fs::File::open(dir.join(COMPANIES_FILE))?)?;
        summary.candidates =
            Self::load_candidates(&store, std::fs::File::open(dir.join(CANDIDATES_FILE))?)?;
        summary.jobs = Self::load_jobs(&store, std::fs::File::open(dir.join(JOBS_FILE))?)?;
        summary.applications =
            Self::load_applications(&store, std::fs::File::open(dir.join(APPLICATIONS_FILE))?)?;
        let notes = dir.join(NOTES_FILE);
        if notes.exists() {
            summary.notes = Self::load_notes(&store, std::fs::File::open(notes)?)?;
        }

        info!(
            directory = %dir.display(),
            companies = summary.companies,
            candidates = summary.candidates,
            jobs = summary.jobs,
            applications = summary.applications,
            notes = summary.notes,
            "fixtures loaded"
        );
        Ok(store)
    }

    pub fn load_recruiters<R: Read>(
        store: &InMemoryStore,
        reader: R,
    ) -> Result<usize, ImportError> {
        load_table::<RecruiterRow, _>(RECRUITERS_FILE, reader, |row, _| {
            store.insert_recruiter(row.into_recruiter())?;
            Ok(())
        })
    }

    pub fn load_companies<R: Read>(store: &InMemoryStore, reader: R) -> Result<usize, ImportError> {
        load_table::<CompanyRow, _>(COMPANIES_FILE, reader, |row, line| {
            let company = row.into_company().map_err(invalid(COMPANIES_FILE, line))?;
            store.insert_company(company)?;
            Ok(())
        })
    }

    pub fn load_candidates<R: Read>(
        store: &InMemoryStore,
        reader: R,
    ) -> Result<usize, ImportError> {
        load_table::<CandidateRow, _>(CANDIDATES_FILE, reader, |row, line| {
            let candidate = row.into_candidate().map_err(invalid(CANDIDATES_FILE, line))?;
            store.insert_candidate(candidate)?;
            Ok(())
        })
    }

    pub fn load_jobs<R: Read>(store: &InMemoryStore, reader: R) -> Result<usize, ImportError> {
        load_table::<JobRow, _>(JOBS_FILE, reader, |row, line| {
            let job = row.into_job().map_err(invalid(JOBS_FILE, line))?;
            check_job_references(store, &job).map_err(invalid(JOBS_FILE, line))?;
            store.insert_job(job)?;
            Ok(())
        })
    }

    pub fn load_applications<R: Read>(
        store: &InMemoryStore,
        reader: R,
    ) -> Result<usize, ImportError> {
        load_table::<ApplicationRow, _>(APPLICATIONS_FILE, reader, |row, line| {
            let application = row
                .into_application()
                .map_err(invalid(APPLICATIONS_FILE, line))?;
            if store.candidate(application.candidate_id)?.is_none() {
                return Err(invalid(APPLICATIONS_FILE, line)(missing(
                    EntityKind::Candidate,
                    application.candidate_id.0,
                )));
            }
            if store.job(application.job_id)?.is_none() {
                return Err(invalid(APPLICATIONS_FILE, line)(missing(
                    EntityKind::Job,
                    application.job_id.0,
                )));
            }
            store.insert_application(application)?;
            Ok(())
        })
    }

    pub fn load_notes<R: Read>(store: &InMemoryStore, reader: R) -> Result<usize, ImportError> {
        load_table::<NoteRow, _>(NOTES_FILE, reader, |row, line| {
            let note = row.into_note().map_err(invalid(NOTES_FILE, line))?;
            check_note_references(store, &note).map_err(invalid(NOTES_FILE, line))?;
            store.insert_note(note)?;
            Ok(())
        })
    }
}

fn load_table<T, R>(
    table: &'static str,
    reader: R,
    mut insert: impl FnMut(T, usize) -> Result<(), ImportError>,
) -> Result<usize, ImportError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut loaded = 0;

    for (index, record) in csv_reader.deserialize::<T>().enumerate() {
        let row = record?;
        // Header is line 1.
        insert(row, index + 2)?;
        loaded += 1;
    }

    tracing::debug!(table, loaded, "fixture table loaded");
    Ok(loaded)
}

fn check_job_references(store: &InMemoryStore, job: &Job) -> Result<(), String> {
    let company = store.company(job.company_id).map_err(|err| err.to_string())?;
    if company.is_none() {
        return Err(missing(EntityKind::Company, job.company_id.0));
    }
    if let Some(recruiter_id) = job.assigned_recruiter_id {
        let recruiters = store.recruiters().map_err(|err| err.to_string())?;
        if !recruiters.iter().any(|recruiter| recruiter.id == recruiter_id) {
            return Err(missing(EntityKind::Recruiter, recruiter_id.0));
        }
    }
    Ok(())
}

fn check_note_references(store: &InMemoryStore, note: &ApplicationNote) -> Result<(), String> {
    let application = store
        .application(note.application_id)
        .map_err(|err| err.to_string())?;
    if application.is_none() {
        return Err(missing(EntityKind::Application, note.application_id.0));
    }
    let recruiters = store.recruiters().map_err(|err| err.to_string())?;
    if !recruiters.iter().any(|recruiter| recruiter.id == note.author_id) {
        return Err(missing(EntityKind::Recruiter, note.author_id.0));
    }
    Ok(())
}

fn missing(entity: EntityKind, id: u64) -> String {
    format!("unknown {entity} {id}")
}

fn invalid(table: &'static str, line: usize) -> impl Fn(String) -> ImportError {
    move |message| ImportError::InvalidRow {
        table,
        line,
        message,
    }
}
