//! Keyword search, relevance ranking and filtered lookups across candidates,
//! companies and jobs.

pub mod record;
pub mod router;
pub mod scoring;
pub mod service;

pub use record::{
    CandidateHit, CompanyHit, GlobalSearchResults, JobHit, RankedResult, RankedSearchResults,
    RecordKind, SearchFilters, SearchRecord,
};
pub use router::search_router;
pub use scoring::{relevance_score, MatchKind};
pub use service::{SearchError, SearchService, SUGGESTION_LIMIT};
