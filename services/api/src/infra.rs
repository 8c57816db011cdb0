use ats_core::error::AppError;
use ats_core::import::{parse_datetime, FixtureImporter};
use ats_core::store::InMemoryStore;
use chrono::NaiveDateTime;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Seeds the store from `directory`, or starts empty when none is configured.
pub(crate) fn load_store(directory: Option<&Path>) -> Result<InMemoryStore, AppError> {
    match directory {
        Some(dir) => Ok(FixtureImporter::from_dir(dir)?),
        None => {
            warn!("no fixture directory configured; serving an empty store");
            Ok(InMemoryStore::new())
        }
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    parse_datetime(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ats_core::store::{EntityKind, EntityStore};

    #[test]
    fn missing_directory_means_empty_store() {
        let store = load_store(None).expect("empty store");
        assert_eq!(store.count(EntityKind::Job).expect("count"), 0);
    }

    #[test]
    fn unreadable_directory_is_an_import_error() {
        let missing = Path::new("/definitely/not/a/fixture/dir");
        match load_store(Some(missing)) {
            Err(AppError::Import(_)) => {}
            Err(other) => panic!("expected import error, got {other:?}"),
            Ok(_) => panic!("expected import error, got a store"),
        }
    }

    #[test]
    fn timestamps_accept_dates_and_datetimes() {
        assert!(parse_timestamp("2025-06-10").is_ok());
        assert!(parse_timestamp("2025-06-10 12:00:00").is_ok());
        assert!(parse_timestamp("June 10th").is_err());
    }
}
