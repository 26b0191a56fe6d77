use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use stack_advisor::advisor::sessions::{
    RepositoryError, SessionHandle, SessionId, SessionRecord, SessionRepository,
};
use stack_advisor::advisor::Catalog;
use stack_advisor::config::AppConfig;
use stack_advisor::error::AppError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionRepository {
    fn guard(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionHandle>>, RepositoryError> {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store lock poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionHandle, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        let id = record.id.clone();
        let handle = Arc::new(Mutex::new(record));
        guard.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionHandle>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        self.guard()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    /// Sessions whose own lock is poisoned are dropped along with idle ones.
    fn remove_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut guard = self.guard()?;
        let before = guard.len();
        guard.retain(|_, handle| {
            handle
                .lock()
                .map(|record| record.updated_at >= cutoff)
                .unwrap_or(false)
        });
        Ok(before - guard.len())
    }
}

/// Catalog path from the command line, falling back to `APP_CATALOG_PATH`.
pub(crate) fn catalog_path(flag: Option<PathBuf>) -> Result<Option<PathBuf>, AppError> {
    match flag {
        Some(path) => Ok(Some(path)),
        None => Ok(AppConfig::load()?.catalog.path),
    }
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    let Some(path) = path else {
        return Ok(Catalog::standard());
    };

    let catalog = Catalog::load(path)?;
    info!(
        path = %path.display(),
        stacks = catalog.len(),
        "loaded catalog"
    );
    Ok(catalog)
}
