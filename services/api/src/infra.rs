use metrics_exporter_prometheus::PrometheusHandle;
use pathfinder::config::GuidanceConfig;
use pathfinder::error::AppError;
use pathfinder::guidance::progression::{
    CertificateBook, CertificateRecord, JsonFileProgressRepository, LearnerId, LearnerRecord,
    ObserverError, ProgressEvent, ProgressObserver, ProgressRepository, RepositoryError,
};
use pathfinder::guidance::CareerCatalog;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the configured catalog file, or the built-in dataset when none is set.
pub(crate) fn load_catalog(config: &GuidanceConfig) -> Result<CareerCatalog, AppError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = CareerCatalog::from_path(path)?;
            info!(path = %path.display(), careers = catalog.curricula.len(), "career catalog loaded");
            Ok(catalog)
        }
        None => Ok(CareerCatalog::standard()),
    }
}

#[derive(Default)]
struct LearnerSlot {
    record: Option<LearnerRecord>,
    certificates: CertificateBook,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProgressRepository {
    learners: Arc<Mutex<HashMap<LearnerId, LearnerSlot>>>,
}

impl InMemoryProgressRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<LearnerId, LearnerSlot>>, RepositoryError> {
        self.learners
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ProgressRepository for InMemoryProgressRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let slot = guard.entry(record.learner_id.clone()).or_default();
        if slot.record.is_some() {
            return Err(RepositoryError::Conflict);
        }
        slot.record = Some(record.clone());
        Ok(record)
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard
            .get_mut(&record.learner_id)
            .and_then(|slot| slot.record.as_mut())
        {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).and_then(|slot| slot.record.clone()))
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard
            .get_mut(id)
            .and_then(|slot| slot.record.take())
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .get(id)
            .map(|slot| slot.certificates.clone())
            .unwrap_or_default())
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.lock()?;
        Ok(guard.entry(id.clone()).or_default().certificates.issue(record))
    }
}

/// Storage selected at startup: a data directory switches to the JSON file store.
pub(crate) enum StorageBackend {
    Memory(InMemoryProgressRepository),
    File(JsonFileProgressRepository),
}

impl StorageBackend {
    pub(crate) fn from_config(config: &GuidanceConfig) -> Result<Self, AppError> {
        match &config.data_dir {
            Some(dir) => {
                let store = JsonFileProgressRepository::open(dir)?;
                info!(dir = %store.dir().display(), "learner progress persisted to disk");
                Ok(Self::File(store))
            }
            None => {
                warn!("APP_DATA_DIR not set; learner progress is kept in memory only");
                Ok(Self::Memory(InMemoryProgressRepository::default()))
            }
        }
    }

    fn inner(&self) -> &dyn ProgressRepository {
        match self {
            StorageBackend::Memory(store) => store,
            StorageBackend::File(store) => store,
        }
    }
}

impl ProgressRepository for StorageBackend {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        self.inner().insert(record)
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        self.inner().update(record)
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        self.inner().fetch(id)
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        self.inner().remove(id)
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        self.inner().certificates(id)
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        self.inner().append_certificate(id, record)
    }
}

/// Writes progress events to the service log.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LoggingObserver;

impl ProgressObserver for LoggingObserver {
    fn notify(&self, event: &ProgressEvent) -> Result<(), ObserverError> {
        info!(
            learner = %event.learner_id,
            career = %event.career_path,
            level = event.level,
            points = event.points,
            badge = event.badge_awarded.as_deref().unwrap_or("-"),
            certificate_level = event.certificate.as_ref().map(|key| key.level),
            status = ?event.status,
            "progress event"
        );
        Ok(())
    }
}

/// Collects events in memory; the CLI demo prints them afterwards.
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingObserver {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Result<Vec<ProgressEvent>, ObserverError> {
        self.events
            .lock()
            .map(|events| events.clone())
            .map_err(|_| ObserverError::Delivery("event log mutex poisoned".to_string()))
    }
}

impl ProgressObserver for RecordingObserver {
    fn notify(&self, event: &ProgressEvent) -> Result<(), ObserverError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| ObserverError::Delivery("event log mutex poisoned".to_string()))?;
        guard.push(event.clone());
        Ok(())
    }
}
