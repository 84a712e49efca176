use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::guidance::catalog::{
    CareerCatalog, CareerLabel, CareerPools, Curriculum, CurriculumLevel,
};
use crate::guidance::profile::{AbroadPlans, Branch, FinancialStatus, ProfileAnswers, Purpose};
use crate::guidance::progression::domain::{
    CertificateBook, CertificateRecord, LearnerId, QuizAttempt,
};
use crate::guidance::progression::repository::{
    LearnerRecord, ObserverError, ProgressEvent, ProgressObserver, ProgressRepository,
    RepositoryError,
};
use crate::guidance::progression::{learner_router, LearnerService, ProgressionLedger};
use crate::guidance::quiz::QuizScore;

pub(super) const TWO_LEVEL_CAREER: &str = "Prompt Engineer";

pub(super) fn issued_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap()
}

fn level(title: &str) -> CurriculumLevel {
    CurriculumLevel {
        title: title.to_string(),
        duration: "2 weeks".to_string(),
        courses: Vec::new(),
        projects: Vec::new(),
        internships: Vec::new(),
        jobs: Vec::new(),
        higher_studies: Vec::new(),
    }
}

/// Catalog with a single two-level career in every pool.
pub(super) fn two_level_catalog() -> Arc<CareerCatalog> {
    let label = CareerLabel::from(TWO_LEVEL_CAREER);
    let mut curricula = BTreeMap::new();
    curricula.insert(
        label.clone(),
        Curriculum {
            levels: vec![level("Prompt Basics"), level("Evaluation Harnesses")],
        },
    );

    Arc::new(CareerCatalog {
        pools: CareerPools {
            cse: vec![label.clone()],
            cs: Vec::new(),
            ds: Vec::new(),
            ai_ml: Vec::new(),
            fallback: label,
        },
        curricula,
    })
}

pub(super) fn standard_catalog() -> Arc<CareerCatalog> {
    Arc::new(CareerCatalog::standard())
}

pub(super) fn ledger() -> ProgressionLedger {
    ProgressionLedger::new(two_level_catalog())
}

pub(super) fn attempt(level: u32, passed: bool, score: u8) -> QuizAttempt {
    QuizAttempt {
        level,
        passed,
        score: QuizScore::new(score).expect("valid score"),
    }
}

pub(super) fn job_seeker() -> ProfileAnswers {
    ProfileAnswers {
        branch: Branch::Cs,
        purpose: Purpose::Job,
        financial_status: FinancialStatus::UpToThree,
        abroad_plans: AbroadPlans::No,
        ..ProfileAnswers::default()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LearnerId, LearnerRecord>>>,
    pub(super) certificates: Arc<Mutex<HashMap<LearnerId, CertificateBook>>>,
}

impl ProgressRepository for MemoryRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        if guard.contains_key(&record.learner_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.learner_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().unwrap();
        match guard.get_mut(&record.learner_id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        Ok(self
            .certificates
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.certificates.lock().unwrap();
        Ok(guard.entry(id.clone()).or_default().issue(record))
    }
}

/// Memory repository whose next certificate or progress write can be made to fail once.
#[derive(Default)]
pub(super) struct FlakyRepository {
    pub(super) inner: MemoryRepository,
    pub(super) fail_next_certificate: AtomicBool,
    pub(super) fail_next_update: AtomicBool,
}

impl ProgressRepository for FlakyRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("disk full".to_string()));
        }
        self.inner.update(record)
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        self.inner.remove(id)
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        self.inner.certificates(id)
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        if self.fail_next_certificate.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("disk full".to_string()));
        }
        self.inner.append_certificate(id, record)
    }
}

/// Memory repository where a restart lands right after every progress write.
#[derive(Default)]
pub(super) struct RestartingRepository {
    pub(super) inner: MemoryRepository,
}

impl ProgressRepository for RestartingRepository {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError> {
        let id = record.learner_id.clone();
        self.inner.update(record)?;
        self.inner.remove(&id)
    }

    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError> {
        self.inner.remove(id)
    }

    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        self.inner.certificates(id)
    }

    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        self.inner.append_certificate(id, record)
    }
}

pub(super) struct UnavailableRepository;

impl ProgressRepository for UnavailableRepository {
    fn insert(&self, _record: LearnerRecord) -> Result<LearnerRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn update(&self, _record: LearnerRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn fetch(&self, _id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _id: &LearnerId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn certificates(&self, _id: &LearnerId) -> Result<CertificateBook, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }

    fn append_certificate(
        &self,
        _id: &LearnerId,
        _record: CertificateRecord,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryObserver {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MemoryObserver {
    pub(super) fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressObserver for MemoryObserver {
    fn notify(&self, event: &ProgressEvent) -> Result<(), ObserverError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub(super) struct FailingObserver;

impl ProgressObserver for FailingObserver {
    fn notify(&self, _event: &ProgressEvent) -> Result<(), ObserverError> {
        Err(ObserverError::Delivery("webhook timed out".to_string()))
    }
}

pub(super) fn build_service(
    catalog: Arc<CareerCatalog>,
) -> (
    LearnerService<MemoryRepository, MemoryObserver>,
    Arc<MemoryRepository>,
    Arc<MemoryObserver>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let observer = Arc::new(MemoryObserver::default());
    let service = LearnerService::new(catalog, repository.clone(), observer.clone());
    (service, repository, observer)
}

pub(super) fn router_with_service(
    service: LearnerService<MemoryRepository, MemoryObserver>,
) -> axum::Router {
    learner_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
