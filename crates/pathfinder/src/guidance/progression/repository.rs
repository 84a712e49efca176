use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::catalog::{CareerCatalog, CareerLabel};
use super::super::profile::ProfileAnswers;
use super::super::recommendation::RecommendationRule;
use super::domain::{CertificateBook, CertificateKey, CertificateRecord, LearnerId, LearnerProgress};
use super::ledger::CompletionStatus;

/// Stored enrolment: the submitted answers, how the career was chosen, and current progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerRecord {
    pub learner_id: LearnerId,
    pub answers: ProfileAnswers,
    pub rule: RecommendationRule,
    pub progress: LearnerProgress,
    pub enrolled_at: DateTime<Utc>,
}

impl LearnerRecord {
    pub fn view(&self, catalog: &CareerCatalog) -> LearnerView {
        LearnerView::new(&self.learner_id, &self.progress, catalog)
    }
}

/// Persistence port for learner progress and certificates.
///
/// Certificates are kept apart from the learner record because they outlive it: removing a
/// learner to restart the flow keeps every certificate already issued.
pub trait ProgressRepository: Send + Sync {
    fn insert(&self, record: LearnerRecord) -> Result<LearnerRecord, RepositoryError>;
    fn update(&self, record: LearnerRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LearnerId) -> Result<Option<LearnerRecord>, RepositoryError>;
    fn remove(&self, id: &LearnerId) -> Result<(), RepositoryError>;
    fn certificates(&self, id: &LearnerId) -> Result<CertificateBook, RepositoryError>;
    /// Returns `false` when a certificate with the same key already exists.
    fn append_certificate(
        &self,
        id: &LearnerId,
        record: CertificateRecord,
    ) -> Result<bool, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("learner already enrolled")]
    Conflict,
    #[error("learner not found")]
    NotFound,
    #[error("progress storage unavailable: {0}")]
    Unavailable(String),
}

/// Notification hook fired after progress changes (UI refresh, e-mail, analytics).
pub trait ProgressObserver: Send + Sync {
    fn notify(&self, event: &ProgressEvent) -> Result<(), ObserverError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub learner_id: LearnerId,
    pub career_path: CareerLabel,
    pub status: CompletionStatus,
    pub level: u32,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_awarded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateKey>,
}

#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    #[error("progress notification failed: {0}")]
    Delivery(String),
}

/// Observer that discards events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn notify(&self, _event: &ProgressEvent) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// Sanitized learner state for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerView {
    pub learner_id: LearnerId,
    pub career_path: CareerLabel,
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_level_title: Option<String>,
    pub points: u32,
    pub badges: Vec<String>,
    pub roadmap_complete: bool,
}

impl LearnerView {
    pub fn new(
        learner_id: &LearnerId,
        progress: &LearnerProgress,
        catalog: &CareerCatalog,
    ) -> Self {
        let level_count = catalog.level_count(&progress.career_path);
        let roadmap_complete = level_count
            .map(|count| progress.is_finished(count))
            .unwrap_or(false);

        Self {
            learner_id: learner_id.clone(),
            career_path: progress.career_path.clone(),
            level: progress.level,
            level_count,
            current_level_title: catalog
                .level(&progress.career_path, progress.level)
                .map(|level| level.title.clone()),
            points: progress.points,
            badges: progress.badges.iter().map(str::to_string).collect(),
            roadmap_complete,
        }
    }
}
