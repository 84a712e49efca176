use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::super::catalog::{CareerCatalog, CareerLabel, Curriculum};
use super::super::profile::ProfileAnswers;
use super::super::quiz::{QuizError, QuizOutcome, DEFAULT_PASS_MARK};
use super::super::recommendation::{Recommendation, RecommendationEngine};
use super::domain::{CertificateRecord, LearnerId, LearnerProgress, QuizAttempt};
use super::ledger::{ProgressionLedger, QuizCompletion};
use super::repository::{
    LearnerRecord, ObserverError, ProgressEvent, ProgressObserver, ProgressRepository,
    RepositoryError,
};

/// Service composing the recommendation engine, progression ledger, and persistence port.
pub struct LearnerService<R, O> {
    catalog: Arc<CareerCatalog>,
    engine: Arc<RecommendationEngine>,
    ledger: Arc<ProgressionLedger>,
    repository: Arc<R>,
    observer: Arc<O>,
    pass_mark: u8,
}

impl<R, O> LearnerService<R, O>
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    pub fn new(catalog: Arc<CareerCatalog>, repository: Arc<R>, observer: Arc<O>) -> Self {
        Self {
            engine: Arc::new(RecommendationEngine::new(catalog.clone())),
            ledger: Arc::new(ProgressionLedger::new(catalog.clone())),
            catalog,
            repository,
            observer,
            pass_mark: DEFAULT_PASS_MARK,
        }
    }

    pub fn with_pass_mark(mut self, pass_mark: u8) -> Self {
        self.pass_mark = pass_mark;
        self
    }

    pub fn catalog(&self) -> &CareerCatalog {
        &self.catalog
    }

    pub fn pass_mark(&self) -> u8 {
        self.pass_mark
    }

    pub fn recommend(&self, answers: &ProfileAnswers) -> Recommendation {
        self.engine.recommend(answers)
    }

    pub fn curriculum(&self, career: &CareerLabel) -> Option<&Curriculum> {
        self.catalog.curriculum(career)
    }

    /// Complete the profile step: pick a career and start the learner at level 1.
    pub fn enroll(
        &self,
        learner_id: &str,
        answers: ProfileAnswers,
    ) -> Result<LearnerRecord, LearnerServiceError> {
        let learner_id = parse_learner_id(learner_id)?;
        let recommendation = self.engine.recommend(&answers);

        let record = LearnerRecord {
            learner_id,
            answers,
            rule: recommendation.rule,
            progress: LearnerProgress::new(recommendation.career_path),
            enrolled_at: Utc::now(),
        };

        let stored = self.repository.insert(record)?;
        info!(
            learner = %stored.learner_id,
            career = %stored.progress.career_path,
            "learner enrolled"
        );
        Ok(stored)
    }

    pub fn progress(&self, learner_id: &str) -> Result<LearnerRecord, LearnerServiceError> {
        let learner_id = parse_learner_id(learner_id)?;
        let record = self
            .repository
            .fetch(&learner_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Apply an evaluator's verdict for one level, persisting and announcing any change.
    pub fn record_quiz(
        &self,
        learner_id: &str,
        attempt: QuizAttempt,
    ) -> Result<QuizCompletion, LearnerServiceError> {
        let mut record = self.progress(learner_id)?;
        let certificates = self.repository.certificates(&record.learner_id)?;

        let completion =
            self.ledger
                .complete_quiz(&record.progress, &certificates, attempt, Utc::now());

        if !completion.status.changed_progress() {
            debug!(
                learner = %record.learner_id,
                level = attempt.level,
                status = ?completion.status,
                "quiz attempt left progress unchanged"
            );
            return Ok(completion);
        }

        // Certificate first: a failed progress write leaves the level open for a retry, and the
        // retry's duplicate certificate is ignored by key.
        if let Some(certificate) = &completion.certificate {
            self.repository
                .append_certificate(&record.learner_id, certificate.clone())?;
        }
        record.progress = completion.progress.clone();
        self.repository.update(record.clone())?;

        info!(
            learner = %record.learner_id,
            career = %record.progress.career_path,
            level = record.progress.level,
            points = record.progress.points,
            status = ?completion.status,
            "learner progressed"
        );

        self.observer.notify(&ProgressEvent {
            learner_id: record.learner_id,
            career_path: completion.progress.career_path.clone(),
            status: completion.status,
            level: completion.progress.level,
            points: completion.progress.points,
            badge_awarded: completion.badge_awarded.clone(),
            certificate: completion.certificate.as_ref().map(CertificateRecord::key),
        })?;

        Ok(completion)
    }

    /// Grade a tally against the configured pass mark, then record it.
    pub fn grade_quiz(
        &self,
        learner_id: &str,
        level: u32,
        correct: u32,
        total: u32,
    ) -> Result<QuizCompletion, LearnerServiceError> {
        let outcome = QuizOutcome::from_tally(correct, total, self.pass_mark)?;
        self.record_quiz(learner_id, QuizAttempt::from_outcome(level, outcome))
    }

    pub fn certificates(
        &self,
        learner_id: &str,
    ) -> Result<Vec<CertificateRecord>, LearnerServiceError> {
        let learner_id = parse_learner_id(learner_id)?;
        let book = self.repository.certificates(&learner_id)?;
        Ok(book.records().cloned().collect())
    }

    /// Drop the learner's progress so the profile flow can start again. Certificates stay.
    pub fn restart(&self, learner_id: &str) -> Result<(), LearnerServiceError> {
        let learner_id = parse_learner_id(learner_id)?;
        self.repository.remove(&learner_id)?;
        info!(learner = %learner_id, "learner progress reset");
        Ok(())
    }
}

fn parse_learner_id(raw: &str) -> Result<LearnerId, LearnerServiceError> {
    LearnerId::parse(raw).ok_or_else(|| LearnerServiceError::InvalidLearnerId(raw.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum LearnerServiceError {
    #[error("learner id '{0}' must be 1-64 letters, digits, '-' or '_'")]
    InvalidLearnerId(String),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Observer(#[from] ObserverError),
}
