use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::catalog::CareerCatalog;
use super::domain::{
    master_badge, CertificateBook, CertificateKey, CertificateRecord, LearnerProgress, QuizAttempt,
};

pub const POINTS_PER_LEVEL: u32 = 100;

/// How a quiz result was applied to the learner's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Level passed; the learner moved to the next level.
    Advanced,
    /// Final level passed; the roadmap is now finished.
    Graduated,
    /// Quiz not passed. Nothing changes.
    Retry,
    /// The attempted level was already passed.
    AlreadyCompleted,
    /// The attempted level is ahead of the learner's current level.
    LevelLocked,
    /// Every level is already mastered.
    RoadmapFinished,
    /// The career path has no curriculum to progress through.
    CurriculumUnavailable,
}

impl CompletionStatus {
    pub fn changed_progress(self) -> bool {
        matches!(self, CompletionStatus::Advanced | CompletionStatus::Graduated)
    }

    pub fn message(self) -> &'static str {
        match self {
            CompletionStatus::Advanced => "level complete, next level unlocked",
            CompletionStatus::Graduated => "final level complete, roadmap finished",
            CompletionStatus::Retry => "quiz not passed, try again",
            CompletionStatus::AlreadyCompleted => "level already completed",
            CompletionStatus::LevelLocked => "level not unlocked yet",
            CompletionStatus::RoadmapFinished => "roadmap already finished",
            CompletionStatus::CurriculumUnavailable => "no curriculum available for this career",
        }
    }
}

/// Result of applying one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCompletion {
    pub status: CompletionStatus,
    pub progress: LearnerProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_awarded: Option<String>,
    pub points_awarded: u32,
}

impl QuizCompletion {
    fn unchanged(status: CompletionStatus, progress: &LearnerProgress) -> Self {
        Self {
            status,
            progress: progress.clone(),
            certificate: None,
            badge_awarded: None,
            points_awarded: 0,
        }
    }
}

/// Pure progression rules over an injected curriculum table.
pub struct ProgressionLedger {
    catalog: Arc<CareerCatalog>,
}

impl ProgressionLedger {
    pub fn new(catalog: Arc<CareerCatalog>) -> Self {
        Self { catalog }
    }

    /// Apply a quiz attempt. Never mutates its inputs; at most one certificate is produced and
    /// only when `certificates` has no record for the completed level.
    pub fn complete_quiz(
        &self,
        progress: &LearnerProgress,
        certificates: &CertificateBook,
        attempt: QuizAttempt,
        issued_at: DateTime<Utc>,
    ) -> QuizCompletion {
        let Some(level_count) = self.catalog.level_count(&progress.career_path) else {
            return QuizCompletion::unchanged(CompletionStatus::CurriculumUnavailable, progress);
        };

        let current = progress.level;
        if progress.is_finished(level_count) {
            return QuizCompletion::unchanged(CompletionStatus::RoadmapFinished, progress);
        }
        if attempt.level < current {
            return QuizCompletion::unchanged(CompletionStatus::AlreadyCompleted, progress);
        }
        if attempt.level > current {
            return QuizCompletion::unchanged(CompletionStatus::LevelLocked, progress);
        }
        if !attempt.passed {
            return QuizCompletion::unchanged(CompletionStatus::Retry, progress);
        }

        let mut next = progress.clone();
        next.level = current.saturating_add(1).min(level_count);
        next.points = progress.points.saturating_add(POINTS_PER_LEVEL);

        let badge = master_badge(current);
        let badge_awarded = next.badges.insert(badge.clone()).then_some(badge);

        let key = CertificateKey {
            career_path: progress.career_path.clone(),
            level: current,
        };
        let certificate = (!certificates.contains(&key)).then(|| {
            let description = self
                .catalog
                .level(&progress.career_path, current)
                .map(|level| level.title.clone())
                .unwrap_or_default();

            CertificateRecord {
                title: format!("{} - Level {} Certificate", key.career_path, current),
                career_path: key.career_path.clone(),
                level: current,
                description,
                issued_at,
                score: attempt.score,
            }
        });

        let status = if current == level_count {
            CompletionStatus::Graduated
        } else {
            CompletionStatus::Advanced
        };

        QuizCompletion {
            status,
            points_awarded: next.points - progress.points,
            progress: next,
            certificate,
            badge_awarded,
        }
    }
}
