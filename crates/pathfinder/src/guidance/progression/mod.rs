//! Level progression, badges, and certificates.
//!
//! The ledger is pure: it takes a progress snapshot and a quiz verdict and returns the next
//! snapshot plus at most one new certificate. Persistence and notification go through the
//! repository and observer ports consumed by [`LearnerService`].

pub mod domain;
pub mod ledger;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    master_badge, BadgeSet, CertificateBook, CertificateKey, CertificateRecord, LearnerId,
    LearnerProgress, QuizAttempt,
};
pub use ledger::{CompletionStatus, ProgressionLedger, QuizCompletion, POINTS_PER_LEVEL};
pub use repository::{
    LearnerRecord, LearnerView, NoopObserver, ObserverError, ProgressEvent, ProgressObserver,
    ProgressRepository, RepositoryError,
};
pub use router::{learner_router, EnrollRequest, QuizSubmission};
pub use service::{LearnerService, LearnerServiceError};
pub use store::JsonFileProgressRepository;
