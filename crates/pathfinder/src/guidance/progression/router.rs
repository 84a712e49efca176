use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::super::profile::ProfileAnswers;
use super::super::quiz::QuizScore;
use super::domain::{CertificateRecord, LearnerId, QuizAttempt};
use super::ledger::{CompletionStatus, QuizCompletion};
use super::repository::{LearnerView, ProgressObserver, ProgressRepository, RepositoryError};
use super::service::{LearnerService, LearnerServiceError};

/// Router builder exposing enrolment, quiz results, and certificates.
pub fn learner_router<R, O>(service: Arc<LearnerService<R, O>>) -> Router
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    Router::new()
        .route("/api/v1/learners", post(enroll_handler::<R, O>))
        .route(
            "/api/v1/learners/:learner_id",
            get(progress_handler::<R, O>).delete(restart_handler::<R, O>),
        )
        .route(
            "/api/v1/learners/:learner_id/quiz",
            post(quiz_handler::<R, O>),
        )
        .route(
            "/api/v1/learners/:learner_id/certificates",
            get(certificates_handler::<R, O>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub learner_id: String,
    #[serde(default)]
    pub answers: ProfileAnswers,
}

/// Either an evaluator verdict or a raw tally graded against the pass mark.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizSubmission {
    Verdict {
        level: u32,
        passed: bool,
        score: QuizScore,
    },
    Tally {
        level: u32,
        correct: u32,
        total: u32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub status: CompletionStatus,
    pub message: &'static str,
    pub learner: LearnerView,
    pub points_awarded: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_awarded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRecord>,
}

pub(crate) async fn enroll_handler<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    axum::Json(request): axum::Json<EnrollRequest>,
) -> Response
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    match service.enroll(&request.learner_id, request.answers) {
        Ok(record) => {
            let view = record.view(service.catalog());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Path(learner_id): Path<String>,
) -> Response
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    match service.progress(&learner_id) {
        Ok(record) => {
            let view = record.view(service.catalog());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quiz_handler<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Path(learner_id): Path<String>,
    axum::Json(submission): axum::Json<QuizSubmission>,
) -> Response
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    let Some(learner_id) = LearnerId::parse(&learner_id) else {
        return error_response(LearnerServiceError::InvalidLearnerId(learner_id));
    };

    let result = match submission {
        QuizSubmission::Verdict {
            level,
            passed,
            score,
        } => service.record_quiz(
            learner_id.as_str(),
            QuizAttempt {
                level,
                passed,
                score,
            },
        ),
        QuizSubmission::Tally {
            level,
            correct,
            total,
        } => service.grade_quiz(learner_id.as_str(), level, correct, total),
    };

    let completion = match result {
        Ok(completion) => completion,
        Err(error) => return error_response(error),
    };

    // Built from the completion so a concurrent restart cannot hide a recorded pass.
    let QuizCompletion {
        status,
        progress,
        certificate,
        badge_awarded,
        points_awarded,
    } = completion;
    let body = QuizResponse {
        status,
        message: status.message(),
        learner: LearnerView::new(&learner_id, &progress, service.catalog()),
        points_awarded,
        badge_awarded,
        certificate,
    };
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub(crate) async fn certificates_handler<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Path(learner_id): Path<String>,
) -> Response
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    match service.certificates(&learner_id) {
        Ok(certificates) => (StatusCode::OK, axum::Json(certificates)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn restart_handler<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Path(learner_id): Path<String>,
) -> Response
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    match service.restart(&learner_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LearnerServiceError) -> Response {
    let status = match &error {
        LearnerServiceError::InvalidLearnerId(_) | LearnerServiceError::Quiz(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LearnerServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        LearnerServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LearnerServiceError::Repository(RepositoryError::Unavailable(_))
        | LearnerServiceError::Observer(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
