use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use pathfinder::error::AppError;
use pathfinder::guidance::progression::{
    learner_router, LearnerService, ProgressObserver, ProgressRepository,
};
use pathfinder::guidance::{
    AssistantReply, CareerLabel, CurriculumLevel, GuidanceAssistant, ProfileAnswers,
    Recommendation,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    #[serde(flatten)]
    pub(crate) recommendation: Recommendation,
    pub(crate) rationale: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CurriculumResponse {
    pub(crate) career_path: CareerLabel,
    pub(crate) level_count: u32,
    pub(crate) levels: Vec<CurriculumLevel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantRequest {
    pub(crate) message: String,
}

pub(crate) fn with_learner_routes<R, O>(service: Arc<LearnerService<R, O>>) -> Router
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    let guidance = Router::new()
        .route(
            "/api/v1/recommendations",
            post(recommendation_endpoint::<R, O>),
        )
        .route(
            "/api/v1/careers/:career/curriculum",
            get(curriculum_endpoint::<R, O>),
        )
        .with_state(service.clone());

    learner_router(service)
        .merge(guidance)
        .route("/api/v1/assistant", post(assistant_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn recommendation_endpoint<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Json(answers): Json<ProfileAnswers>,
) -> Json<RecommendationResponse>
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    let recommendation = service.recommend(&answers);
    let rationale = recommendation.rationale();
    Json(RecommendationResponse {
        recommendation,
        rationale,
    })
}

pub(crate) async fn curriculum_endpoint<R, O>(
    State(service): State<Arc<LearnerService<R, O>>>,
    Path(career): Path<String>,
) -> Result<Json<CurriculumResponse>, AppError>
where
    R: ProgressRepository + 'static,
    O: ProgressObserver + 'static,
{
    let career_path = CareerLabel::new(career);
    let curriculum = service
        .curriculum(&career_path)
        .ok_or_else(|| AppError::UnknownCareer(career_path.to_string()))?;

    Ok(Json(CurriculumResponse {
        level_count: curriculum.level_count(),
        levels: curriculum.levels.clone(),
        career_path,
    }))
}

pub(crate) async fn assistant_endpoint(
    Json(request): Json<AssistantRequest>,
) -> Json<AssistantReply> {
    static ASSISTANT: OnceLock<GuidanceAssistant> = OnceLock::new();
    let assistant = ASSISTANT.get_or_init(GuidanceAssistant::standard);
    Json(assistant.respond(&request.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryProgressRepository, RecordingObserver};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pathfinder::guidance::CareerCatalog;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app() -> Router {
        let service = Arc::new(LearnerService::new(
            Arc::new(CareerCatalog::standard()),
            Arc::new(InMemoryProgressRepository::default()),
            Arc::new(RecordingObserver::default()),
        ));
        with_learner_routes(service)
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn recommendation_endpoint_explains_its_choice() {
        let request = post_json(
            "/api/v1/recommendations",
            json!({
                "branch": "AI/ML",
                "purpose": "Research",
                "financial_status": "10+",
                "abroad_plans": "No"
            }),
        );

        let response = app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["career_path"], "AI Research Scientist");
        assert_eq!(body["rule"], "research_or_abroad");
        assert_eq!(body["level_count"], 3);
        assert!(body["rationale"]
            .as_str()
            .expect("rationale string")
            .starts_with("AI Research Scientist"));
    }

    #[tokio::test]
    async fn empty_profiles_still_get_a_recommendation() {
        let response = app()
            .oneshot(post_json("/api/v1/recommendations", json!({})))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["career_path"], "Software Developer");
    }

    #[tokio::test]
    async fn curriculum_endpoint_resolves_encoded_labels() {
        let request = Request::builder()
            .uri("/api/v1/careers/Data%20Scientist/curriculum")
            .body(Body::empty())
            .expect("request builds");

        let response = app().oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["career_path"], "Data Scientist");
        assert_eq!(body["level_count"], 3);
        assert_eq!(body["levels"][1]["title"], "Core Skills: Machine Learning");
    }

    #[tokio::test]
    async fn unknown_careers_return_not_found() {
        let Err(error) = curriculum_endpoint(
            State(Arc::new(LearnerService::new(
                Arc::new(CareerCatalog::standard()),
                Arc::new(InMemoryProgressRepository::default()),
                Arc::new(RecordingObserver::default()),
            ))),
            Path("Astronaut".to_string()),
        )
        .await
        else {
            panic!("unknown career should fail");
        };
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn assistant_endpoint_routes_to_intents() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/assistant",
                json!({ "message": "Where can I find an internship?" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["intent"], "internships");
    }

    #[tokio::test]
    async fn learner_routes_are_mounted() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/learners",
                json!({ "learner_id": "route-check", "answers": { "branch": "DS" } }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["career_path"], "Data Analyst");
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let readiness = Arc::new(AtomicBool::new(false));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let router = app().layer(Extension(state));

        let request = || {
            Request::builder()
                .uri("/ready")
                .body(Body::empty())
                .expect("request builds")
        };

        let response = router.clone().oneshot(request()).await.expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        readiness.store(true, std::sync::atomic::Ordering::Release);
        let response = router.oneshot(request()).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ready");
    }
}
