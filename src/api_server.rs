// Axum API Server Module
//
// Purpose: JSON endpoints over the classifier, the recommendation engine and
// the recommendation service (latest published result + advisor capability).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advisor::{AdvisorMode, HttpTextGenerator, RecommendationService};
use crate::classify::classify_snapshot;
use crate::config::Config;
use crate::recommendations::{recommend, suitable_plants};
use crate::snapshot::ReadingSnapshot;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService<HttpTextGenerator>>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        tracing::info!("Creating text generation client for {}", config.advisor.model_url());
        let generator = HttpTextGenerator::new(&config.advisor)?;
        let service = Arc::new(RecommendationService::from_config(generator, &config.advisor));
        Ok(Self { service })
    }

    /// Start advisor initialization in the background when assisted mode is on.
    /// The server answers with rule-based advice until it is ready.
    pub fn spawn_initialization(&self) {
        if self.service.capability().mode() != AdvisorMode::Assisted {
            return;
        }
        let service = Arc::clone(&self.service);
        tokio::spawn(async move {
            let state = service.initialize().await;
            tracing::info!("Advisor initialization finished: {:?}", state);
        });
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Stateless evaluation
        .route("/api/status", post(get_status))
        .route("/api/recommendations", post(get_recommendations))

        // Recommendation service
        .route("/api/snapshot", post(submit_snapshot))
        .route("/api/recommendations/latest", get(get_latest))

        // Advisor capability
        .route("/api/advisor", get(get_advisor))
        .route("/api/advisor/mode", put(set_advisor_mode))

        // Middleware (applied in reverse order)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_status(Json(snapshot): Json<ReadingSnapshot>) -> Json<serde_json::Value> {
    let statuses = classify_snapshot(&snapshot);
    Json(serde_json::json!({
        "statuses": statuses,
        "overall": statuses.overall(),
    }))
}

async fn get_recommendations(Json(snapshot): Json<ReadingSnapshot>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "recommendations": recommend(&snapshot),
        "plants": suitable_plants(&snapshot),
    }))
}

async fn submit_snapshot(
    State(state): State<AppState>,
    Json(snapshot): Json<ReadingSnapshot>,
) -> Json<serde_json::Value> {
    let submission = state.service.submit(snapshot);
    tracing::debug!(
        "Snapshot {} published (external pending: {})",
        submission.recommendation.generation,
        submission.pending.is_some()
    );
    Json(serde_json::json!({
        "recommendation": submission.recommendation,
        "external_pending": submission.pending.is_some(),
    }))
}

async fn get_latest(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let latest = state
        .service
        .latest()
        .ok_or_else(|| AppError::NotFound("No snapshot submitted yet".to_string()))?;
    Ok(Json(serde_json::json!(latest)))
}

async fn get_advisor(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!(state.service.capability().report()))
}

async fn set_advisor_mode(
    State(state): State<AppState>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mode: AdvisorMode = request.mode.parse().map_err(AppError::BadRequest)?;
    state.service.capability().set_mode(mode);
    state.spawn_initialization();
    Ok(Json(serde_json::json!(state.service.capability().report())))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(serde::Deserialize, Debug)]
struct ModeRequest {
    mode: String,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
