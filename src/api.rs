// 🌐 REST API with Axum
// Sentiment analysis, journal entries, trends and activity suggestions

use crate::config::ClientPolicy;
use crate::entry::{Entry, Mood, NewEntry};
use crate::error::JournalError;
use crate::journal::Journal;
use crate::sentiment::Sentiment;
use crate::trends::DEFAULT_TREND_DAYS;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Journal>,
    pub client_policy: ClientPolicy,
}

impl AppState {
    pub fn new(journal: Journal, client_policy: ClientPolicy) -> Self {
        Self {
            journal: Arc::new(journal),
            client_policy,
        }
    }
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
}

#[derive(Debug, Deserialize)]
struct TrendsQuery {
    days: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ActivitiesResponse {
    mood: Mood,
    activities: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

/// Maps library errors onto HTTP status codes
pub struct ApiError(JournalError);

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = ErrorResponse {
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        version: crate::VERSION,
    })
}

fn analyze(state: &AppState, text: Option<String>) -> Result<Json<AnalyzeResponse>, ApiError> {
    // Empty text is valid input; only a missing parameter is rejected
    let text = text.ok_or(JournalError::MissingText)?;
    let sentiment = state.journal.scorer().classify(&text);
    Ok(Json(AnalyzeResponse { sentiment }))
}

/// GET /api/analyze-sentiment?text=... - Classify text
async fn analyze_query(
    State(state): State<AppState>,
    Query(request): Query<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    analyze(&state, request.text)
}

/// POST /api/analyze-sentiment - Classify `{"text": ...}`
async fn analyze_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let text = serde_json::from_slice::<AnalyzeRequest>(&body)
        .ok()
        .and_then(|request| request.text);
    analyze(&state, text)
}

/// GET /api/client-policy - Debounce settings for typing clients
async fn client_policy(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.client_policy)
}

/// POST /api/entries - Save an entry, classifying it when no sentiment is given
async fn create_entry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let new_entry = NewEntry::from_json(&body)?;
    let entry = state.journal.record(new_entry)?;
    info!(id = entry.id, mood = %entry.mood, sentiment = %entry.sentiment, "created entry");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/entries - All entries, newest first
async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.journal.entries()?))
}

/// GET /api/entries/:date - Entries on a YYYY-MM-DD day
async fn entries_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    Ok(Json(state.journal.entries_on(&date)?))
}

/// GET /api/trends?days=N - Mood and sentiment summary
async fn trends(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_TREND_DAYS);
    Ok(Json(state.journal.trends(days)?))
}

/// GET /api/activities/:mood - Suggested activities
async fn activities(Path(mood): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let mood: Mood = mood.parse()?;
    Ok(Json(ActivitiesResponse {
        mood,
        activities: mood.activities().to_vec(),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/analyze-sentiment", get(analyze_query).post(analyze_body))
        .route("/client-policy", get(client_policy))
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/:date", get(entries_by_date))
        .route("/trends", get(trends))
        .route("/activities/:mood", get(activities))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
