use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tower_http::compression::CompressionLayer;

use crate::reporting::dashboard::HtmlDashboard;
use crate::reporting::logging;
use crate::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub last_updated: DateTime<Utc>,
    pub has_data: bool,
    pub reports_loaded: usize,
    pub skipped: usize,
}

/// All dashboard routes, with compression, bound to `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/report", get(get_report))
        .route("/api/trends", get(get_trends))
        .route("/api/refresh", post(post_refresh))
        .route("/healthz", get(healthz))
        .layer(CompressionLayer::new())
        .with_state(state)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn index(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot().await;
    match HtmlDashboard::render(&snapshot, state.render_options()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            logging::log_error("Could not render dashboard", Some(&e));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn get_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    Json(snapshot.as_ref().clone())
}

async fn get_report(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot().await;
    match &snapshot.latest {
        Some(latest) => Json(latest.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "No analysis report available",
                "dataDir": snapshot.data_dir,
            })),
        )
            .into_response(),
    }
}

async fn get_trends(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    Json(json!({
        "healthScore": snapshot.health_trend,
        "topics": snapshot.topics_trend,
    }))
}

async fn post_refresh(State(state): State<AppState>) -> Response {
    match state.refresh().await {
        Ok(snapshot) => Json(RefreshSummary {
            last_updated: snapshot.last_updated,
            has_data: snapshot.has_data(),
            reports_loaded: snapshot.reports_loaded,
            skipped: snapshot.skipped.len(),
        })
        .into_response(),
        Err(e) => {
            logging::log_error("Manual refresh failed", Some(&e));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}
