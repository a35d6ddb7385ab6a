//! REST endpoints for agency job postings.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info};

use super::model::NewJobPosting;
use crate::error::JobError;
use crate::store::JobStore;

/// Shared state for job routes.
#[derive(Clone)]
pub struct JobRouteState {
    pub store: Arc<dyn JobStore>,
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

// ── REST Endpoints ──────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    #[serde(default)]
    active: bool,
}

/// GET /api/jobs
///
/// Newest first. `?active=true` drops postings that expired before today.
async fn list_jobs(
    State(state): State<JobRouteState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let active_on = params.active.then(|| Utc::now().date_naive());
    match state.store.list_jobs(active_on).await {
        Ok(jobs) => (StatusCode::OK, Json(serde_json::json!(jobs))),
        Err(e) => {
            error!("Failed to list jobs: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to list jobs"})),
            )
        }
    }
}

/// POST /api/jobs
///
/// Every rejection answers with `{"error", "field"}`; a body that is not a
/// JSON object reports the field `body`.
async fn create_job(State(state): State<JobRouteState>, body: Bytes) -> impl IntoResponse {
    let submission: NewJobPosting = match serde_json::from_slice(&body) {
        Ok(submission) => submission,
        Err(e) => {
            let status = if e.is_syntax() || e.is_eof() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            return (
                status,
                Json(serde_json::json!({"error": format!("Cuerpo inválido: {e}"), "field": "body"})),
            );
        }
    };

    let result = async {
        let job = submission.validate()?;
        state.store.insert_job(&job).await?;
        Ok::<_, JobError>(job)
    }
    .await;

    match result {
        Ok(job) => {
            info!(id = %job.id, agency = %job.agency, "Job posted");
            (StatusCode::CREATED, Json(serde_json::json!(job)))
        }
        Err(JobError::Validation { field, message }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": message, "field": field})),
        ),
        Err(JobError::Storage(e)) => {
            error!("Failed to store job: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to store job"})),
            )
        }
    }
}

/// Build the job API routes.
pub fn job_routes(state: JobRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/jobs", get(list_jobs).post(create_job))
        .with_state(state)
}
