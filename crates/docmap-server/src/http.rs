//! HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::html::plain_text_to_html;
use crate::snapshot::Snapshot;
use crate::AppState;

const NOT_FOUND_DETAIL: &str =
    "No Docmaps available for requested manuscript from the publisher eLife";

/// Map a snapshot-load failure to a 5xx response.
fn server_error(error: crate::ServiceError) -> (StatusCode, Json<Value>) {
    tracing::error!(%error, "failed to build docmap snapshot");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"detail": error.to_string()})),
    )
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": NOT_FOUND_DETAIL})),
    )
}

async fn snapshot(state: &AppState) -> Result<Arc<Snapshot>, (StatusCode, Json<Value>)> {
    state.snapshot().await.map_err(server_error)
}

/// Query parameters for the by-manuscript-id endpoints.
#[derive(Debug, Deserialize)]
pub struct ManuscriptIdQuery {
    pub manuscript_id: String,
}

/// Query parameters for the evaluation endpoint.
#[derive(Debug, Deserialize)]
pub struct EvaluationIdQuery {
    pub evaluation_id: String,
}

/// `GET /enhanced-preprints/docmaps/v2/index`
pub async fn public_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let snapshot = snapshot(&state).await?;
    Ok(Json(json!({"docmaps": snapshot.public_docmaps})))
}

/// `GET /enhanced-preprints/docmaps/v2/by-publisher/elife/get-by-manuscript-id`
pub async fn public_by_manuscript_id(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ManuscriptIdQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let snapshot = snapshot(&state).await?;
    snapshot
        .public_by_manuscript_id(&query.manuscript_id)
        .map(|docmap| Json(docmap.clone()))
        .ok_or_else(not_found)
}

/// `GET /kotahi/docmaps/v1/index`
pub async fn kotahi_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let snapshot = snapshot(&state).await?;
    Ok(Json(json!({"docmaps": snapshot.kotahi_docmaps})))
}

/// `GET /kotahi/docmaps/v1/by-publisher/elife/get-by-manuscript-id`
pub async fn kotahi_by_manuscript_id(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ManuscriptIdQuery>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let snapshot = snapshot(&state).await?;
    snapshot
        .kotahi_by_manuscript_id(&query.manuscript_id)
        .map(|docmap| Json(docmap.clone()))
        .ok_or_else(not_found)
}

/// `GET /kotahi/docmaps/v1/evaluation/get-by-evaluation-id`
pub async fn evaluation_by_id(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EvaluationIdQuery>,
) -> Result<Html<String>, (StatusCode, Json<Value>)> {
    let snapshot = snapshot(&state).await?;
    snapshot
        .evaluation_text(&query.evaluation_id)
        .map(|text| Html(plain_text_to_html(text)))
        .ok_or_else(not_found)
}

/// `GET /` — service banner.
pub async fn banner() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
