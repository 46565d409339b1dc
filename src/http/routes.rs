//! Route handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::deal::{Deal, DealMutation};
use crate::{AppError, Result};

use super::AppState;

/// Query string accepted by `GET /deals`.
#[derive(Debug, Default, Deserialize)]
pub struct DealsQuery {
    /// Free-text search.
    pub q: Option<String>,
}

/// Payload handed to the deals page: the matching deals plus the raw query.
#[derive(Debug, Serialize, Deserialize)]
pub struct DealsPage {
    /// Matching deals in listing order.
    pub deals: Vec<Deal>,
    /// The query exactly as received.
    pub q: Option<String>,
}

/// `GET /deals?q=`.
pub async fn list_deals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DealsQuery>,
) -> Json<DealsPage> {
    let deals = state.store.search(params.q.as_deref()).await;
    Json(DealsPage { deals, q: params.q })
}

/// `GET /deals/{id}`.
pub async fn get_deal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Deal>> {
    state
        .store
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no deal found for {id}")))
}

/// Unwrap a JSON body, reporting malformed input as `AppError::BadRequest`.
fn json_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// `POST /deals`.
pub async fn create_deal(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<DealMutation>, JsonRejection>,
) -> Result<(StatusCode, Json<Deal>)> {
    let deal = state.store.create(json_body(body)?);
    Ok((StatusCode::CREATED, Json(deal)))
}

/// `PATCH /deals/{id}`.
pub async fn update_deal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: std::result::Result<Json<DealMutation>, JsonRejection>,
) -> Result<Json<Deal>> {
    state.store.update(&id, json_body(body)?).map(Json)
}

/// `DELETE /deals/{id}`.
pub async fn delete_deal(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> StatusCode {
    state.store.delete(&id);
    StatusCode::NO_CONTENT
}
