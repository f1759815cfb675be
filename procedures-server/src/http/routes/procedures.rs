//! Procedure endpoints
//!
//! Full-field CRUD over `/procedures` and `/procedures/{id}`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Procedure;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidProcedureId};
use crate::http::server::AppState;
use crate::models::{ProcedureFields, ProcedureId};

/// Create/update request body. Missing keys take their zero value (empty
/// string, 0, or the Unix epoch) and any `id` key is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcedureRequest {
    pub last_modified_on: DateTime<Utc>,
    pub structure_id: i64,
    pub structure_version: i64,
    pub name: String,
    pub commodity: String,
    pub consultant_id: i64,
    pub dead_line: DateTime<Utc>,
}

impl From<ProcedureRequest> for ProcedureFields {
    fn from(r: ProcedureRequest) -> Self {
        Self {
            last_modified_on: r.last_modified_on,
            structure_id: r.structure_id,
            structure_version: r.structure_version,
            name: r.name,
            commodity: r.commodity,
            consultant_id: r.consultant_id,
            dead_line: r.dead_line,
        }
    }
}

/// Procedure response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureResponse {
    pub id: ProcedureId,
    pub last_modified_on: DateTime<Utc>,
    pub structure_id: i64,
    pub structure_version: i64,
    pub name: String,
    pub commodity: String,
    pub consultant_id: i64,
    pub dead_line: DateTime<Utc>,
}

impl From<Procedure> for ProcedureResponse {
    fn from(p: Procedure) -> Self {
        Self {
            id: p.id,
            last_modified_on: p.last_modified_on,
            structure_id: p.structure_id,
            structure_version: p.structure_version,
            name: p.name,
            commodity: p.commodity,
            consultant_id: p.consultant_id,
            dead_line: p.dead_line,
        }
    }
}

/// Outcome of a write: the affected id plus a human-readable message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: ProcedureId,
    pub message: String,
}

/// GET /procedures - list every procedure
async fn list_procedures(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProcedureResponse>>, ApiError> {
    let procedures = state.store.fetch_all().await?;
    Ok(Json(procedures.into_iter().map(ProcedureResponse::from).collect()))
}

/// POST /procedures - create a procedure
async fn create_procedure(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ProcedureRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = state.store.create(&req.into()).await?;
    tracing::info!(%id, "Procedure created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            id,
            message: "Procedure created successfully".to_owned(),
        }),
    ))
}

/// GET /procedures/{id} - get a single procedure
async fn get_procedure(
    State(state): State<Arc<AppState>>,
    ValidProcedureId(id): ValidProcedureId,
) -> Result<Json<ProcedureResponse>, ApiError> {
    let procedure = state.store.fetch_one(id).await?;
    Ok(Json(ProcedureResponse::from(procedure)))
}

/// PUT /procedures/{id} - replace every field of a procedure
async fn update_procedure(
    State(state): State<Arc<AppState>>,
    ValidProcedureId(id): ValidProcedureId,
    JsonBody(req): JsonBody<ProcedureRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rows = state.store.update(id, &req.into()).await?;
    tracing::info!(%id, rows, "Procedure updated");

    Ok(Json(MessageResponse {
        id,
        message: format!(
            "Procedure updated successfully. Total rows/record affected {}",
            rows
        ),
    }))
}

/// DELETE /procedures/{id} - delete a procedure
async fn delete_procedure(
    State(state): State<Arc<AppState>>,
    ValidProcedureId(id): ValidProcedureId,
) -> Result<Json<MessageResponse>, ApiError> {
    let rows = state.store.delete(id).await?;
    tracing::info!(%id, rows, "Procedure deleted");

    Ok(Json(MessageResponse {
        id,
        message: format!(
            "Procedure deleted successfully. Total rows/record affected {}",
            rows
        ),
    }))
}

/// Procedure routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/procedures", get(list_procedures).post(create_procedure))
        .route(
            "/procedures/{id}",
            get(get_procedure)
                .put(update_procedure)
                .delete(delete_procedure),
        )
}
