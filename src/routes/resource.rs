//! Generic CRUD resource handlers
//!
//! Every content and enquiry endpoint is an instantiation of these
//! handlers over a [`Resource`] implementation: validate against the
//! resource's ordered rules, perform a single store operation, return
//! JSON. Admin variants take the session as an explicit first parameter;
//! extraction failing means the handler body never runs and nothing is
//! persisted.

use crate::auth::AdminSession;
use crate::error::{not_found_error, validation_error, ApiResult};
use crate::models::{Lifecycle, MessageResponse, Resource, StatusUpdateRequest, SuccessResponse};
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

/// Public create: unauthenticated submission (enquiries, visit requests)
pub async fn create<R: Resource>(
    State(state): State<SharedState>,
    Json(payload): Json<R::Payload>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<Value>>)> {
    let doc = R::build(payload)?;
    let stored = state.store.insert(R::COLLECTION, &doc).await?;
    info!("{} {} submitted", R::NAME, stored.id);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            format!("{} submitted successfully.", R::NAME),
            stored.into_json(),
        )),
    ))
}

/// Admin create: same contract, gated by a session (content resources)
pub async fn create_admin<R: Resource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Json(payload): Json<R::Payload>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<Value>>)> {
    let doc = R::build(payload)?;
    let stored = state.store.insert(R::COLLECTION, &doc).await?;
    info!("{} {} created by {}", R::NAME, stored.id, session.username);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            format!("{} created successfully.", R::NAME),
            stored.into_json(),
        )),
    ))
}

/// Admin list: every record regardless of public visibility, newest first
pub async fn list_admin<R: Resource>(
    _session: AdminSession,
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<Value>>>> {
    let records = state.store.list_newest_first(R::COLLECTION).await?;
    let data: Vec<Value> = records.into_iter().map(|r| r.into_json()).collect();

    Ok(Json(SuccessResponse::with_data(
        format!("{} records fetched.", R::NAME),
        data,
    )))
}

/// Admin delete by identifier. Hard delete; 404 when the id is absent.
pub async fn delete_by_id<R: Resource>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = state.store.delete(R::COLLECTION, id).await?;
    if !deleted {
        return Err(not_found_error(format!("{} not found", R::NAME)));
    }
    info!(
        "{} {} deleted by {} ({})",
        R::NAME,
        id,
        session.username,
        session.admin_id
    );

    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully.",
        R::NAME
    ))))
}

/// Admin status transition for lifecycle-bearing resources
pub async fn update_status<R: Lifecycle>(
    session: AdminSession,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusUpdateRequest>,
) -> ApiResult<Json<SuccessResponse<Value>>> {
    let raw = body
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| validation_error("Status is required"))?;
    let status = R::parse_status(raw)?;

    let updated = state
        .store
        .update_field(R::COLLECTION, id, "status", &status)
        .await?
        .ok_or_else(|| not_found_error(format!("{} not found", R::NAME)))?;
    info!(
        "{} {} moved to {} by {} ({})",
        R::NAME,
        id,
        raw,
        session.username,
        session.admin_id
    );

    Ok(Json(SuccessResponse::with_data(
        format!("{} status updated.", R::NAME),
        updated.into_json(),
    )))
}
