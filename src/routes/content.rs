//! Public read handlers for content resources
//!
//! Creates and deletes go through the generic resource handlers; these
//! are the unauthenticated list endpoints with their resource-specific
//! ordering and, for banners, the visibility window filter.

use crate::auth::AdminSession;
use crate::db::collections;
use crate::error::ApiResult;
use crate::models::{content, SuccessResponse};
use crate::state::SharedState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::Value;

/// Public banners: active and inside their date window, newest first.
/// The window is evaluated against the wall clock at call time.
pub async fn list_public_banners(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<Value>>>> {
    let now = Utc::now();
    let records = state.store.list_newest_first(collections::BANNERS).await?;
    let data: Vec<Value> = records
        .into_iter()
        .filter(|r| content::banner_is_visible(&r.doc, now))
        .map(|r| r.into_json())
        .collect();

    Ok(Json(SuccessResponse::with_data("Banners fetched.", data)))
}

/// Admin banners: every banner regardless of the visibility window
pub async fn list_all_banners(
    _session: AdminSession,
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<Value>>>> {
    let records = state.store.list_newest_first(collections::BANNERS).await?;
    let data: Vec<Value> = records.into_iter().map(|r| r.into_json()).collect();

    Ok(Json(SuccessResponse::with_data("Banners fetched.", data)))
}

/// Public notices: date descending, ties newest-created first
pub async fn list_public_notices(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<Value>>>> {
    let records = state.store.list_newest_first(collections::NOTICES).await?;
    let data: Vec<Value> = content::sort_notices(records)
        .into_iter()
        .map(|r| r.into_json())
        .collect();

    Ok(Json(SuccessResponse::with_data("Notices fetched.", data)))
}

/// Public achievers: order ascending, ties newest-created first
pub async fn list_public_achievers(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<Value>>>> {
    let records = state.store.list_newest_first(collections::ACHIEVERS).await?;
    let data: Vec<Value> = content::sort_achievers(records)
        .into_iter()
        .map(|r| r.into_json())
        .collect();

    Ok(Json(SuccessResponse::with_data("Achievers fetched.", data)))
}
