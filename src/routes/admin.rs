//! Admin registration and login handlers

use crate::auth::{create_token, hash_password, verify_password};
use crate::db::collections;
use crate::error::{conflict_error, validation_error, ApiResult, AppError};
use crate::models::admin::{self, Admin, LoginRequest, RegisterRequest};
use crate::models::SuccessResponse;
use crate::state::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

/// Register a new admin account.
///
/// The uniqueness check here and the store's unique index are not one
/// atomic step; a concurrent duplicate registration loses at the index
/// and is mapped to the same conflict.
pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<Value>>)> {
    let valid = payload.validate()?;

    let existing = state
        .store
        .find_by_text_field(collections::ADMINS, "username", &valid.username)
        .await?;
    if existing.is_some() {
        return Err(conflict_error("Username is already registered"));
    }

    let record = Admin {
        username: valid.username.clone(),
        password_hash: hash_password(&valid.password)?,
        name: valid.name,
    };
    let doc = serde_json::to_value(&record)
        .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))?;

    let stored = state
        .store
        .insert(collections::ADMINS, &doc)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => conflict_error("Username is already registered"),
            other => other,
        })?;
    info!("Admin account {} registered", valid.username);

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            "Admin registered successfully.",
            admin::public_json(stored),
        )),
    ))
}

/// Verify credentials and issue a session token
pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<SuccessResponse<Value>>> {
    let raw_username = payload
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| validation_error("Username is required"))?;
    let username = admin::normalize_username(raw_username);

    let password = payload
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| validation_error("Password is required"))?;

    let stored = state
        .store
        .find_by_text_field(collections::ADMINS, "username", &username)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("Unknown admin username: {}", username)))?;

    let hash = stored
        .doc
        .get("passwordHash")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Internal("Admin record missing password hash".to_string()))?
        .to_string();

    if !verify_password(password, &hash)? {
        return Err(AppError::Unauthorized(format!(
            "Bad password for admin: {}",
            username
        )));
    }

    let session = create_token(stored.id, &username, &state.jwt_secret)?;
    info!("Admin {} logged in", username);

    Ok(Json(SuccessResponse::with_data(
        "Login successful.",
        json!({
            "session": session,
            "admin": admin::public_json(stored),
        }),
    )))
}
