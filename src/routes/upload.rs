//! Asset upload handler
//!
//! Accepts a multipart form with `file` and `type` fields, validates MIME
//! and size locally, then forwards the file to the external asset host.

use crate::assets::{check_upload, UploadKind, UploadedAsset};
use crate::auth::AdminSession;
use crate::error::{validation_error, ApiResult};
use crate::models::SuccessResponse;
use crate::state::SharedState;
use axum::extract::{Multipart, State};
use axum::Json;
use tracing::debug;

pub async fn upload(
    session: AdminSession,
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> ApiResult<Json<SuccessResponse<UploadedAsset>>> {
    let mut file: Option<(Vec<u8>, String, Option<String>)> = None;
    let mut kind_raw: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| validation_error(format!("Malformed multipart request: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .ok_or_else(|| validation_error("File content type is required"))?;
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| validation_error(format!("Failed to read uploaded file: {}", e)))?;
                file = Some((bytes.to_vec(), content_type, file_name));
            }
            Some("type") => {
                kind_raw = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| validation_error(format!("Failed to read upload type: {}", e)))?,
                );
            }
            _ => {}
        }
    }

    let raw = kind_raw.ok_or_else(|| validation_error("Upload type is required"))?;
    let kind = UploadKind::parse(raw.trim())?;

    let (bytes, content_type, file_name) =
        file.ok_or_else(|| validation_error("File is required"))?;

    // MIME and size must pass before any upstream call is made.
    check_upload(kind, &content_type, bytes.len())?;
    debug!(
        "Admin {} uploading {} bytes ({})",
        session.username,
        bytes.len(),
        content_type
    );

    let asset = state
        .assets
        .upload(&bytes, &content_type, kind, file_name.as_deref())
        .await?;

    Ok(Json(SuccessResponse::with_data(
        "File uploaded successfully.",
        asset,
    )))
}
