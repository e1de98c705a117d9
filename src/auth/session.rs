//! Admin session extraction
//!
//! `AdminSession` is the verified-identity token every admin-only handler
//! takes as an explicit parameter. Extraction pulls the bearer token from
//! the Authorization header and validates it against the state-held
//! secret; a missing or invalid token rejects the request with 401 before
//! the handler body runs.

use crate::auth::decode_token;
use crate::error::AppError;
use crate::state::SharedState;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use uuid::Uuid;

/// Proof of an authenticated admin session.
///
/// There are no role distinctions; any valid session has full admin
/// rights over every resource.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AdminSession
where
    SharedState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = SharedState::from_ref(state);

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let claims = decode_token(bearer.token(), &app.jwt_secret)?;

        Ok(AdminSession {
            admin_id: claims.sub,
            username: claims.username,
        })
    }
}
