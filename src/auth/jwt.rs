//! Session token management
//!
//! Creates and validates the JWT that stands in for an admin session.
//! The signing secret is threaded in from application state rather than
//! read from a process-wide static.

use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token lifetime (12 hours)
const SESSION_TOKEN_EXPIRATION_HOURS: i64 = 12;

/// JWT claims for an admin session
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin record id)
    pub sub: Uuid,
    /// Admin username (already lowercased)
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Issued session token response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Create a session token for an authenticated admin
pub fn create_token(admin_id: Uuid, username: &str, secret: &str) -> Result<SessionToken, AppError> {
    let now = Utc::now();

    let claims = Claims {
        sub: admin_id,
        username: username.to_string(),
        exp: (now + Duration::hours(SESSION_TOKEN_EXPIRATION_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))?;

    Ok(SessionToken {
        token,
        token_type: "Bearer".to_string(),
        expires_in: SESSION_TOKEN_EXPIRATION_HOURS * 3600,
    })
}

/// Decode and validate a session token
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("Session token expired".to_string())
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::Unauthorized("Invalid session token".to_string())
        }
        _ => AppError::Unauthorized(format!("Session token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip_preserves_claims() {
        let admin_id = Uuid::new_v4();
        let issued = create_token(admin_id, "headoffice", SECRET).unwrap();
        assert_eq!(issued.token_type, "Bearer");

        let claims = decode_token(&issued.token, SECRET).unwrap();
        assert_eq!(claims.sub, admin_id);
        assert_eq!(claims.username, "headoffice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issued = create_token(Uuid::new_v4(), "headoffice", "other-secret").unwrap();
        let result = decode_token(&issued.token, SECRET);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            decode_token("not.a.token", SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }
}
