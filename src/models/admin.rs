//! Admin credential records
//!
//! Credential-only records: username (unique, lowercased), bcrypt hash,
//! display name. Not content; admins never appear on the public site.

use crate::db::StoredDoc;
use crate::error::AppError;
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored admin credential record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub username: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Usernames are compared case-insensitively: trim, then lowercase.
pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validated registration input, username already normalized
#[derive(Debug)]
pub struct ValidRegistration {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    /// Ordered validation: username presence and length, password length,
    /// display name presence.
    pub fn validate(&self) -> Result<ValidRegistration, AppError> {
        let raw_username = validate::required(&self.username, "Username is required")?;
        let username = normalize_username(&raw_username);
        validate::min_len(&username, 3, "Username must be at least 3 characters")?;
        validate::max_len(&username, 30, "Username cannot exceed 30 characters")?;

        let password = validate::required(&self.password, "Password is required")?;
        validate::min_len(&password, 6, "Password must be at least 6 characters")?;

        let name = validate::required(&self.name, "Name is required")?;
        validate::max_len(&name, 100, "Name cannot exceed 100 characters")?;

        Ok(ValidRegistration {
            username,
            password,
            name,
        })
    }
}

/// Admin record JSON for API responses, with the hash stripped
pub fn public_json(stored: StoredDoc) -> Value {
    let mut doc = stored.into_json();
    if let Value::Object(ref mut map) = doc {
        map.remove("passwordHash");
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn message_of(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn username_is_trimmed_and_lowercased() {
        assert_eq!(normalize_username("  Admin "), "admin");
        assert_eq!(normalize_username("HeadOffice"), "headoffice");
    }

    #[test]
    fn registration_enforces_minimum_lengths_in_order() {
        let req = RegisterRequest {
            username: Some("ab".to_string()),
            password: Some("123".to_string()),
            name: None,
        };
        // Username rule is declared first.
        let err = req.validate().unwrap_err();
        assert_eq!(message_of(err), "Username must be at least 3 characters");

        let req = RegisterRequest {
            username: Some("admin".to_string()),
            password: Some("123".to_string()),
            name: None,
        };
        let err = req.validate().unwrap_err();
        assert_eq!(message_of(err), "Password must be at least 6 characters");
    }

    #[test]
    fn registration_normalizes_username() {
        let req = RegisterRequest {
            username: Some("  Admin ".to_string()),
            password: Some("sch00l-pass".to_string()),
            name: Some("Front Office".to_string()),
        };
        let valid = req.validate().unwrap();
        assert_eq!(valid.username, "admin");
    }

    #[test]
    fn public_json_strips_password_hash() {
        let stored = StoredDoc {
            id: Uuid::new_v4(),
            doc: json!({
                "username": "admin",
                "passwordHash": "$2b$12$abcdefg",
                "name": "Front Office"
            }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let doc = public_json(stored);
        assert!(doc.get("passwordHash").is_none());
        assert_eq!(doc["username"], "admin");
    }
}
