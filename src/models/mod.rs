//! Data models and DTOs
//!
//! Contains the generic resource contract shared by every content and
//! enquiry collection, plus the request/response structures used by the
//! API. Each resource declares its collection, payload shape, and an
//! ordered validation that builds the stored document.

pub mod admin;
pub mod content;
pub mod enquiry;
pub mod visit;

pub use content::{Banner, Notice, StudentAchiever};
pub use enquiry::{AdmissionEnquiry, ContactEnquiry, FeesEnquiry};
pub use visit::CampusVisit;

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contract every CRUD resource satisfies.
///
/// `build` runs the resource's ordered validation rules against the raw
/// payload and, on success, produces the document to persist (defaults
/// such as the initial lifecycle status already applied). The first
/// violated rule's message is returned verbatim.
pub trait Resource: Send + Sync + 'static {
    /// Collection (table) the resource lives in
    const COLLECTION: &'static str;

    /// Human label used in response messages
    const NAME: &'static str;

    /// Raw request payload; all fields optional so that missing fields
    /// surface as validation messages instead of deserialization faults
    type Payload: DeserializeOwned + Send + 'static;

    fn build(payload: Self::Payload) -> Result<Value, AppError>;
}

/// Resources whose records carry a status lifecycle
pub trait Lifecycle: Resource {
    /// Validate a raw status string against the resource's lifecycle,
    /// returning the canonical JSON value to store
    fn parse_status(raw: &str) -> Result<Value, AppError>;
}

/// Request body for status transitions
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StatusUpdateRequest {
    pub status: Option<String>,
}

/// Generic success response
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Message-only response (no data)
#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
