//! Campus visit requests
//!
//! Public create, admin read/delete, with a pending → confirmed →
//! completed/cancelled lifecycle. The preferred date arrives as a string
//! and is parsed into a UTC timestamp before storage.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Lifecycle, Resource};
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Visit lifecycle. Requests start as `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VisitStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl VisitStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "pending" => Ok(VisitStatus::Pending),
            "confirmed" => Ok(VisitStatus::Confirmed),
            "completed" => Ok(VisitStatus::Completed),
            "cancelled" => Ok(VisitStatus::Cancelled),
            _ => Err(AppError::Validation(
                "Status must be one of: pending, confirmed, completed, cancelled".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSlot {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            _ => Err(AppError::Validation(
                "Preferred time slot must be one of: morning, afternoon, evening".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisitReason {
    AdmissionEnquiry,
    CampusTour,
    EventVisit,
    Other,
}

impl VisitReason {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "admission-enquiry" => Ok(VisitReason::AdmissionEnquiry),
            "campus-tour" => Ok(VisitReason::CampusTour),
            "event-visit" => Ok(VisitReason::EventVisit),
            "other" => Ok(VisitReason::Other),
            _ => Err(AppError::Validation(
                "Reason for visit must be one of: admission-enquiry, campus-tour, event-visit, other"
                    .to_string(),
            )),
        }
    }
}

pub struct CampusVisit;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CampusVisitPayload {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub preferred_date: Option<String>,
    pub preferred_time_slot: Option<String>,
    pub reason_for_visit: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CampusVisitRecord {
    name: String,
    phone: String,
    address: String,
    preferred_date: DateTime<Utc>,
    preferred_time_slot: TimeSlot,
    reason_for_visit: VisitReason,
    status: VisitStatus,
}

impl Resource for CampusVisit {
    const COLLECTION: &'static str = collections::CAMPUS_VISITS;
    const NAME: &'static str = "Campus visit request";
    type Payload = CampusVisitPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let name = validate::required(&payload.name, "Name is required")?;
        validate::min_len(&name, 2, "Name must be at least 2 characters")?;
        validate::max_len(&name, 100, "Name cannot exceed 100 characters")?;

        let phone = validate::required(&payload.phone, "Phone number is required")?;
        validate::phone(&phone, "Please enter a valid phone number")?;

        let address = validate::required(&payload.address, "Address is required")?;
        validate::max_len(&address, 250, "Address cannot exceed 250 characters")?;

        let raw_date = validate::required(&payload.preferred_date, "Preferred date is required")?;
        let preferred_date = validate::parse_date(&raw_date, "Please enter a valid preferred date")?;

        let raw_slot =
            validate::required(&payload.preferred_time_slot, "Preferred time slot is required")?;
        let preferred_time_slot = TimeSlot::parse(&raw_slot)?;

        let raw_reason =
            validate::required(&payload.reason_for_visit, "Reason for visit is required")?;
        let reason_for_visit = VisitReason::parse(&raw_reason)?;

        let record = CampusVisitRecord {
            name,
            phone,
            address,
            preferred_date,
            preferred_time_slot,
            reason_for_visit,
            status: VisitStatus::default(),
        };
        serde_json::to_value(&record)
            .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))
    }
}

impl Lifecycle for CampusVisit {
    fn parse_status(raw: &str) -> Result<Value, AppError> {
        let status = VisitStatus::parse(raw)?;
        serde_json::to_value(status)
            .map_err(|e| AppError::Internal(format!("Failed to serialize status: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload() -> CampusVisitPayload {
        CampusVisitPayload {
            name: Some("Sunita Rao".to_string()),
            phone: Some("+91 98765 43210".to_string()),
            address: Some("14 Lake View Road".to_string()),
            preferred_date: Some("2026-10-05".to_string()),
            preferred_time_slot: Some("morning".to_string()),
            reason_for_visit: Some("campus-tour".to_string()),
        }
    }

    fn message_of(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn visit_builds_with_parsed_date_and_pending_status() {
        let doc = CampusVisit::build(payload()).unwrap();
        assert_eq!(doc["status"], "pending");
        assert_eq!(doc["preferredTimeSlot"], "morning");
        assert_eq!(doc["reasonForVisit"], "campus-tour");
        // Date string became a real timestamp
        assert_eq!(doc["preferredDate"], "2026-10-05T00:00:00Z");
    }

    #[test]
    fn visit_rejects_unknown_time_slot() {
        let p = CampusVisitPayload {
            preferred_time_slot: Some("midnight".to_string()),
            ..payload()
        };
        let err = CampusVisit::build(p).unwrap_err();
        assert_eq!(
            message_of(err),
            "Preferred time slot must be one of: morning, afternoon, evening"
        );
    }

    #[test]
    fn visit_rejects_unparseable_date() {
        let p = CampusVisitPayload {
            preferred_date: Some("next tuesday".to_string()),
            ..payload()
        };
        let err = CampusVisit::build(p).unwrap_err();
        assert_eq!(message_of(err), "Please enter a valid preferred date");
    }

    #[test]
    fn visit_first_rule_wins_over_later_failures() {
        let p = CampusVisitPayload {
            name: None,
            preferred_time_slot: Some("midnight".to_string()),
            ..payload()
        };
        let err = CampusVisit::build(p).unwrap_err();
        assert_eq!(message_of(err), "Name is required");
    }

    #[test]
    fn visit_status_parse_accepts_lifecycle_members_only() {
        assert_eq!(VisitStatus::parse("cancelled").unwrap(), VisitStatus::Cancelled);
        assert!(VisitStatus::parse("resolved").is_err());
    }
}
