//! Enquiry resources: admission, contact, and fees enquiries
//!
//! All three follow the public-create / admin-read / admin-delete pattern
//! and share the new → in-progress → resolved lifecycle. Validation rules
//! run in declaration order; the first violated rule's message is what the
//! caller sees.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Lifecycle, Resource};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Enquiry lifecycle. Records start as `new`; transitions happen only
/// through the admin status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EnquiryStatus {
    #[default]
    New,
    InProgress,
    Resolved,
}

impl EnquiryStatus {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "new" => Ok(EnquiryStatus::New),
            "in-progress" => Ok(EnquiryStatus::InProgress),
            "resolved" => Ok(EnquiryStatus::Resolved),
            _ => Err(AppError::Validation(
                "Status must be one of: new, in-progress, resolved".to_string(),
            )),
        }
    }
}

fn to_doc<T: Serialize>(record: &T) -> Result<Value, AppError> {
    serde_json::to_value(record)
        .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))
}

fn enquiry_status_value(raw: &str) -> Result<Value, AppError> {
    let status = EnquiryStatus::parse(raw)?;
    serde_json::to_value(status)
        .map_err(|e| AppError::Internal(format!("Failed to serialize status: {}", e)))
}

// ---------------------------------------------------------------------------
// Admission enquiry

pub struct AdmissionEnquiry;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdmissionEnquiryPayload {
    pub student_name: Option<String>,
    pub parent_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub grade: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdmissionEnquiryRecord {
    student_name: String,
    parent_name: String,
    email: String,
    phone: String,
    grade: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    status: EnquiryStatus,
}

impl Resource for AdmissionEnquiry {
    const COLLECTION: &'static str = collections::ADMISSION_ENQUIRIES;
    const NAME: &'static str = "Admission enquiry";
    type Payload = AdmissionEnquiryPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let student_name = validate::required(&payload.student_name, "Student name is required")?;
        validate::min_len(&student_name, 2, "Student name must be at least 2 characters")?;
        validate::max_len(&student_name, 100, "Student name cannot exceed 100 characters")?;

        let parent_name = validate::required(&payload.parent_name, "Parent name is required")?;
        validate::min_len(&parent_name, 2, "Parent name must be at least 2 characters")?;
        validate::max_len(&parent_name, 100, "Parent name cannot exceed 100 characters")?;

        let email = validate::required(&payload.email, "Email is required")?;
        validate::email(&email, "Please enter a valid email address")?;

        let phone = validate::required(&payload.phone, "Phone number is required")?;
        validate::phone(&phone, "Please enter a valid phone number")?;

        let grade = validate::required(&payload.grade, "Grade is required")?;
        validate::max_len(&grade, 20, "Grade cannot exceed 20 characters")?;

        let message = validate::optional(&payload.message);
        if let Some(ref m) = message {
            validate::max_len(m, 1000, "Message cannot exceed 1000 characters")?;
        }

        to_doc(&AdmissionEnquiryRecord {
            student_name,
            parent_name,
            email,
            phone,
            grade,
            message,
            status: EnquiryStatus::default(),
        })
    }
}

impl Lifecycle for AdmissionEnquiry {
    fn parse_status(raw: &str) -> Result<Value, AppError> {
        enquiry_status_value(raw)
    }
}

// ---------------------------------------------------------------------------
// Contact enquiry

pub struct ContactEnquiry;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactEnquiryPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactEnquiryRecord {
    name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    subject: String,
    message: String,
    status: EnquiryStatus,
}

impl Resource for ContactEnquiry {
    const COLLECTION: &'static str = collections::CONTACT_ENQUIRIES;
    const NAME: &'static str = "Contact enquiry";
    type Payload = ContactEnquiryPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let name = validate::required(&payload.name, "Name is required")?;
        validate::min_len(&name, 2, "Name must be at least 2 characters")?;
        validate::max_len(&name, 100, "Name cannot exceed 100 characters")?;

        let email = validate::required(&payload.email, "Email is required")?;
        validate::email(&email, "Please enter a valid email address")?;

        let phone = validate::optional(&payload.phone);
        if let Some(ref p) = phone {
            validate::phone(p, "Please enter a valid phone number")?;
        }

        let subject = validate::required(&payload.subject, "Subject is required")?;
        validate::max_len(&subject, 150, "Subject cannot exceed 150 characters")?;

        let message = validate::required(&payload.message, "Message is required")?;
        validate::max_len(&message, 2000, "Message cannot exceed 2000 characters")?;

        to_doc(&ContactEnquiryRecord {
            name,
            email,
            phone,
            subject,
            message,
            status: EnquiryStatus::default(),
        })
    }
}

impl Lifecycle for ContactEnquiry {
    fn parse_status(raw: &str) -> Result<Value, AppError> {
        enquiry_status_value(raw)
    }
}

// ---------------------------------------------------------------------------
// Fees enquiry

pub struct FeesEnquiry;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FeesEnquiryPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "class")]
    pub class_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeesEnquiryRecord {
    name: String,
    email: String,
    phone: String,
    #[serde(rename = "class")]
    class_name: String,
    status: EnquiryStatus,
}

impl Resource for FeesEnquiry {
    const COLLECTION: &'static str = collections::FEES_ENQUIRIES;
    const NAME: &'static str = "Fees enquiry";
    type Payload = FeesEnquiryPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let name = validate::required(&payload.name, "Name is required")?;
        validate::min_len(&name, 2, "Name must be at least 2 characters")?;
        validate::max_len(&name, 100, "Name cannot exceed 100 characters")?;

        let email = validate::required(&payload.email, "Email is required")?;
        validate::email(&email, "Please enter a valid email address")?;

        let phone = validate::required(&payload.phone, "Phone number is required")?;
        validate::mobile(&phone, "Please enter a valid 10-digit mobile number")?;

        let class_name = validate::required(&payload.class_name, "Class is required")?;
        validate::max_len(&class_name, 20, "Class cannot exceed 20 characters")?;

        to_doc(&FeesEnquiryRecord {
            name,
            email,
            phone,
            class_name,
            status: EnquiryStatus::default(),
        })
    }
}

impl Lifecycle for FeesEnquiry {
    fn parse_status(raw: &str) -> Result<Value, AppError> {
        enquiry_status_value(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message_of(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn admission_payload() -> AdmissionEnquiryPayload {
        AdmissionEnquiryPayload {
            student_name: Some("Aarav Sharma".to_string()),
            parent_name: Some("Nisha Sharma".to_string()),
            email: Some("nisha@example.com".to_string()),
            phone: Some("9876543210".to_string()),
            grade: Some("Grade 5".to_string()),
            message: None,
        }
    }

    #[test]
    fn admission_enquiry_builds_with_default_status() {
        let doc = AdmissionEnquiry::build(admission_payload()).unwrap();
        assert_eq!(doc["studentName"], "Aarav Sharma");
        assert_eq!(doc["status"], "new");
        assert!(doc.get("message").is_none());
    }

    #[test]
    fn admission_enquiry_first_rule_wins() {
        // Both student name and email are invalid; the student-name rule
        // is declared first so its message must surface.
        let payload = AdmissionEnquiryPayload {
            student_name: None,
            email: Some("nope".to_string()),
            ..admission_payload()
        };
        let err = AdmissionEnquiry::build(payload).unwrap_err();
        assert_eq!(message_of(err), "Student name is required");
    }

    #[test]
    fn admission_enquiry_rejects_bad_email() {
        let payload = AdmissionEnquiryPayload {
            email: Some("not-an-email".to_string()),
            ..admission_payload()
        };
        let err = AdmissionEnquiry::build(payload).unwrap_err();
        assert_eq!(message_of(err), "Please enter a valid email address");
    }

    #[test]
    fn contact_enquiry_phone_is_optional_but_checked_when_present() {
        let base = ContactEnquiryPayload {
            name: Some("Meera".to_string()),
            email: Some("meera@example.com".to_string()),
            phone: None,
            subject: Some("Transport".to_string()),
            message: Some("Is there a bus from Sector 12?".to_string()),
        };
        assert!(ContactEnquiry::build(ContactEnquiryPayload {
            phone: None,
            ..clone_contact(&base)
        })
        .is_ok());

        let err = ContactEnquiry::build(ContactEnquiryPayload {
            phone: Some("xyz".to_string()),
            ..clone_contact(&base)
        })
        .unwrap_err();
        assert_eq!(message_of(err), "Please enter a valid phone number");
    }

    fn clone_contact(p: &ContactEnquiryPayload) -> ContactEnquiryPayload {
        ContactEnquiryPayload {
            name: p.name.clone(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            subject: p.subject.clone(),
            message: p.message.clone(),
        }
    }

    #[test]
    fn fees_enquiry_requires_ten_digit_mobile() {
        let payload = FeesEnquiryPayload {
            name: Some("Rahul".to_string()),
            email: Some("rahul@example.com".to_string()),
            phone: Some("12345".to_string()),
            class_name: Some("8".to_string()),
        };
        let err = FeesEnquiry::build(payload).unwrap_err();
        assert_eq!(message_of(err), "Please enter a valid 10-digit mobile number");
    }

    #[test]
    fn fees_enquiry_serializes_class_field_name() {
        let payload = FeesEnquiryPayload {
            name: Some("Rahul".to_string()),
            email: Some("rahul@example.com".to_string()),
            phone: Some("9876543210".to_string()),
            class_name: Some("8".to_string()),
        };
        let doc = FeesEnquiry::build(payload).unwrap();
        assert_eq!(doc["class"], "8");
        assert_eq!(doc["status"], "new");
    }

    #[test]
    fn status_parse_accepts_lifecycle_members_only() {
        assert_eq!(EnquiryStatus::parse("in-progress").unwrap(), EnquiryStatus::InProgress);
        assert!(EnquiryStatus::parse("done").is_err());
        assert_eq!(
            AdmissionEnquiry::parse_status("resolved").unwrap(),
            serde_json::json!("resolved")
        );
    }
}
