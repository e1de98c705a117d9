//! Content resources: banners, notices, and student achievers
//!
//! Admin-created, publicly read. Banners carry a visibility window; the
//! public list applies it against the wall clock at call time. Notices
//! and achievers have resource-specific public sort orders.

use crate::db::{collections, StoredDoc};
use crate::error::AppError;
use crate::models::Resource;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Banner

pub struct Banner;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerPayload {
    pub title: Option<String>,
    pub message: Option<String>,
    pub active: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BannerRecord {
    title: String,
    message: String,
    active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

impl Resource for Banner {
    const COLLECTION: &'static str = collections::BANNERS;
    const NAME: &'static str = "Banner";
    type Payload = BannerPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let title = validate::required(&payload.title, "Title is required")?;
        validate::max_len(&title, 100, "Title cannot exceed 100 characters")?;

        let message = validate::required(&payload.message, "Message is required")?;
        validate::max_len(&message, 300, "Message cannot exceed 300 characters")?;

        let start_date = match validate::optional(&payload.start_date) {
            Some(raw) => Some(validate::parse_date(&raw, "Please enter a valid start date")?),
            None => None,
        };
        let end_date = match validate::optional(&payload.end_date) {
            Some(raw) => Some(validate::parse_date(&raw, "Please enter a valid end date")?),
            None => None,
        };
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(AppError::Validation(
                    "Start date must not be after end date".to_string(),
                ));
            }
        }

        let record = BannerRecord {
            title,
            message,
            active: payload.active.unwrap_or(false),
            start_date,
            end_date,
            image: validate::optional(&payload.image),
        };
        serde_json::to_value(&record)
            .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))
    }
}

fn doc_date(doc: &Value, field: &str) -> Option<DateTime<Utc>> {
    doc.get(field)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Public visibility rule: active, and `now` lies inside the optional
/// start/end window. Evaluated per call against the wall clock.
pub fn banner_is_visible(doc: &Value, now: DateTime<Utc>) -> bool {
    if doc.get("active").and_then(Value::as_bool) != Some(true) {
        return false;
    }
    if let Some(start) = doc_date(doc, "startDate") {
        if start > now {
            return false;
        }
    }
    if let Some(end) = doc_date(doc, "endDate") {
        if end < now {
            return false;
        }
    }
    true
}

// ---------------------------------------------------------------------------
// Notice

pub struct Notice;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticePayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub pdf_url: Option<String>,
    pub pdf_file_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NoticeRecord {
    title: String,
    content: String,
    date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pdf_file_name: Option<String>,
}

impl Resource for Notice {
    const COLLECTION: &'static str = collections::NOTICES;
    const NAME: &'static str = "Notice";
    type Payload = NoticePayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let title = validate::required(&payload.title, "Title is required")?;
        validate::max_len(&title, 150, "Title cannot exceed 150 characters")?;

        let content = validate::required(&payload.content, "Content is required")?;
        validate::max_len(&content, 5000, "Content cannot exceed 5000 characters")?;

        let raw_date = validate::required(&payload.date, "Date is required")?;
        let date = validate::parse_date(&raw_date, "Please enter a valid date")?;

        let record = NoticeRecord {
            title,
            content,
            date,
            pdf_url: validate::optional(&payload.pdf_url),
            pdf_file_name: validate::optional(&payload.pdf_file_name),
        };
        serde_json::to_value(&record)
            .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))
    }
}

/// Public notice order: date descending, ties broken by newest creation.
///
/// Input comes from the store newest-first, so a stable sort on the date
/// alone preserves the creation tie-break.
pub fn sort_notices(mut records: Vec<StoredDoc>) -> Vec<StoredDoc> {
    records.sort_by(|a, b| {
        let da = doc_date(&a.doc, "date").unwrap_or(a.created_at);
        let db = doc_date(&b.doc, "date").unwrap_or(b.created_at);
        db.cmp(&da)
    });
    records
}

// ---------------------------------------------------------------------------
// Student achiever

pub struct StudentAchiever;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentAchieverPayload {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StudentAchieverRecord {
    name: String,
    image_url: String,
    heading: String,
    description: String,
    order: i64,
}

impl Resource for StudentAchiever {
    const COLLECTION: &'static str = collections::ACHIEVERS;
    const NAME: &'static str = "Student achiever";
    type Payload = StudentAchieverPayload;

    fn build(payload: Self::Payload) -> Result<Value, AppError> {
        let name = validate::required(&payload.name, "Name is required")?;
        validate::max_len(&name, 100, "Name cannot exceed 100 characters")?;

        let image_url = validate::required(&payload.image_url, "Image URL is required")?;

        let heading = validate::required(&payload.heading, "Heading is required")?;
        validate::max_len(&heading, 150, "Heading cannot exceed 150 characters")?;

        let description = validate::required(&payload.description, "Description is required")?;
        validate::max_len(&description, 1000, "Description cannot exceed 1000 characters")?;

        let order = payload.order.unwrap_or(0);
        validate::non_negative(order, "Order must be zero or a positive number")?;

        let record = StudentAchieverRecord {
            name,
            image_url,
            heading,
            description,
            order,
        };
        serde_json::to_value(&record)
            .map_err(|e| AppError::Internal(format!("Failed to serialize record: {}", e)))
    }
}

/// Public achiever order: `order` ascending, ties broken by newest
/// creation. Input comes from the store newest-first; the stable sort on
/// `order` keeps that tie-break.
pub fn sort_achievers(mut records: Vec<StoredDoc>) -> Vec<StoredDoc> {
    records.sort_by_key(|r| r.doc.get("order").and_then(Value::as_i64).unwrap_or(0));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn stored(doc: Value, created: &str) -> StoredDoc {
        StoredDoc {
            id: Uuid::new_v4(),
            doc,
            created_at: ts(created),
            updated_at: ts(created),
        }
    }

    #[test]
    fn banner_visible_only_when_active_and_inside_window() {
        let now = ts("2026-06-15T12:00:00Z");

        let open = json!({"active": true});
        assert!(banner_is_visible(&open, now));

        let inactive = json!({"active": false});
        assert!(!banner_is_visible(&inactive, now));

        let windowed = json!({
            "active": true,
            "startDate": "2026-06-01T00:00:00Z",
            "endDate": "2026-06-30T00:00:00Z"
        });
        assert!(banner_is_visible(&windowed, now));

        let not_started = json!({"active": true, "startDate": "2026-07-01T00:00:00Z"});
        assert!(!banner_is_visible(&not_started, now));

        let expired = json!({"active": true, "endDate": "2026-06-01T00:00:00Z"});
        assert!(!banner_is_visible(&expired, now));
    }

    #[test]
    fn banner_window_boundaries_are_inclusive() {
        let now = ts("2026-06-15T12:00:00Z");
        let at_start = json!({"active": true, "startDate": "2026-06-15T12:00:00Z"});
        assert!(banner_is_visible(&at_start, now));
        let at_end = json!({"active": true, "endDate": "2026-06-15T12:00:00Z"});
        assert!(banner_is_visible(&at_end, now));
    }

    #[test]
    fn banner_rejects_inverted_window() {
        let payload = BannerPayload {
            title: Some("Admissions open".to_string()),
            message: Some("Apply before June".to_string()),
            active: Some(true),
            start_date: Some("2026-06-30".to_string()),
            end_date: Some("2026-06-01".to_string()),
            image: None,
        };
        assert!(Banner::build(payload).is_err());
    }

    #[test]
    fn achievers_sort_by_order_then_newest_creation() {
        // A(order=1, t1), B(order=1, t2>t1), C(order=0, t3): expect C, B, A
        let a = stored(json!({"name": "A", "order": 1}), "2026-01-01T00:00:00Z");
        let b = stored(json!({"name": "B", "order": 1}), "2026-01-02T00:00:00Z");
        let c = stored(json!({"name": "C", "order": 0}), "2026-01-03T00:00:00Z");

        // Store hands records back newest-first.
        let sorted = sort_achievers(vec![c.clone(), b.clone(), a.clone()]);
        let names: Vec<_> = sorted
            .iter()
            .map(|r| r.doc["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn notices_sort_by_date_desc_then_newest_creation() {
        let old = stored(
            json!({"title": "Old", "date": "2026-02-01T00:00:00Z"}),
            "2026-02-01T08:00:00Z",
        );
        let fresh_early = stored(
            json!({"title": "FreshEarly", "date": "2026-03-01T00:00:00Z"}),
            "2026-02-20T08:00:00Z",
        );
        let fresh_late = stored(
            json!({"title": "FreshLate", "date": "2026-03-01T00:00:00Z"}),
            "2026-02-25T08:00:00Z",
        );

        let sorted = sort_notices(vec![fresh_late.clone(), fresh_early.clone(), old.clone()]);
        let titles: Vec<_> = sorted
            .iter()
            .map(|r| r.doc["title"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(titles, vec!["FreshLate", "FreshEarly", "Old"]);
    }

    #[test]
    fn notice_requires_parseable_date() {
        let payload = NoticePayload {
            title: Some("Holiday".to_string()),
            content: Some("School closed on Friday".to_string()),
            date: Some("soon".to_string()),
            pdf_url: None,
            pdf_file_name: None,
        };
        assert!(Notice::build(payload).is_err());
    }

    #[test]
    fn achiever_rejects_negative_order() {
        let payload = StudentAchieverPayload {
            name: Some("Priya".to_string()),
            image_url: Some("https://cdn.example.com/priya.jpg".to_string()),
            heading: Some("National chess champion".to_string()),
            description: Some("Won the under-14 title".to_string()),
            order: Some(-2),
        };
        assert!(StudentAchiever::build(payload).is_err());
    }
}
