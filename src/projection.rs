//! Public projection of internal records
//!
//! The store-assigned ObjectId never crosses the system boundary in its
//! native form: projection renames it to `id` and stringifies it. Applied
//! exactly once, immediately before a record leaves the system. Absent
//! optional fields are simply not serialized.

use bson::oid::ObjectId;
use serde::Serialize;

use crate::db::schemas::{EventDoc, UserDoc, UserStatus};

/// External-facing user representation
#[derive(Serialize, Clone, Debug)]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_employment: Option<String>,
    pub is_active: bool,
}

impl From<UserDoc> for PublicUser {
    fn from(doc: UserDoc) -> Self {
        Self {
            id: hex_id(doc._id),
            email: doc.email,
            name: doc.name,
            status: doc.status,
            phone: doc.phone,
            batch_year: doc.batch_year,
            department: doc.department,
            current_company: doc.current_company,
            designation: doc.designation,
            current_employment: doc.current_employment,
            is_active: doc.is_active,
        }
    }
}

/// External-facing event representation
#[derive(Serialize, Clone, Debug)]
pub struct PublicEvent {
    /// Absent for the non-persisted sample event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl From<EventDoc> for PublicEvent {
    fn from(doc: EventDoc) -> Self {
        Self {
            id: doc._id.map(|oid| oid.to_hex()),
            title: doc.title,
            date: doc.date,
            description: doc.description,
            audience: doc.audience,
        }
    }
}

fn hex_id(id: Option<ObjectId>) -> String {
    id.map(|oid| oid.to_hex()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_user() -> UserDoc {
        UserDoc {
            _id: Some(ObjectId::new()),
            email: "jane@example.org".into(),
            name: "Jane".into(),
            status: UserStatus::Alumnus,
            current_company: Some("ACME Corp".into()),
            ..Default::default()
        }
    }

    #[test]
    fn object_id_is_renamed_and_stringified() {
        let doc = stored_user();
        let oid = doc._id.unwrap();
        let public = PublicUser::from(doc);
        assert_eq!(public.id, oid.to_hex());

        let value = serde_json::to_value(&public).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(!obj.contains_key("_id"));
    }

    #[test]
    fn absent_fields_do_not_appear() {
        let public = PublicUser::from(stored_user());
        let value = serde_json::to_value(&public).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("phone"));
        assert!(!obj.contains_key("batch_year"));
        assert_eq!(obj["current_company"], "ACME Corp");
    }

    #[test]
    fn sample_event_has_no_id() {
        let event = PublicEvent::from(EventDoc {
            _id: None,
            title: "Annual Alumni Meet".into(),
            date: "2025-02-15".into(),
            description: None,
            audience: Some("All".into()),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert!(!value.as_object().unwrap().contains_key("id"));
    }
}
