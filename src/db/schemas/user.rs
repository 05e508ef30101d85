//! User document schema
//!
//! Stores both alumni and students. Email is the natural key; uniqueness
//! is enforced by a unique index so concurrent first-logins for the same
//! email resolve at the store instead of duplicating records.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for users
pub const USER_COLLECTION: &str = "user";

/// User status: alumnus or current student
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Alumnus,
    Student,
}

impl Default for UserStatus {
    fn default() -> Self {
        Self::Student
    }
}

impl UserStatus {
    /// The enumerated literal stored in the document
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alumnus => "alumnus",
            Self::Student => "student",
        }
    }
}

/// User document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Email address (natural key)
    pub email: String,

    /// Display name
    pub name: String,

    /// User status
    pub status: UserStatus,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Graduation/batch year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_year: Option<i32>,

    /// Department or major
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Current company (for alumni)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,

    /// Job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,

    /// Employment status/summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_employment: Option<String>,

    /// Whether the account is active
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl UserDoc {
    /// Create a minimal auto-provisioned record for a never-seen email.
    /// Name defaults to the local part of the email address.
    pub fn provisioned(email: &str) -> Self {
        Self {
            _id: None,
            email: email.to_string(),
            name: email_local_part(email).to_string(),
            status: UserStatus::Student,
            phone: None,
            batch_year: None,
            department: None,
            current_company: None,
            designation: None,
            current_employment: None,
            is_active: true,
        }
    }
}

/// Substring of an email before the first '@' (the full string if none)
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl IntoIndexes for UserDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "email": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            ),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_part_is_derived_from_email() {
        assert_eq!(email_local_part("new@x.com"), "new");
        assert_eq!(email_local_part("a.b@example.org"), "a.b");
        assert_eq!(email_local_part("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn provisioned_record_defaults_to_student() {
        let user = UserDoc::provisioned("new@x.com");
        assert_eq!(user.name, "new");
        assert_eq!(user.status, UserStatus::Student);
        assert!(user.is_active);
        assert!(user._id.is_none());
        assert!(user.current_company.is_none());
    }

    #[test]
    fn absent_optionals_are_not_serialized() {
        let user = UserDoc::provisioned("new@x.com");
        let value = serde_json::to_value(&user).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("phone"));
        assert!(!obj.contains_key("batch_year"));
        assert!(!obj.contains_key("_id"));
        assert_eq!(obj["status"], "student");
    }

    #[test]
    fn status_outside_enumerated_literals_is_rejected() {
        let err = serde_json::from_str::<UserStatus>("\"professor\"");
        assert!(err.is_err());
        assert_eq!(
            serde_json::from_str::<UserStatus>("\"alumnus\"").unwrap(),
            UserStatus::Alumnus
        );
    }

    #[test]
    fn is_active_defaults_true_on_deserialize() {
        let user: UserDoc = serde_json::from_str(
            r#"{"email": "a@b.c", "name": "a", "status": "student"}"#,
        )
        .unwrap();
        assert!(user.is_active);
    }
}
