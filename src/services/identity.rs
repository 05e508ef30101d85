//! Identity resolver
//!
//! Find-or-create semantics keyed on email. The email string doubles as the
//! bearer credential for profile operations; no password or session exists.
//! Concurrent creates for the same email are resolved by the unique email
//! index: a duplicate-key insert lost the race and re-reads instead.

use bson::{doc, Document};
use serde::Deserialize;
use tracing::info;

use crate::db::schemas::{UserDoc, UserStatus, USER_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::{AlumnetError, Result};

/// Optional profile fields accepted by signup and profile update.
/// Absent fields are left untouched on merge.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileFields {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub batch_year: Option<i32>,
    pub department: Option<String>,
    pub current_company: Option<String>,
    pub designation: Option<String>,
    pub current_employment: Option<String>,
    pub status: Option<UserStatus>,
}

impl ProfileFields {
    /// Build a `$set` document from the present fields only.
    /// Returns `None` when no recognized field is present.
    pub fn set_document(&self) -> Option<Document> {
        let mut set = Document::new();
        if let Some(ref name) = self.name {
            set.insert("name", name);
        }
        if let Some(ref phone) = self.phone {
            set.insert("phone", phone);
        }
        if let Some(batch_year) = self.batch_year {
            set.insert("batch_year", batch_year);
        }
        if let Some(ref department) = self.department {
            set.insert("department", department);
        }
        if let Some(ref current_company) = self.current_company {
            set.insert("current_company", current_company);
        }
        if let Some(ref designation) = self.designation {
            set.insert("designation", designation);
        }
        if let Some(ref current_employment) = self.current_employment {
            set.insert("current_employment", current_employment);
        }
        if let Some(status) = self.status {
            set.insert("status", status.as_str());
        }

        if set.is_empty() {
            None
        } else {
            Some(set)
        }
    }
}

/// Resolver over the `user` collection
pub struct IdentityService {
    users: MongoCollection<UserDoc>,
}

impl IdentityService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            users: mongo.collection(USER_COLLECTION).await?,
        })
    }

    /// Look up a user by exact email match
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserDoc>> {
        self.users.find_one(doc! { "email": email }).await
    }

    /// Signup semantics: merge the present fields into an existing record,
    /// or create one from exactly those fields.
    pub async fn upsert_by_email(&self, create: UserDoc, merge: Document) -> Result<UserDoc> {
        let email = create.email.clone();

        if let Some(existing) = self.find_by_email(&email).await? {
            let filter = match existing._id {
                Some(id) => doc! { "_id": id },
                None => doc! { "email": &email },
            };
            self.users
                .update_one(filter, doc! { "$set": merge })
                .await?;
            return self.reread(&email).await;
        }

        match self.users.insert_one_unique(create).await? {
            Some(id) => {
                info!("Created user {} for {}", id.to_hex(), email);
                self.reread(&email).await
            }
            None => {
                // Lost the creation race; the winner's record takes the merge.
                self.users
                    .update_one(doc! { "email": &email }, doc! { "$set": merge })
                    .await?;
                self.reread(&email).await
            }
        }
    }

    /// Login semantics: return the record for this email, provisioning a
    /// minimal student record when the email is unseen.
    pub async fn find_or_provision(&self, email: &str) -> Result<UserDoc> {
        if let Some(existing) = self.find_by_email(email).await? {
            return Ok(existing);
        }

        match self
            .users
            .insert_one_unique(UserDoc::provisioned(email))
            .await?
        {
            Some(id) => {
                info!("Auto-provisioned user {} for {}", id.to_hex(), email);
            }
            None => {
                info!("Lost provisioning race for {}, re-reading", email);
            }
        }

        self.reread(email).await
    }

    /// Profile update: merge the supplied fields into the record matching
    /// `email`. Empty updates and unknown emails are rejected.
    pub async fn merge_profile(&self, email: &str, fields: &ProfileFields) -> Result<UserDoc> {
        let set = fields
            .set_document()
            .ok_or_else(|| AlumnetError::BadRequest("No fields to update".into()))?;

        let result = self
            .users
            .update_one(doc! { "email": email }, doc! { "$set": set })
            .await?;

        if result.matched_count == 0 {
            return Err(AlumnetError::NotFound("User not found".into()));
        }

        self.reread(email).await
    }

    async fn reread(&self, email: &str) -> Result<UserDoc> {
        self.find_by_email(email)
            .await?
            .ok_or_else(|| AlumnetError::Internal(format!("User record for {} vanished", email)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_document_contains_only_present_fields() {
        let fields = ProfileFields {
            phone: Some("555-0100".into()),
            batch_year: Some(2020),
            ..Default::default()
        };
        let set = fields.set_document().unwrap();
        assert_eq!(set.get_str("phone").unwrap(), "555-0100");
        assert_eq!(set.get_i32("batch_year").unwrap(), 2020);
        assert!(!set.contains_key("name"));
        assert!(!set.contains_key("current_company"));
        assert!(!set.contains_key("status"));
    }

    #[test]
    fn disjoint_field_sets_touch_disjoint_keys() {
        // Two signups with disjoint field sets must both apply: the merge
        // document of each never names the other's keys.
        let first = ProfileFields {
            department: Some("CS".into()),
            ..Default::default()
        };
        let second = ProfileFields {
            current_company: Some("ACME Corp".into()),
            designation: Some("Engineer".into()),
            ..Default::default()
        };
        let first_set = first.set_document().unwrap();
        let second_set = second.set_document().unwrap();
        assert!(first_set.contains_key("department"));
        assert!(!second_set.contains_key("department"));
        assert!(second_set.contains_key("current_company"));
        assert!(!first_set.contains_key("current_company"));
    }

    #[test]
    fn empty_update_builds_no_document() {
        assert!(ProfileFields::default().set_document().is_none());
    }

    #[test]
    fn status_is_stored_as_enumerated_literal() {
        let fields = ProfileFields {
            status: Some(UserStatus::Alumnus),
            ..Default::default()
        };
        let set = fields.set_document().unwrap();
        assert_eq!(set.get_str("status").unwrap(), "alumnus");
    }
}
