//! Directory query builder
//!
//! Translates optional filter parameters into a store query. Company
//! matches by case-insensitive substring, batch year by exact equality;
//! both present means AND. No filters means every record matches.

use bson::{doc, Document};

use crate::db::schemas::{UserDoc, USER_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::Result;

/// Default result cap when the caller supplies no limit
pub const DEFAULT_LIMIT: i64 = 50;

/// Build the user-collection filter for a directory search
pub fn directory_filter(company: Option<&str>, batch_year: Option<i32>) -> Document {
    let mut filter = Document::new();

    if let Some(company) = company {
        if !company.is_empty() {
            filter.insert("current_company", doc! { "$regex": company, "$options": "i" });
        }
    }
    if let Some(batch_year) = batch_year {
        filter.insert("batch_year", batch_year);
    }

    filter
}

/// Search over the `user` collection
pub struct DirectoryService {
    users: MongoCollection<UserDoc>,
}

impl DirectoryService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            users: mongo.collection(USER_COLLECTION).await?,
        })
    }

    /// Bounded search in storage order; an empty result is not an error.
    pub async fn search(
        &self,
        company: Option<&str>,
        batch_year: Option<i32>,
        limit: Option<i64>,
    ) -> Result<Vec<UserDoc>> {
        let filter = directory_filter(company, batch_year);
        self.users
            .find_many(filter, Some(limit.unwrap_or(DEFAULT_LIMIT)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_filter_is_case_insensitive_substring() {
        let filter = directory_filter(Some("acme"), None);
        let company = filter.get_document("current_company").unwrap();
        assert_eq!(company.get_str("$regex").unwrap(), "acme");
        assert_eq!(company.get_str("$options").unwrap(), "i");
        assert!(!filter.contains_key("batch_year"));
    }

    #[test]
    fn batch_year_filter_is_exact() {
        let filter = directory_filter(None, Some(2020));
        assert_eq!(filter.get_i32("batch_year").unwrap(), 2020);
        assert!(!filter.contains_key("current_company"));
    }

    #[test]
    fn both_filters_combine_with_and() {
        let filter = directory_filter(Some("acme"), Some(2020));
        assert!(filter.contains_key("current_company"));
        assert!(filter.contains_key("batch_year"));
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn no_filters_matches_everything() {
        assert!(directory_filter(None, None).is_empty());
    }

    #[test]
    fn empty_company_string_is_ignored() {
        assert!(directory_filter(Some(""), None).is_empty());
    }
}
