//! Event document schema

use bson::{oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for events
pub const EVENT_COLLECTION: &str = "event";

/// Event document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct EventDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Event title
    pub title: String,

    /// ISO date string
    pub date: String,

    /// Event description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Targeted audience, e.g. "2025 batch"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl IntoIndexes for EventDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_deserialize_as_absent() {
        let event: EventDoc =
            serde_json::from_str(r#"{"title": "Meet", "date": "2025-02-15"}"#).unwrap();
        assert!(event.description.is_none());
        assert!(event.audience.is_none());
    }
}
