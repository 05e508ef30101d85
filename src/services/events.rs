//! Events listing with seed-if-empty
//!
//! Events are normally created by an external seeding process. When the
//! collection is empty at read time, exactly one default event is inserted
//! so the listing is never empty. Two concurrent first reads can both seed;
//! that race is accepted.

use bson::Document;
use tracing::info;

use crate::db::schemas::{EventDoc, EVENT_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::Result;

/// Result cap for the events listing
pub const EVENTS_LIMIT: i64 = 10;

/// The default event, also served non-persisted when the store is down
pub fn sample_event() -> EventDoc {
    EventDoc {
        _id: None,
        title: "Annual Alumni Meet".to_string(),
        date: "2025-02-15".to_string(),
        description: Some("Reconnect with your batch and faculty".to_string()),
        audience: Some("All".to_string()),
    }
}

/// Listing over the `event` collection
pub struct EventsService {
    events: MongoCollection<EventDoc>,
}

impl EventsService {
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        Ok(Self {
            events: mongo.collection(EVENT_COLLECTION).await?,
        })
    }

    /// Return up to [`EVENTS_LIMIT`] events, seeding one when none exist
    pub async fn list(&self) -> Result<Vec<EventDoc>> {
        let existing = self
            .events
            .find_many(Document::new(), Some(EVENTS_LIMIT))
            .await?;

        if !existing.is_empty() {
            return Ok(existing);
        }

        info!("Event collection empty, seeding default event");
        self.events.insert_one(sample_event()).await?;

        self.events.find_many(Document::new(), Some(EVENTS_LIMIT)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_event_matches_seed_shape() {
        let event = sample_event();
        assert_eq!(event.title, "Annual Alumni Meet");
        assert_eq!(event.date, "2025-02-15");
        assert_eq!(event.audience.as_deref(), Some("All"));
        assert!(event._id.is_none());
    }
}
