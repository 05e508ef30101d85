//! Events route
//!
//! GET /events — never errors. With no store (or a failing one) it degrades
//! to a single non-persisted sample event so demos keep working.

use hyper::{Response, StatusCode};
use std::sync::Arc;
use tracing::warn;

use crate::projection::PublicEvent;
use crate::routes::{json_response, BoxBody};
use crate::server::AppState;
use crate::services::{sample_event, EventsService};

/// GET /events
pub async fn handle_events(state: Arc<AppState>) -> Response<BoxBody> {
    let mongo = match state.mongo.as_ref() {
        Some(m) => m,
        None => return json_response(StatusCode::OK, &fallback()),
    };

    let events = match EventsService::new(mongo).await {
        Ok(s) => s,
        Err(e) => {
            warn!("Events collection unavailable, serving sample: {}", e);
            return json_response(StatusCode::OK, &fallback());
        }
    };

    match events.list().await {
        Ok(docs) => {
            let events: Vec<PublicEvent> = docs.into_iter().map(PublicEvent::from).collect();
            json_response(StatusCode::OK, &events)
        }
        Err(e) => {
            warn!("Events listing failed, serving sample: {}", e);
            json_response(StatusCode::OK, &fallback())
        }
    }
}

fn fallback() -> Vec<PublicEvent> {
    vec![PublicEvent::from(sample_event())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_a_single_sample_event() {
        let events = fallback();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Annual Alumni Meet");
        assert!(events[0].id.is_none());
    }
}
