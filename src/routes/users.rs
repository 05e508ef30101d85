//! Profile routes
//!
//! - GET /users/profile?email=  - read the profile for an email
//! - PUT /users/profile?email=  - merge supplied fields into the profile
//!
//! The email query parameter is the mock bearer token (see auth routes).

use hyper::{Request, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use crate::projection::PublicUser;
use crate::routes::auth::identity_service;
use crate::routes::{error_response, json_response, parse_json_body, parse_query, BoxBody};
use crate::server::AppState;
use crate::services::ProfileFields;
use crate::types::AlumnetError;

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

/// GET /users/profile?email=
pub async fn handle_get_profile(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let query: EmailQuery = match parse_query(req.uri().query()) {
        Ok(q) => q,
        Err(e) => return error_response(e),
    };

    let identity = match identity_service(&state).await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };

    match identity.find_by_email(&query.email).await {
        Ok(Some(user)) => json_response(StatusCode::OK, &PublicUser::from(user)),
        Ok(None) => error_response(AlumnetError::NotFound("User not found".into())),
        Err(e) => error_response(e),
    }
}

/// PUT /users/profile?email=
///
/// A body with zero recognized fields is rejected before any write; a
/// missing record is a 404. Absent fields are never nulled out.
pub async fn handle_update_profile(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let query: EmailQuery = match parse_query(req.uri().query()) {
        Ok(q) => q,
        Err(e) => return error_response(e),
    };

    let fields: ProfileFields = match parse_json_body(req).await {
        Ok(f) => f,
        Err(e) => return error_response(e),
    };

    let identity = match identity_service(&state).await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };

    match identity.merge_profile(&query.email, &fields).await {
        Ok(user) => json_response(StatusCode::OK, &PublicUser::from(user)),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_query_requires_email() {
        assert!(parse_query::<EmailQuery>(Some("email=a%40b.c")).is_ok());
        assert!(parse_query::<EmailQuery>(Some("")).is_err());
        assert!(parse_query::<EmailQuery>(None).is_err());
    }

    #[test]
    fn update_body_with_unrecognized_fields_only_is_empty() {
        let fields: ProfileFields =
            serde_json::from_str(r#"{"shoe_size": 42}"#).unwrap();
        assert!(fields.set_document().is_none());
    }
}
