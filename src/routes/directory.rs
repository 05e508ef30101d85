//! Directory search route
//!
//! GET /directory?company=&batch_year=&limit= — all parameters optional.

use hyper::{Request, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

use crate::projection::PublicUser;
use crate::routes::{error_response, json_response, parse_query, BoxBody};
use crate::server::AppState;
use crate::services::DirectoryService;
use crate::types::AlumnetError;

#[derive(Debug, Default, Deserialize)]
struct DirectoryQuery {
    company: Option<String>,
    batch_year: Option<i32>,
    limit: Option<i64>,
}

/// GET /directory
pub async fn handle_directory(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let query: DirectoryQuery = match parse_query(req.uri().query()) {
        Ok(q) => q,
        Err(e) => return error_response(e),
    };

    let mongo = match state.mongo.as_ref() {
        Some(m) => m,
        None => {
            return error_response(AlumnetError::Database("Database not configured".into()))
        }
    };

    let directory = match DirectoryService::new(mongo).await {
        Ok(d) => d,
        Err(e) => return error_response(e),
    };

    match directory
        .search(query.company.as_deref(), query.batch_year, query.limit)
        .await
    {
        Ok(users) => {
            let users: Vec<PublicUser> = users.into_iter().map(PublicUser::from).collect();
            json_response(StatusCode::OK, &users)
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_parameters_are_optional() {
        let q: DirectoryQuery = parse_query(None).unwrap();
        assert!(q.company.is_none());
        assert!(q.batch_year.is_none());
        assert!(q.limit.is_none());
    }

    #[test]
    fn parameters_parse_from_query_string() {
        let q: DirectoryQuery =
            parse_query(Some("company=acme&batch_year=2020&limit=5")).unwrap();
        assert_eq!(q.company.as_deref(), Some("acme"));
        assert_eq!(q.batch_year, Some(2020));
        assert_eq!(q.limit, Some(5));
    }

    #[test]
    fn non_numeric_batch_year_is_rejected() {
        assert!(parse_query::<DirectoryQuery>(Some("batch_year=twenty")).is_err());
    }
}
