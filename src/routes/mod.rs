//! HTTP routes for Alumnet

pub mod auth;
pub mod directory;
pub mod events;
pub mod health;
pub mod status;
pub mod users;

pub use auth::handle_auth_request;
pub use directory::handle_directory;
pub use events::handle_events;
pub use health::{health_check, root_message, version_info};
pub use status::test_check;
pub use users::{handle_get_profile, handle_update_profile};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::types::AlumnetError;

pub(crate) type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Error body shape shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .body(full_body(json))
        .unwrap()
}

/// Map a domain error onto its status code and JSON body
pub(crate) fn error_response(err: AlumnetError) -> Response<BoxBody> {
    let status = err.status_code();
    json_response(
        status,
        &ErrorResponse {
            error: err.to_string(),
            code: None,
        },
    )
}

pub(crate) fn cors_preflight() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Max-Age", "86400")
        .body(empty_body())
        .unwrap()
}

pub(crate) fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<hyper::body::Incoming>,
) -> Result<T, AlumnetError> {
    let body = req
        .collect()
        .await
        .map_err(|e| AlumnetError::Http(format!("Failed to read body: {}", e)))?;

    let bytes = body.to_bytes();
    if bytes.len() > 10240 {
        return Err(AlumnetError::Http("Request body too large".into()));
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| AlumnetError::Http(format!("Invalid JSON: {}", e)))
}

/// Parse a query string into a typed struct
pub(crate) fn parse_query<T: for<'de> Deserialize<'de>>(
    query: Option<&str>,
) -> Result<T, AlumnetError> {
    serde_urlencoded::from_str(query.unwrap_or(""))
        .map_err(|e| AlumnetError::BadRequest(format!("Invalid query string: {}", e)))
}
