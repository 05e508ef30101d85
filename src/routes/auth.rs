//! Mock-auth routes
//!
//! - POST /auth/signup - create or merge a user record, return token + user
//! - POST /auth/login  - find or auto-provision by email, return token + user
//!
//! The "token" is literally the email string. Any caller who knows an email
//! can read and update that profile; this mirrors the product's deliberate
//! (insecure) simplification and must not be mistaken for authentication.

use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::db::schemas::{UserDoc, UserStatus};
use crate::projection::PublicUser;
use crate::routes::{
    cors_preflight, error_response, json_response, parse_json_body, BoxBody, ErrorResponse,
};
use crate::server::AppState;
use crate::services::{IdentityService, ProfileFields};
use crate::types::AlumnetError;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub batch_year: Option<i32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub current_company: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub current_employment: Option<String>,
}

impl SignupRequest {
    /// The record created when this email is unseen
    fn into_parts(self) -> (UserDoc, ProfileFields) {
        let fields = ProfileFields {
            name: Some(self.name.clone()),
            phone: self.phone.clone(),
            batch_year: self.batch_year,
            department: self.department.clone(),
            current_company: self.current_company.clone(),
            designation: self.designation.clone(),
            current_employment: self.current_employment.clone(),
            status: Some(self.status),
        };
        let doc = UserDoc {
            _id: None,
            email: self.email,
            name: self.name,
            status: self.status,
            phone: self.phone,
            batch_year: self.batch_year,
            department: self.department,
            current_company: self.current_company,
            designation: self.designation,
            current_employment: self.current_employment,
            is_active: true,
        };
        (doc, fields)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Dispatch /auth/* requests. Returns None for non-auth paths.
pub async fn handle_auth_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Option<Response<BoxBody>> {
    let path = req.uri().path();
    let method = req.method();

    if !path.starts_with("/auth") {
        return None;
    }

    if method == Method::OPTIONS {
        return Some(cors_preflight());
    }

    let path = path.split('?').next().unwrap_or(path);

    let response = match (method, path) {
        (&Method::POST, "/auth/signup") => handle_signup(req, state).await,
        (&Method::POST, "/auth/login") => handle_login(req, state).await,

        (_, "/auth/signup") | (_, "/auth/login") => json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorResponse {
                error: "Method not allowed".into(),
                code: None,
            },
        ),

        _ => json_response(
            StatusCode::NOT_FOUND,
            &ErrorResponse {
                error: "Auth endpoint not found".into(),
                code: None,
            },
        ),
    };

    Some(response)
}

/// POST /auth/signup
///
/// Upsert-by-email: merge every present field into an existing record, or
/// create a new record from exactly the present fields.
async fn handle_signup(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: SignupRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(e),
    };

    if body.email.is_empty() || body.name.is_empty() {
        return error_response(AlumnetError::BadRequest(
            "Missing required fields: name, email".into(),
        ));
    }

    let identity = match identity_service(&state).await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };

    let email = body.email.clone();
    let (create, fields) = body.into_parts();
    // Present by construction: name and status are required fields.
    let merge = match fields.set_document() {
        Some(m) => m,
        None => {
            return error_response(AlumnetError::Internal(
                "Signup produced an empty merge".into(),
            ))
        }
    };

    match identity.upsert_by_email(create, merge).await {
        Ok(user) => json_response(
            StatusCode::OK,
            &AuthResponse {
                token: email,
                user: user.into(),
            },
        ),
        Err(e) => {
            warn!("Signup failed for {}: {}", email, e);
            error_response(e)
        }
    }
}

/// POST /auth/login
///
/// Find-or-provision: an unseen email gets a minimal student record whose
/// name is the local part of the email.
async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let body: LoginRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(e),
    };

    if body.email.is_empty() {
        return error_response(AlumnetError::BadRequest(
            "Missing required field: email".into(),
        ));
    }

    let identity = match identity_service(&state).await {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };

    match identity.find_or_provision(&body.email).await {
        Ok(user) => json_response(
            StatusCode::OK,
            &AuthResponse {
                token: body.email,
                user: user.into(),
            },
        ),
        Err(e) => {
            warn!("Login failed for {}: {}", body.email, e);
            error_response(e)
        }
    }
}

pub(crate) async fn identity_service(
    state: &AppState,
) -> Result<IdentityService, AlumnetError> {
    let mongo = state
        .mongo
        .as_ref()
        .ok_or_else(|| AlumnetError::Database("Database not configured".into()))?;
    IdentityService::new(mongo).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_parts_carry_only_present_fields() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"name": "Jane", "email": "jane@x.com", "status": "alumnus", "current_company": "ACME Corp"}"#,
        )
        .unwrap();
        let (doc, fields) = req.into_parts();

        assert_eq!(doc.email, "jane@x.com");
        assert_eq!(doc.status, UserStatus::Alumnus);
        assert!(doc.is_active);
        assert!(doc.phone.is_none());

        let merge = fields.set_document().unwrap();
        assert_eq!(merge.get_str("name").unwrap(), "Jane");
        assert_eq!(merge.get_str("current_company").unwrap(), "ACME Corp");
        assert!(!merge.contains_key("phone"));
        assert!(!merge.contains_key("batch_year"));
    }

    #[test]
    fn signup_rejects_unknown_status() {
        let err = serde_json::from_str::<SignupRequest>(
            r#"{"name": "Jane", "email": "jane@x.com", "status": "professor"}"#,
        );
        assert!(err.is_err());
    }
}
