//! Health and version endpoints
//!
//! - GET /         - root message, matches the original API's greeting
//! - GET /health   - liveness probe with database flag and uptime
//! - GET /version  - build metadata for deployment verification

use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::{json_response, BoxBody};
use crate::server::AppState;

#[derive(Serialize)]
struct RootMessage {
    message: &'static str,
}

/// GET /
pub fn root_message() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &RootMessage {
            message: "AlumniConnect API running",
        },
    )
}

#[derive(Serialize)]
struct HealthResponse {
    healthy: bool,
    status: &'static str,
    version: &'static str,
    /// Seconds since process start
    uptime: u64,
    /// Whether a MongoDB handle was established at startup
    database: bool,
    node_id: String,
    timestamp: String,
}

/// GET /health
pub fn health_check(state: &Arc<AppState>) -> Response<BoxBody> {
    let database = state.mongo.is_some();
    json_response(
        StatusCode::OK,
        &HealthResponse {
            healthy: true,
            status: if database { "online" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            uptime: state.started_at.elapsed().as_secs(),
            database,
            node_id: state.args.node_id.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    )
}

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
    commit: &'static str,
    commit_full: &'static str,
    build_time: &'static str,
}

/// GET /version
pub fn version_info() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &VersionResponse {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
            commit_full: option_env!("GIT_COMMIT_FULL").unwrap_or("unknown"),
            build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
        },
    )
}
