//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling and a hand-rolled
//! method/path match for routing.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::Args;
use crate::db::MongoClient;
use crate::routes;
use crate::types::AlumnetError;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
///
/// `mongo` is the explicit store handle: `None` is the typed "not yet
/// connected" state, and every store-touching route surfaces it as a
/// service-level failure rather than checking an implicit global.
pub struct AppState {
    pub args: Args,
    pub mongo: Option<MongoClient>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(args: Args, mongo: Option<MongoClient>) -> Self {
        Self {
            args,
            mongo,
            started_at: Instant::now(),
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), AlumnetError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Alumnet listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new()
                        .serve_connection(io, service)
                        .await
                    {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    // Auth routes (/auth/*) consume the request
    if path.starts_with("/auth") {
        if let Some(response) = routes::handle_auth_request(req, Arc::clone(&state)).await {
            return Ok(response);
        }
        return Ok(to_boxed(not_found_response(&path)));
    }

    let response = match (method, path.as_str()) {
        // Root greeting
        (Method::GET, "/") => routes::root_message(),

        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(&state)
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        // Store connectivity diagnostics
        (Method::GET, "/test") => routes::test_check(Arc::clone(&state)).await,

        // Profile read/update keyed by the email query parameter
        (Method::GET, "/users/profile") => {
            routes::handle_get_profile(req, Arc::clone(&state)).await
        }
        (Method::PUT, "/users/profile") => {
            routes::handle_update_profile(req, Arc::clone(&state)).await
        }

        // Directory search
        (Method::GET, "/directory") => {
            routes::handle_directory(req, Arc::clone(&state)).await
        }

        // Events listing (degrades to a sample, never errors)
        (Method::GET, "/events") => routes::handle_events(Arc::clone(&state)).await,

        // CORS preflight
        (Method::OPTIONS, _) => to_boxed(preflight_response()),

        // Known paths, wrong method
        (_, "/") | (_, "/health") | (_, "/healthz") | (_, "/version") | (_, "/test")
        | (_, "/users/profile") | (_, "/directory") | (_, "/events") => {
            to_boxed(method_not_allowed_response())
        }

        // Not found
        _ => to_boxed(not_found_response(&path)),
    };

    Ok(response)
}

/// Convert a Full<Bytes> body to BoxBody
fn to_boxed(response: Response<Full<Bytes>>) -> Response<BoxBody> {
    response.map(|body| body.map_err(|never| match never {}).boxed())
}

/// CORS preflight response
fn preflight_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "*")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}

/// Method not allowed response
fn method_not_allowed_response() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "error": "Method not allowed",
    });

    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
