//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route matching
//! and dispatching, plus the access log line for every request.

use crate::config::AppState;
use crate::handler::lookup::{self, Reply};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);

    let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
    entry.set_query(query.as_deref(), &state.config.auth.param);
    entry.http_version = format!("{:?}", req.version()).replace("HTTP/", "");
    entry.user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route_request(&method, query, &state, &mut entry).await;

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on method and path
async fn route_request(
    method: &Method,
    query: Option<String>,
    state: &Arc<AppState>,
    entry: &mut AccessLogEntry,
) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();
    let enable_cors = state.config.http.enable_cors;

    match *method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return http::build_options_response(enable_cors, server_name),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            return http::build_405_response(server_name);
        }
    }
    let is_head = *method == Method::HEAD;

    // Health check endpoints
    let health = &state.config.health;
    if health.enabled {
        if entry.path == health.liveness_path {
            return http::build_health_response(true, server_name);
        }
        if entry.path == health.readiness_path {
            let ready = check_dataset(state).await;
            return http::build_health_response(ready, server_name);
        }
    }

    if entry.path == state.config.lookup.path {
        let reply = run_lookup(state, query).await;
        entry.outcome = Some(reply.kind.as_str());
        let content_type = if reply.is_json() {
            http::APPLICATION_JSON
        } else {
            http::TEXT_PLAIN
        };
        let response = http::build_body_response(reply.body, content_type, server_name, is_head);
        return http::with_cors(response, enable_cors);
    }

    http::build_404_response(server_name)
}

/// Run the lookup on the blocking pool; sources do synchronous file I/O
async fn run_lookup(state: &Arc<AppState>, query: Option<String>) -> Reply {
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || lookup::respond(&state, query.as_deref())).await {
        Ok(reply) => reply,
        Err(e) => {
            logger::log_error(&format!("Lookup task failed: {e}"));
            Reply::error(&e)
        }
    }
}

/// Readiness: the dataset can be read and has a header row
async fn check_dataset(state: &Arc<AppState>) -> bool {
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || state.source.fetch()).await;
    match result {
        Ok(Ok(grid)) if !grid.is_empty() => true,
        Ok(Ok(_)) => {
            logger::log_warning("Readiness check: dataset has no header row");
            false
        }
        Ok(Err(e)) => {
            logger::log_warning(&format!("Readiness check: {e}"));
            false
        }
        Err(e) => {
            logger::log_error(&format!("Readiness task failed: {e}"));
            false
        }
    }
}
