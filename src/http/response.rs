//! HTTP response building module
//!
//! Builders for the responses the server sends, decoupled from the lookup logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const APPLICATION_JSON: &str = "application/json";

/// Build a 200 response with the given body and content type
///
/// HEAD requests get the headers with an empty body.
pub fn build_body_response(
    body: String,
    content_type: &str,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    build_status_response(200, body, content_type, server_name, is_head)
}

fn build_status_response(
    status: u16,
    body: String,
    content_type: &str,
    server_name: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = body.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(body)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Cache-Control", "no-store")
        .header("Server", server_name)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build health probe response
pub fn build_health_response(healthy: bool, server_name: &str) -> Response<Full<Bytes>> {
    if healthy {
        build_status_response(200, "ok".to_string(), TEXT_PLAIN, server_name, false)
    } else {
        build_status_response(503, "unavailable".to_string(), TEXT_PLAIN, server_name, false)
    }
}

/// Build 404 Not Found response
pub fn build_404_response(server_name: &str) -> Response<Full<Bytes>> {
    build_status_response(404, "404 Not Found".to_string(), TEXT_PLAIN, server_name, false)
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(server_name: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", TEXT_PLAIN)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Server", server_name)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool, server_name: &str) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .header("Server", server_name);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Allow cross-origin reads of a response when CORS is enabled
pub fn with_cors(mut response: Response<Full<Bytes>>, enable_cors: bool) -> Response<Full<Bytes>> {
    if enable_cors {
        response.headers_mut().insert(
            "Access-Control-Allow-Origin",
            hyper::header::HeaderValue::from_static("*"),
        );
    }
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_body_response_headers() {
        let response = build_body_response("{}".to_string(), APPLICATION_JSON, "test", false);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], APPLICATION_JSON);
        assert_eq!(response.headers()["content-length"], "2");
        assert_eq!(response.headers()["server"], "test");
        assert_eq!(body_text(response).await, "{}");
    }

    #[tokio::test]
    async fn test_head_keeps_length_drops_body() {
        let response = build_body_response("hello".to_string(), TEXT_PLAIN, "test", true);
        assert_eq!(response.headers()["content-length"], "5");
        assert_eq!(body_text(response).await, "");
    }

    #[test]
    fn test_health_status() {
        assert_eq!(build_health_response(true, "test").status(), 200);
        assert_eq!(build_health_response(false, "test").status(), 503);
    }

    #[test]
    fn test_cors_headers() {
        let response = build_options_response(true, "test");
        assert_eq!(response.status(), 204);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        let plain = with_cors(build_404_response("test"), false);
        assert!(plain.headers().get("access-control-allow-origin").is_none());
    }
}
