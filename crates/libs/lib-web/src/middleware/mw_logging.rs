//! # Request/Response Logging Middleware
//!
//! Logs every HTTP request and response with its request ID, method, path,
//! status and duration. Header values that carry credentials are redacted.
//!
//! Bodies are never logged. Requests to endpoints whose bodies carry
//! passwords or national IDs are additionally flagged `sensitive = true` so
//! downstream log processing can keep them out of shared sinks.

use crate::middleware::mw_req_stamp::RequestStamp;
use axum::{extract::Request, middleware::Next, response::Response};
use lib_utils::Field;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Sensitive headers that should not be logged
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
    "x-auth-token",
    "authentication",
];

/// Form endpoints whose request bodies contain passwords or national IDs
const SENSITIVE_FORMS: &[&str] = &["/api/validate/signup", "/api/validate/login"];

const FIELD_CHECK_PREFIX: &str = "/api/validate/field/";

pub(crate) fn is_sensitive_path(path: &str) -> bool {
    if SENSITIVE_FORMS.contains(&path) {
        return true;
    }

    path.strip_prefix(FIELD_CHECK_PREFIX)
        .and_then(|name| name.parse::<Field>().ok())
        .is_some_and(|field| field.is_sensitive())
}

fn sanitized_headers(req: &Request) -> Vec<(String, String)> {
    req.headers()
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect()
}

/// Request/response logging middleware.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let request_id = RequestStamp::id_of(&req);
    let sensitive = is_sensitive_path(&path);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        user_agent = ?user_agent,
        sensitive,
        "[REQUEST] {} {}",
        method,
        path
    );

    debug!(
        request_id = %request_id,
        headers = ?sanitized_headers(&req),
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status();
    let status_code = status.as_u16();

    if status.is_server_error() {
        error!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration_ms
        );
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration_ms
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status_code,
            duration_ms,
            "[RESPONSE] {} {} -> {} ({}ms)",
            method,
            path,
            status_code,
            duration_ms
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_paths() {
        assert!(is_sensitive_path("/api/validate/signup"));
        assert!(is_sensitive_path("/api/validate/login"));
        assert!(is_sensitive_path("/api/validate/field/national-id"));
        assert!(!is_sensitive_path("/api/validate/field/phone"));
        assert!(!is_sensitive_path("/api/validate/contact"));
    }

    #[test]
    fn test_every_sensitive_field_path_is_flagged() {
        for field in Field::ALL {
            let path = format!("{FIELD_CHECK_PREFIX}{field}");
            assert_eq!(is_sensitive_path(&path), field.is_sensitive(), "{path}");
        }
        assert!(!is_sensitive_path("/api/validate/field/zip-code"));
    }

    #[test]
    fn test_credentials_are_redacted() {
        let req = axum::http::Request::builder()
            .header("Authorization", "Bearer abc")
            .header("content-type", "application/json")
            .body(axum::body::Body::empty())
            .unwrap();

        let headers = sanitized_headers(&req);

        assert!(headers.contains(&("authorization".to_string(), "***REDACTED***".to_string())));
        assert!(headers.contains(&("content-type".to_string(), "application/json".to_string())));
    }
}
