//! # Request Stamping Middleware
//!
//! Adds a unique request ID to requests for tracing and debugging.
//!
//! The generated ID is stored in the request extensions, where the logging
//! middleware and the trace span pick it up, and echoed back in the
//! `X-Request-ID` response header.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request metadata for tracing and debugging.
#[derive(Clone, Debug)]
pub struct RequestStamp {
    /// Unique request identifier
    pub id: String,
}

impl RequestStamp {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// Request ID of `req`, or `"unknown"` when it was not stamped.
    pub fn id_of(req: &Request) -> String {
        req.extensions()
            .get::<RequestStamp>()
            .map(|s| s.id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Request stamping middleware.
pub async fn stamp_req(mut req: Request, next: Next) -> Response {
    let stamp = RequestStamp::new();
    req.extensions_mut().insert(stamp.clone());

    let mut res = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&stamp.id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    res
}
