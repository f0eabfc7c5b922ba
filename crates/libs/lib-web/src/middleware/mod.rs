//! # Middleware
//!
//! Axum middleware for request stamping and request/response logging.
//!
//! ## Modules
//!
//! - **[`mw_req_stamp`]**: Request ID stamping
//! - **[`mw_logging`]**: Structured request/response logging

// region: --- Modules
pub mod mw_logging;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
