//! # Web Library
//!
//! HTTP handlers, middleware, and server setup for the validation service.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{create_router, start_server};
