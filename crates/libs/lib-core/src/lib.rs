//! # Core Library
//!
//! Form DTOs, configuration, and the application error type.

pub mod config;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
