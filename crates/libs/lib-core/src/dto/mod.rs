//! # Data Transfer Objects (DTOs)
//!
//! This module contains the data structures exchanged between the
//! form-handling client and the validation endpoints.

pub mod forms;

pub use forms::*;
