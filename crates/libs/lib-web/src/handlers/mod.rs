//! # HTTP Request Handlers
//!
//! ## Handler Modules
//!
//! - **[`validation`]**: form and field validation endpoints
//!   - `POST /api/validate/field/{field}` - Check a single field value
//!   - `POST /api/validate/signup` - Check the sign-up form
//!   - `POST /api/validate/login` - Check the login form
//!   - `POST /api/validate/contact` - Check the contact form
//!
//! Handlers return `Result<Json<T>, AppError>`; a rejected value is still a
//! successful response with `valid: false`.

pub mod validation;
