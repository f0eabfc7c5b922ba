//! # Validation Handlers
//!
//! HTTP request handlers for form and field validation.
//!
//! ## Overview
//!
//! - Whole-form checks for the sign-up, login and contact forms, reporting
//!   every failing field at once
//! - Single-field checks for as-you-type feedback
//!
//! A rejected value is a normal outcome: the response is `200 OK` with
//! `valid: false` and the rejection reason. Errors (`4xx`/`5xx`) are reserved
//! for requests that cannot be validated at all, such as an unknown field name.
//!
//! Field values are never logged; only field names and rejection codes are.

use axum::extract::{rejection::JsonRejection, Json, Path};
use lib_core::dto::{
    ContactRequest, FieldCheckRequest, FieldCheckResponse, LoginRequest, SignupRequest, Validate,
    ValidationResponse,
};
use lib_core::{AppError, Result};
use lib_utils::validation::{validate_field, validate_password_match, Field};
use tracing::{debug, info, instrument};

/// Check a single field value.
///
/// `confirm-password` checks need the password being confirmed in the
/// `password` member of the body.
///
/// # Errors
///
/// * `404` - `field` is not a known field name
/// * `400` - malformed body, or `confirm-password` was checked without `password`
#[instrument(skip(payload))]
pub async fn check_field(
    Path(field): Path<String>,
    payload: std::result::Result<Json<FieldCheckRequest>, JsonRejection>,
) -> Result<Json<FieldCheckResponse>> {
    let field: Field = field.parse()?;
    let Json(req) = payload?;

    let verdict = match field {
        Field::ConfirmPassword => {
            let password = req.password.as_deref().ok_or_else(|| {
                AppError::InvalidInput(
                    "password is required to check a password confirmation".to_string(),
                )
            })?;
            validate_password_match(password, &req.value)
        }
        _ => validate_field(field, &req.value, None),
    };

    match &verdict {
        Ok(()) => debug!("[FIELD] {} accepted", field),
        Err(rejection) => debug!(code = rejection.code(), "[FIELD] {} rejected", field),
    }

    Ok(Json(FieldCheckResponse::from_verdict(field, verdict)))
}

/// Validate the sign-up form.
#[instrument(skip_all)]
pub async fn validate_signup(
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>> {
    let Json(req) = payload?;
    Ok(Json(validate_form("signup", &req)))
}

/// Validate the login form.
#[instrument(skip_all)]
pub async fn validate_login(
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>> {
    let Json(req) = payload?;
    Ok(Json(validate_form("login", &req)))
}

/// Validate the contact form.
#[instrument(skip_all)]
pub async fn validate_contact(
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ValidationResponse>> {
    let Json(req) = payload?;
    Ok(Json(validate_form("contact", &req)))
}

fn validate_form(form: &'static str, req: &impl Validate) -> ValidationResponse {
    let response = ValidationResponse::from(req.validate());

    if response.valid {
        info!(form, "[VALIDATE] {} form accepted", form);
    } else {
        let rejected: Vec<&str> = response.errors.keys().map(Field::as_str).collect();
        info!(
            form,
            rejected = ?rejected,
            "[VALIDATE] {} form rejected ({} fields)",
            form,
            rejected.len()
        );
    }

    response
}
