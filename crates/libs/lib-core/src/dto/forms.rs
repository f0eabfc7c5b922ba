//! # Form Data Transfer Objects
//!
//! Request and response structures for the validation endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/validate/signup` - [`SignupRequest`] -> [`ValidationResponse`]
//! - `POST /api/validate/login` - [`LoginRequest`] -> [`ValidationResponse`]
//! - `POST /api/validate/contact` - [`ContactRequest`] -> [`ValidationResponse`]
//! - `POST /api/validate/field/{field}` - [`FieldCheckRequest`] -> [`FieldCheckResponse`]
//!
//! ## Wire Format
//!
//! Request fields use **snake_case** (default serde behavior). Field names used
//! as keys in `errors` are kebab-case (`"national-id"`, `"confirm-password"`).
//!
//! ```text
//! POST /api/validate/contact
//! Content-Type: application/json
//!
//! {
//!   "name": "Dana",
//!   "email": "dana@example",
//!   "message": "Shelter 3 is full"
//! }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "valid": false,
//!   "errors": {
//!     "email": { "code": "email_format", "message": "Invalid email format" }
//!   }
//! }
//! ```

use lib_utils::validation::{
    validate_email, validate_message, validate_name, validate_national_id, validate_not_empty,
    validate_password, validate_password_match, validate_phone, Field, Rejection, Verdict,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// region:    --- Validate
/// A form that can check all of its fields at once.
pub trait Validate {
    /// Run every field validator, collecting one rejection per failing field.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Rejections collected while validating a form, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, Rejection>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdict for `field`. The first rejection for a field wins.
    pub fn check(&mut self, field: Field, verdict: Verdict) {
        if let Err(rejection) = verdict {
            self.0.entry(field).or_insert(rejection);
        }
    }

    pub fn get(&self, field: Field) -> Option<Rejection> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Rejection)> + '_ {
        self.0.iter().map(|(field, rejection)| (*field, *rejection))
    }

    /// `Ok(())` when nothing was rejected.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
// endregion: --- Validate

// region:    --- Requests
/// Sign-up form.
///
/// # Validation Rules
///
/// - `full_name`: at least 2 characters
/// - `email`: `local@domain.tld`
/// - `phone`: 10 digits starting with `05`
/// - `national_id`: 9 digits with a valid check digit
/// - `password`: at least 6 characters
/// - `confirm_password`: identical to `password`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub national_id: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Name, validate_name(&self.full_name));
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Phone, validate_phone(&self.phone));
        errors.check(Field::NationalId, validate_national_id(&self.national_id));
        errors.check(Field::Password, validate_password(&self.password));
        errors.check(
            Field::ConfirmPassword,
            validate_password_match(&self.password, &self.confirm_password),
        );
        errors.into_result()
    }
}

/// Login form.
///
/// Only checks that a password was typed: the length policy is not enforced
/// at login so existing accounts are never told how their password compares.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(
            Field::Password,
            validate_not_empty(&self.password, Rejection::PasswordRequired),
        );
        errors.into_result()
    }
}

/// Contact form, forwarded to the email relay once valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(Field::Name, validate_name(&self.name));
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Message, validate_message(&self.message));
        errors.into_result()
    }
}

/// Single-field check, used for as-you-type validation.
///
/// `password` is required when checking `confirm-password`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldCheckRequest {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
// endregion: --- Requests

// region:    --- Responses
/// Wire form of a single rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub code: String,
    pub message: String,
}

impl From<Rejection> for FieldError {
    fn from(rejection: Rejection) -> Self {
        Self {
            code: rejection.code().to_string(),
            message: rejection.to_string(),
        }
    }
}

/// Result of validating a whole form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: BTreeMap<Field, FieldError>,
}

impl From<Result<(), FieldErrors>> for ValidationResponse {
    fn from(result: Result<(), FieldErrors>) -> Self {
        let errors: BTreeMap<Field, FieldError> = match result {
            Ok(()) => BTreeMap::new(),
            Err(errors) => errors
                .iter()
                .map(|(field, rejection)| (field, FieldError::from(rejection)))
                .collect(),
        };

        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Result of a single-field check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldCheckResponse {
    pub field: Field,
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl FieldCheckResponse {
    pub fn from_verdict(field: Field, verdict: Verdict) -> Self {
        Self {
            field,
            valid: verdict.is_ok(),
            error: verdict.err().map(FieldError::from),
        }
    }
}

/// Error body produced by [`AppError`](crate::AppError).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
// endregion: --- Responses

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_signup() -> SignupRequest {
        SignupRequest {
            full_name: "דנה לוי".to_string(),
            email: "dana@example.co.il".to_string(),
            phone: "0521234567".to_string(),
            national_id: "123456782".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert_eq!(valid_signup().validate(), Ok(()));
    }

    #[test]
    fn test_signup_collects_every_failure() {
        let req = SignupRequest {
            full_name: "ד".to_string(),
            phone: "0621234567".to_string(),
            national_id: "123456789".to_string(),
            confirm_password: "secret2".to_string(),
            ..valid_signup()
        };

        let errors = req.validate().unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Name), Some(Rejection::NameTooShort));
        assert_eq!(errors.get(Field::Phone), Some(Rejection::PhonePrefix));
        assert_eq!(errors.get(Field::NationalId), Some(Rejection::NationalIdChecksum));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(Rejection::PasswordMismatch));
        assert_eq!(errors.get(Field::Email), None);
    }

    #[test]
    fn test_empty_signup_reports_required_everywhere() {
        let errors = SignupRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.iter().all(|(_, rejection)| rejection.is_required()));
    }

    #[test]
    fn test_login_skips_length_policy() {
        let req = LoginRequest {
            email: "dana@example.com".to_string(),
            password: "abc".to_string(),
        };
        assert_eq!(req.validate(), Ok(()));

        let req = LoginRequest {
            email: "dana".to_string(),
            password: "  ".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(Rejection::EmailFormat));
        assert_eq!(errors.get(Field::Password), Some(Rejection::PasswordRequired));
    }

    #[test]
    fn test_contact_validation() {
        let req = ContactRequest {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            message: "Shelter 3 needs water".to_string(),
        };
        assert_eq!(req.validate(), Ok(()));

        let req = ContactRequest {
            message: "help".to_string(),
            ..req
        };
        assert_eq!(
            req.validate().unwrap_err().get(Field::Message),
            Some(Rejection::MessageTooShort)
        );
    }

    #[test]
    fn test_first_rejection_for_a_field_wins() {
        let mut errors = FieldErrors::new();
        errors.check(Field::Password, Err(Rejection::PasswordRequired));
        errors.check(Field::Password, Err(Rejection::PasswordTooShort));
        errors.check(Field::Email, Ok(()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Password), Some(Rejection::PasswordRequired));
    }

    #[test]
    fn test_validation_response_wire_format() {
        let response = ValidationResponse::from(LoginRequest::default().validate());
        assert!(!response.valid);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "valid": false,
                "errors": {
                    "email": { "code": "email_required", "message": "Email is required" },
                    "password": { "code": "password_required", "message": "Password is required" },
                }
            })
        );

        let response = ValidationResponse::from(valid_signup().validate());
        assert!(response.valid);
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_field_check_response() {
        let ok = FieldCheckResponse::from_verdict(Field::Phone, Ok(()));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "field": "phone", "valid": true })
        );

        let rejected = FieldCheckResponse::from_verdict(Field::Phone, Err(Rejection::PhoneDigits));
        assert!(!rejected.valid);
        assert_eq!(rejected.error.unwrap().code, "phone_digits");
    }

    #[test]
    fn test_field_check_request_password_is_optional() {
        let req: FieldCheckRequest = serde_json::from_value(json!({ "value": "x" })).unwrap();
        assert_eq!(req.password, None);
    }
}
