//! # Validation Utilities
//!
//! Field validators for the sign-up, login and contact forms.
//!
//! Every validator is a pure function returning a [`Verdict`]: `Ok(())` when the
//! value is accepted, or the [`Rejection`] describing the first rule it broke.
//! A rejection is an ordinary outcome, not a fault, and each rule has its own
//! message so the form can tell the user exactly what to fix.
//!
//! ## Rules
//!
//! | Field | Rules (checked in order) |
//! |-------|--------------------------|
//! | name | required, at least 2 characters after trimming |
//! | email | required, `local@domain.tld` shape |
//! | phone | required, digits only, starts with `05`, exactly 10 digits |
//! | national-id | required, digits only, exactly 9 digits, valid check digit |
//! | password | required, at least 6 characters |
//! | confirm-password | required, identical to the password |
//! | message | required, at least 10 characters after trimming |
//!
//! Whitespace-only input counts as empty for every field. Lengths are counted
//! in characters, not bytes.
//!
//! ## Example
//!
//! ```rust
//! use lib_utils::validation::{validate_phone, Rejection};
//!
//! assert!(validate_phone("0521234567").is_ok());
//! assert_eq!(validate_phone("0621234567"), Err(Rejection::PhonePrefix));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// region:    --- Constants
pub const MIN_NAME_LEN: usize = 2;
pub const PHONE_LEN: usize = 10;
pub const PHONE_PREFIX: &str = "05";
pub const NATIONAL_ID_LEN: usize = 9;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_MESSAGE_LEN: usize = 10;

/// Deliberately loose: anything non-blank, an `@`, then non-blank text with a dot.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());
// endregion: --- Constants

// region:    --- Types
/// Outcome of validating a single field.
pub type Verdict = Result<(), Rejection>;

/// The form fields that can be validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Name,
    Email,
    Phone,
    NationalId,
    Password,
    ConfirmPassword,
    Message,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::NationalId,
        Field::Password,
        Field::ConfirmPassword,
        Field::Message,
    ];

    /// Wire name of the field, as used in URLs and JSON keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::NationalId => "national-id",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm-password",
            Field::Message => "message",
        }
    }

    /// Whether values of this field must be kept out of logs.
    pub fn is_sensitive(&self) -> bool {
        matches!(
            self,
            Field::NationalId | Field::Password | Field::ConfirmPassword
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a field name does not match any [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Why a field value was rejected. One variant per (field, rule) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Rejection {
    #[error("Full name is required")]
    NameRequired,
    #[error("Full name must be at least 2 characters")]
    NameTooShort,

    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    EmailFormat,

    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Phone number can only contain digits")]
    PhoneDigits,
    #[error("Phone number must start with 05")]
    PhonePrefix,
    #[error("Phone number must be exactly 10 digits")]
    PhoneLength,

    #[error("National ID is required")]
    NationalIdRequired,
    #[error("National ID can only contain digits")]
    NationalIdDigits,
    #[error("National ID must be exactly 9 digits")]
    NationalIdLength,
    #[error("National ID is not valid (check digit mismatch)")]
    NationalIdChecksum,

    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Please confirm your password")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Message is required")]
    MessageRequired,
    #[error("Message must be at least 10 characters")]
    MessageTooShort,
}

impl Rejection {
    pub const ALL: [Rejection; 18] = [
        Rejection::NameRequired,
        Rejection::NameTooShort,
        Rejection::EmailRequired,
        Rejection::EmailFormat,
        Rejection::PhoneRequired,
        Rejection::PhoneDigits,
        Rejection::PhonePrefix,
        Rejection::PhoneLength,
        Rejection::NationalIdRequired,
        Rejection::NationalIdDigits,
        Rejection::NationalIdLength,
        Rejection::NationalIdChecksum,
        Rejection::PasswordRequired,
        Rejection::PasswordTooShort,
        Rejection::ConfirmPasswordRequired,
        Rejection::PasswordMismatch,
        Rejection::MessageRequired,
        Rejection::MessageTooShort,
    ];

    /// The field this rejection belongs to.
    pub fn field(&self) -> Field {
        match self {
            Rejection::NameRequired | Rejection::NameTooShort => Field::Name,
            Rejection::EmailRequired | Rejection::EmailFormat => Field::Email,
            Rejection::PhoneRequired
            | Rejection::PhoneDigits
            | Rejection::PhonePrefix
            | Rejection::PhoneLength => Field::Phone,
            Rejection::NationalIdRequired
            | Rejection::NationalIdDigits
            | Rejection::NationalIdLength
            | Rejection::NationalIdChecksum => Field::NationalId,
            Rejection::PasswordRequired | Rejection::PasswordTooShort => Field::Password,
            Rejection::ConfirmPasswordRequired | Rejection::PasswordMismatch => {
                Field::ConfirmPassword
            }
            Rejection::MessageRequired | Rejection::MessageTooShort => Field::Message,
        }
    }

    /// Stable machine-readable identifier, for clients that localise messages.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::NameRequired => "name_required",
            Rejection::NameTooShort => "name_too_short",
            Rejection::EmailRequired => "email_required",
            Rejection::EmailFormat => "email_format",
            Rejection::PhoneRequired => "phone_required",
            Rejection::PhoneDigits => "phone_digits",
            Rejection::PhonePrefix => "phone_prefix",
            Rejection::PhoneLength => "phone_length",
            Rejection::NationalIdRequired => "national_id_required",
            Rejection::NationalIdDigits => "national_id_digits",
            Rejection::NationalIdLength => "national_id_length",
            Rejection::NationalIdChecksum => "national_id_checksum",
            Rejection::PasswordRequired => "password_required",
            Rejection::PasswordTooShort => "password_too_short",
            Rejection::ConfirmPasswordRequired => "confirm_password_required",
            Rejection::PasswordMismatch => "password_mismatch",
            Rejection::MessageRequired => "message_required",
            Rejection::MessageTooShort => "message_too_short",
        }
    }

    /// Whether this is the "field is empty" rejection.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            Rejection::NameRequired
                | Rejection::EmailRequired
                | Rejection::PhoneRequired
                | Rejection::NationalIdRequired
                | Rejection::PasswordRequired
                | Rejection::ConfirmPasswordRequired
                | Rejection::MessageRequired
        )
    }
}
// endregion: --- Types

// region:    --- Helpers
/// Validate that a string is not empty or whitespace-only.
pub fn validate_not_empty(value: &str, rejection: Rejection) -> Verdict {
    if value.trim().is_empty() {
        Err(rejection)
    } else {
        Ok(())
    }
}

/// Validate minimum length, counted in characters.
pub fn validate_min_length(value: &str, min: usize, rejection: Rejection) -> Verdict {
    if value.chars().count() < min {
        Err(rejection)
    } else {
        Ok(())
    }
}

fn all_ascii_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}
// endregion: --- Helpers

// region:    --- Field Validators
/// Validate a full name.
pub fn validate_name(name: &str) -> Verdict {
    validate_not_empty(name, Rejection::NameRequired)?;
    validate_min_length(name.trim(), MIN_NAME_LEN, Rejection::NameTooShort)
}

/// Validate email format (loose `local@domain.tld` check).
pub fn validate_email(email: &str) -> Verdict {
    validate_not_empty(email, Rejection::EmailRequired)?;

    if !EMAIL_PATTERN.is_match(email) {
        return Err(Rejection::EmailFormat);
    }

    Ok(())
}

/// Validate a mobile phone number: ten digits starting with `05`.
pub fn validate_phone(phone: &str) -> Verdict {
    validate_not_empty(phone, Rejection::PhoneRequired)?;

    if !all_ascii_digits(phone) {
        return Err(Rejection::PhoneDigits);
    }

    if !phone.starts_with(PHONE_PREFIX) {
        return Err(Rejection::PhonePrefix);
    }

    if phone.len() != PHONE_LEN {
        return Err(Rejection::PhoneLength);
    }

    Ok(())
}

/// Validate a nine-digit national ID, including its check digit.
pub fn validate_national_id(id: &str) -> Verdict {
    validate_not_empty(id, Rejection::NationalIdRequired)?;

    if !all_ascii_digits(id) {
        return Err(Rejection::NationalIdDigits);
    }

    if id.len() != NATIONAL_ID_LEN {
        return Err(Rejection::NationalIdLength);
    }

    let digits: Vec<u8> = id.bytes().map(|b| b - b'0').collect();
    let mut first_eight = [0u8; 8];
    first_eight.copy_from_slice(&digits[..8]);

    if national_id_check_digit(&first_eight) != digits[8] {
        return Err(Rejection::NationalIdChecksum);
    }

    Ok(())
}

/// Compute the expected ninth digit of a national ID from its first eight.
///
/// Digits at odd positions are doubled, products above 9 have 9 subtracted,
/// and the check digit brings the total up to the next multiple of ten.
///
/// ```rust
/// use lib_utils::validation::national_id_check_digit;
///
/// assert_eq!(national_id_check_digit(&[1, 2, 3, 4, 5, 6, 7, 8]), 2);
/// ```
pub fn national_id_check_digit(first_eight: &[u8; 8]) -> u8 {
    let sum: u32 = first_eight
        .iter()
        .enumerate()
        .map(|(i, &digit)| {
            let weight = if i % 2 == 0 { 1 } else { 2 };
            let product = u32::from(digit) * weight;
            if product > 9 {
                product - 9
            } else {
                product
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Validate password length.
pub fn validate_password(password: &str) -> Verdict {
    validate_not_empty(password, Rejection::PasswordRequired)?;
    validate_min_length(password, MIN_PASSWORD_LEN, Rejection::PasswordTooShort)
}

/// Validate that the confirmation repeats the password exactly.
pub fn validate_password_match(password: &str, confirmation: &str) -> Verdict {
    validate_not_empty(confirmation, Rejection::ConfirmPasswordRequired)?;

    if password != confirmation {
        return Err(Rejection::PasswordMismatch);
    }

    Ok(())
}

/// Validate the free-text message of the contact form.
pub fn validate_message(message: &str) -> Verdict {
    validate_not_empty(message, Rejection::MessageRequired)?;
    validate_min_length(message.trim(), MIN_MESSAGE_LEN, Rejection::MessageTooShort)
}

/// Validate a value for any field.
///
/// `compare_to` is only read for [`Field::ConfirmPassword`], where it holds the
/// password being confirmed; `None` compares against an empty password.
pub fn validate_field(field: Field, value: &str, compare_to: Option<&str>) -> Verdict {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
        Field::Phone => validate_phone(value),
        Field::NationalId => validate_national_id(value),
        Field::Password => validate_password(value),
        Field::ConfirmPassword => validate_password_match(compare_to.unwrap_or_default(), value),
        Field::Message => validate_message(value),
    }
}
// endregion: --- Field Validators
