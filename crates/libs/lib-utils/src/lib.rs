//! # Utilities Library
//!
//! Form field validators and environment-variable helpers.

pub mod envs;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_list, get_env_or, get_env_parse, EnvError};
pub use validation::{
    national_id_check_digit, validate_email, validate_field, validate_message, validate_name,
    validate_national_id, validate_password, validate_password_match, validate_phone, Field,
    Rejection, UnknownField, Verdict,
};
