//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, EnvError> {
    env::var(name).map_err(|_| EnvError::MissingEnv(name))
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, EnvError> {
    let val = get_env(name)?;
    val.parse::<T>().map_err(|_| EnvError::WrongFormat(name))
}

/// Get a comma-separated list, trimming entries and dropping empty ones.
///
/// Returns `None` when the variable is unset.
pub fn get_env_list(name: &'static str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| split_list(&raw))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// region:    --- Error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("{0} must be set in environment")]
    MissingEnv(&'static str),
    #[error("{0} has the wrong format")]
    WrongFormat(&'static str),
}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("http://a.test, http://b.test ,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("COMMUNITY_TEST_SURELY_UNSET_VAR"),
            Err(EnvError::MissingEnv("COMMUNITY_TEST_SURELY_UNSET_VAR"))
        );
        assert_eq!(get_env_or("COMMUNITY_TEST_SURELY_UNSET_VAR", "fallback"), "fallback");
        assert_eq!(get_env_list("COMMUNITY_TEST_SURELY_UNSET_VAR"), None);
    }
}
