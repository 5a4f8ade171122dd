use std::str::FromStr;

use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// This is a thin wrapper around `std::env::var` that provides a more
/// ergonomic and specific error type for missing variables.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    std::env::var(name).map_err(|_| MissingEnvVarError(name.to_string()))
}

/// Reads an optional environment variable. Empty values count as unset.
pub fn lookup_env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a raw override value, keeping the variable name for error messages.
pub fn parse_var<T>(name: &str, raw: &str) -> Result<T, InvalidEnvVarError>
where
    T: FromStr,
{
    raw.trim().parse::<T>().map_err(|_| InvalidEnvVarError {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// An environment variable is set but could not be parsed.
#[derive(Debug, Error)]
#[error("Invalid value for environment variable {name}: {value:?}")]
pub struct InvalidEnvVarError {
    /// Variable name.
    pub name: String,
    /// The raw value that failed to parse.
    pub value: String,
}
