//! Error handling for the Pysuerga application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for Pysuerga operations.
///
/// This enum represents all possible errors that can occur within the
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    /// Represents errors in configuration loading or schema validation
    #[error("Configuration error: {0}.")]
    Config(String),

    /// Represents errors raised while rendering templates
    #[error("Template error: {0}.")]
    Template(#[from] minijinja::Error),

    /// Represents transport failures and non-rate-limit HTTP errors
    #[error("HTTP error: {0}.")]
    Http(#[from] reqwest::Error),

    /// An external service refused the request because its quota is exhausted.
    /// Callers treat this as a soft failure: log a warning and truncate the
    /// affected enrichment step instead of aborting the run.
    #[error("Rate limited: {url}.")]
    RateLimited { url: String },

    /// Represents errors while parsing a syndication feed document
    #[error("Feed error: {0}.")]
    Feed(#[from] rss::Error),

    /// Represents errors while converting derived records into context values
    #[error("JSON error: {0}.")]
    Json(#[from] serde_json::Error),

    /// A preprocessor returned an empty context, violating the pipeline
    /// contract; carries the name of the offending step
    #[error("Preprocessor '{preprocessor}' returned an empty context.")]
    EmptyContext { preprocessor: &'static str },

    /// Represents errors in the configured ignore patterns
    #[error("Ignore pattern error: {0}.")]
    IgnorePattern(String),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
