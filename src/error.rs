//! Error types for the request pipeline.
//!
//! Every failure surfaces synchronously from [`Client::execute`](crate::Client::execute)
//! carrying enough context (method, URL, status, raw body) to diagnose the
//! call without re-running it. Nothing is retried or swallowed here.

use crate::request::Method;
use http::StatusCode;

fn body_or_marker(body: &str) -> &str {
    if body.is_empty() {
        "*no content*"
    } else {
        body
    }
}

/// The error type for API calls.
///
/// # Examples
///
/// ```no_run
/// use apibase::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .build()?;
///
/// match client.get::<serde_json::Value>("/endpoint").await {
///     Ok(value) => println!("Success: {value:?}"),
///     Err(Error::Status { status, body, .. }) => {
///         eprintln!("API rejected the call ({status}): {body}");
///     }
///     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
///         eprintln!("Failed to decode. Raw response: {raw_response}");
///         eprintln!("Serde error: {serde_error}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level failure (connection refused, DNS, timeout, TLS).
    ///
    /// These come straight from `reqwest` and are not classified further by
    /// the pipeline.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with an error status the call did not tolerate.
    ///
    /// Renders as `[<status>] <body>`, with `*no content*` standing in for
    /// an empty body. An error-severity diagnostic line is always emitted
    /// before this is returned.
    #[error("[{}] {}", .status.as_u16(), body_or_marker(.body))]
    Status {
        /// The HTTP method of the failed call.
        method: Method,
        /// The absolute URL the call was sent to.
        url: String,
        /// The HTTP status code.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The response body could not be decoded into the declared result type.
    ///
    /// Both the raw body and the serde message are preserved, so shape
    /// mismatches can be debugged from the error alone. Since the result
    /// type is declared by the caller, this is treated as a contract
    /// mismatch and not logged specially.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to decode.
        raw_response: String,
        /// The serde error message.
        serde_error: String,
        /// The HTTP status code of the response.
        status: StatusCode,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid client configuration (missing base URL, bad header).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the HTTP status code if this error has one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error has one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Status { body, .. } => Some(body),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }
}

/// A specialized `Result` type for API calls.
pub type Result<T> = std::result::Result<T, Error>;
