//! # apibase - a typed HTTP request pipeline for API clients
//!
//! Apibase is the single choke point for a client library's outbound API
//! calls. Each call is described declaratively by a [`Request`] (method,
//! path, payload, expected result type, tolerated error statuses); the
//! [`Client`] executes it, classifies the outcome, emits one diagnostic log
//! line, and converts the body into a strongly-typed result or a structured
//! error. Error classification, logging, and JSON (de)serialization are
//! handled once, consistently, instead of in every endpoint wrapper.
//!
//! ## Quick Start
//!
//! ```no_run
//! use apibase::{Client, Json, Method, NoContent, Request, TracingLogger};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), apibase::Error> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")
//!         .default_header("Authorization", "Bearer t0ken")?
//!         .logger(TracingLogger)
//!         .build()?;
//!
//!     // Fetch and decode a typed result.
//!     let request = Request::<Json<User>>::new(Method::Get, "/users/1");
//!     let user = client.execute(&request).await?.into_inner();
//!     println!("User: {}", user.name);
//!
//!     // Create, ignoring the response body; a 409 on replay is fine.
//!     let request = Request::<NoContent>::new(Method::Post, "/users")
//!         .payload(json!({"name": "Bo"}))
//!         .tolerate(409);
//!     client.execute(&request).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Declarative calls** - One immutable [`Request`] value per call, safe
//!   to share across concurrent executions
//! - **Typed results** - The expected result type is part of the
//!   descriptor; [`NoContent`] declares "I don't care about the body" and
//!   [`Json`] decodes it strictly
//! - **Tolerated errors** - Per-call status codes (exact match, >= 400)
//!   that skip the hard-error path
//! - **One diagnostic line per call** - Method, URL, status, payload, and
//!   body rendered once, at debug severity normally and error severity on
//!   hard failures; the logger is an optional injected capability
//! - **Single body read** - The response body is buffered once and shared
//!   by the classifier, logger, and decoder
//!
//! Retries, rate limiting, authentication refresh, and transport concerns
//! (TLS, redirects, timeouts) are deliberately out of scope; the underlying
//! `reqwest` transport owns those.
//!
//! ## Error Handling
//!
//! Failures preserve the raw response so calls can be diagnosed without
//! re-running them:
//!
//! ```no_run
//! use apibase::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder().base_url("https://api.example.com").build()?;
//! match client.get::<serde_json::Value>("/endpoint").await {
//!     Ok(value) => println!("Success: {value:?}"),
//!     Err(Error::Status { status, body, .. }) => {
//!         eprintln!("API rejected the call ({status}): {body}");
//!     }
//!     Err(Error::DeserializationFailed { raw_response, serde_error, status }) => {
//!         eprintln!("Failed to decode (status {status}):");
//!         eprintln!("  Raw response: {raw_response}");
//!         eprintln!("  Error: {serde_error}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod log;
mod request;
mod response;

pub use client::{Client, ClientBuilder};
pub use error::{Error, Result};
pub use log::{DiagnosticLogger, Severity, TracingLogger};
pub use request::{Method, Request};
pub use response::{FromResponse, Json, NoContent, RawResponse};
