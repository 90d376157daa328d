//! Transport responses and typed decoding.
//!
//! [`RawResponse`] owns the response body as a buffer read exactly once from
//! the wire, so the classifier, the diagnostic logger, and the decoder can
//! all look at it without re-reading a single-use network stream. The
//! [`FromResponse`] trait is the decode seam: [`NoContent`] discards the body,
//! [`Json`] deserializes it.

use crate::{Error, Result};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::OnceLock;

/// A fully-read HTTP response.
///
/// The body is fetched from the transport once, at construction, and cached.
/// [`text`](RawResponse::text) and [`json`](RawResponse::json) are idempotent
/// views over that cache.
#[derive(Debug)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    text: String,
    json: OnceLock<Value>,
}

impl RawResponse {
    /// Reads a transport response to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the body cannot be read.
    pub async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        Ok(Self::from_parts(status, headers, text))
    }

    /// Builds a response from already-known parts, without a transport.
    ///
    /// Useful for exercising decoders in tests.
    pub fn from_parts(status: StatusCode, headers: HeaderMap, text: String) -> Self {
        Self {
            status,
            headers,
            text,
            json: OnceLock::new(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The cached body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The body parsed as JSON.
    ///
    /// A successful parse is cached, so repeated calls return the same
    /// value without re-parsing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] if the body is not valid
    /// JSON.
    pub fn json(&self) -> Result<&Value> {
        if let Some(value) = self.json.get() {
            return Ok(value);
        }
        let value: Value =
            serde_json::from_str(&self.text).map_err(|e| Error::DeserializationFailed {
                raw_response: self.text.clone(),
                serde_error: e.to_string(),
                status: self.status,
            })?;
        Ok(self.json.get_or_init(|| value))
    }
}

/// Conversion from a fully-read response into the declared result type.
///
/// This is the static counterpart of declaring a result type on a
/// [`Request`](crate::Request): `execute` calls `from_response` once the
/// response has been classified and logged.
pub trait FromResponse: Sized {
    /// Decodes the response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeserializationFailed`] if the body does not match
    /// the expected shape.
    fn from_response(raw: &RawResponse) -> Result<Self>;
}

/// The "no value" result type.
///
/// Decoding always succeeds and ignores the body entirely, whatever the
/// transport returned. Declare this on calls where the response body is
/// irrelevant (creates, deletes, fire-and-forget notifications).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoContent;

impl FromResponse for NoContent {
    fn from_response(_raw: &RawResponse) -> Result<Self> {
        Ok(NoContent)
    }
}

/// A result type decoded from the response body as JSON.
///
/// Deserialization is strict: a body missing required fields of `T`, or one
/// that is not valid JSON at all, yields [`Error::DeserializationFailed`]
/// with the raw body preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consumes the wrapper, returning the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> FromResponse for Json<T> {
    fn from_response(raw: &RawResponse) -> Result<Self> {
        let value = raw.json()?;
        T::deserialize(value)
            .map(Json)
            .map_err(|e| Error::DeserializationFailed {
                raw_response: raw.text().to_string(),
                serde_error: e.to_string(),
                status: raw.status(),
            })
    }
}
