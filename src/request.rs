//! Request descriptors: the declarative description of a single API call.

use crate::response::NoContent;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

/// The HTTP methods supported by the pipeline.
///
/// This is deliberately a closed set; API clients built on this crate only
/// ever issue these five verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(token)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// An immutable description of one HTTP call.
///
/// A `Request` carries everything [`Client::execute`](crate::Client::execute)
/// needs: the method, the path relative to the client's base URL, an optional
/// JSON payload, and the set of error statuses the call tolerates. The
/// expected result type is the `R` parameter, resolved statically; it
/// defaults to [`NoContent`] for calls whose response body is irrelevant.
///
/// Descriptors are pure values. Once built they are never mutated, so one
/// descriptor can drive any number of concurrent calls.
///
/// # Examples
///
/// ```
/// use apibase::{Json, Method, NoContent, Request};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct User { id: u64, name: String }
///
/// // Fetch a user, decoding the body.
/// let fetch = Request::<Json<User>>::new(Method::Get, "/users/1");
///
/// // Create a user, ignoring the body; a 409 is fine.
/// let create = Request::<NoContent>::new(Method::Post, "/users")
///     .payload(json!({"name": "Ann"}))
///     .tolerate(409);
/// # let _ = (fetch, create);
/// ```
pub struct Request<R = NoContent> {
    /// The HTTP method.
    pub method: Method,

    /// The request path, relative to the client's base URL.
    ///
    /// The absolute URL is the base URL followed by this path, byte for
    /// byte. No separator is inserted or removed.
    pub path: String,

    /// The JSON request body, if any.
    ///
    /// `None` means no body is sent at all, not an empty object.
    pub payload: Option<Value>,

    /// Error statuses (>= 400) that this call treats as non-fatal.
    ///
    /// Membership is an exact integer match; there are no ranges or
    /// wildcards.
    pub tolerated: HashSet<u16>,

    /// Free-form query parameters.
    ///
    /// The pipeline itself never merges these into the URL; they are
    /// carried verbatim for the endpoint wrapper that owns this descriptor.
    pub query_params: HashMap<String, String>,

    marker: PhantomData<fn() -> R>,
}

impl<R> Request<R> {
    /// Creates a descriptor for the given method and relative path.
    ///
    /// The payload defaults to absent, the tolerated set to empty.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            tolerated: HashSet::new(),
            query_params: HashMap::new(),
            marker: PhantomData,
        }
    }

    /// Sets the JSON request body.
    pub fn payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Marks one error status as tolerated.
    ///
    /// A tolerated status skips the hard-error path: no [`Error::Status`]
    /// is raised and the body is still handed to the decoder. Calls that
    /// tolerate errors and do not care about the error body should declare
    /// [`NoContent`] as their result type, since an error-shaped body will
    /// generally not decode as the success type.
    ///
    /// [`Error::Status`]: crate::Error::Status
    pub fn tolerate(mut self, status: u16) -> Self {
        self.tolerated.insert(status);
        self
    }

    /// Marks several error statuses as tolerated.
    pub fn tolerate_all(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.tolerated.extend(statuses);
        self
    }

    /// Attaches a query parameter.
    ///
    /// Parameters are opaque to the pipeline; endpoint wrappers apply them
    /// however their API requires.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }
}

impl<R> Clone for Request<R> {
    fn clone(&self) -> Self {
        Self {
            method: self.method,
            path: self.path.clone(),
            payload: self.payload.clone(),
            tolerated: self.tolerated.clone(),
            query_params: self.query_params.clone(),
            marker: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for Request<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("payload", &self.payload)
            .field("tolerated", &self.tolerated)
            .field("query_params", &self.query_params)
            .finish()
    }
}
