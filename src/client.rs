//! The request executor: the single path every API call goes through.
//!
//! [`Client::execute`] performs one call end to end: resolve the URL, send
//! through the shared transport, read the body once, classify the status,
//! emit one diagnostic line, and decode the body into the declared result
//! type. Use [`ClientBuilder`] to configure and create clients.

use crate::{
    log::{self, DiagnosticLogger, Severity},
    request::{Method, Request},
    response::{FromResponse, Json, NoContent, RawResponse},
    Error, Result,
};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// An HTTP client executing typed, declaratively-described API calls.
///
/// The client is designed to be built once and reused: it holds the
/// transport's connection pool plus the configuration applied to every call
/// (base URL, default headers, optional diagnostic logger). All of that
/// state is immutable after construction, so clones are cheap and concurrent
/// calls need no locking.
///
/// # Examples
///
/// ```no_run
/// use apibase::{Client, Json, Method, Request, TracingLogger};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// #[derive(Deserialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), apibase::Error> {
/// let client = Client::builder()
///     .base_url("https://api.example.com")
///     .default_header("Authorization", "Bearer t0ken")?
///     .logger(TracingLogger)
///     .build()?;
///
/// // The generic entry point, driven by a descriptor.
/// let request = Request::<Json<User>>::new(Method::Get, "/users/123");
/// let user = client.execute(&request).await?.into_inner();
/// println!("User: {}", user.name);
///
/// // Or the per-verb sugar.
/// let created: User = client.post("/users", &CreateUser { name: "Alice".into() }).await?;
/// println!("Created user with ID: {}", created.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    default_headers: HeaderMap,
    logger: Option<Arc<dyn DiagnosticLogger>>,
}

/// How a response status relates to a descriptor.
enum Outcome {
    /// Status below 400, unconditionally fine.
    Success,
    /// Error status explicitly tolerated by the descriptor.
    Tolerated,
    /// Error status the descriptor did not tolerate.
    Rejected,
}

/// Classifies a status against a descriptor's tolerated set.
///
/// Membership is exact integer match only.
fn classify(status: StatusCode, tolerated: &HashSet<u16>) -> Outcome {
    if status.as_u16() < 400 {
        Outcome::Success
    } else if tolerated.contains(&status.as_u16()) {
        Outcome::Tolerated
    } else {
        Outcome::Rejected
    }
}

impl Client {
    /// Creates a new [`ClientBuilder`] for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Executes one API call described by a [`Request`].
    ///
    /// The call runs in a fixed order: the absolute URL is the base URL and
    /// the descriptor path joined byte for byte; the request is sent with
    /// the client's default headers and the descriptor's payload (an absent
    /// payload sends no body); the response body is read fully before any
    /// further processing; the status is classified; exactly one diagnostic
    /// line is emitted; and on the non-hard-error path the body is decoded
    /// into `R`.
    ///
    /// There are no retries here. Timeouts, TLS, and redirects belong to
    /// the underlying transport.
    ///
    /// # Errors
    ///
    /// * [`Error::Status`] if the status is >= 400 and not tolerated by the
    ///   descriptor, logged once at error severity before returning.
    /// * [`Error::DeserializationFailed`] if the body does not decode as `R`.
    /// * [`Error::Transport`] for network-level failures, passed through
    ///   unclassified.
    pub async fn execute<R: FromResponse>(&self, request: &Request<R>) -> Result<R> {
        let url = self.resolve_url(&request.path);

        tracing::debug!(method = %request.method, url = %url, "Executing HTTP request");

        let mut builder = self
            .inner
            .http_client
            .request(request.method.into(), url.as_str());

        for (name, value) in &self.inner.default_headers {
            builder = builder.header(name, value);
        }

        if let Some(payload) = &request.payload {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let raw = RawResponse::read(response).await?;

        match classify(raw.status(), &request.tolerated) {
            Outcome::Success | Outcome::Tolerated => {
                self.log_call(&raw, request, &url, Severity::Debug);
                R::from_response(&raw)
            }
            Outcome::Rejected => {
                self.log_call(&raw, request, &url, Severity::Error);
                Err(Error::Status {
                    method: request.method,
                    url,
                    status: raw.status(),
                    body: raw.text().to_string(),
                })
            }
        }
    }

    /// Joins the base URL and a descriptor path, byte for byte.
    ///
    /// No separator is inserted or removed; callers own getting the
    /// boundary right.
    fn resolve_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Emits the one diagnostic line for this call, if a logger is set.
    fn log_call<R>(&self, raw: &RawResponse, request: &Request<R>, url: &str, severity: Severity) {
        if let Some(logger) = &self.inner.logger {
            let line = log::render(raw, request.method, url, request.payload.as_ref());
            logger.log(severity, &line);
        }
    }

    /// Makes a GET request and decodes the body as `T`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use apibase::Client;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User { name: String }
    ///
    /// # async fn example() -> Result<(), apibase::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com")
    ///     .build()?;
    ///
    /// let user: User = client.get("/users/123").await?;
    /// println!("User: {}", user.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get<T>(&self, path: impl Into<String>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = Request::<Json<T>>::new(Method::Get, path);
        self.execute(&request).await.map(Json::into_inner)
    }

    /// Makes a POST request with a JSON body and decodes the response as `T`.
    pub async fn post<Req, T>(&self, path: impl Into<String>, body: &Req) -> Result<T>
    where
        Req: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::<Json<T>>::new(Method::Post, path).payload(to_payload(body)?);
        self.execute(&request).await.map(Json::into_inner)
    }

    /// Makes a PUT request with a JSON body and decodes the response as `T`.
    pub async fn put<Req, T>(&self, path: impl Into<String>, body: &Req) -> Result<T>
    where
        Req: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::<Json<T>>::new(Method::Put, path).payload(to_payload(body)?);
        self.execute(&request).await.map(Json::into_inner)
    }

    /// Makes a PATCH request with a JSON body and decodes the response as `T`.
    pub async fn patch<Req, T>(&self, path: impl Into<String>, body: &Req) -> Result<T>
    where
        Req: Serialize,
        T: DeserializeOwned,
    {
        let request = Request::<Json<T>>::new(Method::Patch, path).payload(to_payload(body)?);
        self.execute(&request).await.map(Json::into_inner)
    }

    /// Makes a DELETE request, ignoring the response body.
    pub async fn delete(&self, path: impl Into<String>) -> Result<()> {
        let request = Request::<NoContent>::new(Method::Delete, path);
        self.execute(&request).await.map(|_| ())
    }
}

fn to_payload<Req: Serialize>(body: &Req) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use apibase::{ClientBuilder, TracingLogger};
///
/// # fn example() -> Result<(), apibase::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.example.com")
///     .default_header("User-Agent", "my-app/1.0")?
///     .logger(TracingLogger)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<String>,
    default_headers: HeaderMap,
    logger: Option<Arc<dyn DiagnosticLogger>>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HeaderMap::new(),
            logger: None,
        }
    }

    /// Sets the base URL for all requests.
    ///
    /// The string is stored verbatim. Descriptor paths are appended to it
    /// byte for byte with no separator normalization, so
    /// `"https://api.example.com/v1"` plus `"/users"` yields
    /// `"https://api.example.com/v1/users"`, while a trailing slash here and
    /// a leading slash on the path yields a double slash.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the diagnostic logger.
    ///
    /// Without one, calls emit no diagnostics; that is not an error.
    pub fn logger(mut self, logger: impl DiagnosticLogger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL was provided or if the underlying
    /// transport cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("Base URL is required".to_string()))?;

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                default_headers: self.default_headers,
                logger: self.logger,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
