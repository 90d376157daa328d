//! Optional diagnostic logging for executed calls.
//!
//! Every call through [`Client::execute`](crate::Client::execute) produces
//! exactly one diagnostic line: at [`Severity::Debug`] on the success and
//! tolerated-error paths, at [`Severity::Error`] right before a hard error
//! is returned. The sink is an injected capability; a client built without
//! one simply emits nothing.

use crate::request::Method;
use crate::response::RawResponse;
use serde_json::Value;

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The normal path: the call succeeded or its error was tolerated.
    Debug,
    /// The call is about to fail with [`Error::Status`](crate::Error::Status).
    Error,
}

/// A sink for rendered diagnostic lines.
///
/// Implementations must not fail; logging is a side effect only. The
/// rendered message already contains the method, URL, status, payload, and
/// response body, so most sinks just forward it somewhere.
///
/// # Examples
///
/// ```
/// use apibase::{DiagnosticLogger, Severity};
///
/// struct Stderr;
///
/// impl DiagnosticLogger for Stderr {
///     fn log(&self, severity: Severity, message: &str) {
///         eprintln!("{severity:?}: {message}");
///     }
/// }
/// ```
pub trait DiagnosticLogger: Send + Sync {
    /// Records one diagnostic line.
    fn log(&self, severity: Severity, message: &str);
}

/// A [`DiagnosticLogger`] that forwards to the `tracing` ecosystem.
///
/// [`Severity::Debug`] lines become `tracing::debug!` events and
/// [`Severity::Error`] lines become `tracing::error!` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Error => tracing::error!("{message}"),
        }
    }
}

/// Renders the diagnostic line for one call.
///
/// The payload is pretty-printed with non-ASCII characters preserved; an
/// empty response body is replaced by a `*no content*` marker. Rendering
/// only reads the cached body, never the wire.
pub(crate) fn render(raw: &RawResponse, method: Method, url: &str, payload: Option<&Value>) -> String {
    let mut line = format!("[{method}] -> {}\nURL: {url}\n", raw.status().as_u16());

    if let Some(payload) = payload {
        let pretty = serde_json::to_string_pretty(payload)
            .unwrap_or_else(|_| "<unrenderable payload>".to_string());
        line.push_str(&format!("PAYLOAD:\n{pretty}\n"));
    }

    let body = raw.text();
    line.push_str("RESP:\n");
    line.push_str(if body.is_empty() { "*no content*" } else { body });
    line
}
