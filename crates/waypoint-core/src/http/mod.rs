//! HTTP plumbing shared by the resolver and the display gate.
//!
//! Calls go through the [`Transport`] trait so the flow does not know about
//! libcurl. [`HttpClient`] attaches the shared `User-Agent` and runs the
//! blocking transport on tokio's blocking pool.

mod curl_transport;
mod error;
mod parse;
mod query;
#[cfg(test)]
pub(crate) mod testing;

pub use curl_transport::CurlTransport;
pub use error::{classify_curl_error, CallError, TransportKind};
pub use query::with_query;

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A request with an empty body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Return as soon as the status line and headers arrive; the body is never read.
    pub status_only: bool,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            status_only: false,
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            status_only: false,
        }
    }

    pub fn status_only(mut self) -> Self {
        self.status_only = true;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of a header, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into `CallError::Http`.
    pub fn error_for_status(self) -> Result<Self, CallError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CallError::Http(self.status))
        }
    }
}

/// Blocking HTTP transport. Implementations must return every status code as `Ok`.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CallError>;
}

/// Transport plus the client signature captured once at startup.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    user_agent: Arc<str>,
}

impl HttpClient {
    pub fn new(transport: Arc<dyn Transport>, user_agent: &str) -> Self {
        Self {
            transport,
            user_agent: Arc::from(user_agent),
        }
    }

    /// Sends `request` with `User-Agent` attached, off the calling task.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, CallError> {
        let request = request.header("User-Agent", &*self.user_agent);
        tracing::debug!(method = request.method.as_str(), url = %request.url, "http request");
        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.execute(&request))
            .await
            .map_err(|e| CallError::Transport {
                kind: TransportKind::Other,
                message: format!("http worker failed: {e}"),
            })??;
        tracing::debug!(status = response.status, "http response");
        Ok(response)
    }
}
