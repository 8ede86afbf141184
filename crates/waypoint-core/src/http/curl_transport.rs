//! libcurl-backed [`Transport`].

use std::str;
use std::time::Duration;

use super::parse::parse_headers;
use super::{CallError, HttpRequest, HttpResponse, Method, Transport};
use crate::config::HttpConfig;

/// Performs one request per call with a fresh Easy handle. Redirects are not followed.
///
/// POSTs carry an empty body. libcurl's form-urlencoded default `Content-Type`
/// is suppressed, so only the caller's headers go on the wire.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
}

impl CurlTransport {
    pub fn new(http: &HttpConfig) -> Self {
        Self {
            connect_timeout: http.connect_timeout(),
            timeout: http.timeout(),
        }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(&HttpConfig::default())
    }
}

impl Transport for CurlTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CallError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        match request.method {
            Method::Get if request.status_only => {
                // NOBODY stops after the headers; the verb stays GET.
                easy.nobody(true)?;
                easy.custom_request("GET")?;
            }
            Method::Get => easy.get(true)?,
            Method::Post => {
                easy.post(true)?;
                easy.post_fields_copy(b"")?;
            }
        }
        easy.follow_location(false)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        for (k, v) in &request.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        if request.method == Method::Post && request.header_value("Content-Type").is_none() {
            list.append("Content-Type:")?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse {
            status,
            headers: parse_headers(&header_lines),
            body,
        })
    }
}
