//! Link validity and control-endpoint response decoding.
//!
//! Validity is deliberately shallow: any absolute URI with a scheme passes.
//! There is no host allow-list and no http/https restriction.

use serde_json::{Map, Value};

use crate::http::CallError;

/// Request header naming the installation in setup and refresh calls.
pub const CLIENT_UUID_HEADER: &str = "client-uuid";

/// Media type declared on every empty-bodied POST.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response header carrying the discovered control endpoint.
pub const SERVICE_LINK_HEADER: &str = "service-link";

/// True iff `candidate` parses as an absolute URI with a non-empty scheme.
///
/// Parsing follows the WHATWG URL rules, which are stricter than a bare
/// scheme check for the special schemes: `http`, `https`, `ws`, `wss` and
/// `ftp` also need a well-formed host, so `"http://"` and
/// `"https://a b.example"` are rejected.
pub fn is_valid_url(candidate: &str) -> bool {
    match url::Url::parse(candidate) {
        Ok(u) => !u.scheme().is_empty(),
        Err(_) => false,
    }
}

/// Body of a resolution or refresh call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkResponse {
    pub client_id: Option<String>,
    /// Candidate target link; still subject to [`is_valid_url`].
    pub response: Option<String>,
}

/// Decodes `{"client_id": string, "response": string}`.
///
/// Absent, `null`, non-string and empty fields all decode to `None`.
/// Anything other than a JSON object is a decode error.
pub fn decode_link_response(body: &[u8]) -> Result<LinkResponse, CallError> {
    let obj: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| CallError::Decode(e.to_string()))?;
    Ok(LinkResponse {
        client_id: string_field(&obj, "client_id"),
        response: string_field(&obj, "response"),
    })
}

fn string_field(obj: &Map<String, Value>, name: &str) -> Option<String> {
    obj.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
