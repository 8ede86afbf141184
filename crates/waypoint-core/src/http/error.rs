//! Outcome of a single network call other than success.

use thiserror::Error;

/// Rough cause of a transport failure, used for log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Connect or whole-request timeout.
    Timeout,
    /// DNS, refused connection, reset, empty reply.
    Connection,
    Other,
}

/// Why a call produced no usable value. Never fatal to the flow.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("transport ({kind:?}): {message}")]
    Transport { kind: TransportKind, message: String },
    #[error("HTTP {0}")]
    Http(u32),
    #[error("decode: {0}")]
    Decode(String),
}

impl CallError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            CallError::Transport {
                kind: TransportKind::Timeout,
                ..
            }
        )
    }
}

impl From<curl::Error> for CallError {
    fn from(e: curl::Error) -> Self {
        CallError::Transport {
            kind: classify_curl_error(&e),
            message: e.to_string(),
        }
    }
}

/// Classify a curl error for logging.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}
