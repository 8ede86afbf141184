//! Pre-display liveness check.
//!
//! One [`DisplayGate`] per browser mount. Display stays suppressed until a
//! probe has finished; after that it is always permitted, whatever the probe
//! said. Overlapping checks on the same gate issue at most one request.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::http::{HttpClient, HttpRequest};

/// Outcome of [`DisplayGate::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Probe answered 200 or 3xx.
    Live(u32),
    /// Probe answered with another status; display permitted anyway.
    FailOpen(u32),
    /// Probe failed at the transport level; display permitted anyway.
    Unreachable,
    /// A check was already pending, or display was already permitted. No request made.
    Skipped,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Live(code) => write!(f, "live, HTTP {code}"),
            Verdict::FailOpen(code) => write!(f, "fail-open, HTTP {code}"),
            Verdict::Unreachable => write!(f, "fail-open, unreachable"),
            Verdict::Skipped => write!(f, "skipped"),
        }
    }
}

/// Status codes that count as a live target.
pub fn is_live_status(code: u32) -> bool {
    code == 200 || (300..=399).contains(&code)
}

/// Owns the single-flight guard and the display-permitted flag for one mount.
pub struct DisplayGate {
    client: HttpClient,
    checking: AtomicBool,
    permitted: AtomicBool,
}

/// Clears the single-flight flag when the check ends, including on early drop.
struct CheckingGuard<'a>(&'a AtomicBool);

impl Drop for CheckingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl DisplayGate {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            checking: AtomicBool::new(false),
            permitted: AtomicBool::new(false),
        }
    }

    pub fn is_display_permitted(&self) -> bool {
        self.permitted.load(Ordering::Acquire)
    }

    pub fn is_checking(&self) -> bool {
        self.checking.load(Ordering::Acquire)
    }

    /// Checks `target_link` with a status-only GET (redirects not followed) and permits display.
    ///
    /// Only the status line matters, so a slow or large body never delays display.
    pub async fn check(&self, target_link: &str) -> Verdict {
        if self.is_display_permitted() {
            return Verdict::Skipped;
        }
        if self
            .checking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(target_link, "liveness check already pending");
            return Verdict::Skipped;
        }
        let _guard = CheckingGuard(&self.checking);

        let verdict = match self.client.send(HttpRequest::get(target_link).status_only()).await {
            Ok(resp) if is_live_status(resp.status) => Verdict::Live(resp.status),
            Ok(resp) => {
                tracing::warn!(target_link, status = resp.status, "liveness probe not live; showing anyway");
                Verdict::FailOpen(resp.status)
            }
            Err(e) => {
                tracing::warn!(target_link, error = %e, "liveness probe failed; showing anyway");
                Verdict::Unreachable
            }
        };

        self.permitted.store(true, Ordering::Release);
        tracing::info!(target_link, %verdict, "display permitted");
        verdict
    }
}
