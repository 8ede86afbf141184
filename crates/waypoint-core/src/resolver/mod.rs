//! Link resolution client.
//!
//! Decides which remote address the embedded browser loads and persists that
//! decision across runs. Each cold start derives a [`ResolveState`] from the
//! store and then runs either discovery + resolution or a refresh. Network
//! failures are logged and leave the store as it was; only store errors are
//! returned to the caller.

mod control;
mod discovery;

use anyhow::Result;

use crate::config::WaypointConfig;
use crate::http::HttpClient;
use crate::link::is_valid_url;
use crate::prefs::{PrefKey, PrefsDb};

/// Placeholder sent as `firebase_push_token` when no token is stored.
pub const PUSH_TOKEN_PLACEHOLDER: &str = "null";

/// Placeholder sent as `client_id` (and `client-uuid`) on refresh when absent.
pub const CLIENT_ID_PLACEHOLDER: &str = "1";

/// Where the persisted keys put this installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    NoTargetNoControl,
    NoTargetHasControl,
    HasTarget,
}

impl ResolveState {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolveState::NoTargetNoControl => "no-target-no-control",
            ResolveState::NoTargetHasControl => "no-target-has-control",
            ResolveState::HasTarget => "has-target",
        }
    }
}

/// End state of one cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub state: ResolveState,
    pub target_link: Option<String>,
}

/// Drives the handshake against the setup and control endpoints.
#[derive(Clone)]
pub struct LinkResolver {
    prefs: PrefsDb,
    client: HttpClient,
    base_url: String,
    setup_action: String,
}

impl LinkResolver {
    pub fn new(prefs: PrefsDb, client: HttpClient, cfg: &WaypointConfig) -> Self {
        Self {
            prefs,
            client,
            base_url: cfg.base_url.clone(),
            setup_action: cfg.setup_action.clone(),
        }
    }

    /// Current state as recorded in the store.
    pub async fn state(&self) -> Result<ResolveState> {
        if self.prefs.get_non_empty(PrefKey::TargetLink).await?.is_some() {
            return Ok(ResolveState::HasTarget);
        }
        if self
            .prefs
            .get_non_empty(PrefKey::ControlEndpoint)
            .await?
            .is_some()
        {
            return Ok(ResolveState::NoTargetHasControl);
        }
        Ok(ResolveState::NoTargetNoControl)
    }

    /// Runs one cold start of the flow, strictly sequentially.
    ///
    /// With a stored target only the refresh call is made. Otherwise discovery
    /// runs when no control endpoint is stored, then resolution runs against
    /// whatever endpoint is stored afterwards.
    pub async fn resolve(&self) -> Result<Resolution> {
        let entry = self.state().await?;
        tracing::debug!(state = entry.as_str(), "resolve: entry");

        match entry {
            ResolveState::HasTarget => self.refresh().await?,
            ResolveState::NoTargetNoControl => {
                self.discover().await?;
                self.resolve_target().await?;
            }
            ResolveState::NoTargetHasControl => self.resolve_target().await?,
        }

        let state = self.state().await?;
        let target_link = self.prefs.get_non_empty(PrefKey::TargetLink).await?;
        tracing::info!(state = state.as_str(), ?target_link, "resolve: done");
        Ok(Resolution { state, target_link })
    }

    /// Persists `candidate` as the target link if it is a valid URL.
    async fn store_target(&self, step: &'static str, candidate: Option<String>) -> Result<()> {
        match candidate {
            Some(link) if is_valid_url(&link) => {
                tracing::info!(step, target_link = %link, "storing target link");
                self.prefs.put(PrefKey::TargetLink, &link).await?;
            }
            Some(link) => {
                tracing::warn!(step, candidate = %link, "discarding invalid target link");
            }
            None => tracing::debug!(step, "no target link in response"),
        }
        Ok(())
    }
}
