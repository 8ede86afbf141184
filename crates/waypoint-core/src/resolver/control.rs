//! Resolution and refresh: calls against the discovered control endpoint.

use anyhow::Result;

use super::{LinkResolver, CLIENT_ID_PLACEHOLDER, PUSH_TOKEN_PLACEHOLDER};
use crate::http::{with_query, CallError, HttpRequest};
use crate::link::{decode_link_response, LinkResponse, CLIENT_UUID_HEADER, JSON_CONTENT_TYPE};
use crate::prefs::PrefKey;

impl LinkResolver {
    /// First resolution of the target link. Aborts without a call when no endpoint is stored.
    pub(super) async fn resolve_target(&self) -> Result<()> {
        let Some(endpoint) = self.prefs.get_non_empty(PrefKey::ControlEndpoint).await? else {
            tracing::warn!("no control endpoint; resolution skipped");
            return Ok(());
        };
        let push_token = self.push_token().await?;

        let Some(url) = with_query(&endpoint, &[("firebase_push_token", push_token.as_str())])
        else {
            tracing::error!(control_endpoint = %endpoint, "invalid control endpoint URL");
            return Ok(());
        };

        let request = HttpRequest::post(url).header("Content-Type", JSON_CONTENT_TYPE);
        match self.fetch_link_response(request).await {
            Ok(resp) => {
                if let Some(client_id) = resp.client_id.as_deref() {
                    tracing::info!(client_id, "storing client id");
                    self.prefs.put(PrefKey::ClientId, client_id).await?;
                }
                self.store_target("resolution", resp.response).await?;
            }
            Err(e) => tracing::warn!(
                error = %e,
                timeout = e.is_timeout(),
                "resolution failed; nothing stored"
            ),
        }
        Ok(())
    }

    /// Opportunistic refresh of an existing target link.
    ///
    /// No rediscovery happens here: an empty control endpoint means no call.
    pub(super) async fn refresh(&self) -> Result<()> {
        let Some(endpoint) = self.prefs.get_non_empty(PrefKey::ControlEndpoint).await? else {
            tracing::warn!("no control endpoint; refresh skipped");
            return Ok(());
        };
        let client_id = self
            .prefs
            .get_non_empty(PrefKey::ClientId)
            .await?
            .unwrap_or_else(|| CLIENT_ID_PLACEHOLDER.to_string());
        let push_token = self.push_token().await?;
        let installation_id = self
            .prefs
            .get_non_empty(PrefKey::InstallationId)
            .await?
            .unwrap_or_else(|| CLIENT_ID_PLACEHOLDER.to_string());

        let Some(url) = with_query(
            &endpoint,
            &[
                ("client_id", client_id.as_str()),
                ("firebase_push_token", push_token.as_str()),
            ],
        ) else {
            tracing::error!(control_endpoint = %endpoint, "invalid control endpoint URL");
            return Ok(());
        };

        let request = HttpRequest::post(url)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header(CLIENT_UUID_HEADER, installation_id);

        match self.fetch_link_response(request).await {
            Ok(resp) => self.store_target("refresh", resp.response).await?,
            Err(e) => tracing::warn!(
                error = %e,
                timeout = e.is_timeout(),
                "refresh failed; target link unchanged"
            ),
        }
        Ok(())
    }

    async fn push_token(&self) -> Result<String> {
        Ok(self
            .prefs
            .get_non_empty(PrefKey::PushToken)
            .await?
            .unwrap_or_else(|| PUSH_TOKEN_PLACEHOLDER.to_string()))
    }

    async fn fetch_link_response(&self, request: HttpRequest) -> Result<LinkResponse, CallError> {
        let resp = self.client.send(request).await?.error_for_status()?;
        decode_link_response(&resp.body)
    }
}
