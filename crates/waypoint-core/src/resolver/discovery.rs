//! Discovery: one setup call that yields the control endpoint.

use anyhow::Result;

use super::LinkResolver;
use crate::http::{with_query, CallError, HttpRequest, HttpResponse};
use crate::link::{is_valid_url, CLIENT_UUID_HEADER, JSON_CONTENT_TYPE, SERVICE_LINK_HEADER};
use crate::prefs::PrefKey;

impl LinkResolver {
    /// Posts to the setup endpoint and stores a valid `service-link` header.
    ///
    /// The header is honoured whatever the status code; its absence is the failure signal.
    pub(super) async fn discover(&self) -> Result<()> {
        let installation_id = self.prefs.installation_id_or_init().await?;

        let Some(url) = with_query(&self.base_url, &[("action", self.setup_action.as_str())])
        else {
            tracing::error!(base_url = %self.base_url, "invalid setup base URL; discovery skipped");
            return Ok(());
        };

        let request = HttpRequest::post(url)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .header(CLIENT_UUID_HEADER, installation_id);
        let outcome = self
            .client
            .send(request)
            .await
            .and_then(|resp| service_link(&resp));

        match outcome {
            Ok(link) if is_valid_url(&link) => {
                tracing::info!(control_endpoint = %link, "discovered control endpoint");
                self.prefs.put(PrefKey::ControlEndpoint, &link).await?;
            }
            Ok(link) => {
                tracing::warn!(candidate = %link, "discarding invalid service-link");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    timeout = e.is_timeout(),
                    "discovery failed; control endpoint unchanged"
                );
            }
        }
        Ok(())
    }
}

fn service_link(resp: &HttpResponse) -> Result<String, CallError> {
    tracing::debug!(status = resp.status, "setup response");
    resp.header(SERVICE_LINK_HEADER)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CallError::Decode(format!(
                "{SERVICE_LINK_HEADER} header missing (HTTP {})",
                resp.status
            ))
        })
}
