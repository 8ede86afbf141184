//! `waypoint resolve` – one cold start of the resolution flow.

use anyhow::Result;
use waypoint_core::config::WaypointConfig;
use waypoint_core::http::HttpClient;
use waypoint_core::prefs::PrefsDb;
use waypoint_core::resolver::{LinkResolver, Resolution};

pub async fn run_resolve(prefs: &PrefsDb, client: &HttpClient, cfg: &WaypointConfig) -> Result<()> {
    let resolution = resolve(prefs, client, cfg).await?;
    println!("state:  {}", resolution.state.as_str());
    println!(
        "target: {}",
        resolution.target_link.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub(super) async fn resolve(
    prefs: &PrefsDb,
    client: &HttpClient,
    cfg: &WaypointConfig,
) -> Result<Resolution> {
    LinkResolver::new(prefs.clone(), client.clone(), cfg)
        .resolve()
        .await
}
