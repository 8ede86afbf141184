//! `waypoint open` – resolve, then gate display on the liveness probe.

use anyhow::Result;
use waypoint_core::config::WaypointConfig;
use waypoint_core::display::DisplayGate;
use waypoint_core::http::HttpClient;
use waypoint_core::prefs::PrefsDb;

use super::resolve::resolve;

pub async fn run_open(prefs: &PrefsDb, client: &HttpClient, cfg: &WaypointConfig) -> Result<()> {
    let resolution = resolve(prefs, client, cfg).await?;
    let Some(target) = resolution.target_link else {
        println!("no target link ({})", resolution.state.as_str());
        return Ok(());
    };

    let gate = DisplayGate::new(client.clone());
    let verdict = gate.check(&target).await;
    if gate.is_display_permitted() {
        println!("display {target} ({verdict})");
    }
    Ok(())
}
