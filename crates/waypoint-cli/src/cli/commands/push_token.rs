//! `waypoint push-token <token>` – store the externally supplied push token.

use anyhow::{bail, Result};
use waypoint_core::prefs::{PrefKey, PrefsDb};

pub async fn run_push_token(prefs: &PrefsDb, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        bail!("push token must not be empty");
    }
    prefs.put(PrefKey::PushToken, token).await?;
    println!("Stored push token.");
    Ok(())
}
