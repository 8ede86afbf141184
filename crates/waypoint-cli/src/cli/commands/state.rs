//! `waypoint state` – show persisted keys.

use anyhow::Result;
use waypoint_core::prefs::{PrefKey, PrefsDb};

pub async fn run_state(prefs: &PrefsDb) -> Result<()> {
    let entries = prefs.list().await?;
    if entries.is_empty() {
        println!("No keys in namespace {}.", prefs.namespace());
        return Ok(());
    }
    println!("{:<18} {}", "KEY", "VALUE");
    for (key, value) in entries {
        let marker = if PrefKey::from_str(&key).is_some() { "" } else { " (unknown)" };
        println!("{:<18} {}{}", key, value, marker);
    }
    Ok(())
}
