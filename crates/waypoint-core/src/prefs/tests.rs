//! Tests for prefs (in-memory helper from db, temp files for restarts).

use crate::prefs::db::open_memory;
use crate::prefs::{PrefKey, PrefsDb};
use tempfile::tempdir;

#[tokio::test]
async fn get_missing_key_is_none() {
    let db = open_memory().await.unwrap();
    assert!(db.get(PrefKey::TargetLink).await.unwrap().is_none());
    assert!(db.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn put_overwrites_existing_value() {
    let db = open_memory().await.unwrap();
    db.put(PrefKey::TargetLink, "https://a.example/one")
        .await
        .unwrap();
    db.put(PrefKey::TargetLink, "https://b.example/two")
        .await
        .unwrap();
    assert_eq!(
        db.get(PrefKey::TargetLink).await.unwrap().as_deref(),
        Some("https://b.example/two")
    );
    assert_eq!(db.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_value_reads_as_absent_through_get_non_empty() {
    let db = open_memory().await.unwrap();
    db.put(PrefKey::ClientId, "").await.unwrap();
    assert_eq!(db.get(PrefKey::ClientId).await.unwrap().as_deref(), Some(""));
    assert!(db.get_non_empty(PrefKey::ClientId).await.unwrap().is_none());
}

#[tokio::test]
async fn installation_id_is_minted_once() {
    let db = open_memory().await.unwrap();
    let first = db.installation_id_or_init().await.unwrap();
    assert_eq!(first.len(), 36, "hyphenated uuid: {first}");
    let second = db.installation_id_or_init().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn installation_id_keeps_existing_value() {
    let db = open_memory().await.unwrap();
    db.put(PrefKey::InstallationId, "preset-id").await.unwrap();
    assert_eq!(db.installation_id_or_init().await.unwrap(), "preset-id");
}

#[tokio::test]
async fn namespaces_are_isolated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.db");
    let a = PrefsDb::open_at(&path, "alpha").await.unwrap();
    let b = PrefsDb::open_at(&path, "beta").await.unwrap();
    a.put(PrefKey::PushToken, "token-a").await.unwrap();
    assert!(b.get(PrefKey::PushToken).await.unwrap().is_none());
    assert_eq!(a.namespace(), "alpha");
}

#[tokio::test]
async fn installation_id_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("prefs.db");

    let db = PrefsDb::open_at(&path, "game_prefs").await.unwrap();
    let minted = db.installation_id_or_init().await.unwrap();
    db.put(PrefKey::ControlEndpoint, "https://ctl.example/app")
        .await
        .unwrap();
    db.close().await;
    drop(db);

    let reopened = PrefsDb::open_at(&path, "game_prefs").await.unwrap();
    assert_eq!(
        reopened.get(PrefKey::InstallationId).await.unwrap().as_deref(),
        Some(minted.as_str())
    );
    assert_eq!(reopened.installation_id_or_init().await.unwrap(), minted);
    assert_eq!(
        reopened
            .get(PrefKey::ControlEndpoint)
            .await
            .unwrap()
            .as_deref(),
        Some("https://ctl.example/app")
    );
}

#[test]
fn pref_key_names_roundtrip() {
    for key in PrefKey::ALL {
        assert_eq!(PrefKey::from_str(key.as_str()), Some(key));
    }
    assert_eq!(PrefKey::from_str("taskLink"), None);
    assert_eq!(PrefKey::TargetLink.to_string(), "target_link");
}
