//! SQLite-backed preferences implementation.
//!
//! Handles connection and migrations. Key reads and writes live in `ops`.

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}", out)
}

/// Handle to the namespaced key-value store.
///
/// The database file is stored under the XDG state directory:
/// `~/.local/state/waypoint/prefs.db` on Debian.
#[derive(Clone)]
pub struct PrefsDb {
    pub(crate) pool: Pool<Sqlite>,
    pub(crate) namespace: Arc<str>,
}

impl PrefsDb {
    /// Open (or create) the default store and run migrations.
    pub async fn open_default(namespace: &str) -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("waypoint")?;
        let db_path = xdg_dirs.get_state_home().join("waypoint").join("prefs.db");
        Self::open_at(&db_path, namespace).await
    }

    /// Open (or create) the store at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>, namespace: &str) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let uri = path_to_sqlite_uri(path) + "?mode=rwc";
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect(&uri)
            .await?;
        let db = PrefsDb {
            pool,
            namespace: Arc::from(namespace),
        };
        db.migrate().await?;
        Ok(db)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Release pooled connections. Reopening the same file afterwards sees every committed write.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prefs (
                namespace TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (namespace, key)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Open an in-memory store (no disk I/O). Used by unit tests across the crate.
#[cfg(test)]
pub(crate) async fn open_memory() -> Result<PrefsDb> {
    // Single connection so the pool never hands back a different empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let db = PrefsDb {
        pool,
        namespace: Arc::from(crate::config::DEFAULT_NAMESPACE),
    };
    db.migrate().await?;
    Ok(db)
}
