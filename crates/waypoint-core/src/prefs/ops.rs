//! Key reads and writes scoped to the store's namespace.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, PrefsDb};
use super::types::PrefKey;

impl PrefsDb {
    /// Read a key; `None` when it has never been written.
    pub async fn get(&self, key: PrefKey) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT value FROM prefs
            WHERE namespace = ?1 AND key = ?2
            "#,
        )
        .bind(&*self.namespace)
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Read a key, treating an empty stored value as absent.
    pub async fn get_non_empty(&self, key: PrefKey) -> Result<Option<String>> {
        Ok(self.get(key).await?.filter(|v| !v.is_empty()))
    }

    /// Upsert a key.
    pub async fn put(&self, key: PrefKey, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO prefs (namespace, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(namespace, key) DO UPDATE
            SET value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&*self.namespace)
        .bind(key.as_str())
        .bind(value)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Return the installation identifier, minting a UUID v4 on first use.
    ///
    /// An existing non-empty value is never replaced.
    pub async fn installation_id_or_init(&self) -> Result<String> {
        if let Some(id) = self.get_non_empty(PrefKey::InstallationId).await? {
            return Ok(id);
        }

        let id = uuid::Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO prefs (namespace, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(namespace, key) DO UPDATE
            SET value = excluded.value,
                updated_at = excluded.updated_at
            WHERE prefs.value = ''
            "#,
        )
        .bind(&*self.namespace)
        .bind(PrefKey::InstallationId.as_str())
        .bind(&id)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;

        // Re-read so a concurrent writer's id wins over ours.
        let stored = self.get_non_empty(PrefKey::InstallationId).await?;
        let stored = stored.unwrap_or(id);
        tracing::info!(installation_id = %stored, "installation id ready");
        Ok(stored)
    }

    /// All keys in this namespace, sorted by key name.
    pub async fn list(&self) -> Result<Vec<(String, String)>> {
        let rows = sqlx::query(
            r#"
            SELECT key, value FROM prefs
            WHERE namespace = ?1
            ORDER BY key
            "#,
        )
        .bind(&*self.namespace)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| (r.get::<String, _>("key"), r.get::<String, _>("value")))
            .collect())
    }
}
