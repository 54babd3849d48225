use std::path::Path;

use chrono::{Duration, Utc};
use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::api::types::AppSummary;
use crate::error::AppPicksError;

/// SQLite-backed cache of app summaries keyed by app id, with TTL expiry.
/// All operations are blocking; call through `tokio::task::spawn_blocking`
/// from async code.
pub struct MetadataCache {
    conn: Connection,
}

fn cache_err(context: &str, e: impl std::fmt::Display) -> AppPicksError {
    AppPicksError::Cache(format!("{}: {}", context, e))
}

impl MetadataCache {
    pub fn new(db_path: &Path) -> Result<Self, AppPicksError> {
        let conn = Connection::open(db_path)
            .map_err(|e| cache_err(&format!("Failed to open cache database at {:?}", db_path), e))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS app_metadata (
                app_id TEXT PRIMARY KEY,
                summary_json TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                expires_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_app_metadata_expires ON app_metadata(expires_at);",
        )
        .map_err(|e| cache_err("Failed to create cache table", e))?;

        Ok(Self { conn })
    }

    /// A live entry for `app_id`, or `None` if missing or expired.
    pub fn get(&self, app_id: &str) -> Result<Option<AppSummary>, AppPicksError> {
        let now = Utc::now().to_rfc3339();
        let result = self.conn.query_row(
            "SELECT summary_json FROM app_metadata WHERE app_id = ?1 AND expires_at > ?2",
            params![app_id, now],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(json) => {
                let summary = serde_json::from_str(&json)
                    .map_err(|e| cache_err(&format!("Corrupt cache entry for {}", app_id), e))?;
                debug!("Metadata cache hit for {}", app_id);
                Ok(Some(summary))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(cache_err("Cache lookup failed", e)),
        }
    }

    pub fn put(&self, summary: &AppSummary, ttl_hours: i64) -> Result<(), AppPicksError> {
        let now = Utc::now();
        let expires = now + Duration::hours(ttl_hours);
        let json = serde_json::to_string(summary).map_err(|e| cache_err("Failed to serialize summary", e))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO app_metadata (app_id, summary_json, cached_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![summary.id, json, now.to_rfc3339(), expires.to_rfc3339()],
            )
            .map_err(|e| cache_err("Failed to store summary", e))?;
        Ok(())
    }

    /// Number of live entries.
    pub fn live_count(&self) -> Result<usize, AppPicksError> {
        let now = Utc::now().to_rfc3339();
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM app_metadata WHERE expires_at > ?1",
                params![now],
                |row| row.get(0),
            )
            .map_err(|e| cache_err("Failed to count cache entries", e))?;
        Ok(count.max(0) as usize)
    }

    pub fn clear_expired(&self) -> Result<usize, AppPicksError> {
        let now = Utc::now().to_rfc3339();
        let count = self
            .conn
            .execute("DELETE FROM app_metadata WHERE expires_at <= ?1", params![now])
            .map_err(|e| cache_err("Failed to clear expired entries", e))?;
        info!("Cleared {} expired metadata entries", count);
        Ok(count)
    }

    /// Drop everything. Returns the number of deleted rows.
    pub fn clear(&self) -> Result<usize, AppPicksError> {
        let count = self
            .conn
            .execute("DELETE FROM app_metadata", [])
            .map_err(|e| cache_err("Failed to clear cache", e))?;
        info!("Cleared {} metadata entries", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn summary(id: &str, name: &str) -> AppSummary {
        AppSummary {
            id: id.to_string(),
            name: name.to_string(),
            subtitle: Some("An app".to_string()),
            icon: None,
        }
    }

    fn insert_expired(cache: &MetadataCache, s: &AppSummary) {
        let now = Utc::now();
        cache
            .conn
            .execute(
                "INSERT OR REPLACE INTO app_metadata (app_id, summary_json, cached_at, expires_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    s.id,
                    serde_json::to_string(s).unwrap(),
                    now.to_rfc3339(),
                    (now - Duration::hours(1)).to_rfc3339()
                ],
            )
            .unwrap();
    }

    #[test]
    fn test_put_and_get() {
        let dir = TempDir::new().unwrap();
        let cache = MetadataCache::new(&dir.path().join("test.db")).unwrap();
        cache.put(&summary("org.gimp.GIMP", "GIMP"), 24).unwrap();

        let cached = cache.get("org.gimp.GIMP").unwrap().unwrap();
        assert_eq!(cached.name, "GIMP");
        assert_eq!(cached.subtitle.as_deref(), Some("An app"));
        assert!(cache.get("org.inkscape.Inkscape").unwrap().is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = MetadataCache::new(&dir.path().join("test.db")).unwrap();
        insert_expired(&cache, &summary("old", "Old"));

        assert!(cache.get("old").unwrap().is_none());
        assert_eq!(cache.live_count().unwrap(), 0);
    }

    #[test]
    fn test_put_overwrites() {
        let dir = TempDir::new().unwrap();
        let cache = MetadataCache::new(&dir.path().join("test.db")).unwrap();
        cache.put(&summary("a", "First"), 24).unwrap();
        cache.put(&summary("a", "Second"), 24).unwrap();

        assert_eq!(cache.get("a").unwrap().unwrap().name, "Second");
        assert_eq!(cache.live_count().unwrap(), 1);
    }

    #[test]
    fn test_clear_expired_and_clear() {
        let dir = TempDir::new().unwrap();
        let cache = MetadataCache::new(&dir.path().join("test.db")).unwrap();
        cache.put(&summary("live", "Live"), 24).unwrap();
        insert_expired(&cache, &summary("stale", "Stale"));

        assert_eq!(cache.clear_expired().unwrap(), 1);
        assert!(cache.get("live").unwrap().is_some());

        assert_eq!(cache.clear().unwrap(), 1);
        assert_eq!(cache.live_count().unwrap(), 0);
    }

    #[test]
    fn test_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        MetadataCache::new(&path).unwrap().put(&summary("a", "A"), 24).unwrap();

        let reopened = MetadataCache::new(&path).unwrap();
        assert!(reopened.get("a").unwrap().is_some());
    }
}
