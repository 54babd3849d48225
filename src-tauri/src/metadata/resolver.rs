use std::collections::HashMap;
use std::path::PathBuf;

use tokio::task::JoinSet;
use tracing::{info, warn};

use super::{MetadataCache, CACHE_TTL_HOURS};
use crate::api::types::AppSummary;
use crate::api::CatalogClient;
use crate::error::AppPicksError;

/// Upper bound on concurrent appstream requests.
const MAX_IN_FLIGHT: usize = 16;

/// Turns app ids into summaries: cache first, then the appstream endpoint.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    client: CatalogClient,
    db_path: Option<PathBuf>,
}

impl MetadataResolver {
    /// Without a `db_path` every lookup goes to the network.
    pub fn new(client: CatalogClient, db_path: Option<PathBuf>) -> Self {
        Self { client, db_path }
    }

    /// Resolve one app, failing if its metadata cannot be fetched.
    pub async fn resolve_one(&self, app_id: &str) -> Result<AppSummary, AppPicksError> {
        let ids = [app_id.to_string()];
        if let Some(found) = self.cached(&ids).await.remove(app_id) {
            return Ok(found);
        }
        let summary = AppSummary::from(self.client.appstream(app_id).await?);
        self.store(vec![summary.clone()]).await;
        Ok(summary)
    }

    /// Resolve many apps. Apps whose metadata cannot be fetched are logged and
    /// left out of the result.
    pub async fn resolve(&self, app_ids: &[String]) -> HashMap<String, AppSummary> {
        let mut found = self.cached(app_ids).await;
        let mut missing: Vec<String> = app_ids
            .iter()
            .filter(|id| !found.contains_key(*id))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();

        if missing.is_empty() {
            return found;
        }
        info!("Fetching metadata for {} apps ({} cached)", missing.len(), found.len());

        let mut fetched = Vec::with_capacity(missing.len());
        let mut pending = missing.into_iter();
        let mut tasks = JoinSet::new();
        loop {
            while tasks.len() < MAX_IN_FLIGHT {
                let Some(id) = pending.next() else { break };
                let client = self.client.clone();
                tasks.spawn(async move {
                    let result = client.appstream(&id).await;
                    (id, result)
                });
            }
            let Some(joined) = tasks.join_next().await else { break };
            match joined {
                Ok((_, Ok(appstream))) => fetched.push(AppSummary::from(appstream)),
                Ok((id, Err(e))) => warn!("Skipping {}: {}", id, e),
                Err(e) => warn!("Metadata task failed: {}", e),
            }
        }

        self.store(fetched.clone()).await;
        found.extend(fetched.into_iter().map(|s| (s.id.clone(), s)));
        found
    }

    async fn cached(&self, app_ids: &[String]) -> HashMap<String, AppSummary> {
        let Some(path) = self.db_path.clone() else {
            return HashMap::new();
        };
        let ids = app_ids.to_vec();
        let lookup = tokio::task::spawn_blocking(move || {
            let cache = MetadataCache::new(&path)?;
            let mut hits = HashMap::new();
            for id in ids {
                if let Some(summary) = cache.get(&id)? {
                    hits.insert(id, summary);
                }
            }
            Ok::<_, AppPicksError>(hits)
        })
        .await;

        match lookup {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => {
                warn!("Metadata cache lookup failed, fetching everything: {}", e);
                HashMap::new()
            }
            Err(e) => {
                warn!("Metadata cache task panicked: {}", e);
                HashMap::new()
            }
        }
    }

    async fn store(&self, summaries: Vec<AppSummary>) {
        let Some(path) = self.db_path.clone() else {
            return;
        };
        if summaries.is_empty() {
            return;
        }
        let stored = tokio::task::spawn_blocking(move || {
            let cache = MetadataCache::new(&path)?;
            for summary in &summaries {
                cache.put(summary, CACHE_TTL_HOURS)?;
            }
            Ok::<_, AppPicksError>(summaries.len())
        })
        .await;

        match stored {
            Ok(Ok(n)) => info!("Cached metadata for {} apps", n),
            Ok(Err(e)) => warn!("Failed to cache metadata: {}", e),
            Err(e) => warn!("Metadata cache task panicked: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Nothing listens here, so any network lookup fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn summary(id: &str) -> AppSummary {
        AppSummary {
            id: id.to_string(),
            name: id.to_uppercase(),
            subtitle: None,
            icon: None,
        }
    }

    fn seeded(dir: &TempDir, ids: &[&str]) -> PathBuf {
        let path = dir.path().join("metadata.db");
        let cache = MetadataCache::new(&path).unwrap();
        for id in ids {
            cache.put(&summary(id), 24).unwrap();
        }
        path
    }

    #[tokio::test]
    async fn test_all_cached_needs_no_network() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, &["a", "b"]);
        let client = CatalogClient::new(UNREACHABLE, None).unwrap();
        let resolver = MetadataResolver::new(client, Some(path));

        let found = resolver.resolve(&["a".to_string(), "b".to_string()]).await;
        assert_eq!(found.len(), 2);
        assert_eq!(found["b"].name, "B");

        assert_eq!(resolver.resolve_one("a").await.unwrap().name, "A");
    }

    #[tokio::test]
    async fn test_unfetchable_apps_are_left_out() {
        let dir = TempDir::new().unwrap();
        let path = seeded(&dir, &["a"]);
        let client = CatalogClient::new(UNREACHABLE, None).unwrap();
        let resolver = MetadataResolver::new(client, Some(path));

        let found = resolver.resolve(&["a".to_string(), "missing".to_string()]).await;
        assert_eq!(found.len(), 1);
        assert!(found.contains_key("a"));

        assert!(resolver.resolve_one("missing").await.is_err());
    }
}
