use crate::{config::ProcessorConfig, error::ProcessorError};
use reqwest::Client;
use std::{collections::HashMap, path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Flat-file cache of raw `.osu` content, keyed by map id.
///
/// A cached file is never invalidated: map content is immutable once
/// published, so staleness is an accepted tradeoff. Concurrent `ensure`
/// calls for the same id are deduplicated through a per-id once-cell so a
/// map is downloaded and written at most once per run.
pub struct BeatmapCache {
    dir: PathBuf,
    download_base: String,
    client: Client,
    inflight: Mutex<HashMap<u32, Arc<OnceCell<PathBuf>>>>
}

impl BeatmapCache {
    pub fn new(config: &ProcessorConfig) -> Self {
        Self {
            dir: config.cache_dir.clone(),
            download_base: config.map_download_base.clone(),
            client: Client::new(),
            inflight: Mutex::new(HashMap::new())
        }
    }

    /// Guarantees local availability of the map's raw content and returns
    /// its path.
    ///
    /// An existing file is returned unchanged with no freshness check.
    /// Otherwise the content is fetched once and persisted; any network or
    /// write failure is a [`ProcessorError::Fetch`] and fatal to the run.
    pub async fn ensure(&self, map_id: u32) -> Result<PathBuf, ProcessorError> {
        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight.entry(map_id).or_default().clone()
        };

        cell.get_or_try_init(|| self.fetch(map_id)).await.cloned()
    }

    async fn fetch(&self, map_id: u32) -> Result<PathBuf, ProcessorError> {
        let path = self.dir.join(format!("{map_id}.osu"));

        if tokio::fs::try_exists(&path)
            .await
            .map_err(|e| ProcessorError::Fetch(format!("probing cache for map {map_id}: {e}")))?
        {
            debug!("Cache hit for map {map_id}");
            return Ok(path);
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ProcessorError::Fetch(format!("creating cache directory: {e}")))?;

        debug!("Downloading map {map_id}");
        let bytes = self
            .client
            .get(format!("{}/{map_id}", self.download_base))
            .send()
            .await
            .map_err(|e| ProcessorError::Fetch(format!("downloading map {map_id}: {e}")))?
            .error_for_status()
            .map_err(|e| ProcessorError::Fetch(format!("downloading map {map_id}: {e}")))?
            .bytes()
            .await
            .map_err(|e| ProcessorError::Fetch(format!("downloading map {map_id}: {e}")))?;

        // The download endpoint answers unknown ids with an empty 200
        if bytes.is_empty() {
            return Err(ProcessorError::Fetch(format!("map {map_id} has no downloadable content")));
        }

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| ProcessorError::Fetch(format!("writing map {map_id} to cache: {e}")))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn cache_at(dir: &std::path::Path) -> BeatmapCache {
        let config = ProcessorConfig {
            cache_dir: dir.to_path_buf(),
            // Unroutable on purpose: any fetch attempt fails the test
            map_download_base: "http://127.0.0.1:1/osu".to_string(),
            ..ProcessorConfig::default()
        };

        BeatmapCache::new(&config)
    }

    /// Serves `.osu` bytes over loopback and counts how many downloads hit it.
    async fn map_server(hits: Arc<AtomicUsize>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            loop {
                let (mut stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => return
                };
                hits.fetch_add(1, Ordering::SeqCst);

                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request).await;

                let body = "osu file format v14";
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
            }
        });

        format!("http://{addr}/osu")
    }

    #[tokio::test]
    async fn test_existing_file_returned_without_fetch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("42.osu"), "osu file format v14").unwrap();

        let cache = cache_at(dir.path());
        let path = cache.ensure(42).await.unwrap();

        assert_eq!(path, dir.path().join("42.osu"));
    }

    #[tokio::test]
    async fn test_repeated_ensure_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("7.osu"), "osu file format v14").unwrap();

        let cache = cache_at(dir.path());
        let first = cache.ensure(7).await.unwrap();
        let second = cache.ensure(7).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_ensures_download_exactly_once() {
        // Arrange
        let hits = Arc::new(AtomicUsize::new(0));
        let download_base = map_server(hits.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let config = ProcessorConfig {
            cache_dir: dir.path().to_path_buf(),
            map_download_base: download_base,
            ..ProcessorConfig::default()
        };
        let cache = BeatmapCache::new(&config);

        // Act: three concurrent requests for the same id
        let (first, second, third) = tokio::join!(cache.ensure(77), cache.ensure(77), cache.ensure(77));

        // Assert: all callers get the same path from a single download
        let path = first.unwrap();
        assert_eq!(path, second.unwrap());
        assert_eq!(path, third.unwrap());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "osu file format v14");
    }

    #[tokio::test]
    async fn test_later_runs_perform_zero_fetches() {
        let hits = Arc::new(AtomicUsize::new(0));
        let download_base = map_server(hits.clone()).await;
        let dir = tempfile::tempdir().unwrap();
        let config = ProcessorConfig {
            cache_dir: dir.path().to_path_buf(),
            map_download_base: download_base,
            ..ProcessorConfig::default()
        };

        // First run downloads once
        let cache = BeatmapCache::new(&config);
        cache.ensure(77).await.unwrap();
        cache.ensure(77).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // A fresh cache over the same directory finds the file on disk
        let cache = BeatmapCache::new(&config);
        cache.ensure(77).await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_map_fails_with_fetch_error() {
        let dir = tempfile::tempdir().unwrap();

        let cache = cache_at(dir.path());
        let result = cache.ensure(9999).await;

        assert!(matches!(result, Err(ProcessorError::Fetch(_))));
    }
}
