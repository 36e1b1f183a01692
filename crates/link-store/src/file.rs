//! File-backed EdgeStore reading per-dataset JSONL snapshots.

use crate::retain_kinds;
use link_types::{
    validate_dataset_id, Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Reads one full snapshot per dataset on first request and caches the
/// parsed rows for process lifetime. Snapshots are immutable once built, so
/// cached sets are never invalidated; a rebuilt dataset is picked up by a
/// process restart.
///
/// Concurrent first requests for a cold dataset may each trigger a load;
/// loads are idempotent and the last insert wins.
pub struct FileEdgeStore {
    data_dir: PathBuf,
    edges: RwLock<HashMap<String, Arc<Vec<Edge>>>>,
    stats: RwLock<HashMap<String, Arc<Vec<NodeStats>>>>,
}

impl FileEdgeStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            edges: RwLock::new(HashMap::new()),
            stats: RwLock::new(HashMap::new()),
        }
    }

    fn links_dir(&self, dataset: &str) -> PathBuf {
        self.data_dir.join(dataset).join("links")
    }

    async fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, EdgeStoreError> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EdgeStoreError::NotFound);
            }
            Err(e) => return Err(EdgeStoreError::Upstream(e.to_string())),
        };
        let mut rows = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<T>(line) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    // Archival snapshots are noisy; a bad row is dropped, not fatal.
                    tracing::warn!(path = %path.display(), line = lineno + 1, error = %e, "skipping unparseable snapshot row");
                }
            }
        }
        Ok(rows)
    }

    async fn edges_for(&self, dataset: &str) -> Result<Arc<Vec<Edge>>, EdgeStoreError> {
        {
            let guard = self.edges.read().await;
            if let Some(cached) = guard.get(dataset) {
                return Ok(Arc::clone(cached));
            }
        }
        let path = self.links_dir(dataset).join("edges.jsonl");
        let mut rows: Vec<Edge> = Self::read_rows(&path).await?;
        for edge in &mut rows {
            edge.normalize();
        }
        let rows = Arc::new(rows);
        self.edges
            .write()
            .await
            .insert(dataset.to_string(), Arc::clone(&rows));
        Ok(rows)
    }

    async fn stats_for(&self, dataset: &str) -> Result<Arc<Vec<NodeStats>>, EdgeStoreError> {
        {
            let guard = self.stats.read().await;
            if let Some(cached) = guard.get(dataset) {
                return Ok(Arc::clone(cached));
            }
        }
        let path = self.links_dir(dataset).join("node_link_stats.jsonl");
        let rows = Arc::new(Self::read_rows::<NodeStats>(&path).await?);
        self.stats
            .write()
            .await
            .insert(dataset.to_string(), Arc::clone(&rows));
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl EdgeStore for FileEdgeStore {
    async fn get_edges(
        &self,
        dataset: &str,
        kinds: Option<&[EdgeKind]>,
    ) -> Result<Vec<Edge>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        let cached = self.edges_for(dataset).await?;
        let mut edges = cached.as_ref().clone();
        retain_kinds(&mut edges, kinds);
        Ok(edges)
    }

    async fn get_node_stats(&self, dataset: &str) -> Result<Vec<NodeStats>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        let cached = self.stats_for(dataset).await?;
        Ok(cached.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_snapshot(dir: &Path, dataset: &str, edges: &[&str], stats: Option<&[&str]>) {
        let links = dir.join(dataset).join("links");
        std::fs::create_dir_all(&links).unwrap();
        let mut f = std::fs::File::create(links.join("edges.jsonl")).unwrap();
        for line in edges {
            writeln!(f, "{}", line).unwrap();
        }
        if let Some(stats) = stats {
            let mut f = std::fs::File::create(links.join("node_link_stats.jsonl")).unwrap();
            for line in stats {
                writeln!(f, "{}", line).unwrap();
            }
        }
    }

    #[tokio::test]
    async fn missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEdgeStore::new(dir.path());
        match store.get_edges("absent", None).await {
            Err(EdgeStoreError::NotFound) => {}
            other => panic!("expected NotFound, got {:?}", other.map(|v| v.len())),
        }
    }

    #[tokio::test]
    async fn loads_normalizes_and_filters_kinds() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "ds",
            &[
                r#"{"edge_id":"e1","edge_kind":"reply","src_tweet_id":300,"dst_tweet_id":200,"src_ls_index":2,"dst_ls_index":1,"internal_target":false,"provenance":"native_field"}"#,
                r#"{"edge_id":"e2","edge_kind":"quote","src_tweet_id":"300","dst_tweet_id":"999","provenance":"url_extract","source_url":"https://example.com/999"}"#,
                r#"not json at all"#,
            ],
            None,
        );
        let store = FileEdgeStore::new(dir.path());

        let all = store.get_edges("ds", None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].src_tweet_id, "300");
        // internal_target recomputed from dst_ls_index
        assert!(all[0].internal_target);
        assert!(!all[1].internal_target);

        let replies = store
            .get_edges("ds", Some(&[EdgeKind::Reply]))
            .await
            .unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].edge_id.as_deref(), Some("e1"));
    }

    #[tokio::test]
    async fn snapshot_is_cached_after_first_load() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "ds",
            &[r#"{"edge_kind":"reply","src_tweet_id":"2","dst_tweet_id":"1","provenance":"native_field"}"#],
            None,
        );
        let store = FileEdgeStore::new(dir.path());
        assert_eq!(store.get_edges("ds", None).await.unwrap().len(), 1);

        // Deleting the file after the first read must not affect cached reads.
        std::fs::remove_file(dir.path().join("ds").join("links").join("edges.jsonl")).unwrap();
        assert_eq!(store.get_edges("ds", None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn stats_missing_while_edges_present() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "ds",
            &[r#"{"edge_kind":"reply","src_tweet_id":"2","dst_tweet_id":"1","provenance":"native_field"}"#],
            None,
        );
        let store = FileEdgeStore::new(dir.path());
        assert!(store.get_edges("ds", None).await.is_ok());
        assert!(matches!(
            store.get_node_stats("ds").await,
            Err(EdgeStoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn loads_stats_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(
            dir.path(),
            "ds",
            &[r#"{"edge_kind":"reply","src_tweet_id":"2","dst_tweet_id":"1","provenance":"native_field"}"#],
            Some(&[
                r#"{"tweet_id":100,"ls_index":0,"thread_root_id":100,"thread_depth":0,"thread_size":2,"reply_child_count":1,"reply_in_count":1,"reply_out_count":0,"quote_in_count":0,"quote_out_count":0}"#,
                r#"{"tweet_id":"200","ls_index":1,"thread_root_id":"100","thread_depth":1,"thread_size":2,"reply_child_count":0,"reply_in_count":0,"reply_out_count":1,"quote_in_count":0,"quote_out_count":0}"#,
            ]),
        );
        let store = FileEdgeStore::new(dir.path());
        let stats = store.get_node_stats("ds").await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].tweet_id, "100");
        assert_eq!(stats[0].thread_root_id, "100");
        assert_eq!(stats[1].thread_depth, 1);
    }

    #[tokio::test]
    async fn rejects_path_traversal_dataset_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileEdgeStore::new(dir.path());
        assert!(matches!(
            store.get_edges("../etc", None).await,
            Err(EdgeStoreError::InvalidInput(_))
        ));
    }
}
