//! Per-dataset memoization of loaded edge/statistics snapshots.

use link_types::{Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// One dataset's loaded snapshot: the full edge set plus statistics when the
/// stats table was built. Immutable once constructed.
pub struct DatasetGraph {
    pub edges: Vec<Edge>,
    pub stats: Option<Vec<NodeStats>>,
}

impl DatasetGraph {
    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.edge_kind == kind)
    }

    /// tweet_id -> ls_index, resolved from stats rows first and filled from
    /// edge-carried indices for posts outside the stats table.
    pub fn ls_index_lookup(&self) -> HashMap<&str, u32> {
        let mut lookup: HashMap<&str, u32> = HashMap::new();
        if let Some(ref stats) = self.stats {
            for row in stats {
                lookup.insert(row.tweet_id.as_str(), row.ls_index);
            }
        }
        for edge in &self.edges {
            if let Some(idx) = edge.src_ls_index {
                lookup.entry(edge.src_tweet_id.as_str()).or_insert(idx);
            }
            if let Some(idx) = edge.dst_ls_index {
                lookup.entry(edge.dst_tweet_id.as_str()).or_insert(idx);
            }
        }
        lookup
    }
}

/// Explicit cache object constructed once at startup and handed to the
/// service by reference; tests build a fresh one per case.
///
/// Loads are lazy. Concurrent requests for a cold dataset are not
/// deduplicated: each may trigger a load, loads are idempotent and
/// side-effect-free, and the last insert wins. Once populated, reads hand
/// out `Arc` clones of an immutable snapshot.
#[derive(Default)]
pub struct GraphCache {
    inner: RwLock<HashMap<String, Arc<DatasetGraph>>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(
        &self,
        store: &dyn EdgeStore,
        dataset: &str,
    ) -> Result<Arc<DatasetGraph>, EdgeStoreError> {
        {
            let guard = self.inner.read().await;
            if let Some(cached) = guard.get(dataset) {
                return Ok(Arc::clone(cached));
            }
        }

        let edges = store.get_edges(dataset, None).await?;
        // Stats are optional: a dataset can have edges without a stats build.
        let stats = match store.get_node_stats(dataset).await {
            Ok(rows) => Some(rows),
            Err(EdgeStoreError::NotFound) => None,
            Err(e) => return Err(e),
        };
        tracing::debug!(
            dataset,
            edges = edges.len(),
            has_stats = stats.is_some(),
            "loaded link graph snapshot"
        );

        let graph = Arc::new(DatasetGraph { edges, stats });
        self.inner
            .write()
            .await
            .insert(dataset.to_string(), Arc::clone(&graph));
        Ok(graph)
    }
}
