//! EdgeStore trait: the storage abstraction both backends implement.

use crate::edge::{Edge, EdgeKind};
use crate::stats::NodeStats;
use async_trait::async_trait;

/// Read access to a dataset's edge and statistics snapshots.
///
/// Implementations must be behaviorally interchangeable: given the same
/// logical rows, `get_edges` output must be field-for-field identical
/// regardless of backend. A dataset without a built graph yields
/// [`EdgeStoreError::NotFound`], which callers treat as "graph not built
/// yet" rather than a hard failure.
#[async_trait]
pub trait EdgeStore: Send + Sync {
    /// All edges for a dataset, optionally restricted to the given kinds.
    /// `None` means no kind filter.
    async fn get_edges(
        &self,
        dataset: &str,
        kinds: Option<&[EdgeKind]>,
    ) -> Result<Vec<Edge>, EdgeStoreError>;

    /// Per-post statistics rows for a dataset.
    async fn get_node_stats(&self, dataset: &str) -> Result<Vec<NodeStats>, EdgeStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EdgeStoreError {
    /// Dataset exists but its graph has not been built, or the dataset is
    /// unknown. Expected in normal operation; never logged as an error.
    #[error("links graph not found for dataset")]
    NotFound,
    /// Malformed identifier or parameter, rejected before querying.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Storage driver failure distinct from absence.
    #[error("storage backend error: {0}")]
    Upstream(String),
}
