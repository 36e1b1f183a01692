//! Seedable in-memory EdgeStore for tests (feature "test-util").

use crate::retain_kinds;
use link_types::{
    validate_dataset_id, Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats,
};
use std::collections::HashMap;

/// In-memory store seeded with fixed rows. Applies the same normalization as
/// the production backends so contract tests compare like with like.
#[derive(Default)]
pub struct StaticEdgeStore {
    datasets: HashMap<String, DatasetRows>,
}

struct DatasetRows {
    edges: Vec<Edge>,
    stats: Option<Vec<NodeStats>>,
}

impl StaticEdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(
        mut self,
        dataset: &str,
        mut edges: Vec<Edge>,
        stats: Option<Vec<NodeStats>>,
    ) -> Self {
        for edge in &mut edges {
            edge.normalize();
        }
        self.datasets
            .insert(dataset.to_string(), DatasetRows { edges, stats });
        self
    }
}

#[async_trait::async_trait]
impl EdgeStore for StaticEdgeStore {
    async fn get_edges(
        &self,
        dataset: &str,
        kinds: Option<&[EdgeKind]>,
    ) -> Result<Vec<Edge>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        let rows = self.datasets.get(dataset).ok_or(EdgeStoreError::NotFound)?;
        let mut edges = rows.edges.clone();
        retain_kinds(&mut edges, kinds);
        Ok(edges)
    }

    async fn get_node_stats(&self, dataset: &str) -> Result<Vec<NodeStats>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        self.datasets
            .get(dataset)
            .and_then(|rows| rows.stats.clone())
            .ok_or(EdgeStoreError::NotFound)
    }
}
