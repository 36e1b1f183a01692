//! Index-filtered edge view used for bulk edge overlays on the map.

use crate::cache::DatasetGraph;
use link_types::{Edge, EdgeKind, EdgeWindowResponse};
use std::collections::HashSet;

pub const DEFAULT_MAX_EDGES: usize = 5000;

/// Filters for a bulk edge query. `indices: None` means no index filter, not
/// "no results".
#[derive(Debug, Clone)]
pub struct EdgeViewOptions {
    pub indices: Option<HashSet<u32>>,
    pub kinds: Vec<EdgeKind>,
    pub include_external: bool,
    pub max_edges: usize,
}

impl Default for EdgeViewOptions {
    fn default() -> Self {
        Self {
            indices: None,
            kinds: vec![EdgeKind::Reply, EdgeKind::Quote],
            include_external: false,
            max_edges: DEFAULT_MAX_EDGES,
        }
    }
}

/// Apply kind, index-membership, and externality filters, then cap.
/// `total` counts all matches before the cap.
pub fn filter_edges(graph: &DatasetGraph, opts: &EdgeViewOptions) -> EdgeWindowResponse {
    let in_index_set = |edge: &Edge| match opts.indices {
        None => true,
        Some(ref set) => {
            edge.src_ls_index.is_some_and(|i| set.contains(&i))
                || edge.dst_ls_index.is_some_and(|i| set.contains(&i))
        }
    };

    let mut total = 0usize;
    let mut edges = Vec::new();
    for edge in &graph.edges {
        if !opts.kinds.contains(&edge.edge_kind) {
            continue;
        }
        if !in_index_set(edge) {
            continue;
        }
        if !opts.include_external && edge.dst_ls_index.is_none() {
            continue;
        }
        total += 1;
        if edges.len() < opts.max_edges {
            edges.push(edge.clone());
        }
    }

    let returned = edges.len();
    EdgeWindowResponse {
        edges,
        total,
        returned,
        truncated: total > returned,
    }
}
