//! Response and request DTOs for the four graph operations.

use crate::edge::Edge;
use serde::{Deserialize, Serialize};

/// A resolvable node in a thread result: id plus its view-row index when the
/// post is inside the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRef {
    pub tweet_id: String,
    #[serde(default)]
    pub ls_index: Option<u32>,
}

/// Conversation thread around one post: ancestor chain (nearest parent
/// first), breadth-first descendants, and the reply edges touching the
/// component. Empty chain and descendants is a valid result for an isolated
/// post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadResponse {
    pub tweet_id: String,
    pub parent_chain: Vec<NodeRef>,
    pub descendants: Vec<NodeRef>,
    pub edges: Vec<Edge>,
}

/// Quote neighborhood of one post. Totals are counted before truncation;
/// `truncated` is true iff either list was cut to the limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesResponse {
    pub tweet_id: String,
    pub outgoing: Vec<Edge>,
    pub incoming: Vec<Edge>,
    pub outgoing_total: usize,
    pub incoming_total: usize,
    pub truncated: bool,
}

/// Bulk edge query result. `total` is the pre-cap count of edges matching
/// all filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeWindowResponse {
    pub edges: Vec<Edge>,
    pub total: usize,
    pub returned: usize,
    pub truncated: bool,
}

/// Body of the by-indices bulk edge query. Field values are kept loose here
/// (kind names as strings, indices as wide ints) and validated by the
/// service before any store access.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EdgeWindowRequest {
    #[serde(default)]
    pub indices: Option<Vec<i64>>,
    #[serde(default)]
    pub edge_kinds: Option<Vec<String>>,
    #[serde(default)]
    pub include_external: Option<bool>,
    #[serde(default)]
    pub max_edges: Option<i64>,
}

/// Output shape for the stats projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsFormat {
    #[default]
    Columns,
    Rows,
}
