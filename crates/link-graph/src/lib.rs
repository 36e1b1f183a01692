//! Graph cache and traversal engine over reply/quote edge snapshots.

mod cache;
mod contract;
mod overlay;
mod projection;
mod quotes;
mod service;
mod thread;

pub use cache::{DatasetGraph, GraphCache};
pub use contract::{
    check_edges, check_edges_equivalent, check_stats_columns, ContractViolation,
};
pub use link_types::{Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats};
pub use overlay::{filter_edges, EdgeViewOptions, DEFAULT_MAX_EDGES};
pub use projection::{project_stats, StatsProjection};
pub use quotes::{build_quotes, DEFAULT_QUOTE_LIMIT};
pub use service::LinkGraphService;
pub use thread::{build_thread, COMPONENT_EDGE_CAP, DEFAULT_CHAIN_LIMIT, DEFAULT_DESC_LIMIT};
