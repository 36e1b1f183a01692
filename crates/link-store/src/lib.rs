//! EdgeStore backends: per-dataset file snapshots and Qdrant tables.

mod file;

#[cfg(feature = "qdrant")]
mod qdrant_store;

#[cfg(any(test, feature = "test-util"))]
mod static_store;

pub use file::FileEdgeStore;
pub use link_types::{Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats};

#[cfg(feature = "qdrant")]
pub use qdrant_store::QdrantEdgeStore;

#[cfg(any(test, feature = "test-util"))]
pub use static_store::StaticEdgeStore;

/// Kind filter shared by backends that filter in memory.
pub(crate) fn retain_kinds(edges: &mut Vec<Edge>, kinds: Option<&[EdgeKind]>) {
    if let Some(kinds) = kinds {
        edges.retain(|e| kinds.contains(&e.edge_kind));
    }
}
