//! LinkGraphService: the four graph operations over a cached snapshot.

use crate::cache::GraphCache;
use crate::overlay::{filter_edges, EdgeViewOptions, DEFAULT_MAX_EDGES};
use crate::projection::{project_stats, StatsProjection};
use crate::quotes::{build_quotes, DEFAULT_QUOTE_LIMIT};
use crate::thread::{build_thread, DEFAULT_CHAIN_LIMIT, DEFAULT_DESC_LIMIT};
use link_types::{
    validate_tweet_id, EdgeKind, EdgeStore, EdgeStoreError, EdgeWindowRequest,
    EdgeWindowResponse, QuotesResponse, StatsFormat, ThreadResponse,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Read path over one EdgeStore. The backend is chosen once at startup;
/// the cache is owned here so a service instance is all a router needs.
pub struct LinkGraphService {
    store: Arc<dyn EdgeStore>,
    cache: GraphCache,
}

impl LinkGraphService {
    pub fn new(store: Arc<dyn EdgeStore>) -> Self {
        Self {
            store,
            cache: GraphCache::new(),
        }
    }

    pub async fn thread(
        &self,
        dataset: &str,
        tweet_id: &str,
        chain_limit: Option<i64>,
        desc_limit: Option<i64>,
    ) -> Result<ThreadResponse, EdgeStoreError> {
        validate_tweet_id(tweet_id)?;
        let chain_limit = positive_or(chain_limit, DEFAULT_CHAIN_LIMIT);
        let desc_limit = positive_or(desc_limit, DEFAULT_DESC_LIMIT);
        let graph = self.cache.get_or_load(self.store.as_ref(), dataset).await?;
        Ok(build_thread(&graph, tweet_id, chain_limit, desc_limit))
    }

    pub async fn quotes(
        &self,
        dataset: &str,
        tweet_id: &str,
        limit: Option<i64>,
    ) -> Result<QuotesResponse, EdgeStoreError> {
        validate_tweet_id(tweet_id)?;
        let limit = positive_or(limit, DEFAULT_QUOTE_LIMIT);
        let graph = self.cache.get_or_load(self.store.as_ref(), dataset).await?;
        Ok(build_quotes(&graph, tweet_id, limit))
    }

    pub async fn edges_by_indices(
        &self,
        dataset: &str,
        request: &EdgeWindowRequest,
    ) -> Result<EdgeWindowResponse, EdgeStoreError> {
        let opts = view_options(request)?;
        let graph = self.cache.get_or_load(self.store.as_ref(), dataset).await?;
        Ok(filter_edges(&graph, &opts))
    }

    pub async fn node_stats(
        &self,
        dataset: &str,
        format: StatsFormat,
    ) -> Result<StatsProjection, EdgeStoreError> {
        let graph = self.cache.get_or_load(self.store.as_ref(), dataset).await?;
        let stats = graph.stats.as_deref().ok_or(EdgeStoreError::NotFound)?;
        Ok(project_stats(stats, format))
    }
}

/// Zero and negative limits fall back to the default; requests cannot turn
/// a bound off.
fn positive_or(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(v) if v > 0 => v as usize,
        _ => default,
    }
}

fn view_options(request: &EdgeWindowRequest) -> Result<EdgeViewOptions, EdgeStoreError> {
    let mut kinds: Vec<EdgeKind> = Vec::new();
    if let Some(ref names) = request.edge_kinds {
        for name in names {
            if name.trim().is_empty() {
                continue;
            }
            let kind = EdgeKind::parse(name).ok_or_else(|| {
                EdgeStoreError::InvalidInput(format!("unknown edge kind: {}", name))
            })?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
    }
    if kinds.is_empty() {
        kinds = vec![EdgeKind::Reply, EdgeKind::Quote];
    }

    let indices = match request.indices {
        Some(ref values) if !values.is_empty() => {
            let mut set = HashSet::with_capacity(values.len());
            for &value in values {
                let index = u32::try_from(value).map_err(|_| {
                    EdgeStoreError::InvalidInput(format!("index out of range: {}", value))
                })?;
                set.insert(index);
            }
            Some(set)
        }
        _ => None,
    };

    let max_edges = match request.max_edges {
        Some(v) if v >= 1 => v as usize,
        Some(_) => 1,
        None => DEFAULT_MAX_EDGES,
    };

    Ok(EdgeViewOptions {
        indices,
        kinds,
        include_external: request.include_external.unwrap_or(false),
        max_edges,
    })
}
