//! Qdrant-backed EdgeStore (requires feature "qdrant").
//!
//! Each dataset maps to a pair of collections, `{dataset}__edges` and
//! `{dataset}__node_stats`, written wholesale by the upstream build with one
//! point per row. Index columns are stored with a `-1` sentinel because the
//! table schema has no nullable ints; the sentinel is collapsed back to a
//! real null here so both backends produce identical rows.

use crate::retain_kinds;
use link_types::{
    validate_dataset_id, Edge, EdgeKind, EdgeStore, EdgeStoreError, NodeStats,
};
use qdrant_client::qdrant::{value::Kind as ValueKind, Condition, Filter, ScrollPointsBuilder};
use qdrant_client::Qdrant;
use std::collections::HashMap;
use std::sync::Arc;

const SCROLL_PAGE: u32 = 1000;

/// Qdrant-backed implementation of EdgeStore.
pub struct QdrantEdgeStore {
    client: Arc<Qdrant>,
}

impl QdrantEdgeStore {
    pub fn new(url: &str) -> Result<Self, EdgeStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| EdgeStoreError::Upstream(e.to_string()))?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    fn edges_collection(dataset: &str) -> String {
        format!("{}__edges", dataset)
    }

    fn stats_collection(dataset: &str) -> String {
        format!("{}__node_stats", dataset)
    }

    /// Full scroll of a collection, returning row payloads as JSON objects.
    /// A missing collection is "graph not built yet", not a driver failure.
    async fn scroll_rows(
        &self,
        collection: &str,
        filter: Option<Filter>,
    ) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, EdgeStoreError> {
        let exists = self
            .client
            .collection_exists(collection)
            .await
            .map_err(|e| EdgeStoreError::Upstream(e.to_string()))?;
        if !exists {
            return Err(EdgeStoreError::NotFound);
        }

        let mut rows = Vec::new();
        let mut offset = None;
        loop {
            let mut builder = ScrollPointsBuilder::new(collection)
                .limit(SCROLL_PAGE)
                .with_payload(true)
                .with_vectors(false);
            if let Some(ref f) = filter {
                builder = builder.filter(f.clone());
            }
            if let Some(off) = offset.take() {
                builder = builder.offset(off);
            }
            let response = self
                .client
                .scroll(builder)
                .await
                .map_err(|e| EdgeStoreError::Upstream(e.to_string()))?;
            for point in response.result {
                rows.push(json_object_from_payload(point.payload));
            }
            match response.next_page_offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl EdgeStore for QdrantEdgeStore {
    async fn get_edges(
        &self,
        dataset: &str,
        kinds: Option<&[EdgeKind]>,
    ) -> Result<Vec<Edge>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        let filter = kinds.map(|kinds| {
            Filter::should(
                kinds
                    .iter()
                    .map(|k| Condition::matches("edge_kind", k.as_str().to_string()))
                    .collect::<Vec<_>>(),
            )
        });
        let rows = self
            .scroll_rows(&Self::edges_collection(dataset), filter)
            .await?;
        let mut edges = Vec::with_capacity(rows.len());
        for row in rows {
            match edge_from_row(row) {
                Some(edge) => edges.push(edge),
                None => tracing::warn!(dataset, "skipping malformed edge payload"),
            }
        }
        // The scroll filter already restricted kinds, but a concurrently
        // rebuilt table may momentarily mix rows; re-filtering keeps the
        // contract exact.
        retain_kinds(&mut edges, kinds);
        Ok(edges)
    }

    async fn get_node_stats(&self, dataset: &str) -> Result<Vec<NodeStats>, EdgeStoreError> {
        validate_dataset_id(dataset)?;
        let rows = self
            .scroll_rows(&Self::stats_collection(dataset), None)
            .await?;
        let mut stats = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<NodeStats>(serde_json::Value::Object(row)) {
                Ok(row) => stats.push(row),
                Err(e) => tracing::warn!(dataset, error = %e, "skipping malformed node stats payload"),
            }
        }
        Ok(stats)
    }
}

/// Translate a point payload into a JSON object, mapping Qdrant value kinds
/// onto their JSON counterparts.
fn json_object_from_payload(
    payload: HashMap<String, qdrant_client::qdrant::Value>,
) -> serde_json::Map<String, serde_json::Value> {
    payload
        .into_iter()
        .map(|(k, v)| (k, json_from_qdrant_value(v)))
        .collect()
}

fn json_from_qdrant_value(value: qdrant_client::qdrant::Value) -> serde_json::Value {
    match value.kind {
        Some(ValueKind::StringValue(s)) => serde_json::Value::String(s),
        Some(ValueKind::IntegerValue(i)) => serde_json::Value::Number(serde_json::Number::from(i)),
        Some(ValueKind::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(ValueKind::BoolValue(b)) => serde_json::Value::Bool(b),
        _ => serde_json::Value::Null,
    }
}

/// Deserialize one edge row, applying the shared normalization. The serde
/// layer already collapses the `-1` index sentinel to `None`.
fn edge_from_row(row: serde_json::Map<String, serde_json::Value>) -> Option<Edge> {
    let mut edge: Edge = serde_json::from_value(serde_json::Value::Object(row)).ok()?;
    edge.normalize();
    Some(edge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use link_types::Provenance;

    fn row(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn sentinel_index_becomes_null() {
        let edge = edge_from_row(row(&[
            ("edge_id", serde_json::json!("e1")),
            ("edge_kind", serde_json::json!("reply")),
            ("src_tweet_id", serde_json::json!("300")),
            ("dst_tweet_id", serde_json::json!("999")),
            ("src_ls_index", serde_json::json!(4)),
            ("dst_ls_index", serde_json::json!(-1)),
            ("internal_target", serde_json::json!(true)),
            ("provenance", serde_json::json!("native_field")),
            ("source_url", serde_json::json!("")),
        ]))
        .unwrap();
        assert_eq!(edge.src_ls_index, Some(4));
        assert_eq!(edge.dst_ls_index, None);
        // flag re-derived from the normalized index, not the stored bool
        assert!(!edge.internal_target);
        assert_eq!(edge.source_url, None);
        assert_eq!(edge.provenance, Provenance::NativeField);
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        assert!(edge_from_row(row(&[("edge_kind", serde_json::json!("retweet"))])).is_none());
    }

    #[test]
    fn qdrant_values_map_onto_json() {
        let mut payload = HashMap::new();
        payload.insert(
            "src_ls_index".to_string(),
            qdrant_client::qdrant::Value::from(7_i64),
        );
        payload.insert(
            "src_tweet_id".to_string(),
            qdrant_client::qdrant::Value::from("300"),
        );
        let obj = json_object_from_payload(payload);
        assert_eq!(obj["src_ls_index"], serde_json::json!(7));
        assert_eq!(obj["src_tweet_id"], serde_json::json!("300"));
    }
}
