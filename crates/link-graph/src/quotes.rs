//! Quote neighborhood: who quotes a post, what it quotes.

use crate::cache::DatasetGraph;
use link_types::{EdgeKind, QuotesResponse};

pub const DEFAULT_QUOTE_LIMIT: usize = 2000;

/// Split the quote subgraph around `tweet_id` into outgoing and incoming
/// edges. Totals are recorded before truncation; each list is truncated to
/// `limit` independently.
pub fn build_quotes(graph: &DatasetGraph, tweet_id: &str, limit: usize) -> QuotesResponse {
    let mut outgoing = Vec::new();
    let mut incoming = Vec::new();
    let mut outgoing_total = 0usize;
    let mut incoming_total = 0usize;

    for edge in graph.edges_of_kind(EdgeKind::Quote) {
        if edge.src_tweet_id == tweet_id {
            outgoing_total += 1;
            if outgoing.len() < limit {
                outgoing.push(edge.clone());
            }
        }
        // A self-quote counts on both sides, like any other edge.
        if edge.dst_tweet_id == tweet_id {
            incoming_total += 1;
            if incoming.len() < limit {
                incoming.push(edge.clone());
            }
        }
    }

    let truncated = outgoing_total > outgoing.len() || incoming_total > incoming.len();
    QuotesResponse {
        tweet_id: tweet_id.to_string(),
        outgoing,
        incoming,
        outgoing_total,
        incoming_total,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use link_types::{Edge, Provenance};

    fn quote(src: &str, dst: &str) -> Edge {
        let mut edge = Edge {
            edge_id: None,
            edge_kind: EdgeKind::Quote,
            src_tweet_id: src.to_string(),
            dst_tweet_id: dst.to_string(),
            src_ls_index: None,
            dst_ls_index: None,
            internal_target: false,
            provenance: Provenance::UrlExtract,
            source_url: Some(format!("https://example.com/{}", dst)),
        };
        edge.normalize();
        edge
    }

    fn graph(edges: Vec<Edge>) -> DatasetGraph {
        DatasetGraph { edges, stats: None }
    }

    #[test]
    fn splits_incoming_and_outgoing() {
        let g = graph(vec![quote("A", "B"), quote("C", "B"), quote("B", "D")]);
        let q = build_quotes(&g, "B", DEFAULT_QUOTE_LIMIT);
        assert_eq!(q.incoming.len(), 2);
        assert_eq!(q.outgoing.len(), 1);
        assert_eq!(q.incoming_total, 2);
        assert_eq!(q.outgoing_total, 1);
        assert!(!q.truncated);
    }

    #[test]
    fn truncation_keeps_true_totals() {
        let g = graph(vec![quote("A", "B"), quote("C", "B")]);
        let q = build_quotes(&g, "B", 1);
        assert_eq!(q.incoming.len(), 1);
        assert_eq!(q.incoming_total, 2);
        assert!(q.truncated);
    }

    #[test]
    fn no_quotes_is_a_valid_result() {
        let g = graph(Vec::new());
        let q = build_quotes(&g, "B", DEFAULT_QUOTE_LIMIT);
        assert_eq!(q.outgoing_total, 0);
        assert_eq!(q.incoming_total, 0);
        assert!(!q.truncated);
    }
}
