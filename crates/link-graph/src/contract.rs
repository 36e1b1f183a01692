//! Shared shape assertions both EdgeStore backends must satisfy.
//!
//! These run in tests (and nowhere else): their job is to keep the two
//! backends from silently diverging as one evolves ahead of the other, not
//! to police runtime traffic.

use link_types::{Edge, NodeStatsColumns, Provenance};

#[derive(Debug, thiserror::Error)]
pub enum ContractViolation {
    #[error("edge {index}: {problem}")]
    Edge { index: usize, problem: String },
    #[error("stats columns have unequal lengths: {0:?}")]
    ColumnLengths([usize; 10]),
    #[error("backend outputs differ at edge {index}: {left} vs {right}")]
    BackendMismatch {
        index: usize,
        left: String,
        right: String,
    },
    #[error("backend outputs differ in length: {left} vs {right}")]
    BackendLength { left: usize, right: usize },
}

/// Field presence and nullability rules for a batch of edges.
pub fn check_edges(edges: &[Edge]) -> Result<(), ContractViolation> {
    for (index, edge) in edges.iter().enumerate() {
        let fail = |problem: &str| {
            Err(ContractViolation::Edge {
                index,
                problem: problem.to_string(),
            })
        };
        if edge.src_tweet_id.is_empty() || edge.dst_tweet_id.is_empty() {
            return fail("empty endpoint id");
        }
        if edge.edge_id.as_deref() == Some("") {
            return fail("edge_id present but empty");
        }
        if edge.internal_target != edge.dst_ls_index.is_some() {
            return fail("internal_target disagrees with dst_ls_index");
        }
        if edge.source_url.is_some() && edge.provenance != Provenance::UrlExtract {
            return fail("source_url present without url_extract provenance");
        }
        // Serialized enum membership, re-asserted on the wire form.
        let kind = serde_json::to_value(edge.edge_kind).ok();
        match kind.as_ref().and_then(|v| v.as_str()) {
            Some("reply") | Some("quote") => {}
            _ => return fail("edge_kind serializes outside {reply, quote}"),
        }
    }
    Ok(())
}

/// Column-length equality for projected statistics.
pub fn check_stats_columns(columns: &NodeStatsColumns) -> Result<(), ContractViolation> {
    let lengths = columns.column_lengths();
    if lengths.iter().any(|&len| len != lengths[0]) {
        return Err(ContractViolation::ColumnLengths(lengths));
    }
    Ok(())
}

/// Field-for-field equality of two backends' output for the same logical
/// edge set. Compared on the serialized form so value and type must match,
/// while field ordering inside a JSON object stays irrelevant.
pub fn check_edges_equivalent(left: &[Edge], right: &[Edge]) -> Result<(), ContractViolation> {
    if left.len() != right.len() {
        return Err(ContractViolation::BackendLength {
            left: left.len(),
            right: right.len(),
        });
    }
    for (index, (l, r)) in left.iter().zip(right).enumerate() {
        let lv = serde_json::to_value(l).unwrap_or_default();
        let rv = serde_json::to_value(r).unwrap_or_default();
        if lv != rv {
            return Err(ContractViolation::BackendMismatch {
                index,
                left: lv.to_string(),
                right: rv.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use link_types::{EdgeKind, NodeStats, NodeStatsColumns};

    fn edge() -> Edge {
        let mut edge = Edge {
            edge_id: Some("e1".to_string()),
            edge_kind: EdgeKind::Reply,
            src_tweet_id: "300".to_string(),
            dst_tweet_id: "200".to_string(),
            src_ls_index: Some(2),
            dst_ls_index: Some(1),
            internal_target: false,
            provenance: Provenance::NativeField,
            source_url: None,
        };
        edge.normalize();
        edge
    }

    #[test]
    fn well_formed_edges_pass() {
        assert!(check_edges(&[edge()]).is_ok());
    }

    #[test]
    fn stale_internal_target_is_caught() {
        let mut bad = edge();
        bad.internal_target = false; // dst_ls_index is Some(1)
        assert!(check_edges(&[bad]).is_err());
    }

    #[test]
    fn source_url_requires_url_extract() {
        let mut bad = edge();
        bad.source_url = Some("https://example.com".to_string());
        assert!(check_edges(&[bad]).is_err());
    }

    #[test]
    fn unequal_columns_are_caught() {
        let mut columns = NodeStatsColumns::default();
        columns.push(&NodeStats {
            tweet_id: "a".to_string(),
            ls_index: 0,
            thread_root_id: "a".to_string(),
            thread_depth: 0,
            thread_size: 1,
            reply_child_count: 0,
            reply_in_count: 0,
            reply_out_count: 0,
            quote_in_count: 0,
            quote_out_count: 0,
        });
        columns.ls_index.push(1); // simulate a skewed projection
        assert!(check_stats_columns(&columns).is_err());
    }

    #[test]
    fn equivalence_detects_value_drift() {
        let a = edge();
        let mut b = edge();
        b.src_ls_index = Some(3);
        assert!(check_edges_equivalent(&[a.clone()], &[a.clone()]).is_ok());
        assert!(check_edges_equivalent(&[a], &[b]).is_err());
    }
}
