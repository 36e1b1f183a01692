//! Row- and column-oriented projections of node statistics.

use link_types::{NodeStats, NodeStatsColumns, StatsFormat};
use serde::Serialize;

/// Projected statistics in the shape the caller asked for. Column output is
/// the compact default for UI payloads; rows are the debug-friendly form.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatsProjection {
    Rows(Vec<NodeStats>),
    Columns(NodeStatsColumns),
}

pub fn project_stats(rows: &[NodeStats], format: StatsFormat) -> StatsProjection {
    match format {
        StatsFormat::Rows => StatsProjection::Rows(rows.to_vec()),
        StatsFormat::Columns => {
            let mut columns = NodeStatsColumns::with_capacity(rows.len());
            for row in rows {
                columns.push(row);
            }
            StatsProjection::Columns(columns)
        }
    }
}
