//! Per-post statistics computed by the upstream graph build.

use crate::edge::{de_id, de_index};
use serde::{Deserialize, Serialize};

/// One row per post with a computed `ls_index`.
///
/// `thread_root_id` is the topmost ancestor reachable via reply edges (self
/// if the post is a root or sits on a cycle); depth/size/degree counts are
/// precomputed so UIs can badge posts without re-walking the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStats {
    #[serde(deserialize_with = "de_id")]
    pub tweet_id: String,
    #[serde(deserialize_with = "de_index")]
    pub ls_index: u32,
    #[serde(deserialize_with = "de_id")]
    pub thread_root_id: String,
    #[serde(default)]
    pub thread_depth: u32,
    #[serde(default = "default_thread_size")]
    pub thread_size: u32,
    #[serde(default)]
    pub reply_child_count: u32,
    #[serde(default)]
    pub reply_in_count: u32,
    #[serde(default)]
    pub reply_out_count: u32,
    #[serde(default)]
    pub quote_in_count: u32,
    #[serde(default)]
    pub quote_out_count: u32,
}

fn default_thread_size() -> u32 {
    1
}

/// Column-oriented projection of [`NodeStats`] rows.
///
/// Every vector is index-aligned to the input row order and all vectors have
/// identical length.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeStatsColumns {
    pub ls_index: Vec<u32>,
    pub tweet_id: Vec<String>,
    pub thread_root_id: Vec<String>,
    pub thread_depth: Vec<u32>,
    pub thread_size: Vec<u32>,
    pub reply_child_count: Vec<u32>,
    pub reply_in_count: Vec<u32>,
    pub reply_out_count: Vec<u32>,
    pub quote_in_count: Vec<u32>,
    pub quote_out_count: Vec<u32>,
}

impl NodeStatsColumns {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            ls_index: Vec::with_capacity(n),
            tweet_id: Vec::with_capacity(n),
            thread_root_id: Vec::with_capacity(n),
            thread_depth: Vec::with_capacity(n),
            thread_size: Vec::with_capacity(n),
            reply_child_count: Vec::with_capacity(n),
            reply_in_count: Vec::with_capacity(n),
            reply_out_count: Vec::with_capacity(n),
            quote_in_count: Vec::with_capacity(n),
            quote_out_count: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, row: &NodeStats) {
        self.ls_index.push(row.ls_index);
        self.tweet_id.push(row.tweet_id.clone());
        self.thread_root_id.push(row.thread_root_id.clone());
        self.thread_depth.push(row.thread_depth);
        self.thread_size.push(row.thread_size);
        self.reply_child_count.push(row.reply_child_count);
        self.reply_in_count.push(row.reply_in_count);
        self.reply_out_count.push(row.reply_out_count);
        self.quote_in_count.push(row.quote_in_count);
        self.quote_out_count.push(row.quote_out_count);
    }

    /// Lengths of every column, in declaration order.
    pub fn column_lengths(&self) -> [usize; 10] {
        [
            self.ls_index.len(),
            self.tweet_id.len(),
            self.thread_root_id.len(),
            self.thread_depth.len(),
            self.thread_size.len(),
            self.reply_child_count.len(),
            self.reply_in_count.len(),
            self.reply_out_count.len(),
            self.quote_in_count.len(),
            self.quote_out_count.len(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_row_accepts_numeric_ids_and_defaults() {
        let raw = r#"{"tweet_id": 100, "ls_index": 0, "thread_root_id": "100"}"#;
        let row: NodeStats = serde_json::from_str(raw).unwrap();
        assert_eq!(row.tweet_id, "100");
        assert_eq!(row.thread_depth, 0);
        assert_eq!(row.thread_size, 1);
        assert_eq!(row.reply_child_count, 0);
    }

    #[test]
    fn stats_row_rejects_negative_ls_index() {
        let raw = r#"{"tweet_id": "100", "ls_index": -1, "thread_root_id": "100"}"#;
        assert!(serde_json::from_str::<NodeStats>(raw).is_err());
    }
}
