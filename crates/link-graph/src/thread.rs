//! Thread reconstruction: ancestor chain plus bounded descendant search
//! over the reply subgraph.

use crate::cache::DatasetGraph;
use link_types::{EdgeKind, NodeRef, ThreadResponse};
use std::collections::{HashMap, HashSet, VecDeque};

pub const DEFAULT_CHAIN_LIMIT: usize = 300;
pub const DEFAULT_DESC_LIMIT: usize = 3000;
/// Bound on the reply edges returned alongside a thread, to keep response
/// size sane for very large or very dense components.
pub const COMPONENT_EDGE_CAP: usize = 5000;

/// Reconstruct the conversation thread around `tweet_id`.
///
/// Reply edges are externally produced archival data and may contain cycles,
/// self-loops, and dangling references; traversal terminates on all of them
/// and never errors. An isolated post yields empty chain and descendants.
pub fn build_thread(
    graph: &DatasetGraph,
    tweet_id: &str,
    chain_limit: usize,
    desc_limit: usize,
) -> ThreadResponse {
    let reply_edges: Vec<_> = graph.edges_of_kind(EdgeKind::Reply).collect();
    if reply_edges.is_empty() {
        return ThreadResponse {
            tweet_id: tweet_id.to_string(),
            parent_chain: Vec::new(),
            descendants: Vec::new(),
            edges: Vec::new(),
        };
    }

    let ls_lookup = graph.ls_index_lookup();

    // Duplicate reply edges from one src disagree in noisy archives; the
    // last one wins, matching the snapshot build.
    let mut parent_of: HashMap<&str, &str> = HashMap::new();
    let mut children_of: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &reply_edges {
        parent_of.insert(&edge.src_tweet_id, &edge.dst_tweet_id);
        children_of
            .entry(&edge.dst_tweet_id)
            .or_default()
            .push(&edge.src_tweet_id);
    }

    let node_ref = |id: &str| NodeRef {
        tweet_id: id.to_string(),
        ls_index: ls_lookup.get(id).copied(),
    };

    // Ancestors, nearest parent first. The visited set is the cycle guard:
    // a previously seen id terminates the climb.
    let mut parent_chain = Vec::new();
    let mut seen_chain: HashSet<&str> = HashSet::from([tweet_id]);
    let mut current = tweet_id;
    while parent_chain.len() < chain_limit {
        let Some(&parent) = parent_of.get(current) else {
            break;
        };
        if !seen_chain.insert(parent) {
            break;
        }
        parent_chain.push(node_ref(parent));
        current = parent;
    }

    // Breadth-first descendants. Seeding the visited set with the start id
    // keeps self-loops from listing a post as its own descendant.
    let mut descendants = Vec::new();
    let mut seen_desc: HashSet<&str> = HashSet::from([tweet_id]);
    let mut queue: VecDeque<&str> = children_of
        .get(tweet_id)
        .map(|children| children.iter().copied().collect())
        .unwrap_or_default();
    while let Some(node) = queue.pop_front() {
        if descendants.len() >= desc_limit {
            break;
        }
        if !seen_desc.insert(node) {
            continue;
        }
        descendants.push(node_ref(node));
        if let Some(children) = children_of.get(node) {
            queue.extend(children.iter().copied());
        }
    }

    let mut component: HashSet<&str> = HashSet::from([tweet_id]);
    component.extend(parent_chain.iter().map(|n| n.tweet_id.as_str()));
    component.extend(descendants.iter().map(|n| n.tweet_id.as_str()));

    let edges = reply_edges
        .iter()
        .filter(|e| {
            component.contains(e.src_tweet_id.as_str())
                || component.contains(e.dst_tweet_id.as_str())
        })
        .take(COMPONENT_EDGE_CAP)
        .map(|e| (*e).clone())
        .collect();

    ThreadResponse {
        tweet_id: tweet_id.to_string(),
        parent_chain,
        descendants,
        edges,
    }
}
