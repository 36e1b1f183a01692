//! Edge row: a directed reply/quote relationship between two archived posts.

use serde::{Deserialize, Deserializer, Serialize};

/// Kind of relationship an edge encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Source post is a reply to the destination post.
    Reply,
    /// Source post quotes/cites the destination post.
    Quote,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Reply => "reply",
            EdgeKind::Quote => "quote",
        }
    }

    /// Lenient parse for values arriving over the wire ("Reply", " quote ", ...).
    pub fn parse(value: &str) -> Option<EdgeKind> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reply" => Some(EdgeKind::Reply),
            "quote" => Some(EdgeKind::Quote),
            _ => None,
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an edge was derived by the upstream build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Explicit structured field on the source post.
    NativeField,
    /// Extracted from a URL in the post body.
    UrlExtract,
    /// Heuristically inferred.
    Inferred,
}

/// A directed relationship between two posts.
///
/// `src` is the post that replies to / quotes `dst`. Index fields are the
/// endpoints' row positions in the loaded view; `None` marks an external
/// post. Archival exports stringify ids inconsistently (sometimes wide
/// integers), so id fields accept either representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub edge_id: Option<String>,
    pub edge_kind: EdgeKind,
    #[serde(deserialize_with = "de_id")]
    pub src_tweet_id: String,
    #[serde(deserialize_with = "de_id")]
    pub dst_tweet_id: String,
    #[serde(default, deserialize_with = "de_opt_index")]
    pub src_ls_index: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_index")]
    pub dst_ls_index: Option<u32>,
    #[serde(default)]
    pub internal_target: bool,
    pub provenance: Provenance,
    #[serde(default)]
    pub source_url: Option<String>,
}

impl Edge {
    /// Re-derive flags that must agree with the index fields.
    ///
    /// Stored rows can carry a stale `internal_target` (or a sentinel index
    /// already collapsed to `None`); the index is authoritative.
    pub fn normalize(&mut self) {
        self.internal_target = self.dst_ls_index.is_some();
        if let Some(ref url) = self.source_url {
            if url.is_empty() {
                self.source_url = None;
            }
        }
    }
}

/// Id value as found in snapshots: proper string or wide integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl IdRepr {
    fn into_string(self) -> String {
        match self {
            IdRepr::Text(s) => s,
            IdRepr::Unsigned(n) => n.to_string(),
            IdRepr::Signed(n) => n.to_string(),
        }
    }
}

pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    IdRepr::deserialize(deserializer).map(IdRepr::into_string)
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<IdRepr> = Option::deserialize(deserializer)?;
    Ok(value.map(IdRepr::into_string).filter(|s| !s.is_empty()))
}

/// Index value as found in snapshots: integer, float (parquet round trips),
/// or a negative sentinel standing in for "no value".
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexRepr {
    Int(i64),
    Float(f64),
}

impl IndexRepr {
    fn into_index(self) -> Option<u32> {
        match self {
            IndexRepr::Int(n) if n >= 0 => u32::try_from(n).ok(),
            IndexRepr::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
                Some(f as u32)
            }
            _ => None,
        }
    }
}

fn de_opt_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<IndexRepr> = Option::deserialize(deserializer)?;
    Ok(value.and_then(IndexRepr::into_index))
}

pub(crate) fn de_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = IndexRepr::deserialize(deserializer)?;
    value
        .into_index()
        .ok_or_else(|| serde::de::Error::custom("index must be a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_accepts_numeric_ids_and_sentinel_indices() {
        let raw = r#"{
            "edge_id": 42,
            "edge_kind": "reply",
            "src_tweet_id": 1234567890123456789,
            "dst_tweet_id": "200",
            "src_ls_index": 5.0,
            "dst_ls_index": -1,
            "internal_target": true,
            "provenance": "native_field",
            "source_url": null
        }"#;
        let mut edge: Edge = serde_json::from_str(raw).unwrap();
        edge.normalize();
        assert_eq!(edge.edge_id.as_deref(), Some("42"));
        assert_eq!(edge.src_tweet_id, "1234567890123456789");
        assert_eq!(edge.src_ls_index, Some(5));
        assert_eq!(edge.dst_ls_index, None);
        assert!(!edge.internal_target);
    }

    #[test]
    fn edge_kind_parse_is_lenient() {
        assert_eq!(EdgeKind::parse(" Reply "), Some(EdgeKind::Reply));
        assert_eq!(EdgeKind::parse("QUOTE"), Some(EdgeKind::Quote));
        assert_eq!(EdgeKind::parse("retweet"), None);
    }

    #[test]
    fn normalize_recomputes_internal_target_from_index() {
        let raw = r#"{
            "edge_kind": "quote",
            "src_tweet_id": "1",
            "dst_tweet_id": "2",
            "dst_ls_index": 7,
            "internal_target": false,
            "provenance": "url_extract",
            "source_url": ""
        }"#;
        let mut edge: Edge = serde_json::from_str(raw).unwrap();
        edge.normalize();
        assert!(edge.internal_target);
        assert_eq!(edge.source_url, None);
    }
}
