//! Core type definitions for link graphs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node identifier as it appears in the edge files.
///
/// A run is homogeneous: either every id is an integer (Wikidata Q-ids,
/// Wikipedia page ids) or every id is an opaque text token. The kind is
/// decided once per run by scanning the left-sorted file, see
/// [`EdgeSource::sniff_kind`](crate::io::EdgeSource::sniff_kind).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum NodeId {
    Integer(i64),
    Text(String),
}

impl NodeId {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NodeId::Integer(i) => Some(*i),
            NodeId::Text(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Integer(i) => write!(f, "{}", i),
            NodeId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Integer(id)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

/// How tokens are turned into [`NodeId`]s for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IdKind {
    #[default]
    Integer,
    Text,
}

impl IdKind {
    /// Kind needed to parse one edge's tokens. A run is integer only if
    /// every edge sniffs as integer.
    pub fn sniff(source: &str, target: &str) -> Self {
        if parse_integer(source).is_some() && parse_integer(target).is_some() {
            IdKind::Integer
        } else {
            IdKind::Text
        }
    }

    /// Parse one trimmed token. `None` means the token does not fit this kind.
    pub fn parse(self, token: &str) -> Option<NodeId> {
        match self {
            IdKind::Integer => parse_integer(token).map(NodeId::Integer),
            IdKind::Text => Some(NodeId::Text(token.to_string())),
        }
    }
}

/// Digit-only tokens that fit in an i64; signs are not digits.
fn parse_integer(token: &str) -> Option<i64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// One directed link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
