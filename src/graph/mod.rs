//! Link graph data model
//!
//! This module holds the pieces shared by the indexer and both iterators:
//! - Node ids, homogeneous per run (integer or text)
//! - The slot-indexed node table with out-degrees and double-buffered ranks
//! - CSR predecessor lists for the in-memory strategy

pub mod table;
pub mod types;

// Re-export main types
pub use table::{Adjacency, Layout, NodeTable, RankBuffers};
pub use types::{Edge, IdKind, NodeId};
