//! Edge indexing module
//!
//! Turns the left-sorted edge file into the node table both iterators run on.

pub mod indexer;

pub use indexer::EdgeIndexer;
